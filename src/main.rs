use clap::{CommandFactory, Parser};
use colored::Colorize;
use eyre::{Context, Result};
use log::{LevelFilter, info, warn};
use recall::app::App;
use recall::cli::Cli;
use recall::config::Config;
use recall::database::db::init_database;
use std::fs;
use std::io;
use std::path::Path;

fn setup_logging(log_file: &Path, verbose: bool) -> Result<()> {
    if let Some(dir) = log_file.parent() {
        fs::create_dir_all(dir).context("Failed to create data directory")?;
    }

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .context("Failed to open log file")?,
    );

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_warnings) = Config::load(cli.config.as_ref(), cli.data_dir.as_ref())
        .context("Failed to load configuration")?;

    setup_logging(&config.log_path(), cli.verbose).context("Failed to setup logging")?;

    for message in &config_warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), message);
        warn!("{}", message);
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let database_path = config.database_path();
    let conn = init_database(&database_path)
        .with_context(|| format!("Failed to open database at {}", database_path.display()))?;
    info!("Using database at {}", database_path.display());

    let app = App::new(conn, config);
    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    app.run(command, &mut input, &mut out).context("Command failed")?;

    Ok(())
}
