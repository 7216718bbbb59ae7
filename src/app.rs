//! Command handlers.
//! Runs CLI subcommands against the database, including the interactive review loop.

use crate::browser;
use crate::cli::Commands;
use crate::config::Config;
use crate::database::db::{self, ProblemFilter};
use crate::error::{RecallError, Result};
use crate::export::json::{Catalog, export_json_to_path, import_json};
use crate::models::problem::{parse_tags, validate_difficulty};
use crate::models::sm2::{self, MIN_EASE_FACTOR};
use crate::models::{Problem, ProblemStats, ReviewSession};
use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use rusqlite::Connection;
use std::io::{BufRead, Write};
use std::path::Path;

const RULE: &str = "========================================";

/// Application state shared by all commands
pub struct App {
    conn: Connection,
    config: Config,
}

/// Formats a timestamp as a local date
fn format_date(time: DateTime<Utc>, format: &str) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format(format).to_string()
}

/// "Today", "Yesterday" or "3D ago"
fn days_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match (now - then).num_days() {
        days if days <= 0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        days => format!("{days}D ago"),
    }
}

/// Prints `message` and reads one line. `None` means the input is exhausted.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<Option<String>> {
    write!(out, "{message}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

impl App {
    pub fn new(conn: Connection, config: Config) -> Self {
        Self { conn, config }
    }

    #[cfg(test)]
    fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Runs one subcommand. `input` feeds the interactive prompts.
    pub fn run<R: BufRead, W: Write>(&self, command: Commands, input: &mut R, out: &mut W) -> Result<()> {
        log::info!("Running command: {:?}", command);
        match command {
            Commands::Add {
                name,
                difficulty,
                url,
                notes,
                tags,
                ease,
            } => self.add(
                &name,
                difficulty,
                url.unwrap_or_default(),
                notes.unwrap_or_default(),
                tags.as_deref(),
                ease,
                out,
            ),
            Commands::List { tag } => self.list(tag.as_deref(), out),
            Commands::Due => self.due(out),
            Commands::Review { name, open } => self.review(&name.join(" "), open, input, out),
            Commands::Edit {
                id,
                name,
                url,
                notes,
                difficulty,
                tags,
            } => self.edit(id, name, url, notes, difficulty, tags, out),
            Commands::Delete { id, force } => self.delete(id, force, input, out),
            Commands::Stats => self.stats(out),
            Commands::Overview => self.overview(out),
            Commands::History { name } => self.history(&name.join(" "), out),
            Commands::Tags => self.tags(out),
            Commands::Export { path } => self.export(&path, out),
            Commands::Import { path } => self.import(&path, out),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn add<W: Write>(
        &self,
        name: &str,
        difficulty: i32,
        url: String,
        notes: String,
        tags: Option<&str>,
        ease: Option<f64>,
        out: &mut W,
    ) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecallError::InvalidInput("problem name is empty".to_string()));
        }
        let difficulty = validate_difficulty(difficulty)?;

        let schedule = sm2::initialize(ease.or(Some(self.config.default_ease_factor)));
        let mut problem = Problem::new(name, difficulty, schedule);
        problem.url = url.trim().to_string();
        problem.notes = notes.trim().to_string();
        problem.tags = tags.map(parse_tags).unwrap_or_default();

        let id = db::add_problem(&problem, &self.conn)?;
        writeln!(
            out,
            "{} Added '{}' as #{} (Next review: {})",
            "✅".green(),
            name,
            id,
            format_date(problem.schedule.next_review, &self.config.date_format)
        )?;
        Ok(())
    }

    fn write_table<W: Write>(&self, problems: &[Problem], out: &mut W) -> Result<()> {
        let headers = ["ID", "Problem", "Diff", "Next Review", "Tags"];
        let rows: Vec<[String; 5]> = problems
            .iter()
            .map(|p| {
                [
                    p.id.to_string(),
                    p.name.clone(),
                    p.difficulty.to_string(),
                    format_date(p.schedule.next_review, &self.config.date_format),
                    p.tag_names().join(", "),
                ]
            })
            .collect();

        let mut widths = headers.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let underline = headers.map(|h| "-".repeat(h.chars().count()));
        let header_cells = headers.map(str::to_string);
        for row in std::iter::once(&header_cells)
            .chain(std::iter::once(&underline))
            .chain(rows.iter())
        {
            let line = row
                .iter()
                .zip(widths.iter())
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ");
            writeln!(out, "{}", line.trim_end())?;
        }
        Ok(())
    }

    fn list<W: Write>(&self, tag: Option<&str>, out: &mut W) -> Result<()> {
        let problems = db::list_problems(&ProblemFilter::all().with_tag(tag), &self.conn)?;
        if problems.is_empty() {
            writeln!(out, "No problems tracked yet. Add one with `recall add`.")?;
            return Ok(());
        }
        self.write_table(&problems, out)
    }

    fn due<W: Write>(&self, out: &mut W) -> Result<()> {
        let problems = db::list_problems(&ProblemFilter::due(Utc::now()), &self.conn)?;
        if problems.is_empty() {
            writeln!(out, "{} No problems due today! Good job.", "✅".green())?;
            return Ok(());
        }

        writeln!(out, "🔥 {} Problems due today:\n", problems.len())?;
        self.write_table(&problems, out)
    }

    fn review<R: BufRead, W: Write>(
        &self,
        name: &str,
        open: bool,
        input: &mut R,
        out: &mut W,
    ) -> Result<()> {
        let problems = if name.trim().is_empty() {
            db::list_problems(&ProblemFilter::due(Utc::now()), &self.conn)?
        } else {
            vec![db::get_problem(name.trim(), &self.conn)?]
        };

        if problems.is_empty() {
            writeln!(out, "{} No problems due for review today!", "✅".green())?;
            return Ok(());
        }

        let open = open || self.config.open_browser;
        let mut session = ReviewSession::new(problems);

        while let Some(problem) = session.current_problem() {
            writeln!(out, "\n{RULE}")?;
            writeln!(out, "{}", session.progress_message().bold())?;
            if !problem.url.is_empty() {
                writeln!(out, "URL: {}", problem.url)?;
            }
            if !problem.notes.is_empty() {
                writeln!(out, "Notes: {}", problem.notes)?;
            }
            writeln!(out, "{RULE}")?;

            match db::get_last_review(problem.id, &self.conn)? {
                Some(last) => writeln!(
                    out,
                    "Last reviewed: {} ({}) - Quality: {}",
                    format_date(last.reviewed_at, &self.config.date_format),
                    days_ago(last.reviewed_at, Utc::now()),
                    last.quality
                )?,
                None => writeln!(out, "Last reviewed: Never")?,
            }

            if open && !problem.url.is_empty() {
                writeln!(out, "🌐 Opening URL in browser...")?;
                if let Err(e) = browser::open_url(&problem.url, self.config.browser_command.as_deref()) {
                    log::warn!("Failed to open {}: {}", problem.url, e);
                    writeln!(out, "{} Failed to open browser: {}", "❌".red(), e)?;
                }
            }

            if prompt(input, out, "Press Enter to show quality prompt...\n")?.is_none() {
                break;
            }
            let Some(answer) =
                prompt(input, out, "Rate recall quality (0: Blackout -> 5: Perfect): ")?
            else {
                break;
            };

            let quality = match answer.parse::<i32>() {
                Ok(quality) => quality,
                Err(_) => {
                    writeln!(
                        out,
                        "{} Invalid input, skipping update for this problem.",
                        "⚠️".yellow()
                    )?;
                    session.skip();
                    continue;
                }
            };

            let note = prompt(input, out, "Add a note (optional): ")?.unwrap_or_default();

            let Some(outcome) = session.grade(quality, &note, Utc::now()) else {
                break;
            };

            if let Err(e) = db::update_schedule(outcome.problem.id, &outcome.problem.schedule, &self.conn) {
                log::warn!("Failed to update '{}': {}", outcome.problem.name, e);
                writeln!(out, "{} Error updating problem: {}", "❌".red(), e)?;
                continue;
            }

            if let Err(e) = db::add_review(&outcome.review, &self.conn) {
                log::warn!("Failed to save review of '{}': {}", outcome.problem.name, e);
                writeln!(out, "{} Failed to save review history: {}", "⚠️".yellow(), e)?;
            }

            writeln!(
                out,
                "{} Updated! Next review in {} days.",
                "✅".green(),
                outcome.problem.schedule.interval
            )?;
        }

        writeln!(out, "\n🎉 Review session complete! ({} graded, {} skipped)", session.graded, session.skipped)?;
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn edit<W: Write>(
        &self,
        id: i64,
        name: Option<String>,
        url: Option<String>,
        notes: Option<String>,
        difficulty: Option<i32>,
        tags: Option<String>,
        out: &mut W,
    ) -> Result<()> {
        let mut problem = db::get_problem_by_id(id, &self.conn)?;

        if let Some(name) = name {
            let name = name.trim();
            if name.is_empty() {
                return Err(RecallError::InvalidInput("problem name is empty".to_string()));
            }
            problem.name = name.to_string();
        }
        if let Some(url) = url {
            problem.url = url.trim().to_string();
        }
        if let Some(notes) = notes {
            problem.notes = notes.trim().to_string();
        }
        if let Some(difficulty) = difficulty {
            problem.difficulty = validate_difficulty(difficulty)?;
        }
        if let Some(tags) = tags {
            problem.tags = parse_tags(&tags);
        }

        db::update_details(&problem, &self.conn)?;
        writeln!(out, "{} Problem updated successfully!", "✅".green())?;
        Ok(())
    }

    fn delete<R: BufRead, W: Write>(&self, id: i64, force: bool, input: &mut R, out: &mut W) -> Result<()> {
        let problem = db::get_problem_by_id(id, &self.conn)?;

        if !force {
            let answer = prompt(
                input,
                out,
                &format!(
                    "⚠️  Are you sure you want to delete problem {} '{}'? (y/N): ",
                    id, problem.name
                ),
            )?
            .unwrap_or_default()
            .to_lowercase();

            if answer != "y" && answer != "yes" {
                writeln!(out, "{} Cancelled.", "❌".red())?;
                return Ok(());
            }
        }

        db::delete_problem(id, &self.conn)?;
        writeln!(out, "{} Problem deleted.", "✅".green())?;
        Ok(())
    }

    fn stats<W: Write>(&self, out: &mut W) -> Result<()> {
        let problems = db::list_problems(&ProblemFilter::all(), &self.conn)?;
        let stats = ProblemStats::from_problems(&problems, Utc::now());

        writeln!(out, "📊 Statistics")?;
        writeln!(out, "-------------")?;
        writeln!(out, "Total Problems:  {}", stats.total)?;
        writeln!(out, "Due Today:       {}", stats.due)?;
        writeln!(out, "Learning (<7d):  {}", stats.learning)?;
        writeln!(out, "Mastered (>30d): {}", stats.mastered)?;
        writeln!(out, "In Progress:     {}", stats.in_progress)?;
        Ok(())
    }

    fn overview<W: Write>(&self, out: &mut W) -> Result<()> {
        let stats = db::review_stats(Utc::now(), &self.conn)?;

        writeln!(out, "\n📊 Performance Overview")?;
        writeln!(out, "=======================")?;
        writeln!(out, "Total Reviews:      {}", stats.total_reviews)?;
        writeln!(out, "Reviews Last 7D:    {}", stats.reviews_last_7_days)?;
        writeln!(out, "Average Quality:    {:.2}", stats.average_quality)?;

        writeln!(out, "\n📈 Problem Distribution by Difficulty (1-5)")?;
        writeln!(out, "Difficulty  Count")?;
        writeln!(out, "----------  -----")?;
        for (i, count) in stats.count_by_difficulty.iter().enumerate() {
            let line = format!("{:<10}  {:<5}  {}", i + 1, count, "█".repeat(*count));
            writeln!(out, "{}", line.trim_end())?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn history<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let problem = db::get_problem(name.trim(), &self.conn)?;
        let reviews = db::reviews_for_problem(problem.id, &self.conn)?;

        writeln!(
            out,
            "{} (interval {}d, ease {:.2}, next review {})",
            problem.name.bold(),
            problem.schedule.interval,
            problem.schedule.ease_factor,
            format_date(problem.schedule.next_review, &self.config.date_format)
        )?;

        if reviews.is_empty() {
            writeln!(out, "No reviews yet.")?;
            return Ok(());
        }

        for review in &reviews {
            let mut line = format!(
                "{}  quality {}  → {}d (ease {:.2})",
                format_date(review.reviewed_at, &self.config.date_format),
                review.quality,
                review.interval,
                review.ease_factor
            );
            if !review.notes.is_empty() {
                line.push_str(&format!("  {}", review.notes));
            }
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    fn tags<W: Write>(&self, out: &mut W) -> Result<()> {
        let tags = db::list_tags(&self.conn)?;
        if tags.is_empty() {
            writeln!(out, "No tags yet.")?;
            return Ok(());
        }

        let width = tags.iter().map(|(t, _)| t.name.chars().count()).max().unwrap_or(0);
        for (tag, count) in tags {
            writeln!(out, "{:<width$}  {}", tag.name, count)?;
        }
        Ok(())
    }

    fn export<W: Write>(&self, path: &Path, out: &mut W) -> Result<()> {
        let problems = db::list_problems(&ProblemFilter::all(), &self.conn)?;
        let catalog = Catalog::new(problems);
        export_json_to_path(&catalog, path)?;

        writeln!(
            out,
            "{} Exported {} problems to '{}'",
            "✅".green(),
            catalog.problems.len(),
            path.display()
        )?;
        Ok(())
    }

    /// Adds every problem from the file whose name isn't tracked yet
    fn import<W: Write>(&self, path: &Path, out: &mut W) -> Result<()> {
        let catalog = import_json(path)?;
        let mut added = 0;
        let mut skipped = 0;

        for mut problem in catalog.problems {
            if validate_difficulty(problem.difficulty).is_err() || problem.name.trim().is_empty() {
                log::warn!("Skipping invalid problem '{}' in {}", problem.name, path.display());
                skipped += 1;
                continue;
            }

            problem.schedule.interval = problem.schedule.interval.max(1);
            problem.schedule.ease_factor = problem.schedule.ease_factor.max(MIN_EASE_FACTOR);

            match db::add_problem(&problem, &self.conn) {
                Ok(_) => added += 1,
                Err(RecallError::Duplicate(name)) => {
                    log::debug!("Skipping '{}', already tracked", name);
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        writeln!(
            out,
            "{} Imported {} problems from '{}' ({} skipped)",
            "✅".green(),
            added,
            path.display(),
            skipped
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule::add_calendar_days;
    use crate::models::sm2::INITIAL_EASE_FACTOR;
    use chrono::Duration;
    use std::io::Cursor;

    fn test_app() -> App {
        let conn = db::open_in_memory().unwrap();
        App::new(conn, Config::default())
    }

    fn run(app: &App, command: Commands, input: &str) -> Result<String> {
        let mut input = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        app.run(command, &mut input, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn add(app: &App, name: &str, difficulty: i32, tags: Option<&str>) -> String {
        run(
            app,
            Commands::Add {
                name: name.to_string(),
                difficulty,
                url: Some(format!("https://leetcode.com/problems/{}/", name.to_lowercase())),
                notes: None,
                tags: tags.map(str::to_string),
                ease: None,
            },
            "",
        )
        .unwrap()
    }

    /// Moves a problem's next review into the past so it shows up as due
    fn make_due(app: &App, name: &str) -> Problem {
        let mut problem = db::get_problem(name, app.connection()).unwrap();
        problem.schedule.next_review = Utc::now() - Duration::days(1);
        db::update_schedule(problem.id, &problem.schedule, app.connection()).unwrap();
        problem
    }

    #[test]
    fn test_add_initializes_schedule() {
        let app = test_app();
        let output = add(&app, "Two Sum", 2, Some("array, hashmap"));
        assert!(output.contains("Added 'Two Sum'"));

        let problem = db::get_problem("Two Sum", app.connection()).unwrap();
        assert_eq!(problem.schedule.interval, 1);
        assert_eq!(problem.schedule.ease_factor, INITIAL_EASE_FACTOR);
        assert_eq!(
            problem.schedule.next_review,
            add_calendar_days(problem.schedule.last_reviewed, 1, &Local)
        );
        assert_eq!(problem.tag_names(), vec!["array", "hashmap"]);
    }

    #[test]
    fn test_add_rejects_bad_difficulty() {
        let app = test_app();
        let result = run(
            &app,
            Commands::Add {
                name: "Two Sum".to_string(),
                difficulty: 9,
                url: None,
                notes: None,
                tags: None,
                ease: None,
            },
            "",
        );
        assert!(matches!(result, Err(RecallError::InvalidDifficulty(9))));
    }

    #[test]
    fn test_add_uses_configured_ease() {
        let conn = db::open_in_memory().unwrap();
        let config = Config {
            default_ease_factor: 2.1,
            ..Config::default()
        };
        let app = App::new(conn, config);
        add(&app, "Two Sum", 2, None);

        let problem = db::get_problem("Two Sum", app.connection()).unwrap();
        assert_eq!(problem.schedule.ease_factor, 2.1);
    }

    #[test]
    fn test_new_problem_not_due() {
        let app = test_app();
        add(&app, "Two Sum", 2, None);

        let output = run(&app, Commands::Due, "").unwrap();
        assert!(output.contains("No problems due today"));
    }

    #[test]
    fn test_list_shows_table() {
        let app = test_app();
        add(&app, "Two Sum", 2, Some("array"));
        add(&app, "Climbing Stairs", 1, Some("dp"));

        let output = run(&app, Commands::List { tag: None }, "").unwrap();
        assert!(output.starts_with("ID"));
        assert!(output.contains("Next Review"));
        assert!(output.contains("Two Sum"));
        assert!(output.contains("Climbing Stairs"));

        let output = run(
            &app,
            Commands::List {
                tag: Some("dp".to_string()),
            },
            "",
        )
        .unwrap();
        assert!(output.contains("Climbing Stairs"));
        assert!(!output.contains("Two Sum"));
    }

    #[test]
    fn test_review_due_problems() {
        let app = test_app();
        add(&app, "Two Sum", 2, None);
        add(&app, "Climbing Stairs", 1, None);
        make_due(&app, "Two Sum");

        let output = run(
            &app,
            Commands::Review {
                name: Vec::new(),
                open: false,
            },
            "\n4\nhashmap trick\n",
        )
        .unwrap();

        assert!(output.contains("Reviewing [1/1]: Two Sum"));
        assert!(output.contains("Last reviewed: Never"));
        assert!(output.contains("Next review in 6 days"));

        let problem = db::get_problem("Two Sum", app.connection()).unwrap();
        assert_eq!(problem.schedule.interval, 6);
        assert!(!problem.schedule.is_due(Utc::now()));

        let history = db::reviews_for_problem(problem.id, app.connection()).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].quality, 4);
        assert_eq!(history[0].notes, "hashmap trick");
        assert_eq!(history[0].interval, 6);

        let untouched = db::get_problem("Climbing Stairs", app.connection()).unwrap();
        assert!(db::reviews_for_problem(untouched.id, app.connection()).unwrap().is_empty());
    }

    #[test]
    fn test_review_by_name_clamps_quality() {
        let app = test_app();
        add(&app, "Two Sum", 2, None);

        let output = run(
            &app,
            Commands::Review {
                name: vec!["Two".to_string(), "Sum".to_string()],
                open: false,
            },
            "\n9\n\n",
        )
        .unwrap();
        assert!(output.contains("Updated!"));

        let problem = db::get_problem("Two Sum", app.connection()).unwrap();
        assert!((problem.schedule.ease_factor - 2.6).abs() < 1e-9);

        let last = db::get_last_review(problem.id, app.connection()).unwrap().unwrap();
        assert_eq!(last.quality, 5);
    }

    #[test]
    fn test_review_skips_non_numeric_quality() {
        let app = test_app();
        add(&app, "Two Sum", 2, None);
        let before = db::get_problem("Two Sum", app.connection()).unwrap();

        let output = run(
            &app,
            Commands::Review {
                name: vec!["Two Sum".to_string()],
                open: false,
            },
            "\nfour\n",
        )
        .unwrap();
        assert!(output.contains("Invalid input, skipping"));
        assert!(output.contains("0 graded, 1 skipped"));

        let after = db::get_problem("Two Sum", app.connection()).unwrap();
        assert_eq!(after.schedule, before.schedule);
        assert!(db::get_last_review(after.id, app.connection()).unwrap().is_none());
    }

    #[test]
    fn test_review_stops_at_end_of_input() {
        let app = test_app();
        add(&app, "Two Sum", 2, None);
        make_due(&app, "Two Sum");

        let output = run(
            &app,
            Commands::Review {
                name: Vec::new(),
                open: false,
            },
            "",
        )
        .unwrap();
        assert!(output.contains("0 graded, 0 skipped"));
    }

    #[test]
    fn test_review_unknown_name() {
        let app = test_app();
        let result = run(
            &app,
            Commands::Review {
                name: vec!["Nope".to_string()],
                open: false,
            },
            "",
        );
        assert!(matches!(result, Err(RecallError::NotFound(_))));
    }

    #[test]
    fn test_review_nothing_due() {
        let app = test_app();
        let output = run(
            &app,
            Commands::Review {
                name: Vec::new(),
                open: false,
            },
            "",
        )
        .unwrap();
        assert!(output.contains("No problems due for review today"));
    }

    #[test]
    fn test_edit_changes_only_given_fields() {
        let app = test_app();
        add(&app, "Two Sum", 2, Some("array"));
        let before = db::get_problem("Two Sum", app.connection()).unwrap();

        run(
            &app,
            Commands::Edit {
                id: before.id,
                name: None,
                url: None,
                notes: Some("use a map".to_string()),
                difficulty: Some(3),
                tags: Some("hashmap, array".to_string()),
            },
            "",
        )
        .unwrap();

        let after = db::get_problem_by_id(before.id, app.connection()).unwrap();
        assert_eq!(after.name, "Two Sum");
        assert_eq!(after.url, before.url);
        assert_eq!(after.notes, "use a map");
        assert_eq!(after.difficulty, 3);
        assert_eq!(after.tag_names(), vec!["array", "hashmap"]);
        assert_eq!(after.schedule, before.schedule);
    }

    #[test]
    fn test_edit_rejects_bad_difficulty() {
        let app = test_app();
        add(&app, "Two Sum", 2, None);
        let problem = db::get_problem("Two Sum", app.connection()).unwrap();

        let result = run(
            &app,
            Commands::Edit {
                id: problem.id,
                name: None,
                url: None,
                notes: None,
                difficulty: Some(0),
                tags: None,
            },
            "",
        );
        assert!(matches!(result, Err(RecallError::InvalidDifficulty(0))));
    }

    #[test]
    fn test_delete_with_confirmation() {
        let app = test_app();
        add(&app, "Two Sum", 2, None);
        let problem = db::get_problem("Two Sum", app.connection()).unwrap();

        let output = run(
            &app,
            Commands::Delete {
                id: problem.id,
                force: false,
            },
            "n\n",
        )
        .unwrap();
        assert!(output.contains("Cancelled"));
        assert!(db::get_problem_by_id(problem.id, app.connection()).is_ok());

        let output = run(
            &app,
            Commands::Delete {
                id: problem.id,
                force: false,
            },
            "YES\n",
        )
        .unwrap();
        assert!(output.contains("Problem deleted"));
        assert!(db::get_problem_by_id(problem.id, app.connection()).is_err());
    }

    #[test]
    fn test_delete_forced() {
        let app = test_app();
        add(&app, "Two Sum", 2, None);
        let problem = db::get_problem("Two Sum", app.connection()).unwrap();

        run(
            &app,
            Commands::Delete {
                id: problem.id,
                force: true,
            },
            "",
        )
        .unwrap();
        assert!(db::get_problem_by_id(problem.id, app.connection()).is_err());
    }

    #[test]
    fn test_stats_and_overview() {
        let app = test_app();
        add(&app, "Two Sum", 1, None);
        add(&app, "LRU Cache", 4, None);
        make_due(&app, "Two Sum");

        let output = run(&app, Commands::Stats, "").unwrap();
        assert!(output.contains("Total Problems:  2"));
        assert!(output.contains("Due Today:       1"));
        assert!(output.contains("Learning (<7d):  2"));

        run(
            &app,
            Commands::Review {
                name: Vec::new(),
                open: false,
            },
            "\n3\n\n",
        )
        .unwrap();

        let output = run(&app, Commands::Overview, "").unwrap();
        assert!(output.contains("Total Reviews:      1"));
        assert!(output.contains("Average Quality:    3.00"));
        assert!(output.contains("1           1      █"));
    }

    #[test]
    fn test_history_and_tags() {
        let app = test_app();
        add(&app, "Two Sum", 2, Some("array"));

        let output = run(
            &app,
            Commands::History {
                name: vec!["Two Sum".to_string()],
            },
            "",
        )
        .unwrap();
        assert!(output.contains("No reviews yet"));

        let output = run(&app, Commands::Tags, "").unwrap();
        assert!(output.contains("array  1"));
    }

    #[test]
    fn test_export_and_import_between_databases() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let source = test_app();
        add(&source, "Two Sum", 2, Some("array"));
        add(&source, "Climbing Stairs", 1, Some("dp"));
        let output = run(&source, Commands::Export { path: path.clone() }, "").unwrap();
        assert!(output.contains("Exported 2 problems"));

        let target = test_app();
        add(&target, "Two Sum", 5, None);
        let output = run(&target, Commands::Import { path }, "").unwrap();
        assert!(output.contains("Imported 1 problems"));
        assert!(output.contains("1 skipped"));

        let stairs = db::get_problem("Climbing Stairs", target.connection()).unwrap();
        assert_eq!(stairs.tag_names(), vec!["dp"]);
        // Existing problems are left as they were
        let two_sum = db::get_problem("Two Sum", target.connection()).unwrap();
        assert_eq!(two_sum.difficulty, 5);
    }

    #[test]
    fn test_days_ago() {
        let now = Utc::now();
        assert_eq!(days_ago(now, now), "Today");
        assert_eq!(days_ago(now - Duration::days(1), now), "Yesterday");
        assert_eq!(days_ago(now - Duration::days(4), now), "4D ago");
    }
}
