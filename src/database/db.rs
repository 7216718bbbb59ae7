//! Database operations for recall
//!
//! Handles SQLite database initialization, CRUD operations for problems and tags,
//! schedule write-back and the review history log.

use crate::error::{RecallError, Result};
use crate::models::schedule::due_cutoff_in;
use crate::models::{Problem, Review, ReviewStats, ScheduleState, Tag};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params};
use std::fs;
use std::path::Path;

const PROBLEM_COLUMNS: &str = "p.id, p.name, p.url, p.notes, p.difficulty, p.interval, \
     p.ease_factor, p.last_reviewed, p.next_review";

const REVIEW_COLUMNS: &str = "id, problem_id, quality, reviewed_at, notes, interval, ease_factor";

/// Which problems `list_problems` returns
#[derive(Clone, Debug, Default)]
pub struct ProblemFilter {
    /// Only problems whose next review is before this instant
    pub due_before: Option<DateTime<Utc>>,
    /// Only problems carrying this tag
    pub tag: Option<String>,
}

impl ProblemFilter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Problems due on or before the local day of `now`
    pub fn due(now: DateTime<Utc>) -> Self {
        Self::due_in(now, &Local)
    }

    pub fn due_in<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> Self {
        Self {
            due_before: Some(due_cutoff_in(now, tz)),
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: Option<&str>) -> Self {
        self.tag = tag.map(|t| t.trim().to_string());
        self
    }
}

/// Opens the SQLite database at `path`, creating its directory and tables as needed
pub fn init_database(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    log::debug!("Opened database at {}", path.display());
    Ok(conn)
}

/// In-memory database with the full schema
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS problems (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT UNIQUE NOT NULL,
            url TEXT,
            notes TEXT,
            difficulty INTEGER NOT NULL,
            interval INTEGER NOT NULL DEFAULT 1,
            ease_factor REAL NOT NULL DEFAULT 2.5,
            last_reviewed INTEGER NOT NULL,
            next_review INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS tags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT UNIQUE NOT NULL
        );

        CREATE TABLE IF NOT EXISTS problem_tags (
            problem_id INTEGER NOT NULL,
            tag_id INTEGER NOT NULL,
            PRIMARY KEY (problem_id, tag_id),
            FOREIGN KEY (problem_id) REFERENCES problems(id) ON DELETE CASCADE,
            FOREIGN KEY (tag_id) REFERENCES tags(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS reviews (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            problem_id INTEGER NOT NULL,
            quality INTEGER NOT NULL,
            reviewed_at INTEGER NOT NULL,
            notes TEXT,
            interval INTEGER NOT NULL,
            ease_factor REAL NOT NULL,
            FOREIGN KEY (problem_id) REFERENCES problems(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_reviews_problem ON reviews(problem_id, reviewed_at);",
    )?;
    Ok(())
}

fn timestamp_at(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let secs: i64 = row.get(idx)?;
    DateTime::from_timestamp(secs, 0).ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, secs))
}

fn problem_from_row(row: &Row) -> rusqlite::Result<Problem> {
    Ok(Problem {
        id: row.get(0)?,
        name: row.get(1)?,
        url: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        notes: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        difficulty: row.get(4)?,
        schedule: ScheduleState {
            interval: row.get(5)?,
            ease_factor: row.get(6)?,
            last_reviewed: timestamp_at(row, 7)?,
            next_review: timestamp_at(row, 8)?,
        },
        tags: Vec::new(),
    })
}

fn review_from_row(row: &Row) -> rusqlite::Result<Review> {
    Ok(Review {
        id: row.get(0)?,
        problem_id: row.get(1)?,
        quality: row.get(2)?,
        reviewed_at: timestamp_at(row, 3)?,
        notes: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        interval: row.get(5)?,
        ease_factor: row.get(6)?,
    })
}

/// Unique-constraint failures become `Duplicate`, everything else stays a database error
fn map_conflict(err: rusqlite::Error, name: &str) -> RecallError {
    match err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
            RecallError::Duplicate(name.to_string())
        }
        other => RecallError::Database(other),
    }
}

/// Stores a new problem with its initial schedule and tags
///
/// Returns the problem ID. A problem with the same name is rejected as `Duplicate`.
pub fn add_problem(problem: &Problem, conn: &Connection) -> Result<i64> {
    let tx = conn.unchecked_transaction()?;

    tx.execute(
        "INSERT INTO problems (name, url, notes, difficulty, interval, ease_factor, last_reviewed, next_review)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            problem.name,
            problem.url,
            problem.notes,
            problem.difficulty,
            problem.schedule.interval,
            problem.schedule.ease_factor,
            problem.schedule.last_reviewed.timestamp(),
            problem.schedule.next_review.timestamp()
        ],
    )
    .map_err(|e| map_conflict(e, &problem.name))?;

    let problem_id = tx.last_insert_rowid();
    for tag in &problem.tags {
        link_tag(problem_id, &tag.name, &tx)?;
    }

    tx.commit()?;
    log::debug!("Added problem '{}' with id {}", problem.name, problem_id);
    Ok(problem_id)
}

fn link_tag(problem_id: i64, tag_name: &str, conn: &Connection) -> Result<()> {
    let tag_name = tag_name.trim();
    if tag_name.is_empty() {
        return Ok(());
    }

    conn.execute("INSERT OR IGNORE INTO tags (name) VALUES (?1)", params![tag_name])?;

    let tag_id: i64 = conn.query_row(
        "SELECT id FROM tags WHERE name = ?1",
        params![tag_name],
        |row| row.get(0),
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO problem_tags (problem_id, tag_id) VALUES (?1, ?2)",
        params![problem_id, tag_id],
    )?;
    Ok(())
}

fn tags_for_problem(problem_id: i64, conn: &Connection) -> Result<Vec<Tag>> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.name
         FROM tags t
         JOIN problem_tags pt ON t.id = pt.tag_id
         WHERE pt.problem_id = ?1
         ORDER BY t.name",
    )?;

    let tags = stmt
        .query_map(params![problem_id], |row| {
            Ok(Tag {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<Tag>>>()?;
    Ok(tags)
}

fn with_tags(mut problem: Problem, conn: &Connection) -> Result<Problem> {
    problem.tags = tags_for_problem(problem.id, conn)?;
    Ok(problem)
}

/// Looks a problem up by its exact name
pub fn get_problem(name: &str, conn: &Connection) -> Result<Problem> {
    let problem = conn
        .query_row(
            &format!("SELECT {PROBLEM_COLUMNS} FROM problems p WHERE p.name = ?1"),
            params![name],
            problem_from_row,
        )
        .optional()?
        .ok_or_else(|| RecallError::NotFound(name.to_string()))?;

    with_tags(problem, conn)
}

pub fn get_problem_by_id(id: i64, conn: &Connection) -> Result<Problem> {
    let problem = conn
        .query_row(
            &format!("SELECT {PROBLEM_COLUMNS} FROM problems p WHERE p.id = ?1"),
            params![id],
            problem_from_row,
        )
        .optional()?
        .ok_or_else(|| RecallError::NotFound(format!("id {id}")))?;

    with_tags(problem, conn)
}

/// Writes back the schedule of a problem after a review
pub fn update_schedule(problem_id: i64, schedule: &ScheduleState, conn: &Connection) -> Result<()> {
    let changed = conn.execute(
        "UPDATE problems
         SET interval = ?1, ease_factor = ?2, last_reviewed = ?3, next_review = ?4
         WHERE id = ?5",
        params![
            schedule.interval,
            schedule.ease_factor,
            schedule.last_reviewed.timestamp(),
            schedule.next_review.timestamp(),
            problem_id
        ],
    )?;

    if changed == 0 {
        return Err(RecallError::NotFound(format!("id {problem_id}")));
    }
    Ok(())
}

/// Updates name, url, notes and difficulty, and replaces the tag set.
/// The schedule is left alone.
pub fn update_details(problem: &Problem, conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;

    let changed = tx
        .execute(
            "UPDATE problems SET name = ?1, url = ?2, notes = ?3, difficulty = ?4 WHERE id = ?5",
            params![
                problem.name,
                problem.url,
                problem.notes,
                problem.difficulty,
                problem.id
            ],
        )
        .map_err(|e| map_conflict(e, &problem.name))?;

    if changed == 0 {
        return Err(RecallError::NotFound(format!("id {}", problem.id)));
    }

    tx.execute(
        "DELETE FROM problem_tags WHERE problem_id = ?1",
        params![problem.id],
    )?;
    for tag in &problem.tags {
        link_tag(problem.id, &tag.name, &tx)?;
    }

    tx.commit()?;
    Ok(())
}

/// Deletes a problem together with its tag links and review history
pub fn delete_problem(problem_id: i64, conn: &Connection) -> Result<()> {
    let changed = conn.execute("DELETE FROM problems WHERE id = ?1", params![problem_id])?;
    if changed == 0 {
        return Err(RecallError::NotFound(format!("id {problem_id}")));
    }
    log::debug!("Deleted problem {}", problem_id);
    Ok(())
}

/// Retrieves problems matching `filter`, soonest review first
pub fn list_problems(filter: &ProblemFilter, conn: &Connection) -> Result<Vec<Problem>> {
    let cutoff = filter.due_before.map(|cutoff| cutoff.timestamp());

    let mut stmt = conn.prepare(&format!(
        "SELECT {PROBLEM_COLUMNS}
         FROM problems p
         WHERE (?1 IS NULL OR p.next_review < ?1)
           AND (?2 IS NULL OR EXISTS (
                SELECT 1 FROM problem_tags pt
                JOIN tags t ON t.id = pt.tag_id
                WHERE pt.problem_id = p.id AND t.name = ?2))
         ORDER BY p.next_review ASC, p.id ASC"
    ))?;

    let problems = stmt
        .query_map(params![cutoff, filter.tag], problem_from_row)?
        .collect::<rusqlite::Result<Vec<Problem>>>()?;

    problems
        .into_iter()
        .map(|problem| with_tags(problem, conn))
        .collect()
}

/// Appends an entry to the review log
pub fn add_review(review: &Review, conn: &Connection) -> Result<i64> {
    conn.execute(
        "INSERT INTO reviews (problem_id, quality, reviewed_at, notes, interval, ease_factor)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            review.problem_id,
            review.quality,
            review.reviewed_at.timestamp(),
            review.notes,
            review.interval,
            review.ease_factor
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_last_review(problem_id: i64, conn: &Connection) -> Result<Option<Review>> {
    let review = conn
        .query_row(
            &format!(
                "SELECT {REVIEW_COLUMNS} FROM reviews
                 WHERE problem_id = ?1
                 ORDER BY reviewed_at DESC, id DESC
                 LIMIT 1"
            ),
            params![problem_id],
            review_from_row,
        )
        .optional()?;
    Ok(review)
}

/// Full review history of a problem, newest first
pub fn reviews_for_problem(problem_id: i64, conn: &Connection) -> Result<Vec<Review>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {REVIEW_COLUMNS} FROM reviews
         WHERE problem_id = ?1
         ORDER BY reviewed_at DESC, id DESC"
    ))?;

    let reviews = stmt
        .query_map(params![problem_id], review_from_row)?
        .collect::<rusqlite::Result<Vec<Review>>>()?;
    Ok(reviews)
}

pub fn review_stats(now: DateTime<Utc>, conn: &Connection) -> Result<ReviewStats> {
    let week_ago = (now - Duration::days(7)).timestamp();

    let (total_reviews, reviews_last_7_days, average_quality): (i64, i64, Option<f64>) = conn
        .query_row(
            "SELECT COUNT(*),
                    COALESCE(SUM(CASE WHEN reviewed_at >= ?1 THEN 1 ELSE 0 END), 0),
                    AVG(quality)
             FROM reviews",
            params![week_ago],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

    let mut count_by_difficulty = [0usize; 5];
    let mut stmt = conn.prepare("SELECT difficulty, COUNT(*) FROM problems GROUP BY difficulty")?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, i32>(0)?, row.get::<_, i64>(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    for (difficulty, count) in rows {
        if (1..=5).contains(&difficulty) {
            count_by_difficulty[(difficulty - 1) as usize] = count as usize;
        }
    }

    Ok(ReviewStats {
        total_reviews: total_reviews as usize,
        reviews_last_7_days: reviews_last_7_days as usize,
        average_quality: average_quality.unwrap_or(0.0),
        count_by_difficulty,
    })
}

/// All tags with the number of problems using them
pub fn list_tags(conn: &Connection) -> Result<Vec<(Tag, usize)>> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.name, COUNT(pt.problem_id)
         FROM tags t
         LEFT JOIN problem_tags pt ON t.id = pt.tag_id
         GROUP BY t.id, t.name
         ORDER BY t.name",
    )?;

    let tags = stmt
        .query_map([], |row| {
            Ok((
                Tag {
                    id: row.get(0)?,
                    name: row.get(1)?,
                },
                row.get::<_, i64>(2)? as usize,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(tags)
}
