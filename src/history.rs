//! Attempt history - SQLite log of rehearsal outcomes
//!
//! Every completed or aborted recording can be written here, one row per
//! attempt, so progress across practice sessions is queryable with SQL
//! instead of scraping feedback text.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{Connection, params};
use tracing::warn;
use uuid::Uuid;

use crate::actions::Job;
use crate::feedback::Feedback;

/// Classification of one rehearsal attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Every captured action matched its slot
    Perfect,
    /// The walk realigned at least once
    Shifted,
    /// One or more substitutions, no realignment
    Mismatched,
    /// Stopped at the first mistake before the capture filled
    Aborted,
}

impl AttemptOutcome {
    /// Derive the outcome from a finished feedback value
    pub fn from_feedback(feedback: &Feedback, aborted: bool) -> Self {
        use crate::feedback::MessageKind;
        if aborted {
            AttemptOutcome::Aborted
        } else if feedback.of_kind(MessageKind::Info).next().is_some() {
            AttemptOutcome::Shifted
        } else if feedback.has_errors() {
            AttemptOutcome::Mismatched
        } else {
            AttemptOutcome::Perfect
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            AttemptOutcome::Perfect => "perfect",
            AttemptOutcome::Shifted => "shifted",
            AttemptOutcome::Mismatched => "mismatched",
            AttemptOutcome::Aborted => "aborted",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "perfect" => Some(AttemptOutcome::Perfect),
            "shifted" => Some(AttemptOutcome::Shifted),
            "mismatched" => Some(AttemptOutcome::Mismatched),
            "aborted" => Some(AttemptOutcome::Aborted),
            _ => None,
        }
    }
}

impl std::fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One stored attempt row
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    pub session_id: String,
    pub recorded_at: String,
    pub job: Job,
    pub opener_name: String,
    pub outcome: AttemptOutcome,
    pub feedback: Feedback,
}

/// SQLite-backed attempt log.
///
/// The connection is wrapped in a Mutex so the UI thread and the recording
/// callback can both write.
pub struct AttemptHistory {
    conn: Mutex<Connection>,
    session_id: String,
    enabled: bool,
}

impl AttemptHistory {
    /// Open (or create) the history database at `db_path`
    pub fn new(db_path: &Path) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(db_path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            session_id: Uuid::new_v4().to_string(),
            enabled: true,
        })
    }

    /// In-memory history (tests, headless runs)
    pub fn in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            session_id: Uuid::new_v4().to_string(),
            enabled: true,
        })
    }

    /// Disabled history (no-op writes)
    pub fn disabled() -> Self {
        let conn = Connection::open_in_memory().expect("Failed to create in-memory database");
        Self {
            conn: Mutex::new(conn),
            session_id: String::new(),
            enabled: false,
        }
    }

    /// Process-lifetime session id stamped on every row
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Record one attempt; returns the row id, or None when disabled or on
    /// write failure (logged, never fatal)
    pub fn record(
        &self,
        job: Job,
        opener_name: &str,
        outcome: AttemptOutcome,
        feedback: &Feedback,
    ) -> Option<i64> {
        if !self.enabled {
            return None;
        }

        let feedback_json = serde_json::to_string(feedback).ok()?;
        let recorded_at = chrono::Local::now().to_rfc3339();

        let conn = self.conn.lock().ok()?;
        let result = conn.execute(
            "INSERT INTO attempts (session_id, recorded_at, job, opener_name, outcome, feedback)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                self.session_id,
                recorded_at,
                job.abbrev(),
                opener_name,
                outcome.as_str(),
                feedback_json
            ],
        );

        match result {
            Ok(_) => Some(conn.last_insert_rowid()),
            Err(e) => {
                warn!("Failed to record attempt: {}", e);
                None
            }
        }
    }

    /// Most recent attempts, newest first
    pub fn recent(&self, limit: usize) -> Vec<AttemptRecord> {
        if !self.enabled {
            return Vec::new();
        }

        let conn = match self.conn.lock() {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };

        let mut stmt = match conn.prepare(
            "SELECT session_id, recorded_at, job, opener_name, outcome, feedback
             FROM attempts ORDER BY id DESC LIMIT ?1",
        ) {
            Ok(s) => s,
            Err(e) => {
                warn!("Failed to query attempts: {}", e);
                return Vec::new();
            }
        };

        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        });

        match rows {
            Ok(rows) => rows
                .filter_map(Result::ok)
                .filter_map(
                    |(session_id, recorded_at, job, opener_name, outcome, feedback)| {
                        Some(AttemptRecord {
                            session_id,
                            recorded_at,
                            job: Job::from_str(&job)?,
                            opener_name,
                            outcome: AttemptOutcome::parse(&outcome)?,
                            feedback: serde_json::from_str(&feedback).ok()?,
                        })
                    },
                )
                .collect(),
            Err(e) => {
                warn!("Failed to read attempts: {}", e);
                Vec::new()
            }
        }
    }

    /// Total number of recorded attempts
    pub fn count(&self) -> usize {
        if !self.enabled {
            return 0;
        }
        let Ok(conn) = self.conn.lock() else {
            return 0;
        };
        conn.query_row("SELECT COUNT(*) FROM attempts", [], |row| {
            row.get::<_, i64>(0)
        })
        .map(|n| n as usize)
        .unwrap_or(0)
    }
}

fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS attempts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id TEXT NOT NULL,
            recorded_at TEXT NOT NULL,
            job TEXT NOT NULL,
            opener_name TEXT NOT NULL,
            outcome TEXT NOT NULL,
            feedback TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_attempts_opener ON attempts(job, opener_name);",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::MessageKind;

    fn perfect_feedback() -> Feedback {
        let mut f = Feedback::new();
        f.add(MessageKind::Success, "Great job! Opener executed perfectly.");
        f
    }

    #[test]
    fn test_record_and_query() {
        let history = AttemptHistory::in_memory().unwrap();
        let id = history
            .record(Job::NIN, "Standard", AttemptOutcome::Perfect, &perfect_feedback())
            .unwrap();
        assert!(id > 0);
        assert_eq!(history.count(), 1);

        let recent = history.recent(10);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].job, Job::NIN);
        assert_eq!(recent[0].opener_name, "Standard");
        assert_eq!(recent[0].outcome, AttemptOutcome::Perfect);
        assert_eq!(recent[0].feedback, perfect_feedback());
        assert_eq!(recent[0].session_id, history.session_id());
    }

    #[test]
    fn test_recent_is_newest_first() {
        let history = AttemptHistory::in_memory().unwrap();
        history.record(Job::NIN, "first", AttemptOutcome::Mismatched, &Feedback::new());
        history.record(Job::NIN, "second", AttemptOutcome::Perfect, &Feedback::new());

        let recent = history.recent(1);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].opener_name, "second");
    }

    #[test]
    fn test_disabled_history_is_a_noop() {
        let history = AttemptHistory::disabled();
        assert!(
            history
                .record(Job::NIN, "x", AttemptOutcome::Perfect, &Feedback::new())
                .is_none()
        );
        assert_eq!(history.count(), 0);
        assert!(history.recent(10).is_empty());
    }

    #[test]
    fn test_outcome_from_feedback() {
        let mut shifted = Feedback::new();
        shifted.add(MessageKind::Error, "Difference in action 2");
        shifted.add(MessageKind::Info, "You shifted your opener by 1 action.");

        let mut mismatched = Feedback::new();
        mismatched.add(MessageKind::Error, "Difference in action 1");

        assert_eq!(
            AttemptOutcome::from_feedback(&perfect_feedback(), false),
            AttemptOutcome::Perfect
        );
        assert_eq!(
            AttemptOutcome::from_feedback(&shifted, false),
            AttemptOutcome::Shifted
        );
        assert_eq!(
            AttemptOutcome::from_feedback(&mismatched, false),
            AttemptOutcome::Mismatched
        );
        assert_eq!(
            AttemptOutcome::from_feedback(&mismatched, true),
            AttemptOutcome::Aborted
        );
    }
}
