//! # lab-sandbox
//!
//! Request-scoped SQL execution against an ephemeral in-memory `DuckDB`.
//!
//! Each call to [`run_query`] opens a brand-new database, loads the fixed
//! `tasks` demonstration dataset, runs the caller's statement verbatim, and
//! closes the database before returning. Nothing survives between calls.
//!
//! ## Pipeline
//!
//! ```text
//! open -> seed -> query -> close
//!          \________\_____> close (on error too)
//! ```
//!
//! Release is tied to [`EphemeralDatabase`]'s drop, so it also happens on
//! unwinding. [`SandboxProbe`] counts opens and releases for leak checks.

pub mod database;
pub mod error;
pub mod probe;
pub mod seed;
pub mod value;

pub use database::EphemeralDatabase;
pub use error::{EMPTY_QUERY_MESSAGE, SandboxError};
pub use probe::SandboxProbe;

use std::sync::Arc;

use lab_config::SandboxConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tracing::warn;

/// A shaped result set: rows as column-name maps plus the first row's keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOutcome {
    /// Keys of the first row, in order. Empty when there are no rows.
    pub columns: Vec<String>,
    /// Every row returned by the statement, in engine order.
    pub result: Vec<Map<String, JsonValue>>,
}

impl QueryOutcome {
    /// Build an outcome, deriving `columns` from the first row.
    #[must_use]
    pub fn from_rows(rows: Vec<Map<String, JsonValue>>) -> Self {
        let columns = rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();
        Self {
            columns,
            result: rows,
        }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.result.len()
    }
}

/// Run one statement in a fresh, seeded, in-memory database.
///
/// The database is closed before this returns, whatever the outcome.
///
/// # Errors
///
/// Returns the [`SandboxError`] of the first phase that failed. A close
/// failure after a successful query is logged, not returned.
pub fn run_query(
    sql: &str,
    config: &SandboxConfig,
    probe: &Arc<SandboxProbe>,
) -> Result<QueryOutcome, SandboxError> {
    let db = EphemeralDatabase::open(config, Arc::clone(probe))?;

    let outcome = db.seed().and_then(|()| db.query(sql));

    if let Err(error) = db.close() {
        warn!(%error, "ephemeral database did not close cleanly");
    }

    outcome
}
