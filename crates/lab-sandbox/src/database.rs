//! Request-scoped in-memory `DuckDB` instance.

use std::sync::Arc;

use duckdb::types::Value;
use duckdb::{Config, Connection, Statement};
use lab_config::SandboxConfig;
use serde_json::Map;
use tracing::debug;

use crate::probe::SandboxProbe;
use crate::{QueryOutcome, SandboxError, seed, value};

/// An in-memory database and its connection, owned by exactly one request.
///
/// Dropping the value closes the connection and releases the database on
/// every exit path, including unwinding. [`EphemeralDatabase::close`] does the
/// same but reports close errors.
pub struct EphemeralDatabase {
    // Field order matters: `conn` drops (and closes) before `release` records it.
    conn: Connection,
    release: ReleaseGuard,
}

impl EphemeralDatabase {
    /// Create a fresh in-memory database configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::Configure`] if a setting is rejected, or
    /// [`SandboxError::Open`] if the engine cannot create the database.
    pub fn open(config: &SandboxConfig, probe: Arc<SandboxProbe>) -> Result<Self, SandboxError> {
        let flags = engine_config(config)?;
        let conn = Connection::open_in_memory_with_flags(flags).map_err(SandboxError::Open)?;

        probe.record_open();
        debug!(live = probe.live(), "opened ephemeral database");

        Ok(Self {
            conn,
            release: ReleaseGuard(probe),
        })
    }

    /// Create the `tasks` table and insert the seed rows.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::Seed`] if the batch fails.
    pub fn seed(&self) -> Result<(), SandboxError> {
        self.conn
            .execute_batch(seed::SEED_SQL)
            .map_err(SandboxError::Seed)
    }

    /// Execute `sql` verbatim and collect every row it returns.
    ///
    /// DDL and DML are allowed; their engine-reported result rows (if any)
    /// are returned like any other result set.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::EmptyQuery`] if `sql` holds no statement text,
    /// or [`SandboxError::Query`] if the statement fails to prepare, execute,
    /// or fetch.
    pub fn query(&self, sql: &str) -> Result<QueryOutcome, SandboxError> {
        if is_blank(sql) {
            return Err(SandboxError::EmptyQuery);
        }

        let mut stmt = self.conn.prepare(sql).map_err(SandboxError::Query)?;
        let mut rows = stmt.query([]).map_err(SandboxError::Query)?;
        let names = rows
            .as_ref()
            .map(Statement::column_names)
            .unwrap_or_default();

        let mut records = Vec::new();
        while let Some(row) = rows.next().map_err(SandboxError::Query)? {
            let mut record = Map::with_capacity(names.len());
            for (i, name) in names.iter().enumerate() {
                let cell: Value = row.get(i).map_err(SandboxError::Query)?;
                record.insert(name.clone(), value::to_json(&cell));
            }
            records.push(record);
        }

        Ok(QueryOutcome::from_rows(records))
    }

    /// Access the underlying connection.
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Close the connection and release the database.
    ///
    /// The release is recorded even when closing fails.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::Close`] if the engine reports a close failure.
    pub fn close(self) -> Result<(), SandboxError> {
        let Self { conn, release } = self;
        let closed = conn.close().map_err(|(_, e)| SandboxError::Close(e));
        drop(release);
        closed
    }
}

/// Records the release on the probe when dropped.
struct ReleaseGuard(Arc<SandboxProbe>);

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.0.record_release();
        debug!(live = self.0.live(), "released ephemeral database");
    }
}

/// Whitespace and bare `;` separators carry no statement.
fn is_blank(sql: &str) -> bool {
    sql.chars().all(|c| c.is_whitespace() || c == ';')
}

fn engine_config(config: &SandboxConfig) -> Result<Config, SandboxError> {
    let mut engine = Config::default()
        .enable_external_access(config.allow_external_access)
        .map_err(SandboxError::Configure)?;

    if let Some(threads) = config.threads {
        engine = engine
            .threads(i64::from(threads))
            .map_err(SandboxError::Configure)?;
    }
    if let Some(limit) = &config.memory_limit {
        engine = engine.max_memory(limit).map_err(SandboxError::Configure)?;
    }

    Ok(engine)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty("", true)]
    #[case::whitespace(" \n\t ", true)]
    #[case::separators(" ; ;", true)]
    #[case::statement("SELECT 1", false)]
    #[case::padded_statement("  SELECT 1;  ", false)]
    fn blank_sql(#[case] sql: &str, #[case] blank: bool) {
        assert_eq!(is_blank(sql), blank);
    }
}
