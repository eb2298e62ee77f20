//! Sandbox error types.

/// Reported for an empty or whitespace-only query.
pub const EMPTY_QUERY_MESSAGE: &str = "query is empty: expected a SQL statement";

/// Errors raised while running a statement in an ephemeral database.
///
/// Engine-backed variants wrap the engine error unchanged so callers can
/// surface [`SandboxError::engine_message`] verbatim.
#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    /// An engine setting from [`lab_config::SandboxConfig`] was rejected.
    #[error("invalid engine setting: {0}")]
    Configure(#[source] duckdb::Error),

    /// The in-memory database could not be created.
    #[error("failed to open in-memory database: {0}")]
    Open(#[source] duckdb::Error),

    /// The seed schema batch failed.
    #[error("seed initialization failed: {0}")]
    Seed(#[source] duckdb::Error),

    /// The caller's query contained no statement text.
    #[error("query failed: {}", EMPTY_QUERY_MESSAGE)]
    EmptyQuery,

    /// The caller's statement failed to prepare, execute, or fetch.
    #[error("query failed: {0}")]
    Query(#[source] duckdb::Error),

    /// Closing the connection reported an error.
    #[error("failed to close database: {0}")]
    Close(#[source] duckdb::Error),
}

impl SandboxError {
    /// The underlying engine message, without the phase prefix.
    #[must_use]
    pub fn engine_message(&self) -> String {
        match self {
            Self::Configure(e) | Self::Open(e) | Self::Seed(e) | Self::Query(e) | Self::Close(e) => {
                e.to_string()
            }
            Self::EmptyQuery => EMPTY_QUERY_MESSAGE.to_owned(),
        }
    }

    /// Short name of the pipeline phase that failed, for log fields.
    #[must_use]
    pub const fn phase(&self) -> &'static str {
        match self {
            Self::Configure(_) => "configure",
            Self::Open(_) => "open",
            Self::Seed(_) => "seed",
            Self::EmptyQuery | Self::Query(_) => "query",
            Self::Close(_) => "close",
        }
    }
}
