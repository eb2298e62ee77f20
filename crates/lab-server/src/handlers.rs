//! Request handlers for `/api/duckdb`.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::Method,
};
use lab_sandbox::QueryOutcome;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{ApiError, AppState};

/// Request body: one SQL statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// `POST /api/duckdb` — run `query` in a fresh seeded database.
///
/// The engine call runs on the blocking pool and is awaited to completion;
/// there is no timeout or cancellation.
pub async fn run_query(
    State(state): State<AppState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryOutcome>, ApiError> {
    let Json(QueryRequest { query }) =
        payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let started = Instant::now();
    let query_len = query.len();
    let config = Arc::clone(&state.sandbox);
    let probe = Arc::clone(&state.probe);

    let result =
        tokio::task::spawn_blocking(move || lab_sandbox::run_query(&query, &config, &probe))
            .await
            .map_err(|e| ApiError::Internal(format!("sandbox task failed: {e}")))?;

    match result {
        Ok(outcome) => {
            info!(
                query_len,
                rows = outcome.row_count(),
                elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                "sandbox query executed"
            );
            Ok(Json(outcome))
        }
        Err(error) => {
            warn!(query_len, phase = error.phase(), %error, "sandbox query failed");
            Err(ApiError::BadRequest(error.engine_message()))
        }
    }
}

/// Any method other than `POST`. Nothing is read or allocated.
pub async fn method_not_allowed(method: Method) -> ApiError {
    debug!(%method, "rejected non-POST request");
    ApiError::MethodNotAllowed
}
