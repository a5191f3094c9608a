//! Sync API endpoints.

use crate::auth;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{middleware, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tillpoint_engine::{PullResult, SyncResult, SyncStats};
use tower_http::trace::TraceLayer;

/// Builds the sync router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/sync/:entity", get(pull).post(push))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Query parameters for a pull.
#[derive(Debug, Deserialize)]
struct PullQuery {
    /// Watermark of the caller's previous exchange.
    last_sync: DateTime<Utc>,
}

/// Query parameters for a push.
#[derive(Debug, Deserialize)]
struct PushQuery {
    /// Optional watermark; when present the response carries
    /// server-side changes as well.
    last_sync: Option<DateTime<Utc>>,
}

/// Returns active records changed since the caller's watermark.
///
/// Read-only and idempotent: repeated calls with the same watermark
/// return the same records.
async fn pull(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    Query(query): Query<PullQuery>,
) -> ApiResult<Json<PullResult>> {
    let server_updated = state.registry().pull(&entity, query.last_sync)?;
    Ok(Json(PullResult { server_updated }))
}

/// Accepts a batch of client-modified records.
///
/// The only remote entry point that mutates store state. Returns the
/// full three-way [`SyncResult`]; conflicts inside it are a normal,
/// non-erroneous outcome.
async fn push(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    Query(query): Query<PushQuery>,
    Json(batch): Json<Vec<Value>>,
) -> ApiResult<Json<SyncResult>> {
    let max = state.config().max_push_batch;
    if batch.len() > max {
        return Err(ApiError::BadRequest(format!(
            "batch of {} records exceeds the limit of {max}",
            batch.len()
        )));
    }

    let result = state.registry().push(&entity, &batch, query.last_sync)?;
    Ok(Json(result))
}

/// Health response body.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    sync: SyncStats,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        sync: state.registry().stats(),
    })
}
