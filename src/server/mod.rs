//! Thin HTTP layer over the orchestrator.
//!
//! No core logic lives here: the endpoints validate the raw query
//! parameters, delegate to [`SearchOrchestrator`] and serialize its output.
//! "No results" is a 200 with an empty list, never a transport-level error.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::registry::{CompanyRecord, SearchOrchestrator};

/// Minimum accepted query length, matching the upstream search endpoints'
/// useful minimum.
const MIN_QUERY_LEN: usize = 2;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    country: String,
    q: String,
}

/// Build the application router.
pub fn app(orchestrator: Arc<SearchOrchestrator>) -> Router {
    // Permissive CORS so the frontend can call the proxy directly; tighten
    // to the deployed origin in production.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/company/search", get(search_company))
        .route("/api/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(orchestrator)
}

async fn search_company(
    State(orchestrator): State<Arc<SearchOrchestrator>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<CompanyRecord>>, (StatusCode, Json<Value>)> {
    if params.q.trim().len() < MIN_QUERY_LEN {
        return Err(bad_request("query must be at least 2 characters"));
    }
    let supported = orchestrator
        .supported_jurisdictions()
        .iter()
        .any(|code| code.eq_ignore_ascii_case(&params.country));
    if !supported {
        return Err(bad_request("country must be one of the supported codes"));
    }

    info!("Search request: country={} q={}", params.country, params.q);
    let records = orchestrator.search(&params.country, params.q.trim()).await;
    Ok(Json(records))
}

async fn health(State(orchestrator): State<Arc<SearchOrchestrator>>) -> Json<Value> {
    let stats = orchestrator.cache_stats().await;
    Json(json!({
        "status": "online",
        "message": "Registry hub proxy operational",
        "jurisdictions": orchestrator.supported_jurisdictions(),
        "cache": stats,
    }))
}

fn bad_request(message: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}
