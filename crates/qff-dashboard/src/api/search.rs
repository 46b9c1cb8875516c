//! Search endpoint.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::Utc;
use uuid::Uuid;

use qff_finder::{DEFAULT_FOLD, SearchReport, draw_circuit, render_histogram_png};

use crate::dto::{SearchRequest, SearchResponse};
use crate::error::ApiError;
use crate::state::{AppState, StoredRun};

/// POST /api/search - Run Grover's search for one friend.
///
/// Each request draws a fresh directory, so the phone number may change
/// between requests while the target index stays the same.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("name must not be empty".to_string()));
    }

    let directory = state.directory();
    let outcome = state.driver.run(&directory, name).await?;

    let report = SearchReport::from_outcome(&outcome, state.config.search.top_k);
    let histogram_png = render_histogram_png(&report.top)?;
    let diagram = draw_circuit(&outcome.circuit, DEFAULT_FOLD);

    tracing::info!(
        friend = %report.friend,
        target = %report.target_bin,
        found = report.found,
        "Search finished"
    );

    let run = state
        .store_run(StoredRun {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            backend: state.driver.backend_name().to_string(),
            report,
            diagram,
            histogram_png,
        })
        .await;

    Ok(Json(SearchResponse::from_run(&run)))
}
