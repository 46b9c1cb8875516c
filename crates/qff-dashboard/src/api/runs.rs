//! Stored run endpoints and downloads.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use uuid::Uuid;

use qff_finder::HISTOGRAM_FILENAME;

use crate::dto::{RunSummary, SearchResponse};
use crate::error::ApiError;
use crate::state::{AppState, StoredRun};

/// File name offered for the diagram download.
pub const DIAGRAM_FILENAME: &str = "circuit_diagram.txt";

async fn find_run(state: &AppState, id: &str) -> Result<Arc<StoredRun>, ApiError> {
    let uuid = Uuid::parse_str(id)
        .map_err(|_| ApiError::BadRequest(format!("Invalid run ID: {}", id)))?;
    state
        .run(&uuid)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Run not found: {}", id)))
}

fn attachment(content_type: &str, filename: &str) -> [(header::HeaderName, String); 2] {
    [
        (header::CONTENT_TYPE, content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ]
}

/// GET /api/runs - Stored runs, newest first.
pub async fn list_runs(State(state): State<Arc<AppState>>) -> Json<Vec<RunSummary>> {
    let runs = state.runs().await;
    Json(runs.iter().map(|r| RunSummary::from(r.as_ref())).collect())
}

/// GET /api/runs/:id - Full result of a stored run.
pub async fn get_run(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SearchResponse>, ApiError> {
    let run = find_run(&state, &id).await?;
    Ok(Json(SearchResponse::from_run(&run)))
}

/// GET /api/runs/:id/histogram.png - Download the top-10 chart.
pub async fn histogram_png(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let run = find_run(&state, &id).await?;
    Ok((
        attachment("image/png", HISTOGRAM_FILENAME),
        run.histogram_png.clone(),
    ))
}

/// GET /api/runs/:id/circuit.txt - Download the circuit diagram.
pub async fn circuit_txt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let run = find_run(&state, &id).await?;
    Ok((
        attachment("text/plain; charset=utf-8", DIAGRAM_FILENAME),
        run.diagram.clone(),
    ))
}
