//! Data Transfer Objects for the dashboard API.

use serde::{Deserialize, Serialize};

use qff_finder::SearchReport;

use crate::state::StoredRun;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status (always "ok" if responding).
    pub status: String,
    /// Dashboard version.
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// The selectable names.
#[derive(Debug, Serialize)]
pub struct FriendsResponse {
    /// Number of friends.
    pub count: usize,
    /// Names in index order.
    pub friends: Vec<String>,
}

/// Request to search for a friend.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Exact friend name, e.g. `Friend_5`.
    pub name: String,
}

/// A finished search.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Identifier for the download endpoints.
    pub run_id: String,
    /// When the run finished (RFC 3339).
    pub created_at: String,
    /// Backend the circuit ran on.
    pub backend: String,
    /// Ranked results and friend details.
    #[serde(flatten)]
    pub report: SearchReport,
    /// `State `...` → p` lines.
    pub probability_lines: Vec<String>,
    /// Text circuit diagram.
    pub circuit_diagram: String,
    /// Where to download the chart.
    pub histogram_url: String,
    /// Where to download the diagram.
    pub diagram_url: String,
}

impl SearchResponse {
    /// Build the response for a stored run.
    pub fn from_run(run: &StoredRun) -> Self {
        let id = run.id.to_string();
        Self {
            histogram_url: format!("/api/runs/{id}/histogram.png"),
            diagram_url: format!("/api/runs/{id}/circuit.txt"),
            run_id: id,
            created_at: run.created_at.to_rfc3339(),
            backend: run.backend.clone(),
            probability_lines: run.report.probability_lines(),
            report: run.report.clone(),
            circuit_diagram: run.diagram.clone(),
        }
    }
}

/// Short listing entry of a stored run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    /// Run identifier.
    pub run_id: String,
    /// Friend searched for.
    pub friend: String,
    /// Target bitstring.
    pub target_bin: String,
    /// Whether the target was the top outcome.
    pub found: bool,
    /// When the run finished (RFC 3339).
    pub created_at: String,
}

impl From<&StoredRun> for RunSummary {
    fn from(run: &StoredRun) -> Self {
        Self {
            run_id: run.id.to_string(),
            friend: run.report.friend.clone(),
            target_bin: run.report.target_bin.clone(),
            found: run.report.found,
            created_at: run.created_at.to_rfc3339(),
        }
    }
}
