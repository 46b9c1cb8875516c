//! Quantum Friend Finder dashboard - a local web page for Grover searches.
//!
//! The page lets a user pick one of the 1024 friends, runs the search on the
//! local simulator and shows the top outcomes, their probabilities, the
//! friend's phone number and the circuit diagram. The histogram of each run
//! can be downloaded as `top10_histogram.png`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use qff_dashboard::{AppState, serve};
//! use qff_finder::FinderConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = FinderConfig::default();
//!     let addr = config.bind_address()?;
//!     let state = Arc::new(AppState::new(config));
//!     serve(state, addr).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod dto;
pub mod error;
pub mod server;
pub mod state;

pub use dto::{FriendsResponse, HealthResponse, RunSummary, SearchRequest, SearchResponse};
pub use error::ApiError;
pub use server::{create_router, serve};
pub use state::{AppState, StoredRun};
