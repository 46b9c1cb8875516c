//! Application state for the dashboard server.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use qff_finder::{Directory, FinderConfig, SearchDriver, SearchReport};
use qff_hal::Backend;

/// A finished search kept for downloads.
#[derive(Debug, Clone)]
pub struct StoredRun {
    /// Run identifier.
    pub id: Uuid,
    /// When the run finished.
    pub created_at: DateTime<Utc>,
    /// Backend the circuit ran on.
    pub backend: String,
    /// Ranked results.
    pub report: SearchReport,
    /// Text circuit diagram.
    pub diagram: String,
    /// Encoded histogram.
    pub histogram_png: Vec<u8>,
}

/// Finished runs, oldest evicted first once `capacity` is reached.
#[derive(Debug)]
struct RunStore {
    runs: FxHashMap<Uuid, Arc<StoredRun>>,
    order: VecDeque<Uuid>,
    capacity: usize,
}

impl RunStore {
    fn new(capacity: usize) -> Self {
        Self {
            runs: FxHashMap::default(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    fn insert(&mut self, run: Arc<StoredRun>) {
        while self.order.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.runs.remove(&oldest);
            }
        }
        self.order.push_back(run.id);
        self.runs.insert(run.id, run);
    }
}

/// Shared application state.
pub struct AppState {
    /// Runs searches.
    pub driver: SearchDriver,
    /// Loaded configuration.
    pub config: FinderConfig,
    runs: RwLock<RunStore>,
}

impl AppState {
    /// Create state that searches on the local simulator.
    pub fn new(config: FinderConfig) -> Self {
        let driver = SearchDriver::with_simulator(config.search.clone());
        Self::with_driver(config, driver)
    }

    /// Create state that searches on `backend`.
    pub fn with_backend(config: FinderConfig, backend: Arc<dyn Backend>) -> Self {
        let driver = SearchDriver::new(backend, config.search.clone());
        Self::with_driver(config, driver)
    }

    fn with_driver(config: FinderConfig, driver: SearchDriver) -> Self {
        let runs = RwLock::new(RunStore::new(config.dashboard.max_stored_runs));
        Self {
            driver,
            config,
            runs,
        }
    }

    /// A fresh directory for one request.
    pub fn directory(&self) -> Directory {
        match self.config.search.seed {
            Some(seed) => Directory::generate_seeded(seed),
            None => Directory::random(),
        }
    }

    /// Store a finished run, evicting the oldest beyond capacity.
    pub async fn store_run(&self, run: StoredRun) -> Arc<StoredRun> {
        let run = Arc::new(run);
        self.runs.write().await.insert(run.clone());
        run
    }

    /// Look a stored run up.
    pub async fn run(&self, id: &Uuid) -> Option<Arc<StoredRun>> {
        self.runs.read().await.runs.get(id).cloned()
    }

    /// Stored runs, newest first.
    pub async fn runs(&self) -> Vec<Arc<StoredRun>> {
        let store = self.runs.read().await;
        store
            .order
            .iter()
            .rev()
            .filter_map(|id| store.runs.get(id).cloned())
            .collect()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(FinderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(friend: &str) -> StoredRun {
        StoredRun {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            backend: "simulator".into(),
            report: SearchReport {
                friend: friend.into(),
                phone: "0123456789".into(),
                target_bin: "0000000000".into(),
                top: vec![],
                total_shots: 0,
                iterations: 6,
                found: false,
                stats: Default::default(),
                elapsed_ms: 0,
            },
            diagram: String::new(),
            histogram_png: vec![],
        }
    }

    #[tokio::test]
    async fn test_store_evicts_oldest() {
        let mut config = FinderConfig::default();
        config.dashboard.max_stored_runs = 2;
        let state = AppState::new(config);

        let a = state.store_run(run("Friend_1")).await;
        let b = state.store_run(run("Friend_2")).await;
        let c = state.store_run(run("Friend_3")).await;

        assert!(state.run(&a.id).await.is_none());
        assert!(state.run(&b.id).await.is_some());

        let ids: Vec<_> = state.runs().await.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![c.id, b.id]);
    }

    #[test]
    fn test_seeded_directory_is_stable() {
        let mut config = FinderConfig::default();
        config.search.seed = Some(3);
        let state = AppState::new(config);

        let a = state.directory();
        let b = state.directory();
        assert_eq!(a.get("Friend_8"), b.get("Friend_8"));
    }
}
