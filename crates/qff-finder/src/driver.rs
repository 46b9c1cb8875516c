//! Runs one search end to end.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

use qff_adapter_sim::SimulatorBackend;
use qff_compile::{CompilationStats, transpile};
use qff_hal::{Backend, Counts, JobId};
use qff_ir::Circuit;

use crate::circuits::grover_circuit;
use crate::config::SearchConfig;
use crate::directory::{Directory, Friend};
use crate::error::{FinderError, FinderResult};
use crate::target::TargetIndex;

/// Everything a front end needs to present one search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The friend that was searched for.
    pub friend: Friend,
    /// The marked index.
    pub target: TargetIndex,
    /// Measured bitstring counts.
    pub counts: Counts,
    /// Shots requested.
    pub shots: u32,
    /// Grover iterations used.
    pub iterations: u32,
    /// The circuit as built, before transpilation.
    pub circuit: Circuit,
    /// Transpiler statistics.
    pub stats: CompilationStats,
    /// Backend job identifier.
    pub job_id: JobId,
    /// Wall-clock time of compile plus execution.
    pub elapsed: Duration,
}

/// Builds, compiles and executes Grover searches on a backend.
pub struct SearchDriver {
    backend: Arc<dyn Backend>,
    config: SearchConfig,
}

impl SearchDriver {
    /// Create a driver over any backend.
    pub fn new(backend: Arc<dyn Backend>, config: SearchConfig) -> Self {
        Self { backend, config }
    }

    /// Create a driver over the local simulator, seeded from `config.seed`.
    pub fn with_simulator(config: SearchConfig) -> Self {
        let mut backend = SimulatorBackend::new();
        if let Some(seed) = config.seed {
            backend = backend.with_seed(seed);
        }
        Self::new(Arc::new(backend), config)
    }

    /// The search parameters.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Name of the backend searches run on.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Search `directory` for `name`.
    ///
    /// Backend errors are returned as is; nothing is retried.
    #[instrument(skip(self, directory), fields(backend = self.backend.name()))]
    pub async fn run(&self, directory: &Directory, name: &str) -> FinderResult<SearchOutcome> {
        let friend = directory
            .get(name)
            .cloned()
            .ok_or_else(|| FinderError::UnknownFriend(name.to_string()))?;
        let target = friend.index;

        info!(
            "Searching for {} at index {} ({})",
            friend.name,
            target,
            target.to_bitstring()
        );

        let start = Instant::now();
        let circuit = grover_circuit(target, self.config.iterations)?;
        let (compiled, stats) = transpile(&circuit, self.config.optimization_level)?;
        debug!(
            "Transpiled {} -> {} ops, depth {} -> {}",
            stats.ops_before, stats.ops_after, stats.depth_before, stats.depth_after
        );

        let job_id = self.backend.submit(&compiled, self.config.shots).await?;
        let result = self.backend.wait(&job_id).await?;
        let elapsed = start.elapsed();

        info!(
            "Job {} finished in {:?} with {} distinct outcomes",
            job_id,
            elapsed,
            result.counts.len()
        );

        Ok(SearchOutcome {
            friend,
            target,
            counts: result.counts,
            shots: self.config.shots,
            iterations: self.config.iterations,
            circuit,
            stats,
            job_id,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> SearchConfig {
        SearchConfig {
            seed: Some(seed),
            ..SearchConfig::default()
        }
    }

    #[tokio::test]
    async fn test_unknown_friend() {
        let driver = SearchDriver::with_simulator(seeded(1));
        let directory = Directory::generate_seeded(1);

        let err = driver.run(&directory, "Nobody").await.unwrap_err();
        assert!(matches!(err, FinderError::UnknownFriend(name) if name == "Nobody"));
    }

    #[tokio::test]
    async fn test_outcome_fields() {
        let driver = SearchDriver::with_simulator(seeded(5));
        let directory = Directory::generate_seeded(5);

        let outcome = driver.run(&directory, "Friend_5").await.unwrap();
        assert_eq!(outcome.target.to_bitstring(), "0000000101");
        assert_eq!(outcome.friend.phone, directory.get("Friend_5").unwrap().phone);
        assert_eq!(outcome.shots, 1024);
        assert_eq!(outcome.iterations, 6);
        assert_eq!(outcome.circuit.name(), "grover");
        assert!(outcome.stats.ops_after < outcome.stats.ops_before);
        assert_eq!(driver.backend_name(), "simulator");
    }

    #[tokio::test]
    async fn test_backend_errors_propagate() {
        let config = SearchConfig {
            shots: 1_000_000,
            ..seeded(1)
        };
        let driver = SearchDriver::with_simulator(config);
        let directory = Directory::generate_seeded(1);

        let err = driver.run(&directory, "Friend_1").await.unwrap_err();
        assert!(matches!(err, FinderError::Backend(_)));
    }

    #[tokio::test]
    async fn test_unknown_optimization_level_fails() {
        let config = SearchConfig {
            optimization_level: 7,
            ..seeded(1)
        };
        let driver = SearchDriver::with_simulator(config);
        let directory = Directory::generate_seeded(1);

        let err = driver.run(&directory, "Friend_1").await.unwrap_err();
        assert!(matches!(
            err,
            FinderError::Compile(qff_compile::CompileError::InvalidOptimizationLevel { level: 7, .. })
        ));
    }
}
