//! Pass manager for orchestrating compilation.

use tracing::{debug, info, instrument};

use qff_ir::Circuit;

use crate::error::{CompileError, CompileResult};
use crate::pass::Pass;
use crate::passes::{CancelInversePairs, FuseMultiControlledZ, MeasurementVerification};
use crate::property::{CompilationStats, PropertySet};

/// Highest supported optimization level.
pub const MAX_OPTIMIZATION_LEVEL: u8 = 1;

/// Manages and executes a sequence of compilation passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes on the given circuit.
    ///
    /// Leaves a [`CompilationStats`] in `properties`.
    #[instrument(skip_all, fields(circuit = circuit.name()))]
    pub fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        info!(
            "Running pass manager with {} passes on circuit with {} qubits",
            self.passes.len(),
            circuit.num_qubits()
        );

        let mut stats = CompilationStats::before(circuit);

        for pass in &self.passes {
            if pass.should_run(circuit, properties) {
                debug!("Running pass: {}", pass.name());
                pass.run(circuit, properties)?;
                debug!("Pass {} completed, ops: {}", pass.name(), circuit.num_ops());
                stats.passes.push(pass.name().to_string());
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        stats.finish(circuit);
        info!(
            "Pass manager completed, depth: {} -> {}, ops: {} -> {}",
            stats.depth_before, stats.depth_after, stats.ops_before, stats.ops_after
        );
        properties.insert(stats);

        Ok(())
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating pass managers with preset configurations.
pub struct PassManagerBuilder {
    /// Optimization level (0-1).
    optimization_level: u8,
}

impl PassManagerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            optimization_level: 1,
        }
    }

    /// Set the optimization level.
    ///
    /// - Level 0: verification only
    /// - Level 1: MCZ fusion and inverse-pair cancellation (default)
    ///
    /// Levels above [`MAX_OPTIMIZATION_LEVEL`] are rejected by [`build`](Self::build).
    #[must_use]
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level;
        self
    }

    /// Build the pass manager and return it with a fresh property set.
    pub fn build(self) -> CompileResult<(PassManager, PropertySet)> {
        if self.optimization_level > MAX_OPTIMIZATION_LEVEL {
            return Err(CompileError::InvalidOptimizationLevel {
                level: self.optimization_level,
                max: MAX_OPTIMIZATION_LEVEL,
            });
        }

        let mut pm = PassManager::new();

        if self.optimization_level >= 1 {
            pm.add_pass(FuseMultiControlledZ);
            pm.add_pass(CancelInversePairs);
        }

        pm.add_pass(MeasurementVerification);

        Ok((pm, PropertySet::new()))
    }
}

impl Default for PassManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Compile `circuit` with the standard pipeline for `optimization_level`.
///
/// Returns the compiled copy and its statistics; the input is left as is.
/// Fails with [`CompileError::InvalidOptimizationLevel`] above
/// [`MAX_OPTIMIZATION_LEVEL`].
pub fn transpile(
    circuit: &Circuit,
    optimization_level: u8,
) -> CompileResult<(Circuit, CompilationStats)> {
    let (pm, mut props) = PassManagerBuilder::new()
        .with_optimization_level(optimization_level)
        .build()?;

    let mut compiled = circuit.clone();
    pm.run(&mut compiled, &mut props)?;

    let stats = props.get::<CompilationStats>().cloned().unwrap_or_default();
    Ok((compiled, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qff_ir::QubitId;

    #[test]
    fn test_empty_pass_manager() {
        let pm = PassManager::new();
        assert!(pm.is_empty());
        assert_eq!(pm.len(), 0);
    }

    #[test]
    fn test_pass_manager_run_records_stats() {
        let pm = PassManager::new();
        let mut props = PropertySet::new();

        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        pm.run(&mut circuit, &mut props).unwrap();

        let stats = props.get::<CompilationStats>().unwrap();
        assert_eq!(stats.ops_before, 2);
        assert_eq!(stats.ops_after, 2);
        assert!(stats.passes.is_empty());
    }

    #[test]
    fn test_builder_levels() {
        let (level0, _) = PassManagerBuilder::new()
            .with_optimization_level(0)
            .build()
            .unwrap();
        assert_eq!(level0.len(), 1);

        let (level1, _) = PassManagerBuilder::new().build().unwrap();
        assert_eq!(level1.len(), 3);
    }

    #[test]
    fn test_builder_rejects_unknown_level() {
        let err = PassManagerBuilder::new()
            .with_optimization_level(9)
            .build()
            .err()
            .unwrap();
        assert!(matches!(
            err,
            CompileError::InvalidOptimizationLevel { level: 9, max: 1 }
        ));
    }

    #[test]
    fn test_transpile_rejects_unknown_level() {
        let circuit = Circuit::bell().unwrap();
        let err = transpile(&circuit, 7).unwrap_err();
        assert!(matches!(
            err,
            CompileError::InvalidOptimizationLevel { level: 7, .. }
        ));
    }

    #[test]
    fn test_transpile_level0_keeps_circuit() {
        let mut circuit = Circuit::with_size("test", 1, 1);
        circuit.h(QubitId(0)).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.measure_all().unwrap();

        let (compiled, stats) = transpile(&circuit, 0).unwrap();
        assert_eq!(compiled, circuit);
        assert_eq!(stats.passes, vec!["measurement_verification"]);
    }

    #[test]
    fn test_transpile_level1_shrinks() {
        let mut circuit = Circuit::with_size("test", 1, 1);
        circuit.h(QubitId(0)).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.measure_all().unwrap();

        let (compiled, stats) = transpile(&circuit, 1).unwrap();
        assert_eq!(compiled.num_ops(), 1);
        assert_eq!(stats.ops_before, 3);
        assert_eq!(stats.ops_after, 1);
        assert_eq!(stats.gate_counts.get("measure"), Some(&1));
    }
}
