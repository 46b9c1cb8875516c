//! `PropertySet` and related types for pass communication.
//!
//! Passes share results through a type-keyed map: a pass inserts a value of
//! its own type and later passes, or the caller, read it back.
//!
//! ```
//! use qff_compile::PropertySet;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Fused(usize);
//!
//! let mut props = PropertySet::new();
//! props.insert(Fused(4));
//! assert_eq!(props.get::<Fused>(), Some(&Fused(4)));
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};
use std::collections::BTreeMap;

use qff_ir::Circuit;

/// Shared context passed through all compilation passes.
#[derive(Default)]
pub struct PropertySet {
    /// Custom properties storage (type-erased).
    custom: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl PropertySet {
    /// Create a new empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a custom property, replacing any previous value of that type.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.custom.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Get a custom property.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.custom
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    /// Get a mutable custom property.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.custom
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut())
    }

    /// Get a custom property, inserting the default first if absent.
    pub fn get_or_default<T: Any + Send + Sync + Default>(&mut self) -> &mut T {
        self.custom
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(T::default()))
            .downcast_mut()
            .unwrap_or_else(|| unreachable!("property stored under a foreign TypeId"))
    }
}

impl std::fmt::Debug for PropertySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertySet")
            .field("entries", &self.custom.len())
            .finish()
    }
}

/// Circuit size before and after compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationStats {
    /// Operations before the first pass.
    pub ops_before: usize,
    /// Operations after the last pass.
    pub ops_after: usize,
    /// Depth before the first pass.
    pub depth_before: usize,
    /// Depth after the last pass.
    pub depth_after: usize,
    /// Per-gate counts of the compiled circuit.
    pub gate_counts: BTreeMap<String, usize>,
    /// Names of the passes that ran, in order.
    pub passes: Vec<String>,
}

impl CompilationStats {
    /// Snapshot the input circuit.
    pub fn before(circuit: &Circuit) -> Self {
        Self {
            ops_before: circuit.num_ops(),
            depth_before: circuit.depth(),
            ..Self::default()
        }
    }

    /// Fill in the compiled circuit's figures.
    pub fn finish(&mut self, circuit: &Circuit) {
        self.ops_after = circuit.num_ops();
        self.depth_after = circuit.depth();
        self.gate_counts = circuit.gate_counts().into_iter().collect();
    }
}

/// Counters written by the rewriting passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteCounts {
    /// `H · MCX · H` groups fused into one `MCZ`.
    pub fused: usize,
    /// Inverse pairs removed.
    pub cancelled_pairs: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use qff_ir::QubitId;

    #[test]
    fn test_custom_property_roundtrip() {
        let mut props = PropertySet::new();
        assert!(props.get::<RewriteCounts>().is_none());

        props.get_or_default::<RewriteCounts>().fused += 2;
        props.get_or_default::<RewriteCounts>().fused += 1;
        assert_eq!(props.get::<RewriteCounts>().map(|c| c.fused), Some(3));
    }

    #[test]
    fn test_stats_snapshot() {
        let mut circuit = qff_ir::Circuit::with_size("s", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.h(QubitId(0)).unwrap();

        let mut stats = CompilationStats::before(&circuit);
        assert_eq!(stats.ops_before, 2);
        assert_eq!(stats.depth_before, 2);

        stats.finish(&qff_ir::Circuit::with_size("s", 2, 0));
        assert_eq!(stats.ops_after, 0);
        assert!(stats.gate_counts.is_empty());
    }
}
