//! Transpilation passes for the quantum friend finder.
//!
//! Circuits go through a short pass pipeline before they are submitted to a
//! backend:
//!
//! ```text
//! Input Circuit
//!       │
//!       ▼
//! ┌─────────────┐
//! │ PassManager │ ◄── PropertySet (rewrite counters, stats)
//! └─────────────┘
//!       │
//!       ├── FuseMultiControlledZ   (level 1)
//!       ├── CancelInversePairs     (level 1)
//!       └── MeasurementVerification
//!       │
//!       ▼
//! Output Circuit
//! ```
//!
//! # Example
//!
//! ```rust
//! use qff_compile::transpile;
//! use qff_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("demo", 3, 3);
//! let controls = [QubitId(0), QubitId(1)];
//! circuit.h(QubitId(2)).unwrap();
//! circuit.mcx(&controls, QubitId(2)).unwrap();
//! circuit.h(QubitId(2)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! let (compiled, stats) = transpile(&circuit, 1).unwrap();
//! assert_eq!(stats.gate_counts.get("mcz"), Some(&1));
//! assert!(compiled.num_ops() < circuit.num_ops());
//! ```

pub mod error;
pub mod manager;
pub mod pass;
pub mod passes;
pub mod property;

pub use error::{CompileError, CompileResult};
pub use manager::{MAX_OPTIMIZATION_LEVEL, PassManager, PassManagerBuilder, transpile};
pub use pass::{Pass, PassKind};
pub use property::{CompilationStats, PropertySet, RewriteCounts};
