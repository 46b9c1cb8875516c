//! Circuit intermediate representation for the quantum friend finder.
//!
//! This crate holds the data structures every other crate speaks: qubit and
//! classical-bit identifiers, the gate set, instructions and the
//! [`Circuit`] builder.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qff_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2, 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3);
//! ```
//!
//! # Example: Multi-controlled gates
//!
//! ```rust
//! use qff_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("mcx", 4, 0);
//! let controls: Vec<_> = (0..3).map(QubitId).collect();
//! circuit.mcx(&controls, QubitId(3)).unwrap();
//! assert_eq!(circuit.instructions()[0].qubits.len(), 4);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId};
