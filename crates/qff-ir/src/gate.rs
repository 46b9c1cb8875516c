//! Quantum gate types.

use serde::{Deserialize, Serialize};

/// Standard gates with known semantics.
///
/// Every gate in the set is its own inverse. Multi-controlled gates carry
/// their control count; their operand order is controls first, target last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit gates
    /// Pauli-X gate.
    X,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,

    // Multi-controlled gates
    /// X on the last operand, conditioned on all `controls` operands being |1⟩.
    MCX {
        /// Number of control qubits.
        controls: u32,
    },
    /// Phase flip of the all-ones state of `controls + 1` operands.
    MCZ {
        /// Number of control qubits.
        controls: u32,
    },
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::MCX { .. } => "mcx",
            StandardGate::MCZ { .. } => "mcz",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::X | StandardGate::Z | StandardGate::H => 1,
            StandardGate::CX | StandardGate::CZ => 2,
            StandardGate::MCX { controls } | StandardGate::MCZ { controls } => controls + 1,
        }
    }

    /// Check whether the gate flips its last operand under control.
    pub fn is_controlled_x(&self) -> bool {
        matches!(self, StandardGate::CX | StandardGate::MCX { .. })
    }

    /// Check whether the gate is a controlled phase flip, symmetric in its operands.
    pub fn is_controlled_z(&self) -> bool {
        matches!(self, StandardGate::CZ | StandardGate::MCZ { .. })
    }

    /// Short uppercase label used in circuit drawings.
    pub fn label(&self) -> &'static str {
        match self {
            StandardGate::X | StandardGate::CX | StandardGate::MCX { .. } => "X",
            StandardGate::Z | StandardGate::CZ | StandardGate::MCZ { .. } => "Z",
            StandardGate::H => "H",
        }
    }
}
