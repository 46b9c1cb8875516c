//! Circuit builders for the Grover search.

mod diffuser;
mod grover;
mod oracle;

pub use diffuser::apply_diffuser;
pub use grover::grover_circuit;
pub use oracle::apply_oracle;

use qff_ir::QubitId;

use crate::target::NUM_QUBITS;

/// The phase-kickback carrier of the multi-controlled gate.
pub(crate) const CARRIER: QubitId = QubitId(NUM_QUBITS - 1);

/// Controls of the multi-controlled gate, every qubit but the carrier.
pub(crate) fn controls() -> Vec<QubitId> {
    (0..CARRIER.0).map(QubitId).collect()
}
