//! Built-in compilation passes.

mod cancel;
mod fuse_mcz;
mod verification;

pub use cancel::CancelInversePairs;
pub use fuse_mcz::FuseMultiControlledZ;
pub use verification::{MeasurementVerification, VerificationResult};

use qff_ir::{Instruction, QubitId};

/// Previous live instruction touching `qubit` before index `idx`.
fn prev_on_wire(
    instructions: &[Instruction],
    removed: &[bool],
    idx: usize,
    qubit: QubitId,
) -> Option<usize> {
    (0..idx)
        .rev()
        .find(|&j| !removed[j] && instructions[j].acts_on(qubit))
}

/// Next live instruction touching `qubit` after index `idx`.
fn next_on_wire(
    instructions: &[Instruction],
    removed: &[bool],
    idx: usize,
    qubit: QubitId,
) -> Option<usize> {
    (idx + 1..instructions.len()).find(|&j| !removed[j] && instructions[j].acts_on(qubit))
}

/// Keep the instructions not flagged in `removed`.
fn retain_live(instructions: Vec<Instruction>, removed: &[bool]) -> Vec<Instruction> {
    instructions
        .into_iter()
        .zip(removed)
        .filter_map(|(inst, &gone)| (!gone).then_some(inst))
        .collect()
}
