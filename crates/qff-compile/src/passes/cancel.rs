//! Cancellation of adjacent inverse pairs.

use tracing::debug;

use qff_ir::{Circuit, Instruction, QubitId};

use super::{next_on_wire, retain_live};
use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::{PropertySet, RewriteCounts};

/// Removes pairs of identical gates that are adjacent on every wire they
/// touch, e.g. `X·X`, `H·H` or two identical `MCZ`. Every IR gate is its own
/// inverse.
///
/// Runs to a fixed point, so `H·X·X·H` disappears entirely.
pub struct CancelInversePairs;

impl CancelInversePairs {
    /// Check that two gate instructions implement the same operation.
    fn same_operation(a: &Instruction, b: &Instruction) -> bool {
        let (Some(ga), Some(gb)) = (a.as_gate(), b.as_gate()) else {
            return false;
        };
        if ga != gb {
            return false;
        }
        if ga.is_controlled_z() {
            sorted(&a.qubits) == sorted(&b.qubits)
        } else if ga.is_controlled_x() {
            let (ta, ca) = a.qubits.split_last().unzip();
            let (tb, cb) = b.qubits.split_last().unzip();
            ta == tb && ca.map(sorted) == cb.map(sorted)
        } else {
            a.qubits == b.qubits
        }
    }

    /// One sweep; returns the number of pairs removed.
    fn sweep(instructions: &[Instruction], removed: &mut [bool]) -> usize {
        let mut pairs = 0;
        for idx in 0..instructions.len() {
            let inst = &instructions[idx];
            if removed[idx] || !inst.is_gate() {
                continue;
            }
            let Some(&first) = inst.qubits.first() else {
                continue;
            };
            let Some(next) = next_on_wire(instructions, removed, idx, first) else {
                continue;
            };
            let adjacent_everywhere = inst
                .qubits
                .iter()
                .all(|&q| next_on_wire(instructions, removed, idx, q) == Some(next));
            if adjacent_everywhere && Self::same_operation(inst, &instructions[next]) {
                removed[idx] = true;
                removed[next] = true;
                pairs += 1;
            }
        }
        pairs
    }
}

fn sorted(qubits: &[QubitId]) -> Vec<QubitId> {
    let mut v = qubits.to_vec();
    v.sort_unstable();
    v
}

impl Pass for CancelInversePairs {
    fn name(&self) -> &'static str {
        "cancel_inverse_pairs"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let mut instructions = circuit.instructions().to_vec();
        let mut total = 0;

        loop {
            let mut removed = vec![false; instructions.len()];
            let pairs = Self::sweep(&instructions, &mut removed);
            if pairs == 0 {
                break;
            }
            total += pairs;
            instructions = retain_live(instructions, &removed);
        }

        if total > 0 {
            debug!("Cancelled {} inverse pairs", total);
            circuit.set_instructions(instructions)?;
        }
        properties.get_or_default::<RewriteCounts>().cancelled_pairs += total;

        Ok(())
    }
}
