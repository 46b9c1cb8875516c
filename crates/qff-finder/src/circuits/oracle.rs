//! Phase oracle marking a single basis state.

use qff_ir::{Circuit, IrResult, QubitId};

use super::{CARRIER, controls};
use crate::target::{NUM_QUBITS, TargetIndex};

/// Append an oracle that negates the amplitude of `target` only.
///
/// Qubits whose target bit is `0` are flipped so the marked state becomes
/// all ones, a multi-controlled Z (`H · MCX · H` on qubit 9) flips its
/// phase, and the flips are undone.
pub fn apply_oracle(circuit: &mut Circuit, target: TargetIndex) -> IrResult<()> {
    flip_zero_bits(circuit, target)?;

    circuit.h(CARRIER)?;
    circuit.mcx(&controls(), CARRIER)?;
    circuit.h(CARRIER)?;

    flip_zero_bits(circuit, target)?;
    Ok(())
}

fn flip_zero_bits(circuit: &mut Circuit, target: TargetIndex) -> IrResult<()> {
    for q in (0..NUM_QUBITS).filter(|&q| !target.bit(q)) {
        circuit.x(QubitId(q))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qff_ir::StandardGate;

    fn oracle_for(index: u32) -> Circuit {
        let mut circuit = Circuit::with_size("oracle", NUM_QUBITS, 0);
        apply_oracle(&mut circuit, TargetIndex::new(index).unwrap()).unwrap();
        circuit
    }

    #[test]
    fn test_all_ones_needs_no_flips() {
        let circuit = oracle_for(1023);
        let names: Vec<_> = circuit.instructions().iter().map(|i| i.name()).collect();
        assert_eq!(names, ["h", "mcx", "h"]);
    }

    #[test]
    fn test_flips_are_symmetric() {
        // 0b1111111010: qubits 0 and 2 are zero
        let circuit = oracle_for(0b11_1111_1010);
        let insts = circuit.instructions();
        assert_eq!(insts.len(), 7);
        assert_eq!(insts[0].qubits, [QubitId(0)]);
        assert_eq!(insts[1].qubits, [QubitId(2)]);
        assert_eq!(insts[5].qubits, [QubitId(0)]);
        assert_eq!(insts[6].qubits, [QubitId(2)]);
        assert_eq!(
            insts[3].as_gate(),
            Some(&StandardGate::MCX { controls: 9 })
        );
        assert_eq!(insts[3].target(), Some(QubitId(9)));
    }

    #[test]
    fn test_all_zeros_flips_every_qubit() {
        let circuit = oracle_for(0);
        assert_eq!(circuit.gate_counts().get("x"), Some(&20));
    }
}
