//! Fusion of Hadamard-conjugated multi-controlled X gates.

use tracing::debug;

use qff_ir::{Circuit, Instruction, StandardGate};

use super::{next_on_wire, prev_on_wire, retain_live};
use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::{PropertySet, RewriteCounts};

/// Rewrites `H(t) · MCX(c → t) · H(t)` into `MCZ(c ∪ {t})`.
///
/// Both Hadamards must be the immediate neighbours of the controlled gate on
/// wire `t`. Gates on other wires may sit in between since they commute with
/// `H(t)`. `CX` is treated as a one-control `MCX` and fuses into `CZ`.
pub struct FuseMultiControlledZ;

impl FuseMultiControlledZ {
    fn is_h_on(inst: &Instruction, qubit: qff_ir::QubitId) -> bool {
        inst.as_gate() == Some(&StandardGate::H) && inst.qubits == [qubit]
    }

    fn controlled_x(inst: &Instruction) -> bool {
        inst.as_gate().is_some_and(StandardGate::is_controlled_x)
    }
}

impl Pass for FuseMultiControlledZ {
    fn name(&self) -> &'static str {
        "fuse_multi_controlled_z"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let mut instructions = circuit.instructions().to_vec();
        let mut removed = vec![false; instructions.len()];
        let mut fused = 0;

        for idx in 0..instructions.len() {
            if removed[idx] || !Self::controlled_x(&instructions[idx]) {
                continue;
            }
            let Some(target) = instructions[idx].target() else {
                continue;
            };

            let prev = prev_on_wire(&instructions, &removed, idx, target);
            let next = next_on_wire(&instructions, &removed, idx, target);
            let (Some(p), Some(n)) = (prev, next) else {
                continue;
            };
            if !Self::is_h_on(&instructions[p], target) || !Self::is_h_on(&instructions[n], target)
            {
                continue;
            }

            let qubits = instructions[idx].qubits.clone();
            instructions[idx] = if qubits.len() == 2 {
                Instruction::two_qubit_gate(StandardGate::CZ, qubits[0], qubits[1])
            } else {
                Instruction::mcz(&qubits)?
            };
            removed[p] = true;
            removed[n] = true;
            fused += 1;
        }

        if fused > 0 {
            debug!("Fused {} H·MCX·H groups into MCZ", fused);
            circuit.set_instructions(retain_live(instructions, &removed))?;
        }
        properties.get_or_default::<RewriteCounts>().fused += fused;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qff_ir::QubitId;

    fn controls(n: u32) -> Vec<QubitId> {
        (0..n).map(QubitId).collect()
    }

    #[test]
    fn test_fuses_conjugated_mcx() {
        let mut circuit = Circuit::with_size("t", 4, 0);
        circuit.h(QubitId(3)).unwrap();
        circuit.mcx(&controls(3), QubitId(3)).unwrap();
        circuit.h(QubitId(3)).unwrap();

        let mut props = PropertySet::new();
        FuseMultiControlledZ.run(&mut circuit, &mut props).unwrap();

        assert_eq!(circuit.instructions().len(), 1);
        assert_eq!(
            circuit.instructions()[0].as_gate(),
            Some(&StandardGate::MCZ { controls: 3 })
        );
        assert_eq!(props.get::<RewriteCounts>().map(|c| c.fused), Some(1));
    }

    #[test]
    fn test_gates_on_other_wires_do_not_block() {
        let mut circuit = Circuit::with_size("t", 3, 0);
        circuit.h(QubitId(2)).unwrap();
        circuit.x(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(2)).unwrap();
        circuit.x(QubitId(1)).unwrap();
        circuit.h(QubitId(2)).unwrap();

        FuseMultiControlledZ
            .run(&mut circuit, &mut PropertySet::new())
            .unwrap();

        let names: Vec<_> = circuit.instructions().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["x", "cz", "x"]);
    }

    #[test]
    fn test_gate_on_target_blocks_fusion() {
        let mut circuit = Circuit::with_size("t", 3, 0);
        circuit.h(QubitId(2)).unwrap();
        circuit.z(QubitId(2)).unwrap();
        circuit.mcx(&controls(2), QubitId(2)).unwrap();
        circuit.h(QubitId(2)).unwrap();

        FuseMultiControlledZ
            .run(&mut circuit, &mut PropertySet::new())
            .unwrap();

        assert_eq!(circuit.instructions().len(), 4);
    }

    #[test]
    fn test_shared_hadamard_used_once() {
        let mut circuit = Circuit::with_size("t", 3, 0);
        circuit.h(QubitId(2)).unwrap();
        circuit.mcx(&controls(2), QubitId(2)).unwrap();
        circuit.h(QubitId(2)).unwrap();
        circuit.mcx(&controls(2), QubitId(2)).unwrap();
        circuit.h(QubitId(2)).unwrap();

        FuseMultiControlledZ
            .run(&mut circuit, &mut PropertySet::new())
            .unwrap();

        let names: Vec<_> = circuit.instructions().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["mcz", "mcx", "h"]);
    }
}
