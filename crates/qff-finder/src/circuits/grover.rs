//! The full search circuit.

use qff_ir::Circuit;

use super::{apply_diffuser, apply_oracle};
use crate::error::FinderResult;
use crate::target::{NUM_QUBITS, TargetIndex};

/// Build the search circuit for `target`.
///
/// Uniform superposition, `iterations` rounds of oracle and diffuser, then
/// qubit `i` measured into classical bit `i`. Six rounds leave the target
/// with roughly 16% probability, well short of the optimum of about 25
/// rounds but enough to make it the most frequent outcome.
pub fn grover_circuit(target: TargetIndex, iterations: u32) -> FinderResult<Circuit> {
    let mut circuit = Circuit::with_size("grover", NUM_QUBITS, NUM_QUBITS);

    circuit.h_all()?;

    for _ in 0..iterations {
        apply_oracle(&mut circuit, target)?;
        apply_diffuser(&mut circuit)?;
    }

    circuit.measure_all()?;

    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qff_ir::{ClbitId, QubitId};

    #[test]
    fn test_grover_circuit_shape() {
        let target = TargetIndex::new(5).unwrap();
        let circuit = grover_circuit(target, 6).unwrap();

        assert_eq!(circuit.name(), "grover");
        assert_eq!(circuit.num_qubits(), 10);
        assert_eq!(circuit.num_clbits(), 10);
        assert_eq!(circuit.gate_counts().get("mcx"), Some(&12));
        assert!(circuit.measures_all());
    }

    #[test]
    fn test_measures_qubit_into_same_clbit() {
        let circuit = grover_circuit(TargetIndex::MIN, 1).unwrap();
        let measure = circuit.instructions().last().unwrap();

        assert!(measure.is_measure());
        for (q, c) in measure.qubits.iter().zip(&measure.clbits) {
            assert_eq!(q.0, c.0);
        }
        assert_eq!(measure.qubits[0], QubitId(0));
        assert_eq!(measure.clbits[9], ClbitId(9));
    }

    #[test]
    fn test_zero_iterations() {
        let circuit = grover_circuit(TargetIndex::MAX, 0).unwrap();
        assert_eq!(circuit.num_ops(), 11);
    }
}
