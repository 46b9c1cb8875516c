//! The oracle flips exactly the marked amplitude, for every target.

use num_complex::Complex64;
use qff_adapter_sim::Statevector;
use qff_compile::transpile;
use qff_finder::{NUM_QUBITS, SEARCH_SPACE, TargetIndex, apply_diffuser, apply_oracle, grover_circuit};
use qff_ir::Circuit;

const EPS: f64 = 1e-9;

fn approx_eq(a: Complex64, b: Complex64) -> bool {
    (a - b).norm() < EPS
}

#[test]
fn oracle_negates_only_the_target() {
    let amp = 1.0 / (SEARCH_SPACE as f64).sqrt();

    for target in TargetIndex::all() {
        let mut circuit = Circuit::with_size("oracle", NUM_QUBITS, 0);
        circuit.h_all().unwrap();
        apply_oracle(&mut circuit, target).unwrap();

        let sv = Statevector::from_circuit(&circuit);
        for (i, &a) in sv.amplitudes().iter().enumerate() {
            let expected = if i == usize::from(target) { -amp } else { amp };
            assert!(
                approx_eq(a, Complex64::new(expected, 0.0)),
                "target {target}, basis state {i}: {a}"
            );
        }
    }
}

#[test]
fn diffuser_fixes_uniform_superposition() {
    let mut circuit = Circuit::with_size("diffuser", NUM_QUBITS, 0);
    circuit.h_all().unwrap();
    let before = Statevector::from_circuit(&circuit);
    apply_diffuser(&mut circuit).unwrap();
    let after = Statevector::from_circuit(&circuit);

    // 2|s><s| - I leaves |s> alone up to a global phase of -1
    let phase = after.amplitudes()[0] / before.amplitudes()[0];
    assert!((phase.norm() - 1.0).abs() < EPS);
    for (a, b) in after.amplitudes().iter().zip(before.amplitudes()) {
        assert!(approx_eq(*a, b * phase));
    }
}

#[test]
fn six_iterations_concentrate_on_target() {
    let target = TargetIndex::new(5).unwrap();
    let circuit = grover_circuit(target, 6).unwrap();
    let probs = Statevector::from_circuit(&circuit).probabilities();

    let theta = (1.0 / (SEARCH_SPACE as f64).sqrt()).asin();
    let expected = ((2.0 * 6.0 + 1.0) * theta).sin().powi(2);
    assert!((probs[5] - expected).abs() < 1e-9);
    assert!(probs[5] > 0.15);

    let runner_up = probs
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 5)
        .map(|(_, p)| *p)
        .fold(0.0, f64::max);
    assert!(probs[5] > 100.0 * runner_up);
}

#[test]
fn transpiled_search_has_same_state() {
    for index in [0, 5, 512, 1023] {
        let circuit = grover_circuit(TargetIndex::new(index).unwrap(), 6).unwrap();
        let (compiled, stats) = transpile(&circuit, 1).unwrap();
        assert!(stats.ops_after < stats.ops_before);
        assert_eq!(stats.gate_counts.get("mcx"), None);

        let a = Statevector::from_circuit(&circuit);
        let b = Statevector::from_circuit(&compiled);
        for (x, y) in a.amplitudes().iter().zip(b.amplitudes()) {
            assert!(approx_eq(*x, *y), "target {index}");
        }
    }
}
