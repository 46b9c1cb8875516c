//! Benchmarks for the statevector engine
//!
//! Run with: cargo bench -p qff-adapter-sim

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qff_adapter_sim::Statevector;
use qff_ir::{Circuit, QubitId};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// One oracle-plus-diffuser round on `n` qubits.
fn grover_round(n: u32) -> Circuit {
    let mut circuit = Circuit::with_size("bench", n, 0);
    let controls: Vec<_> = (0..n - 1).map(QubitId).collect();
    let last = QubitId(n - 1);
    circuit.h_all().unwrap();
    circuit.h(last).unwrap();
    circuit.mcx(&controls, last).unwrap();
    circuit.h(last).unwrap();
    circuit.h_all().unwrap();
    circuit.x_all().unwrap();
    circuit.h(last).unwrap();
    circuit.mcx(&controls, last).unwrap();
    circuit.h(last).unwrap();
    circuit.x_all().unwrap();
    circuit.h_all().unwrap();
    circuit
}

fn bench_evolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolution");

    for n in &[6u32, 10, 14] {
        let circuit = grover_round(*n);
        group.bench_with_input(BenchmarkId::new("grover_round", n), &circuit, |b, circ| {
            b.iter(|| Statevector::from_circuit(black_box(circ)));
        });
    }

    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let sv = Statevector::from_circuit(&grover_round(10));

    c.bench_function("sample_1024_shots", |b| {
        let mut rng = StdRng::seed_from_u64(0);
        b.iter(|| sv.sample_many(&mut rng, black_box(1024)));
    });
}

criterion_group!(benches, bench_evolution, bench_sampling);
criterion_main!(benches);
