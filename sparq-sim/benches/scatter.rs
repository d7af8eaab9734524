//! Benchmarks for the scatter hot loop

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sparq_gates::matrices;
use sparq_sim::SparseState;

fn dense_superposition(qubits: usize) -> SparseState {
    let mut state = SparseState::new();
    for position in 0..qubits {
        state.apply_single(&matrices::HADAMARD, position);
    }
    state
}

fn bench_single_qubit_scatter(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_qubit_scatter");
    for qubits in [8, 12, 16] {
        group.bench_function(format!("h_on_{}q_superposition", qubits), |b| {
            let state = dense_superposition(qubits);
            b.iter(|| {
                let mut s = state.clone();
                s.apply_single(black_box(&matrices::HADAMARD), 0);
                s.prune();
                s
            });
        });
    }
    group.finish();
}

fn bench_specialized_vs_generic_cnot(c: &mut Criterion) {
    let mut group = c.benchmark_group("cnot");
    let state = dense_superposition(12);

    group.bench_function("permutation", |b| {
        b.iter(|| {
            let mut s = state.clone();
            s.apply_cnot(0, 1);
            s
        });
    });
    group.bench_function("scatter", |b| {
        b.iter(|| {
            let mut s = state.clone();
            s.apply_two(black_box(&matrices::CNOT), 0, 1);
            s.prune();
            s
        });
    });
    group.finish();
}

criterion_group!(benches, bench_single_qubit_scatter, bench_specialized_vs_generic_cnot);
criterion_main!(benches);
