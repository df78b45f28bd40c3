//! Benchmarks for neutosc propagation
//!
//! Run with: cargo bench
//!
//! Covers:
//! - Closed-form vacuum vs Lie–Trotter matter propagation
//! - Matter propagation at several subdivision counts
//! - Serial vs parallel energy sweeps
//! - Euler integration over a short baseline

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use neutosc::{par_sweep, sweep, Flavour, Oscillator, ParametersBuilder, SweepParameter};

/// DUNE-like baseline, muon neutrino at 2.5 GeV
fn dune(density: f64) -> Oscillator {
    let params = ParametersBuilder::new()
        .flavour(Flavour::Muon)
        .energy(2.5)
        .length(1300.0)
        .density(density)
        .build()
        .expect("valid benchmark parameters");
    Oscillator::new(params).expect("valid benchmark parameters")
}

fn bench_single_point(c: &mut Criterion) {
    let vacuum = dune(0.0);
    let matter = dune(2848.0);

    c.bench_function("vacuum_single", |b| b.iter(|| black_box(&vacuum).evaluate_vacuum()));
    c.bench_function("matter_single", |b| b.iter(|| black_box(&matter).evaluate_matter()));
}

fn bench_subdivisions(c: &mut Criterion) {
    let mut group = c.benchmark_group("matter_subdivisions");

    for n in [16u32, 128, 1024, 8192] {
        let osc = dune(2848.0).with_subdivisions(n).expect("positive subdivisions");
        group.bench_with_input(BenchmarkId::from_parameter(format!("N={}", n)), &osc, |b, osc| {
            b.iter(|| black_box(osc).evaluate_matter())
        });
    }

    group.finish();
}

/// 1000-point energy spectrum
fn bench_energy_sweep(c: &mut Criterion) {
    let osc = dune(2848.0);

    c.bench_function("matter_sweep_1000", |b| {
        b.iter(|| sweep(black_box(&osc), SweepParameter::Energy, 1000))
    });
    c.bench_function("matter_par_sweep_1000", |b| {
        b.iter(|| par_sweep(black_box(&osc), SweepParameter::Energy, 1000))
    });
}

fn bench_integrator(c: &mut Criterion) {
    let osc = Oscillator::default();

    c.bench_function("euler_50km_step_0.1", |b| {
        b.iter(|| osc.integrate(Flavour::Muon, black_box(0.5), 50.0, 0.1))
    });
}

criterion_group!(
    benches,
    bench_single_point,
    bench_subdivisions,
    bench_energy_sweep,
    bench_integrator,
);

criterion_main!(benches);
