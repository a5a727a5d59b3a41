//! Benchmarks for the absorption pipeline.
//!
//! Run with: `cargo bench --bench pipeline`

use absorber_core::{
    evaluate, evaluate_many, EvaluationParams, FrequencyAxis, Incidence, Layer, LayerStack, Panel,
    PorousModel,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn porous_on_gap() -> LayerStack {
    LayerStack::new(vec![
        Layer::porous(PorousModel::Miki, 13_000.0, 0.05),
        Layer::air(0.1),
    ])
    .unwrap_or_else(|e| panic!("bench stack: {e}"))
}

/// Thickness/cavity sweep of faced porous absorbers.
fn design_grid(n: usize) -> Vec<LayerStack> {
    (0..n)
        .map(|i| {
            let thickness = 0.01 + 0.005 * (i % 8) as f64;
            let gap = 0.02 * (i / 8 + 1) as f64;
            LayerStack::new(vec![
                Layer::sheet(Panel::Perforated {
                    thickness: 0.006,
                    hole_diameter: 0.005,
                    hole_spacing: 0.025,
                }),
                Layer::porous(PorousModel::DelanyBazley, 20_000.0, thickness),
                Layer::air(gap),
            ])
            .unwrap_or_else(|e| panic!("bench stack: {e}"))
        })
        .collect()
}

fn bench_single_stack(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let axis = FrequencyAxis::default();
    let stack = porous_on_gap();

    for incidence in [Incidence::Normal, Incidence::Diffuse] {
        let params = EvaluationParams {
            incidence,
            ..EvaluationParams::default()
        };
        group.bench_with_input(
            BenchmarkId::new("porous_on_gap", format!("{incidence:?}")),
            &params,
            |b, params| b.iter(|| evaluate(black_box(&axis), black_box(&stack), params)),
        );
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_many");
    let axis = FrequencyAxis::default();
    let params = EvaluationParams::default();

    for n in [8, 64] {
        let stacks = design_grid(n);
        group.bench_with_input(BenchmarkId::new("faced_porous", n), &stacks, |b, stacks| {
            b.iter(|| evaluate_many(black_box(&axis), black_box(stacks), &params))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_stack, bench_batch);
criterion_main!(benches);
