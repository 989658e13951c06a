use criterion::{Criterion, criterion_group, criterion_main};
use rustc_hash::FxHashMap;
use std::hint::black_box;
use symregen::{Batch, Equation, EvalContext, Generator, GeneratorConfig};

fn sample_grid(n: usize) -> Vec<f64> {
    (0..n).map(|i| -10.0 + 20.0 * i as f64 / n as f64).collect()
}

fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation");

    let eq = Equation::parse(&[
        "cos", "add", "mul", "sin", "x1", "sin", "mul", "x1", "x1", "cos", "sin", "x1",
    ])
    .expect("Should parse");

    let ctx = EvalContext::from_columns(vec![sample_grid(1000)]).expect("Should bind");
    group.bench_function("tree_walk_1k_samples", |b| {
        b.iter(|| black_box(&eq).evaluate(black_box(&ctx)))
    });

    let rows: Vec<Vec<f64>> = (0..64).map(|_| sample_grid(1000)).collect();
    let batched = Batch::from_rows(rows).expect("Should build");
    let batch_ctx = EvalContext::new((64, 1000))
        .with_variable("x1", batched)
        .expect("Should bind");
    group.bench_function("tree_walk_64x1k_batched", |b| {
        b.iter(|| black_box(&eq).evaluate(black_box(&batch_ctx)))
    });

    let guarded = Equation::parse(&["safe_pow", "x1", "safe_div", "x1", "safe_log", "x1"])
        .expect("Should parse");
    group.bench_function("guarded_kernels_1k_samples", |b| {
        b.iter(|| black_box(&guarded).evaluate(black_box(&ctx)))
    });

    group.finish();
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");

    let vocabulary: Vec<String> = ["add", "sub", "mul", "sin", "cos", "safe_div", "x1", "const"]
        .iter()
        .map(|t| t.to_string())
        .collect();
    let arities: FxHashMap<String, usize> = [
        ("add", 2),
        ("sub", 2),
        ("mul", 2),
        ("sin", 1),
        ("cos", 1),
        ("safe_div", 2),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    group.bench_function("sample_1k_len14", |b| {
        b.iter(|| {
            let config = GeneratorConfig::new(
                1000,
                14,
                vocabulary.clone(),
                arities.clone(),
            )
            .seeded(7);
            Generator::new(config)
                .expect("Should validate")
                .generate_batch()
                .expect("Should generate")
        })
    });

    group.bench_function("sample_1k_len14_rejecting_sin", |b| {
        b.iter(|| {
            let config = GeneratorConfig::new(
                1000,
                14,
                vocabulary.clone(),
                arities.clone(),
            )
            .seeded(7);
            Generator::new(config)
                .expect("Should validate")
                .with_predicate(|eq| !eq.to_string().contains("sin"))
                .generate_batch()
                .expect("Should generate")
        })
    });

    group.finish();
}

criterion_group!(benches, bench_evaluation, bench_generation);
criterion_main!(benches);
