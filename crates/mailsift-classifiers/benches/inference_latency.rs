//! Latency benchmarks for the single-request inference path
//!
//! Run with: cargo bench -p mailsift-classifiers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use mailsift_classifiers::{
    is_valid_email_text, BundleFormat, FeatureTransformer, InferenceService, ModelPair,
};

const DEMO_BUNDLE: &str = include_str!("../../../models/spam_bundle.json");

fn demo_pair() -> ModelPair {
    ModelPair::from_slice(DEMO_BUNDLE.as_bytes(), BundleFormat::Json)
        .expect("Failed to load demo bundle")
}

fn test_cases() -> Vec<(&'static str, String)> {
    vec![
        ("short_ham", "Lunch tomorrow?".to_string()),
        (
            "short_spam",
            "Claim your free cash prize now, click here".to_string(),
        ),
        (
            "medium_ham",
            "Thanks for the project report. Can we schedule a call to review the agenda \
             before the team meeting tomorrow? The draft is attached."
                .to_string(),
        ),
        (
            "long_mixed",
            "Hello team, please find the quarterly report attached. ".repeat(40),
        ),
    ]
}

/// Benchmark the validator alone
fn benchmark_validator(c: &mut Criterion) {
    let mut group = c.benchmark_group("Validator");

    for (name, text) in test_cases() {
        group.bench_with_input(BenchmarkId::new("is_valid", name), &text, |b, text| {
            b.iter(|| is_valid_email_text(black_box(text)))
        });
    }

    group.finish();
}

/// Benchmark tf-idf transformation
fn benchmark_transform(c: &mut Criterion) {
    let pair = demo_pair();
    let mut group = c.benchmark_group("Vectorizer");

    for (name, text) in test_cases() {
        group.bench_with_input(BenchmarkId::new("transform", name), &text, |b, text| {
            b.iter(|| pair.transformer().transform(black_box(text)).unwrap())
        });
    }

    group.finish();
}

/// Benchmark the full predict path
fn benchmark_predict(c: &mut Criterion) {
    let service = InferenceService::new(demo_pair().into());
    let mut group = c.benchmark_group("InferenceService");
    group.sample_size(100);

    for (name, text) in test_cases() {
        group.bench_with_input(BenchmarkId::new("predict", name), &text, |b, text| {
            b.iter(|| service.predict(black_box(text)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_validator,
    benchmark_transform,
    benchmark_predict
);
criterion_main!(benches);
