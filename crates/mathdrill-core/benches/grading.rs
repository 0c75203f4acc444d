use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

use mathdrill_core::grader::{compare_fractions, gcd, grade, normalize_answer};
use mathdrill_core::model::{FractionPayload, GradeRequest, Payload, SkillTemplate};
use mathdrill_core::Engine;

fn bench_ground_truth(c: &mut Criterion) {
    let mut group = c.benchmark_group("ground_truth");

    let small = FractionPayload { a: 3, b: 4, c: 1, d: 2 };
    group.bench_function("fraction_small", |b| {
        b.iter(|| compare_fractions(black_box(&small)))
    });

    let huge = FractionPayload {
        a: i64::MAX - 7,
        b: i64::MAX,
        c: i64::MAX - 9,
        d: i64::MAX - 1,
    };
    group.bench_function("fraction_i64_extremes", |b| {
        b.iter(|| compare_fractions(black_box(&huge)))
    });

    group.bench_function("gcd_48_18", |b| b.iter(|| gcd(black_box(48), black_box(18))));

    // Consecutive Fibonacci numbers are Euclid's worst case.
    group.bench_function("gcd_fibonacci", |b| {
        b.iter(|| gcd(black_box(7_540_113_804_746_346_429), black_box(4_660_046_610_375_530_309)))
    });

    group.finish();
}

fn bench_grade(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade");

    let request = GradeRequest {
        template_id: SkillTemplate::FractionCompare,
        answer: "＞".into(),
        payload: Payload::Fraction(FractionPayload { a: 3, b: 4, c: 1, d: 2 }),
    };
    group.bench_function("typed", |b| b.iter(|| grade(black_box(&request))));

    group.bench_function("normalize", |b| {
        b.iter(|| normalize_answer(black_box("  ＞  ")))
    });

    let engine = Engine::default();
    let body = json!({
        "template_id": "math_gcd_v1",
        "answer": "6",
        "payload": {"X": 48, "Y": 18}
    });
    group.bench_function("validate_and_grade", |b| {
        b.iter(|| engine.grade_value(black_box(&body)))
    });

    let invalid = json!({
        "template_id": "math_frac_compare_v1",
        "answer": ">",
        "payload": {"A": 3, "B": 4, "C": 1},
        "extra": true
    });
    group.bench_function("reject_invalid", |b| {
        b.iter(|| engine.grade_value(black_box(&invalid)))
    });

    group.finish();
}

criterion_group!(benches, bench_ground_truth, bench_grade);
criterion_main!(benches);
