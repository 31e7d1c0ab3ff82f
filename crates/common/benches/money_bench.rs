use common::Money;
use criterion::{Criterion, criterion_group, criterion_main};

fn bench_parse(c: &mut Criterion) {
    c.bench_function("money/parse", |b| {
        b.iter(|| {
            let m: Money = "12.34".parse().unwrap();
            m
        });
    });
}

fn bench_multiply(c: &mut Criterion) {
    let unit: Money = "12.34".parse().unwrap();

    c.bench_function("money/multiply", |b| {
        b.iter(|| unit.multiply(10));
    });
}

fn bench_render(c: &mut Criterion) {
    let total: Money = "123.40".parse().unwrap();

    c.bench_function("money/render", |b| {
        b.iter(|| total.as_canonical_string());
    });
}

criterion_group!(benches, bench_parse, bench_multiply, bench_render);
criterion_main!(benches);
