//! Benchmarks for session token hot paths

use creohub_auth_core::{generate_session_token, hash_token, is_well_formed_token};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_token_generation(c: &mut Criterion) {
    c.bench_function("generate_session_token", |b| {
        b.iter(generate_session_token);
    });
}

fn bench_token_hash(c: &mut Criterion) {
    let token = generate_session_token();

    c.bench_function("hash_token", |b| {
        b.iter(|| hash_token(black_box(token.as_str())));
    });
}

fn bench_token_shape(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_well_formed_token");

    let valid = generate_session_token();
    let short = "deadbeef";
    let uppercase = valid.as_str().to_uppercase();

    group.bench_function("valid", |b| {
        b.iter(|| is_well_formed_token(black_box(valid.as_str())));
    });

    group.bench_function("short", |b| {
        b.iter(|| is_well_formed_token(black_box(short)));
    });

    group.bench_function("uppercase", |b| {
        b.iter(|| is_well_formed_token(black_box(&uppercase)));
    });

    group.finish();
}

criterion_group!(benches, bench_token_generation, bench_token_hash, bench_token_shape);
criterion_main!(benches);
