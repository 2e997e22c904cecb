use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mechgg_core::analysis::analyze;
use mechgg_core::drills::build_plan;
use mechgg_core::model::{Category, Style};
use mechgg_core::synth::synthesize;

fn bench_synthesize(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesize");

    group.bench_function("fps_tactical", |b| {
        b.iter(|| synthesize(black_box(4242), Category::Fps, Style::Tactical))
    });

    group.bench_function("strategy_rts", |b| {
        b.iter(|| synthesize(black_box(4242), Category::Strategy, Style::Rts))
    });

    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");

    for game in ["valorant", "gt7", "dota2", "sf6", "unknown"] {
        group.bench_function(game, |b| b.iter(|| analyze(black_box(9001), black_box(game))));
    }

    group.finish();
}

fn bench_build_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_plan");

    let result = analyze(17, "valorant");
    group.bench_function("fps", |b| {
        b.iter(|| build_plan(black_box(&result.habits), result.category))
    });

    group.bench_function("no_habits", |b| {
        b.iter(|| build_plan(black_box(&[]), Category::Racing))
    });

    group.finish();
}

criterion_group!(benches, bench_synthesize, bench_analyze, bench_build_plan);
criterion_main!(benches);
