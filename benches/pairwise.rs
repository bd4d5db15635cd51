//! Benchmarks for pairwise matrices and modifier evaluation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fuzzydist::algorithms::{Jaccard, Levenshtein, RatcliffObershelp, TextDistance};
use fuzzydist::modifiers::{Partial, TokenMax, TokenSort};
use fuzzydist::pairwise::{pairwise, PairwiseOptions, Preprocess};
use rand::prelude::*;

const WORDS: [&str; 12] = [
    "new", "york", "mets", "atlanta", "braves", "boston", "red", "sox", "chicago", "cubs",
    "los", "angeles",
];

/// Seeded phrases of two to five words.
fn phrases(n: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|_| {
            let len = rng.random_range(2..=5);
            (0..len)
                .map(|_| WORDS[rng.random_range(0..WORDS.len())])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn bench_modifiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("modifiers");

    let a = "New York Mets vs Atlanta Braves";
    let b = "Atlanta Braves vs New York Mets";
    let short = "york mets";

    group.bench_function("token_sort_levenshtein", |bench| {
        let dist = TokenSort::new(Levenshtein);
        bench.iter(|| dist.evaluate(black_box(a), black_box(b)))
    });
    group.bench_function("partial_levenshtein", |bench| {
        let dist = Partial::new(Levenshtein);
        bench.iter(|| dist.evaluate(black_box(short), black_box(b)))
    });
    group.bench_function("partial_ratcliff_obershelp", |bench| {
        let dist = Partial::new(RatcliffObershelp);
        bench.iter(|| dist.evaluate(black_box(short), black_box(b)))
    });
    group.bench_function("token_max_ratcliff_obershelp", |bench| {
        let dist = TokenMax::new(RatcliffObershelp);
        bench.iter(|| dist.evaluate(black_box(short), black_box(b)))
    });

    group.finish();
}

fn bench_pairwise(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairwise");

    for n in [50, 200, 500] {
        let xs = phrases(n);
        group.throughput(Throughput::Elements((n * (n - 1) / 2) as u64));

        group.bench_with_input(BenchmarkId::new("token_max", n), &xs, |bench, xs| {
            let dist = TokenMax::new(Levenshtein);
            let opts = PairwiseOptions::default();
            bench.iter(|| pairwise(&dist, black_box(xs), None, &opts))
        });

        for preprocess in [Preprocess::Never, Preprocess::Always] {
            let id = format!("jaccard_{preprocess:?}").to_lowercase();
            group.bench_with_input(BenchmarkId::new(id, n), &xs, |bench, xs| {
                let dist = Jaccard::new(2);
                let opts = PairwiseOptions::default().with_preprocess(preprocess);
                bench.iter(|| pairwise(&dist, black_box(xs), None, &opts))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_modifiers, bench_pairwise);
criterion_main!(benches);
