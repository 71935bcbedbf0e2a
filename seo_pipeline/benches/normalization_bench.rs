// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Text Processing Benchmarks
//!
//! Measures the cost of the deterministic normalization pass and the
//! SimHash fingerprint, both run once per generated article (normalization
//! by the cleanup stage, fingerprinting by the similarity-check stage) and
//! both latency-sensitive since they sit in the per-job critical path.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use seo_pipeline::text::normalize::normalize;
use seo_pipeline::text::simhash::fingerprint;

fn sample_article(word_count: usize) -> String {
    let paragraph = "Our platform streamlines customer onboarding\u{2014}reducing time to \
        value by 40%!!! Teams love the seamless integration & the responsive support staff??";
    paragraph.repeat(word_count / 20 + 1)
}

fn benchmark_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for word_count in [500usize, 1500, 3000] {
        let article = sample_article(word_count);
        group.bench_with_input(BenchmarkId::new("normalize", word_count), &article, |b, article| {
            b.iter(|| normalize(black_box(article)));
        });
    }

    group.finish();
}

fn benchmark_fingerprint(c: &mut Criterion) {
    let mut group = c.benchmark_group("simhash_fingerprint");

    for word_count in [500usize, 1500, 3000] {
        let article = sample_article(word_count);
        group.bench_with_input(BenchmarkId::new("fingerprint", word_count), &article, |b, article| {
            b.iter(|| fingerprint(black_box(article)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_normalize, benchmark_fingerprint);
criterion_main!(benches);
