//! Segmentation throughput.
//!
//! Run with: cargo bench -p mixscript-text --bench segment_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mixscript_text::{classify, segment};
use std::hint::black_box;

const SAMPLES: &[(&str, &str)] = &[
    ("latin", "The quick brown fox jumps over the lazy dog, 42 times. "),
    ("khmer", "សួស្តី ពិភពលោក! ខ្ញុំស្រឡាញ់ភាសាខ្មែរ។ "),
    ("mixed", "Hello, សួស្តី! สวัสดี ສະບາຍດີ မင်္ဂလာပါ Xin chào. "),
];

fn bench_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment");
    for &(name, sample) in SAMPLES {
        let text = sample.repeat(64);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &text, |b, text| {
            b.iter(|| segment(black_box(text)));
        });
    }
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    for &(name, sample) in SAMPLES {
        group.bench_with_input(BenchmarkId::from_parameter(name), sample, |b, text| {
            b.iter(|| classify(black_box(text)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_segment, bench_classify);
criterion_main!(benches);
