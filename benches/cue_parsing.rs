//! Benchmarks for caption parsing and active-cue lookup
//!
//! Tests parser throughput on synthetic tracks and the cost of resolving the
//! active cue on every position update.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use episodic_captions::{active_text, format_timestamp, parse, render_vtt, Segment};

/// A track of `count` back-to-back cues, four seconds each, with an
/// occasional damaged block mixed in.
fn synthetic_track(count: usize) -> String {
    let segments: Vec<Segment> = (0..count)
        .map(|i| Segment {
            start: i as f64 * 4.0,
            end: i as f64 * 4.0 + 4.0,
            text: format!("Caption line {i}\nsecond line for cue {i}"),
        })
        .collect();
    let mut track = render_vtt(&segments);
    for i in (0..count).step_by(50) {
        track.push_str(&format!(
            "\n{} --> garbage\nbroken block {i}\n",
            format_timestamp(i as f64)
        ));
    }
    track
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for count in [10, 500, 5000] {
        let track = synthetic_track(count);
        group.bench_with_input(BenchmarkId::new("cues", count), &track, |b, track| {
            b.iter(|| parse(black_box(track)))
        });
    }

    group.finish();
}

fn bench_active_cue(c: &mut Criterion) {
    let mut group = c.benchmark_group("active_cue");
    let cues = parse(&synthetic_track(2000));

    group.bench_function("hit/early", |b| {
        b.iter(|| active_text(black_box(&cues), black_box(10.0)))
    });
    group.bench_function("hit/late", |b| {
        b.iter(|| active_text(black_box(&cues), black_box(7_990.0)))
    });
    group.bench_function("miss/past_end", |b| {
        b.iter(|| active_text(black_box(&cues), black_box(99_999.0)))
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_active_cue);
criterion_main!(benches);
