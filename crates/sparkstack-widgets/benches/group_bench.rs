//! Benchmarks for sparkline group rendering.
//!
//! Run with: cargo bench -p sparkstack-widgets

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sparkstack_core::geometry::Rect;
use sparkstack_render::buffer::Buffer;
use sparkstack_widgets::{Sparkline, SparklineGroup};
use std::hint::black_box;

fn series(len: usize, seed: u64) -> Vec<u64> {
    (0..len as u64)
        .map(|i| (i.wrapping_mul(2_654_435_761) ^ seed) % 1_000)
        .collect()
}

fn group_of(lines: usize, len: usize) -> SparklineGroup {
    SparklineGroup::new(
        (0..lines)
            .map(|i| {
                Sparkline::new()
                    .title1(format!("series {i}"))
                    .title2("units/s")
                    .data(series(len, i as u64))
            })
            .collect(),
    )
}

// ============================================================================
// Draw
// ============================================================================

fn bench_group_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("widget/sparkline_group");

    for (w, h) in [(40, 10), (80, 24), (200, 60)] {
        let area = Rect::from_size(w, h);
        let mut buf = Buffer::new(w, h);

        for lines in [1, 4] {
            // Short enough that no trim happens, so every iteration is the same work.
            let mut sparks = group_of(lines, w as usize * 2);
            group.bench_with_input(
                BenchmarkId::new(format!("lines_{lines}"), format!("{w}x{h}")),
                &(),
                |b, _| {
                    b.iter(|| {
                        buf.clear();
                        sparks.draw(area, &mut buf);
                        black_box(&buf);
                    })
                },
            );
        }
    }

    group.finish();
}

// ============================================================================
// Streaming (push + draw + periodic trim)
// ============================================================================

fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("widget/sparkline_stream");
    let area = Rect::from_size(80, 24);
    let mut buf = Buffer::new(80, 24);
    let mut sparks = group_of(3, 0);
    let mut tick = 0u64;

    group.bench_function("push_draw_80x24", |b| {
        b.iter(|| {
            tick = tick.wrapping_add(1);
            for line in sparks.lines_mut() {
                line.push(tick % 97);
            }
            sparks.draw(area, &mut buf);
            black_box(&buf);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_group_draw, bench_stream);
criterion_main!(benches);
