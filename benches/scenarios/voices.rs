//! Benchmarks for the drum voice graphs, from the attack onward.

use std::hint::black_box;

use backbeat::{
    graph::{GraphNode, RenderCtx},
    sequencing::Drum,
    voices,
};
use criterion::{BatchSize, BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let ctx = RenderCtx::new(SAMPLE_RATE);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for drum in Drum::ALL {
            group.bench_with_input(BenchmarkId::new(drum.name(), size), &size, |b, _| {
                b.iter_batched(
                    || {
                        let mut voice = voices::drum(drum);
                        voice.note_on(&ctx);
                        voice
                    },
                    |mut voice| voice.render_block(black_box(&mut buffer), &ctx),
                    BatchSize::SmallInput,
                )
            });
        }

        group.bench_with_input(BenchmarkId::new("click", size), &size, |b, _| {
            b.iter_batched(
                || {
                    let mut voice = voices::click(true);
                    voice.note_on(&ctx);
                    voice
                },
                |mut voice| voice.render_block(black_box(&mut buffer), &ctx),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}
