//! A busy rack: sixteen overlapping hits mixed into one block.

use std::{hint::black_box, sync::Arc};

use backbeat::{
    engine::ManualClock,
    sequencing::Drum,
    synth::{DrumRack, Sound},
};
use criterion::{BatchSize, BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

const HITS: usize = 16;

pub fn bench_rack(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/rack");
    let clock = Arc::new(ManualClock::new());

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("sixteen_hits", size), &size, |b, _| {
            b.iter_batched(
                || {
                    let mut rack = DrumRack::new(SAMPLE_RATE);
                    let mut synth = rack.connect(clock.clone(), HITS);
                    for i in 0..HITS {
                        let drum = Drum::ALL[i % Drum::ALL.len()];
                        // Spread the starts across the block
                        let at = (i * size / HITS) as f64 / SAMPLE_RATE as f64;
                        synth.play(Sound::Drum(drum), Some(at));
                    }
                    (rack, synth)
                },
                |(mut rack, _synth)| rack.render(black_box(&mut buffer), 0),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}
