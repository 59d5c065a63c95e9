use std::hint::black_box;

use backbeat::dsp::DecayEnvelope;
use criterion::{BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Long decay so every iteration stays in the decay stage
        let mut decay = DecayEnvelope::new(1.0, 3_600.0, 3_600.0);
        decay.trigger();
        group.bench_with_input(BenchmarkId::new("decay", size), &size, |b, _| {
            b.iter(|| decay.render(black_box(&mut buffer), SAMPLE_RATE))
        });

        let mut idle = DecayEnvelope::new(1.0, 0.05, 0.1);
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| idle.render(black_box(&mut buffer), SAMPLE_RATE))
        });
    }

    group.finish();
}
