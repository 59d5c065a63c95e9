use std::hint::black_box;

use backbeat::dsp::OscillatorBlock;
use criterion::{BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut sine = OscillatorBlock::sine();
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| sine.render(black_box(&mut buffer), black_box(180.0), SAMPLE_RATE))
        });

        let mut triangle = OscillatorBlock::triangle();
        group.bench_with_input(BenchmarkId::new("triangle", size), &size, |b, _| {
            b.iter(|| triangle.render(black_box(&mut buffer), black_box(180.0), SAMPLE_RATE))
        });

        // Noise draws from the RNG for every sample
        let mut noise = OscillatorBlock::seeded_noise(7);
        group.bench_with_input(BenchmarkId::new("noise", size), &size, |b, _| {
            b.iter(|| noise.render(black_box(&mut buffer), 0.0, SAMPLE_RATE))
        });
    }

    group.finish();
}
