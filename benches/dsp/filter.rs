use std::hint::black_box;

use backbeat::dsp::{OscillatorBlock, SVFilter};
use criterion::{BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        let mut input = vec![0.0f32; size];
        OscillatorBlock::seeded_noise(3).render(&mut input, 0.0, SAMPLE_RATE);
        let mut buffer = input.clone();

        // Hi-hat band
        let mut highpass = SVFilter::highpass(7_000.0);
        group.bench_with_input(BenchmarkId::new("highpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                highpass.render(black_box(&mut buffer), SAMPLE_RATE);
            })
        });

        let mut lowpass = SVFilter::lowpass(1_000.0);
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                lowpass.render(black_box(&mut buffer), SAMPLE_RATE);
            })
        });
    }

    group.finish();
}
