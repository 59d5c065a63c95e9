use std::f32::consts::TAU;

use rand::{rngs::StdRng, Rng, SeedableRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Oscillator Core
===============

A phase accumulator plus a waveform lookup. The phase runs 0.0 → 1.0 once per
cycle and wraps; each waveform maps that phase to a sample in [-1, 1]:

    sine       sin(2π · phase)
    triangle   1 - 4 · |phase - 0.5|      (peaks at ±1, no discontinuities)
    noise      uniform random in [-1, 1)  (phase ignored)

Frequency is passed per sample rather than stored so callers can sweep pitch
(kick drum) without the oscillator knowing about envelopes.

Noise uses a seedable `StdRng` owned by the block. `ThreadRng` would be
cheaper to construct but is not `Send`, and voices are built on the control
thread and rendered on the audio thread.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillatorWaveform {
    Sine,
    Triangle,
    Noise,
}

pub struct OscillatorBlock {
    waveform: OscillatorWaveform,
    phase: f32,
    rng: StdRng,
}

impl OscillatorBlock {
    pub fn new(waveform: OscillatorWaveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorWaveform::Sine)
    }

    pub fn triangle() -> Self {
        Self::new(OscillatorWaveform::Triangle)
    }

    pub fn noise() -> Self {
        Self::new(OscillatorWaveform::Noise)
    }

    /// Noise source with a fixed seed, for reproducible renders.
    pub fn seeded_noise(seed: u64) -> Self {
        Self {
            waveform: OscillatorWaveform::Noise,
            phase: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn waveform(&self) -> OscillatorWaveform {
        self.waveform
    }

    /// Produce one sample at `frequency` Hz and advance the phase.
    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let value = match self.waveform {
            OscillatorWaveform::Sine => (TAU * self.phase).sin(),
            OscillatorWaveform::Triangle => 1.0 - 4.0 * (self.phase - 0.5).abs(),
            OscillatorWaveform::Noise => return self.rng.gen_range(-1.0..1.0),
        };

        self.phase += frequency / sample_rate;
        self.phase -= self.phase.floor();
        value
    }

    /// Fill `out` at a constant frequency.
    pub fn render(&mut self, out: &mut [f32], frequency: f32, sample_rate: f32) {
        for sample in out.iter_mut() {
            *sample = self.next_sample(frequency, sample_rate);
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
