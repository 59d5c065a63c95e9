use crate::dsp::oscillator::OscillatorBlock;
use crate::graph::node::{GraphNode, RenderCtx};

/*
Audio Oscillator
================

The raw sound source of every drum voice.

Waveforms used here:

  Sine      A single frequency, no harmonics. Deep and round at low pitch
            (kick body), a clean "tick" at high pitch (metronome).

  Triangle  Odd harmonics falling off as 1/n². Soft, slightly woody. Gives
            the snare its pitched "body".

  Noise     Every frequency at once. Filtered, it becomes the snare rattle
            or the hi-hat sizzle.

Pitch Sweeps
------------

A kick gets its punch from a pitch that starts high and falls fast. `sweep`
moves the frequency exponentially, so each millisecond drops the pitch by
the same musical interval:

    f(t) = from · (to / from) ^ (t / duration)      0 <= t < duration
    f(t) = to                                       t >= duration

  Hz
  150 ┐╲
      │ ╲
      │  ╲__
   40 │     ╲_____________
      └──────┴────────────→ t
             50ms

Example usage:
  let body = OscNode::sine().sweep(150.0, 40.0, 0.05);
  let tone = OscNode::triangle().with_frequency(180.0);
  let hiss = OscNode::noise();
*/

enum Pitch {
    Fixed(f32),
    Sweep { from: f32, to: f32, duration: f32 },
}

pub struct OscNode {
    osc: OscillatorBlock,
    pitch: Pitch,
    /// Samples rendered since the last note-on; drives the sweep.
    elapsed: u64,
}

impl OscNode {
    fn new(osc: OscillatorBlock) -> Self {
        Self {
            osc,
            pitch: Pitch::Fixed(440.0),
            elapsed: 0,
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorBlock::sine())
    }

    pub fn triangle() -> Self {
        Self::new(OscillatorBlock::triangle())
    }

    pub fn noise() -> Self {
        Self::new(OscillatorBlock::noise())
    }

    /// White noise from a fixed seed. Renders are bit-for-bit repeatable.
    pub fn seeded_noise(seed: u64) -> Self {
        Self::new(OscillatorBlock::seeded_noise(seed))
    }

    /// Play at a constant frequency.
    pub fn with_frequency(mut self, freq: f32) -> Self {
        self.pitch = Pitch::Fixed(freq);
        self
    }

    /// Glide exponentially from `from` Hz to `to` Hz over `duration` seconds,
    /// then hold `to`.
    pub fn sweep(mut self, from: f32, to: f32, duration: f32) -> Self {
        self.pitch = Pitch::Sweep {
            from: from.max(1.0),
            to: to.max(1.0),
            duration: duration.max(crate::MIN_TIME),
        };
        self
    }

    /// Frequency `t` seconds after note-on.
    pub fn frequency_at(&self, t: f32) -> f32 {
        match self.pitch {
            Pitch::Fixed(freq) => freq,
            Pitch::Sweep { from, to, duration } if t < duration => {
                from * (to / from).powf(t / duration)
            }
            Pitch::Sweep { to, .. } => to,
        }
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        match self.pitch {
            Pitch::Fixed(freq) => {
                self.osc.render(out, freq, ctx.sample_rate);
                self.elapsed += out.len() as u64;
            }
            Pitch::Sweep { .. } => {
                for sample in out.iter_mut() {
                    let t = self.elapsed as f32 / ctx.sample_rate;
                    let freq = self.frequency_at(t);
                    *sample = self.osc.next_sample(freq, ctx.sample_rate);
                    self.elapsed += 1;
                }
            }
        }
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.osc.reset();
        self.elapsed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    #[test]
    fn fixed_sine_matches_formula() {
        let sample_rate = 48_000.0;
        let ctx = RenderCtx::new(sample_rate);
        let mut osc = OscNode::sine().with_frequency(800.0);

        let mut buffer = vec![0.0f32; 128];
        osc.note_on(&ctx);
        osc.render_block(&mut buffer, &ctx);

        let n = 12;
        let expected = (TAU * 800.0 * n as f32 / sample_rate).sin();
        assert!((buffer[n] - expected).abs() < 1e-4);
    }

    #[test]
    fn sweep_falls_exponentially_then_holds() {
        let osc = OscNode::sine().sweep(150.0, 40.0, 0.05);

        assert!((osc.frequency_at(0.0) - 150.0).abs() < 1e-3);
        let midpoint = (150.0f32 * 40.0).sqrt();
        assert!((osc.frequency_at(0.025) - midpoint).abs() < 0.1);
        assert_eq!(osc.frequency_at(0.05), 40.0);
        assert_eq!(osc.frequency_at(1.0), 40.0);
    }

    #[test]
    fn note_on_restarts_sweep() {
        let ctx = RenderCtx::new(1_000.0);
        let mut osc = OscNode::sine().sweep(150.0, 40.0, 0.05);
        let mut first = vec![0.0f32; 32];
        let mut again = vec![0.0f32; 32];

        osc.note_on(&ctx);
        osc.render_block(&mut first, &ctx);
        osc.note_on(&ctx);
        osc.render_block(&mut again, &ctx);

        assert_eq!(first, again);
    }
}
