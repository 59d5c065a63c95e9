use crate::MIN_TIME;

/*
Percussive Decay Envelope
=========================

Drum hits have no sustain: they jump to a peak on the strike and die away.
This envelope models exactly that, with three stages:

  Level
   peak ┐╲
        │ ╲
        │  ╲_
        │    ╲__
  floor │       ╲________
    0.0 └────────────────┴──→ Time
        0     decay     stop

Vocabulary
----------

  peak     Level at the instant of the strike (t = 0).

  floor    Level reached at the end of the decay (0.01, i.e. -40 dB). An
           exponential curve can never reach zero, so it aims for a small
           positive floor instead.

  decay    Seconds to travel from peak to floor.

  stop     Seconds after the strike at which output is cut to 0 and the
           envelope goes idle. Between `decay` and `stop` the level holds at
           the floor. If `stop < decay` the tail is simply truncated.


The Math: Exponential Ramp
--------------------------

    level(t) = peak · (floor / peak) ^ (t / decay)        0 <= t < decay

At t = 0 the exponent is 0 and the level is `peak`; at t = decay the exponent
is 1 and the level is `floor`. Each sample multiplies the level by a constant
ratio, which is why exponential decays sound natural: loudness is perceived
logarithmically, so a constant-ratio fall sounds like a steady fade.

The per-sample ratio is

    ratio = (floor / peak) ^ (1 / (decay · sample_rate))

but we evaluate the closed form from the elapsed sample count instead of
accumulating products, so rounding error never builds up over long tails.
*/

/// Level an exponential ramp settles on before the voice stops.
pub const DECAY_FLOOR: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Idle,
    Decay,
    Hold,
}

pub struct DecayEnvelope {
    peak: f32,
    decay_time: f32,
    stop_time: f32,

    stage: EnvelopeStage,
    level: f32,
    elapsed_samples: u64,
}

impl DecayEnvelope {
    /// Envelope from `peak` to [`DECAY_FLOOR`] over `decay` seconds, silent
    /// after `stop` seconds.
    pub fn new(peak: f32, decay: f32, stop: f32) -> Self {
        Self {
            peak: peak.max(0.0),
            decay_time: decay.max(MIN_TIME),
            stop_time: stop.max(MIN_TIME),
            stage: EnvelopeStage::Idle,
            level: 0.0,
            elapsed_samples: 0,
        }
    }

    /// Strike: restart from the peak.
    pub fn trigger(&mut self) {
        self.stage = EnvelopeStage::Decay;
        self.elapsed_samples = 0;
        self.level = self.peak;
    }

    /// Closed-form level `t` seconds after the strike.
    pub fn level_at(&self, t: f32) -> f32 {
        if t >= self.stop_time || t < 0.0 {
            0.0
        } else if t < self.decay_time {
            if self.peak <= DECAY_FLOOR {
                self.peak
            } else {
                self.peak * (DECAY_FLOOR / self.peak).powf(t / self.decay_time)
            }
        } else {
            DECAY_FLOOR.min(self.peak)
        }
    }

    /// Advance one sample and return the level for it.
    pub fn next_sample(&mut self, sample_rate: f32) -> f32 {
        if self.stage == EnvelopeStage::Idle {
            self.level = 0.0;
            return 0.0;
        }

        let t = self.elapsed_samples as f32 / sample_rate;
        self.level = self.level_at(t);
        self.elapsed_samples += 1;

        if t >= self.stop_time {
            self.stage = EnvelopeStage::Idle;
        } else if t >= self.decay_time {
            self.stage = EnvelopeStage::Hold;
        }

        self.level
    }

    pub fn render(&mut self, buffer: &mut [f32], sample_rate: f32) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(sample_rate);
        }
    }

    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeStage::Idle
    }

    pub fn reset(&mut self) {
        self.stage = EnvelopeStage::Idle;
        self.level = 0.0;
        self.elapsed_samples = 0;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    /// Seconds after the strike at which this envelope falls silent.
    pub fn stop_time(&self) -> f32 {
        self.stop_time
    }
}
