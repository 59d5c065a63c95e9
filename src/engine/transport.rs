//! Transport state: tempo, position and play/pause.

use crate::{MAX_BPM, MIN_BPM};

/// Play state of one practice session.
///
/// `current_step` is the step most recently handed to subscribers, always in
/// `0..total_steps`. Nothing here is persisted; a new session starts at step 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Transport {
    total_steps: usize,
    bpm: f64,
    current_step: usize,
    is_playing: bool,
}

impl Transport {
    /// `total_steps` of zero is treated as one so the modulo stays defined.
    pub fn new(total_steps: usize, bpm: f64) -> Self {
        let mut transport = Self {
            total_steps: total_steps.max(1),
            bpm: MIN_BPM,
            current_step: 0,
            is_playing: false,
        };
        transport.set_bpm(bpm);
        transport
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn play(&mut self) {
        self.is_playing = true;
    }

    /// Halt; position is kept. Idempotent.
    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    /// Halt and rewind to step 0.
    pub fn stop(&mut self) {
        self.is_playing = false;
        self.current_step = 0;
    }

    /// Set tempo, clamped to the engine range. Non-finite input is ignored.
    /// Returns the tempo now in effect.
    pub fn set_bpm(&mut self, bpm: f64) -> f64 {
        if bpm.is_finite() {
            self.bpm = bpm.clamp(MIN_BPM, MAX_BPM);
        } else {
            log::warn!("ignoring non-finite tempo {bpm}");
        }
        self.bpm
    }

    /// Move the playhead, clamped into range. Play state is untouched.
    pub fn set_step(&mut self, step: usize) -> usize {
        self.current_step = step.min(self.total_steps - 1);
        self.current_step
    }

    /// The step after `step`, wrapping at the end of the bar.
    pub fn following(&self, step: usize) -> usize {
        (step + 1) % self.total_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tempo_is_clamped() {
        let mut transport = Transport::new(8, 500.0);
        assert_eq!(transport.bpm(), MAX_BPM);

        assert_eq!(transport.set_bpm(10.0), MIN_BPM);
        assert_eq!(transport.set_bpm(96.0), 96.0);
        assert_eq!(transport.set_bpm(f64::NAN), 96.0);
        assert_eq!(transport.set_bpm(f64::INFINITY), 96.0);
    }

    #[test]
    fn pause_keeps_position_and_stop_rewinds() {
        let mut transport = Transport::new(8, 120.0);
        transport.play();
        transport.set_step(5);

        transport.pause();
        transport.pause();
        assert!(!transport.is_playing());
        assert_eq!(transport.current_step(), 5);

        transport.stop();
        assert_eq!(transport.current_step(), 0);
    }

    #[test]
    fn set_step_clamps_and_keeps_play_state() {
        let mut transport = Transport::new(8, 120.0);
        transport.play();

        assert_eq!(transport.set_step(42), 7);
        assert!(transport.is_playing());
        assert_eq!(transport.following(7), 0);
    }
}
