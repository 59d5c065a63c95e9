/*
Audio Clock
===========

Everything in the engine is timed against one clock: the number of frames the
audio device has consumed, divided by the sample rate. Step boundaries, drum
triggers and captured hits are all stamped in these seconds, so they can be
compared with each other directly.

The device runs on its own crystal and delivers callbacks in bursts, so the
frame count drifts against the wall clock. No engine code reads wall time.

    audio callback ──advance(frames)──→ StreamClock ──now()──→ scheduler
                                                      └──────→ input capture
                                                      └──────→ synthesizer

The clock starts `Suspended`. It becomes `Running` once an output stream is
attached (or `resume` succeeds) and only then does `now()` move.

Components receive the clock as `Arc<dyn AudioClock>`, so tests can drive
time by hand with `ManualClock`.
*/

use std::sync::{
    atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering},
    Arc, OnceLock,
};

use crate::error::AudioError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Running,
    Suspended,
}

/// Monotonic time source shared by every engine component.
pub trait AudioClock: Send + Sync {
    /// Current time in seconds.
    fn now(&self) -> f64;

    fn state(&self) -> ClockState;

    /// Ask the clock to start running.
    fn resume(&self) -> Result<(), AudioError>;

    fn is_running(&self) -> bool {
        self.state() == ClockState::Running
    }
}

/// Clock driven by an audio output stream's frame count.
#[derive(Debug, Default)]
pub struct StreamClock {
    frames: AtomicU64,
    sample_rate: AtomicU32,
    attached: AtomicBool,
    running: AtomicBool,
}

impl StreamClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once the output stream is open and playing.
    pub fn attach(&self, sample_rate: u32) {
        self.sample_rate.store(sample_rate, Ordering::Release);
        self.attached.store(true, Ordering::Release);
        self.running.store(true, Ordering::Release);
        log::info!("audio clock attached at {sample_rate} Hz");
    }

    /// Called when the stream errors out or is paused.
    pub fn suspend(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Called from the audio callback after each rendered block.
    #[inline]
    pub fn advance(&self, frames: u64) {
        if self.running.load(Ordering::Relaxed) {
            self.frames.fetch_add(frames, Ordering::AcqRel);
        }
    }

    /// Frames consumed so far. The start frame of the next callback block.
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate.load(Ordering::Acquire)
    }
}

impl AudioClock for StreamClock {
    fn now(&self) -> f64 {
        let rate = self.sample_rate();
        if rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / rate as f64
    }

    fn state(&self) -> ClockState {
        if self.running.load(Ordering::Acquire) {
            ClockState::Running
        } else {
            ClockState::Suspended
        }
    }

    fn resume(&self) -> Result<(), AudioError> {
        if !self.attached.load(Ordering::Acquire) {
            return Err(AudioError::Unavailable(
                "no output stream attached".to_string(),
            ));
        }
        self.running.store(true, Ordering::Release);
        Ok(())
    }
}

/// The process-wide stream clock, created on first use and never torn down.
pub fn shared_clock() -> Arc<StreamClock> {
    static CLOCK: OnceLock<Arc<StreamClock>> = OnceLock::new();
    Arc::clone(CLOCK.get_or_init(|| Arc::new(StreamClock::new())))
}

/// Hand-driven clock for tests and offline rendering.
#[derive(Debug)]
pub struct ManualClock {
    seconds: AtomicU64,
    running: AtomicBool,
    fail_resume: AtomicBool,
}

impl ManualClock {
    /// A running clock at t = 0.
    pub fn new() -> Self {
        Self {
            seconds: AtomicU64::new(0f64.to_bits()),
            running: AtomicBool::new(true),
            fail_resume: AtomicBool::new(false),
        }
    }

    /// A suspended clock whose `resume` succeeds.
    pub fn suspended() -> Self {
        let clock = Self::new();
        clock.running.store(false, Ordering::Release);
        clock
    }

    pub fn set(&self, seconds: f64) {
        self.seconds.store(seconds.to_bits(), Ordering::Release);
    }

    pub fn advance(&self, seconds: f64) {
        self.set(self.now() + seconds);
    }

    pub fn suspend(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Make subsequent `resume` calls fail, like a device that is gone.
    pub fn fail_resume(&self, fail: bool) {
        self.fail_resume.store(fail, Ordering::Release);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioClock for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.seconds.load(Ordering::Acquire))
    }

    fn state(&self) -> ClockState {
        if self.running.load(Ordering::Acquire) {
            ClockState::Running
        } else {
            ClockState::Suspended
        }
    }

    fn resume(&self) -> Result<(), AudioError> {
        if self.fail_resume.load(Ordering::Acquire) {
            return Err(AudioError::Unavailable("resume refused".to_string()));
        }
        self.running.store(true, Ordering::Release);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_clock_counts_frames_once_attached() {
        let clock = StreamClock::new();
        clock.advance(480);
        assert_eq!(clock.now(), 0.0, "suspended clock does not move");
        assert_eq!(clock.state(), ClockState::Suspended);
        assert!(clock.resume().is_err());

        clock.attach(48_000);
        clock.advance(480);
        clock.advance(480);
        assert_eq!(clock.frames(), 960);
        assert!((clock.now() - 0.02).abs() < 1e-12);
        assert!(clock.is_running());
    }

    #[test]
    fn stream_clock_resumes_after_suspend() {
        let clock = StreamClock::new();
        clock.attach(44_100);
        clock.suspend();
        assert!(!clock.is_running());

        clock.resume().expect("attached clock resumes");
        assert!(clock.is_running());
    }

    #[test]
    fn shared_clock_is_a_singleton() {
        assert!(Arc::ptr_eq(&shared_clock(), &shared_clock()));
    }

    #[test]
    fn manual_clock_moves_by_hand() {
        let clock = ManualClock::new();
        clock.set(1.5);
        clock.advance(0.25);
        assert_eq!(clock.now(), 1.75);

        let clock = ManualClock::suspended();
        clock.fail_resume(true);
        assert!(matches!(clock.resume(), Err(AudioError::Unavailable(_))));
        clock.fail_resume(false);
        assert!(clock.resume().is_ok());
        assert!(clock.is_running());
    }
}
