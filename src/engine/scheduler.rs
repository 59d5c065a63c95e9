/*
Lookahead Scheduler
===================

Timers on the host thread are jittery: a 25 ms timer may fire after 22 ms or
after 60 ms. Audio must not be. The scheduler bridges the two by scheduling
*ahead*: every poll it looks a short window into the future of the audio
clock and hands out every step boundary that falls inside, each stamped with
its exact audio-clock time. The synthesizer then starts the sound at that
precise frame, no matter when the poll ran.

    audio clock ──────────────────────────────────────────────────────→ t
                   now ├──── lookahead (100 ms) ────┤
    steps:      │      │   ●         ●         ●    │    ●         ●
                │      │ emitted  emitted  emitted  │  next poll
                ▲ poll

Choosing the Numbers
--------------------

  poll interval  25 ms   How often the host calls `poll`.
  lookahead     100 ms   Must exceed the worst expected gap between polls,
                         so no step is ever discovered after its time.
  start offset   50 ms   The first step after `start` is placed this far in
                         the future so it can be scheduled on time.

Step Timing
-----------

The scheduler keeps only two numbers: the index of the next step and its
time. After emitting a step it adds one step duration:

    step_duration = (60 / bpm) / steps_per_beat

Because each step is placed relative to the previous one, a tempo change
takes effect from the next increment on and never moves an already emitted
step. Steps run 0, 1, ..., N-1, 0, 1, ... without skips or repeats.

Stalls
------

If the host thread is suspended long enough that the next step is more than
`max_catch_up` in the past, emitting every missed step at once would produce
a burst of stale events. Instead the timeline is re-anchored at
`now + start_offset` and continues from the same step index.

Subscribers
-----------

Every step is broadcast to each subscriber's ring buffer. A push never
blocks: a full queue drops that event for that subscriber (with a warning)
and a dropped consumer is removed on the next emission.
*/

use std::sync::Arc;

use rtrb::{Producer, RingBuffer};

use crate::{
    config::SchedulerConfig,
    engine::{clock::AudioClock, transport::Transport},
    error::{Error, Result},
    sequencing::Subdivision,
};

/// One scheduled step boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepEvent {
    /// 0-indexed step within the bar.
    pub step: usize,
    /// Audio-clock time at which the step sounds.
    pub time: f64,
}

pub struct Scheduler {
    clock: Arc<dyn AudioClock>,
    transport: Transport,
    subdivision: Subdivision,
    config: SchedulerConfig,

    next_step: usize,
    next_step_time: f64,
    subscribers: Vec<Producer<StepEvent>>,
}

impl Scheduler {
    pub fn new(
        clock: Arc<dyn AudioClock>,
        total_steps: usize,
        subdivision: Subdivision,
        bpm: f64,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            clock,
            transport: Transport::new(total_steps, bpm),
            subdivision,
            config,
            next_step: 0,
            next_step_time: 0.0,
            subscribers: Vec::new(),
        }
    }

    /// Register a new listener for step events.
    pub fn subscribe(&mut self) -> rtrb::Consumer<StepEvent> {
        let (producer, consumer) = RingBuffer::new(self.config.subscriber_capacity.max(1));
        self.subscribers.push(producer);
        consumer
    }

    /// Begin scheduling from `from_step` (clamped into range).
    ///
    /// A suspended clock is resumed first; if that fails nothing starts and
    /// the audio error is returned. Calling `start` while already playing
    /// does nothing.
    pub fn start(&mut self, from_step: usize) -> Result<()> {
        self.start_at(from_step, f64::NEG_INFINITY)
    }

    /// Resume from the step that would have played next.
    ///
    /// Steps emitted before the pause still sound, so the next one is never
    /// placed earlier than its original slot.
    pub fn resume(&mut self) -> Result<()> {
        self.start_at(self.next_step, self.next_step_time)
    }

    fn start_at(&mut self, from_step: usize, earliest: f64) -> Result<()> {
        if self.transport.is_playing() {
            log::debug!("start ignored: already playing");
            return Ok(());
        }

        if !self.clock.is_running() {
            self.clock.resume().map_err(|err| {
                log::warn!("cannot start transport: {err}");
                Error::Audio(err)
            })?;
        }

        let step = self.transport.set_step(from_step);
        self.next_step = step;
        self.next_step_time = (self.clock.now() + self.config.start_offset()).max(earliest);
        self.transport.play();
        log::debug!(
            "transport started at step {step}, first step at {:.3}s",
            self.next_step_time
        );

        self.poll();
        Ok(())
    }

    /// Halt scheduling. Position is kept; idempotent.
    pub fn pause(&mut self) {
        if self.transport.is_playing() {
            log::debug!("transport paused before step {}", self.next_step);
        }
        self.transport.pause();
    }

    /// Halt and rewind to step 0.
    pub fn stop(&mut self) {
        self.transport.stop();
        self.next_step = 0;
        log::debug!("transport stopped");
    }

    /// Change tempo; clamped. Only increments computed after this call use
    /// the new tempo.
    pub fn set_tempo(&mut self, bpm: f64) -> f64 {
        let bpm = self.transport.set_bpm(bpm);
        log::debug!("tempo set to {bpm} BPM");
        bpm
    }

    /// Relocate the playhead without changing play state.
    pub fn set_step(&mut self, step: usize) -> usize {
        let step = self.transport.set_step(step);
        self.next_step = step;
        step
    }

    /// Emit every step boundary that falls before `now + lookahead`.
    /// Returns how many were emitted.
    pub fn poll(&mut self) -> usize {
        if !self.transport.is_playing() {
            return 0;
        }

        let now = self.clock.now();
        if self.next_step_time < now - self.config.max_catch_up() {
            log::warn!(
                "scheduler stalled {:.3}s, re-anchoring at step {}",
                now - self.next_step_time,
                self.next_step
            );
            self.next_step_time = now + self.config.start_offset();
        }

        let horizon = now + self.config.lookahead();
        let mut emitted = 0;
        while self.next_step_time < horizon {
            let event = StepEvent {
                step: self.next_step,
                time: self.next_step_time,
            };
            self.broadcast(event);
            self.transport.set_step(event.step);

            self.next_step_time += self.step_duration();
            self.next_step = self.transport.following(event.step);
            emitted += 1;
        }
        emitted
    }

    fn broadcast(&mut self, event: StepEvent) {
        self.subscribers.retain_mut(|producer| {
            if producer.is_abandoned() {
                return false;
            }
            if producer.push(event).is_err() {
                log::warn!("step subscriber full, dropping step {}", event.step);
            }
            true
        });
    }

    /// Seconds per step at the current tempo.
    pub fn step_duration(&self) -> f64 {
        self.subdivision.step_duration(self.transport.bpm())
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn is_playing(&self) -> bool {
        self.transport.is_playing()
    }

    pub fn bpm(&self) -> f64 {
        self.transport.bpm()
    }

    /// Step most recently emitted (or the start position before any).
    pub fn current_step(&self) -> usize {
        self.transport.current_step()
    }

    /// Step the next poll will emit first.
    pub fn next_step(&self) -> usize {
        self.next_step
    }

    /// Audio-clock time of the next step.
    pub fn next_step_time(&self) -> f64 {
        self.next_step_time
    }

    pub fn subdivision(&self) -> Subdivision {
        self.subdivision
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn poll_interval(&self) -> std::time::Duration {
        self.config.poll_interval()
    }
}
