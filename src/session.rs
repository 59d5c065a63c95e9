/*
Practice Session
================

One exercise in play. The session owns every engine component and wires
them to the scheduler as independent subscribers:

                    ┌──→ PatternPlayer ──→ Synthesizer ──┐
    Scheduler ──────┼──→ ScoringEngine                   ├──→ DrumRack (audio thread)
                    └──→ VisualPlayhead                  │
    InputCapture ──────────────────────→ Synthesizer ────┘
         └──────── hits ──→ ScoringEngine

The host calls `tick` on a coarse timer (the scheduler's poll interval).
Nothing here blocks, so key handling and UI redraws can share the thread.
*/

use std::sync::Arc;

use rtrb::Consumer;

use crate::{
    config::EngineConfig,
    engine::{AudioClock, PatternPlayer, Scheduler, StepEvent, VisualPlayhead},
    error::{Result, ScoringError},
    exercise::Exercise,
    input::{HitEvent, InputCapture, KeyAction, Keymap},
    scoring::{HitOutcome, ScoringEngine, ScoringMode, ScoringResult, StepFeedback},
    sequencing::{Catalog, Drum, DrumSet, Pattern},
    synth::DrumRack,
};

/// Listen plays the pattern; Tap mutes it so the student plays the part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PracticeMode {
    #[default]
    Listen,
    Tap,
}

/// One grid column as the UI draws it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    pub index: usize,
    pub count_label: String,
    pub expected: DrumSet,
    pub lit: bool,
    pub feedback: Option<StepFeedback>,
}

pub struct PracticeSession {
    exercise_id: Option<String>,
    pattern: Arc<Pattern>,
    clock: Arc<dyn AudioClock>,

    scheduler: Scheduler,
    player: PatternPlayer,
    scoring: ScoringEngine,
    scoring_events: Consumer<StepEvent>,
    playhead: VisualPlayhead,
    input: InputCapture,

    mode: PracticeMode,
    result_reported: bool,
}

impl PracticeSession {
    /// Build a session for `pattern`. Every synthesizer handle is connected
    /// to `rack`, so call this before the rack moves to the audio thread.
    pub fn new(
        pattern: Arc<Pattern>,
        scoring_mode: ScoringMode,
        bpm: f64,
        rack: &mut DrumRack,
        clock: Arc<dyn AudioClock>,
        config: &EngineConfig,
    ) -> Result<Self> {
        let keymap = Keymap::from_bindings(&config.input.keys)?;

        let mut scheduler = Scheduler::new(
            Arc::clone(&clock),
            pattern.len(),
            pattern.subdivision(),
            bpm,
            config.scheduler.clone(),
        );

        let player = PatternPlayer::new(
            scheduler.subscribe(),
            Arc::clone(&pattern),
            rack.connect(Arc::clone(&clock), config.synth.queue_capacity),
        );
        let scoring_events = scheduler.subscribe();
        let playhead = VisualPlayhead::new(scheduler.subscribe());
        let input = InputCapture::new(
            keymap,
            rack.connect(Arc::clone(&clock), config.synth.queue_capacity),
            Arc::clone(&clock),
            &config.input,
        );
        let scoring = ScoringEngine::new(Arc::clone(&pattern), scoring_mode, config.scoring.clone());

        log::info!(
            "session ready: {} at {} BPM, {:?} scoring",
            pattern.id(),
            scheduler.bpm(),
            scoring_mode
        );

        Ok(Self {
            exercise_id: None,
            pattern,
            clock,
            scheduler,
            player,
            scoring,
            scoring_events,
            playhead,
            input,
            mode: PracticeMode::default(),
            result_reported: false,
        })
    }

    /// Session for an exercise at its own tempo and scoring mode.
    pub fn for_exercise(
        exercise: &Exercise,
        patterns: &Catalog,
        rack: &mut DrumRack,
        clock: Arc<dyn AudioClock>,
        config: &EngineConfig,
    ) -> Result<Self> {
        let pattern = exercise.resolve_pattern(patterns)?;
        let mut session = Self::new(
            pattern,
            exercise.scoring_mode(),
            exercise.tempo_bpm as f64,
            rack,
            clock,
            config,
        )?;
        session.exercise_id = Some(exercise.id.clone());
        Ok(session)
    }

    /// Start or resume playback. Fails if the audio clock cannot run.
    pub fn play(&mut self) -> Result<()> {
        self.scheduler.resume()?;
        self.tick();
        Ok(())
    }

    /// Halt playback; position and scoring progress are kept.
    ///
    /// Steps the scheduler has already emitted still sound, so they stay
    /// queued for scoring and the playhead and go live at their time.
    pub fn pause(&mut self) {
        self.scheduler.pause();
        self.player.pump();
        self.drain_step_events();
    }

    /// Halt, rewind, and throw away the attempt.
    pub fn stop(&mut self) {
        self.scheduler.stop();
        self.player.flush();
        while self.scoring_events.pop().is_ok() {}
        self.scoring.discard_pending();
        self.playhead.reset();
        self.reset_scoring();
    }

    pub fn toggle(&mut self) -> Result<()> {
        if self.is_playing() {
            self.pause();
            Ok(())
        } else {
            self.play()
        }
    }

    fn drain_step_events(&mut self) {
        while let Ok(event) = self.scoring_events.pop() {
            self.scoring.observe_step(event);
        }
    }

    /// Start a new attempt. Scoring resumes on the next downbeat.
    pub fn reset_scoring(&mut self) {
        self.scoring.reset();
        self.result_reported = false;
    }

    pub fn set_bpm(&mut self, bpm: f64) -> f64 {
        self.scheduler.set_tempo(bpm)
    }

    /// Move the playhead without changing play state.
    pub fn set_step(&mut self, step: usize) -> usize {
        self.scheduler.set_step(step)
    }

    pub fn set_mode(&mut self, mode: PracticeMode) {
        self.mode = mode;
        self.player.set_muted(mode == PracticeMode::Tap);
    }

    pub fn set_metronome(&mut self, enabled: bool) {
        self.player.set_metronome(enabled);
    }

    /// One host-timer tick. Returns the result the first time it is ready.
    pub fn tick(&mut self) -> Option<ScoringResult> {
        self.scheduler.poll();
        self.player.pump();

        self.drain_step_events();
        for hit in self.input.drain_hits() {
            match self.scoring.record_hit(hit) {
                HitOutcome::Recorded { loop_index, step } => {
                    log::debug!("{} on loop {loop_index} step {step}", hit.drum);
                }
                outcome => log::debug!("{} at {:.3}s not scored: {outcome:?}", hit.drum, hit.timestamp),
            }
        }

        let now = self.clock.now();
        self.scoring.advance(now);
        self.playhead.update(now);

        if self.result_reported {
            return None;
        }
        let result = self.scoring.result().ok().cloned();
        self.result_reported = result.is_some();
        result
    }

    pub fn key(&mut self, key: char, action: KeyAction) -> Option<HitEvent> {
        self.input.key(key, action)
    }

    pub fn button(&mut self, drum: Drum) -> HitEvent {
        self.input.button(drum)
    }

    pub fn set_track_release(&mut self, track: bool) {
        self.input.set_track_release(track);
    }

    pub fn keymap(&self) -> &Keymap {
        self.input.keymap()
    }

    /// Drum to flash as "just hit".
    pub fn current_hit(&self) -> Option<Drum> {
        self.input.current_hit(self.clock.now())
    }

    pub fn step_grid(&self) -> Vec<StepView> {
        let lit = self.playhead.lit();
        self.pattern
            .steps()
            .iter()
            .enumerate()
            .map(|(index, step)| StepView {
                index,
                count_label: step.count_label.clone(),
                expected: step.hit,
                lit: lit == Some(index),
                feedback: self.scoring.step_feedback(index),
            })
            .collect()
    }

    pub fn result(&self) -> std::result::Result<&ScoringResult, ScoringError> {
        self.scoring.result()
    }

    pub fn exercise_id(&self) -> Option<&str> {
        self.exercise_id.as_deref()
    }

    pub fn pattern(&self) -> &Arc<Pattern> {
        &self.pattern
    }

    pub fn mode(&self) -> PracticeMode {
        self.mode
    }

    pub fn metronome(&self) -> bool {
        self.player.metronome()
    }

    pub fn is_playing(&self) -> bool {
        self.scheduler.is_playing()
    }

    pub fn bpm(&self) -> f64 {
        self.scheduler.bpm()
    }

    pub fn lit_step(&self) -> Option<usize> {
        self.playhead.lit()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn scoring(&self) -> &ScoringEngine {
        &self.scoring
    }

    pub fn poll_interval(&self) -> std::time::Duration {
        self.scheduler.poll_interval()
    }
}
