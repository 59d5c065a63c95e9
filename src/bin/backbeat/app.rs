//! backbeat - application setup and event loop

use std::{
    io::stdout,
    sync::Arc,
    time::{Duration, Instant, SystemTime},
};

use color_eyre::eyre::{Result, WrapErr};
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::supports_keyboard_enhancement,
};
use ratatui::DefaultTerminal;

use backbeat::{
    config::EngineConfig,
    engine::{shared_clock, AudioClock},
    exercise::ExerciseCatalog,
    input::KeyAction,
    progress::{InMemoryProgress, ProgressStore},
    scoring::ScoringMode,
    sequencing::{Catalog, Drum},
    session::{PracticeMode, PracticeSession},
    synth::DrumRack,
    MAX_BPM, MIN_BPM,
};

use super::{
    audio::AudioDevice,
    ui::{self, LadderEntry, ViewModel},
};

const FALLBACK_SAMPLE_RATE: u32 = 48_000;
const TEMPO_STEP: f64 = 5.0;
const UI_FRAME: Duration = Duration::from_millis(16);

pub enum Selection {
    Exercise { id: String },
    Pattern { id: String, timing: bool },
}

struct Slot {
    title: String,
    subtitle: String,
    session: PracticeSession,
}

pub struct App {
    slots: Vec<Slot>,
    active: usize,
    exercises: &'static ExerciseCatalog,
    progress: InMemoryProgress,
    status: Option<String>,
    audio: Option<cpal::Stream>,
    should_quit: bool,
}

impl App {
    /// Open audio, build every session the selection can reach, then hand
    /// the rack to the audio thread.
    pub fn new(
        selection: Selection,
        bpm: Option<f64>,
        patterns: &Catalog,
        exercises: &'static ExerciseCatalog,
        config: EngineConfig,
    ) -> Result<Self> {
        let clock = shared_clock();
        let device = match AudioDevice::open_default() {
            Ok(device) => Some(device),
            Err(err) => {
                log::warn!("running without audio: {err:#}");
                None
            }
        };

        let sample_rate = device
            .as_ref()
            .map_or(FALLBACK_SAMPLE_RATE, AudioDevice::sample_rate);
        let mut rack = DrumRack::new(sample_rate as f32).with_gain(config.synth.master_gain);
        let session_clock: Arc<dyn AudioClock> = clock.clone();

        let (slots, active) = match selection {
            Selection::Exercise { id } => {
                exercises.require(&id)?;
                let ids: Vec<String> = exercises
                    .level_of(&id)
                    .map_or_else(|| vec![id.clone()], |level| level.exercise_ids.clone());

                let mut slots = Vec::with_capacity(ids.len());
                for exercise_id in &ids {
                    let exercise = exercises.require(exercise_id)?;
                    let session = PracticeSession::for_exercise(
                        exercise,
                        patterns,
                        &mut rack,
                        Arc::clone(&session_clock),
                        &config,
                    )
                    .wrap_err_with(|| format!("cannot build exercise {exercise_id}"))?;
                    slots.push(Slot {
                        title: exercise.title.clone(),
                        subtitle: format!("Level {} | {:?} | {}", exercise.level, exercise.kind, exercise.counting),
                        session,
                    });
                }
                let active = ids.iter().position(|e| *e == id).unwrap_or(0);
                (slots, active)
            }
            Selection::Pattern { id, timing } => {
                let pattern = Arc::new(patterns.require(&id)?.clone());
                let mode = if timing { ScoringMode::Timing } else { ScoringMode::Groove };
                let slot = Slot {
                    title: pattern.name().to_string(),
                    subtitle: pattern.description().to_string(),
                    session: PracticeSession::new(
                        Arc::clone(&pattern),
                        mode,
                        pattern.default_tempo_bpm() as f64,
                        &mut rack,
                        Arc::clone(&session_clock),
                        &config,
                    )?,
                };
                (vec![slot], 0)
            }
        };

        let mut app = Self {
            slots,
            active,
            exercises,
            progress: InMemoryProgress::new(),
            status: None,
            audio: None,
            should_quit: false,
        };

        if let Some(bpm) = bpm {
            for slot in &mut app.slots {
                slot.session.set_bpm(bpm);
            }
        }

        if let Some(device) = device {
            match device.start(rack, clock) {
                Ok(stream) => app.audio = Some(stream),
                Err(err) => {
                    log::error!("audio output failed: {err:#}");
                    app.status = Some(format!("audio not available: {err}"));
                }
            }
        } else {
            app.status = Some("audio not available: no output device".to_string());
        }

        Ok(app)
    }

    pub fn run(mut self) -> Result<()> {
        let mut terminal = ratatui::init();

        // Without release events a held key is indistinguishable from a fresh press
        let release_events = supports_keyboard_enhancement().unwrap_or(false)
            && execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .is_ok();
        for slot in &mut self.slots {
            slot.session.set_track_release(release_events);
        }
        log::debug!("key release events: {release_events}");

        let result = self.event_loop(&mut terminal);

        if release_events {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        ratatui::restore();
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let tick_interval = self.session().poll_interval();
        let mut last_tick = Instant::now();

        while !self.should_quit {
            if last_tick.elapsed() >= tick_interval {
                self.tick();
                last_tick = Instant::now();
            }

            let view = self.view();
            terminal.draw(|frame| ui::render(frame, &view))?;

            let timeout = tick_interval
                .saturating_sub(last_tick.elapsed())
                .min(UI_FRAME);
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
        }

        Ok(())
    }

    fn session(&self) -> &PracticeSession {
        &self.slots[self.active].session
    }

    fn session_mut(&mut self) -> &mut PracticeSession {
        &mut self.slots[self.active].session
    }

    fn tick(&mut self) {
        let Some(result) = self.session_mut().tick() else {
            return;
        };

        if let Some(id) = self.session().exercise_id().map(str::to_string) {
            self.progress
                .record(&id, result.stars, result.accuracy, SystemTime::now());
        }
        self.status = Some(format!("{} [r] to go again", result.feedback));
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let action = match key.kind {
            KeyEventKind::Press => KeyAction::Press,
            KeyEventKind::Repeat => KeyAction::Repeat,
            KeyEventKind::Release => KeyAction::Release,
        };

        if let KeyCode::Char(c) = key.code {
            if self.session().keymap().drum_for(c).is_some() {
                self.session_mut().key(c, action);
                return;
            }
        }
        if action != KeyAction::Press {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('p') => {
                if let Err(err) = self.session_mut().toggle() {
                    self.status = Some(err.to_string());
                }
            }
            KeyCode::Char('s') => self.session_mut().stop(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.nudge_tempo(TEMPO_STEP),
            KeyCode::Char('-') => self.nudge_tempo(-TEMPO_STEP),
            KeyCode::Char('m') => {
                let enabled = !self.session().metronome();
                self.session_mut().set_metronome(enabled);
            }
            KeyCode::Char('t') => {
                let mode = match self.session().mode() {
                    PracticeMode::Listen => PracticeMode::Tap,
                    PracticeMode::Tap => PracticeMode::Listen,
                };
                self.session_mut().set_mode(mode);
            }
            KeyCode::Char('r') => {
                self.session_mut().reset_scoring();
                self.status = None;
            }
            // On-screen pads
            KeyCode::Char('1') => {
                self.session_mut().button(Drum::Kick);
            }
            KeyCode::Char('2') => {
                self.session_mut().button(Drum::Snare);
            }
            KeyCode::Char('3') => {
                self.session_mut().button(Drum::HiHat);
            }
            KeyCode::Right | KeyCode::Char('n') => self.select(self.active + 1),
            KeyCode::Left | KeyCode::Char('b') => {
                if let Some(index) = self.active.checked_sub(1) {
                    self.select(index);
                }
            }
            _ => {}
        }
    }

    fn nudge_tempo(&mut self, delta: f64) {
        let bpm = (self.session().bpm() + delta).clamp(MIN_BPM, MAX_BPM);
        self.session_mut().set_bpm(bpm);
    }

    fn select(&mut self, index: usize) {
        if index >= self.slots.len() || index == self.active {
            return;
        }
        if !self.is_unlocked(index) {
            self.status = Some(format!("\"{}\" is locked", self.slots[index].title));
            return;
        }

        self.session_mut().stop();
        self.active = index;
        self.status = None;
    }

    fn is_unlocked(&self, index: usize) -> bool {
        match self.slots[index].session.exercise_id() {
            Some(id) => self.exercises.is_unlocked(&self.progress, id),
            None => true,
        }
    }

    fn view(&self) -> ViewModel {
        let slot = &self.slots[self.active];
        let session = &slot.session;
        let scoring = session.scoring();

        let ladder = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(index, s)| {
                let id = s.session.exercise_id()?;
                Some(LadderEntry {
                    title: s.title.clone(),
                    stars: self.progress.stars(id),
                    unlocked: self.is_unlocked(index),
                    active: index == self.active,
                })
            })
            .collect();

        ViewModel {
            title: slot.title.clone(),
            subtitle: slot.subtitle.clone(),
            bpm: session.bpm(),
            playing: session.is_playing(),
            mode: session.mode(),
            metronome: session.metronome(),
            scoring_mode: scoring.mode(),
            loops_completed: scoring.loops_completed(),
            loops_required: scoring.loops_to_score(),
            grid: session.step_grid(),
            current_hit: session.current_hit(),
            keys: Drum::ALL.map(|drum| (drum, session.keymap().key_for(drum))),
            result: session.result().ok().cloned(),
            ladder,
            status: self.status.clone(),
            audio: self.audio.is_some(),
        }
    }
}
