//! Step timeline produced under an irregular host timer.

use std::sync::Arc;

use rand::{rngs::StdRng, Rng, SeedableRng};

use backbeat::{
    config::SchedulerConfig,
    engine::{AudioClock, ManualClock, Scheduler, StepEvent},
    sequencing::Subdivision,
};

fn drain(rx: &mut rtrb::Consumer<StepEvent>, into: &mut Vec<StepEvent>) {
    while let Ok(event) = rx.pop() {
        into.push(event);
    }
}

#[test]
fn jittered_polls_keep_a_strict_cycle() {
    let clock = Arc::new(ManualClock::new());
    let mut scheduler = Scheduler::new(
        clock.clone(),
        8,
        Subdivision::Eighth,
        97.0,
        SchedulerConfig::default(),
    );
    let mut rx = scheduler.subscribe();
    let mut rng = StdRng::seed_from_u64(7);
    let mut events = Vec::new();

    scheduler.start(0).unwrap();
    while clock.now() < 20.0 {
        clock.advance(rng.gen_range(0.005..0.09));
        scheduler.poll();
        drain(&mut rx, &mut events);
    }

    let duration = Subdivision::Eighth.step_duration(97.0);
    assert!(events.len() > 60);
    for (i, event) in events.iter().enumerate() {
        assert_eq!(event.step, i % 8, "event {i}");
    }
    for pair in events.windows(2) {
        assert!((pair[1].time - pair[0].time - duration).abs() < 1e-9);
    }
}

#[test]
fn steps_are_never_discovered_late() {
    let clock = Arc::new(ManualClock::new());
    let mut scheduler = Scheduler::new(
        clock.clone(),
        16,
        Subdivision::Sixteenth,
        140.0,
        SchedulerConfig::default(),
    );
    let mut rx = scheduler.subscribe();
    let mut rng = StdRng::seed_from_u64(99);

    scheduler.start(0).unwrap();
    let mut polls = 0;
    while polls < 400 {
        let polled_at = clock.now();
        scheduler.poll();
        while let Ok(event) = rx.pop() {
            assert!(event.time >= polled_at, "step {} emitted after its time", event.step);
        }
        clock.advance(rng.gen_range(0.01..0.095));
        polls += 1;
    }
}

#[test]
fn tempo_change_applies_from_the_next_step() {
    let clock = Arc::new(ManualClock::new());
    let mut scheduler = Scheduler::new(
        clock.clone(),
        8,
        Subdivision::Eighth,
        60.0,
        SchedulerConfig::default(),
    );
    let mut rx = scheduler.subscribe();
    let mut events = Vec::new();

    scheduler.start(0).unwrap();
    clock.set(1.0);
    scheduler.poll();
    drain(&mut rx, &mut events);
    let before = events.len();

    scheduler.set_tempo(120.0);
    clock.set(2.4);
    scheduler.poll();
    drain(&mut rx, &mut events);

    // Steps already emitted keep their 0.5 s spacing
    for pair in events[..before].windows(2) {
        assert!((pair[1].time - pair[0].time - 0.5).abs() < 1e-9);
    }
    // The step after the change is still a 0.5 s increment away
    assert!((events[before].time - events[before - 1].time - 0.5).abs() < 1e-9);
    for pair in events[before..].windows(2) {
        assert!((pair[1].time - pair[0].time - 0.25).abs() < 1e-9);
    }
}

#[test]
fn step_duration_follows_tempo_and_subdivision() {
    assert_eq!(Subdivision::Eighth.step_duration(120.0), 0.25);
    assert_eq!(Subdivision::Eighth.step_duration(60.0), 0.5);
    assert_eq!(Subdivision::Sixteenth.step_duration(120.0), 0.125);
    assert!((Subdivision::Eighth.step_duration(80.0) - 0.375).abs() < 1e-12);
}
