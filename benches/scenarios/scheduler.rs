//! Scheduler polling at the host timer rate, with three subscribers.

use std::{hint::black_box, sync::Arc};

use backbeat::{
    config::SchedulerConfig,
    engine::{ManualClock, Scheduler},
    sequencing::Subdivision,
    MAX_BPM,
};
use criterion::Criterion;

pub fn bench_scheduler(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/scheduler");

    let clock = Arc::new(ManualClock::new());
    let mut scheduler = Scheduler::new(
        clock.clone(),
        16,
        Subdivision::Sixteenth,
        MAX_BPM,
        SchedulerConfig::default(),
    );
    let mut subscribers: Vec<_> = (0..3).map(|_| scheduler.subscribe()).collect();
    scheduler.start(0).expect("manual clock is running");

    group.bench_function("poll_25ms", |b| {
        b.iter(|| {
            clock.advance(0.025);
            black_box(scheduler.poll());
            for events in &mut subscribers {
                while events.pop().is_ok() {}
            }
        })
    });

    group.finish();
}
