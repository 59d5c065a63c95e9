//! Timing core: the audio clock, the transport and the lookahead scheduler,
//! plus the two step-event consumers that live next to it.

pub mod clock;
pub mod player;
pub mod playhead;
pub mod scheduler;
pub mod transport;

pub use clock::{shared_clock, AudioClock, ClockState, ManualClock, StreamClock};
pub use player::PatternPlayer;
pub use playhead::VisualPlayhead;
pub use scheduler::{Scheduler, StepEvent};
pub use transport::Transport;
