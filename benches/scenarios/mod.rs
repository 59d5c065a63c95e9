mod rack;
mod scheduler;
mod voices;

pub use rack::bench_rack;
pub use scheduler::bench_scheduler;
pub use voices::bench_voices;
