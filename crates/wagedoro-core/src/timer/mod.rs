mod engine;
mod phase;
mod scheduler;
mod session;

pub use engine::{Snapshot, TimerEngine};
pub use phase::{Durations, Phase};
pub use scheduler::{
    ManualHandle, ManualScheduler, Scheduler, SessionId, Tick, TickHandle, TickStream,
    TokioHandle, TokioScheduler,
};
pub use session::TimerDriver;
