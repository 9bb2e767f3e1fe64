//! # Wagedoro Core Library
//!
//! Core logic for the Wagedoro work/break timer, which also tracks simulated
//! hourly earnings while the work phase is running. The terminal binary is a
//! thin presentation layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a pure state machine. It owns no threads or timers;
//!   the caller delivers countdown and accrual ticks.
//! - **Scheduler**: the capability that produces those ticks. Tests and the
//!   headless simulator use [`ManualScheduler`]; the interactive session uses
//!   [`TokioScheduler`].
//! - **Driver**: [`TimerDriver`] couples one engine to one scheduler and keeps
//!   at most one ticking session alive at a time.
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: phase/countdown/earnings state machine
//! - [`TimerDriver`]: owns the active ticking session
//! - [`Config`]: durations, starting wage and tick period

pub mod config;
pub mod error;
pub mod events;
pub mod format;
pub mod timer;
pub mod wage;

pub use config::Config;
pub use error::{ConfigError, CoreError};
pub use events::Event;
pub use timer::{
    Durations, ManualScheduler, Phase, Scheduler, SessionId, Snapshot, Tick, TickHandle,
    TickStream, TimerDriver, TimerEngine, TokioScheduler,
};
