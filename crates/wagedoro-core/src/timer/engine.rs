//! Timer engine implementation.
//!
//! The engine is a tick-driven state machine. It does not own threads or
//! timers - the caller delivers countdown ticks via `tick()` and earnings
//! ticks via `accrual_tick()`, normally through a [`TimerDriver`].
//!
//! ## Phase Transitions
//!
//! ```text
//! Working --(tick at 00:00)--> Break --(tick at 00:00)--> Working
//! ```
//!
//! A phase flips on the tick *after* the countdown reaches zero, so `00:00`
//! is observable for one full tick.
//!
//! [`TimerDriver`]: super::TimerDriver

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, trace};

use super::phase::{Durations, Phase};
use crate::config::Config;
use crate::events::Event;
use crate::format;

const SECS_PER_HOUR: f64 = 3600.0;

/// Immutable view of all engine state at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub remaining_secs: u64,
    pub money_earned: f64,
    pub is_running: bool,
    pub hourly_wage: f64,
}

impl Snapshot {
    /// Remaining time as `MM:SS`.
    pub fn clock(&self) -> String {
        format::format_clock(self.remaining_secs)
    }

    /// Earnings with exactly two decimals.
    pub fn money(&self) -> String {
        format::format_money(self.money_earned)
    }

    pub fn label(&self) -> &'static str {
        self.phase.label()
    }
}

/// Core timer engine.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    durations: Durations,
    phase: Phase,
    remaining_secs: u64,
    hourly_wage: f64,
    money_earned: f64,
    running: bool,
}

impl TimerEngine {
    /// Create a stopped engine at the start of a work phase with nothing earned.
    pub fn new(durations: Durations, hourly_wage: f64) -> Self {
        Self {
            durations,
            phase: Phase::Working,
            remaining_secs: durations.work_secs,
            hourly_wage,
            money_earned: 0.0,
            running: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.durations(), config.hourly_wage)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn money_earned(&self) -> f64 {
        self.money_earned
    }

    pub fn hourly_wage(&self) -> f64 {
        self.hourly_wage
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn durations(&self) -> Durations {
        self.durations
    }

    /// Whether an accrual tick delivered now would credit anything.
    pub fn is_accruing(&self) -> bool {
        self.running && self.phase.accrues()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            money_earned: self.money_earned,
            is_running: self.running,
            hourly_wage: self.hourly_wage,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        Some(Event::TimerStarted {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn stop(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerStopped {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// The single start/stop control exposed to users.
    pub fn toggle_running(&mut self) -> Option<Event> {
        if self.running {
            self.stop()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.phase = Phase::Working;
        self.remaining_secs = self.durations.work_secs;
        self.money_earned = 0.0;
        self.running = false;
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Store a new wage. No validation: zero and negative values are kept
    /// as entered. Already accrued earnings are untouched.
    pub fn set_hourly_wage(&mut self, wage: f64) -> Option<Event> {
        let from = self.hourly_wage;
        self.hourly_wage = wage;
        Some(Event::WageChanged {
            from,
            to: wage,
            at: Utc::now(),
        })
    }

    /// Countdown tick. Returns `Some(Event::PhaseChanged)` on the tick that
    /// flips the phase.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
            trace!(remaining = self.remaining_secs, "countdown tick");
            return None;
        }

        let from = self.phase;
        self.phase = from.flipped();
        self.remaining_secs = self.durations.for_phase(self.phase);
        debug!(?from, to = ?self.phase, remaining = self.remaining_secs, "phase changed");
        Some(Event::PhaseChanged {
            from,
            to: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Earnings tick. Credits one second of the current wage while running in
    /// the work phase and returns the amount credited.
    ///
    /// Negative wages credit nothing so earnings never go down.
    pub fn accrual_tick(&mut self) -> f64 {
        if !self.is_accruing() {
            return 0.0;
        }
        let amount = self.hourly_wage.max(0.0) / SECS_PER_HOUR;
        self.money_earned += amount;
        amount
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(Durations::default(), 20.0)
    }
}
