//! Timer driver: one engine, one scheduler, at most one ticking session.
//!
//! Starting opens a fresh session (new [`SessionId`], new countdown stream,
//! and an accrual stream while in the work phase). Stopping or resetting
//! cancels the whole session before returning. Ticks carry the id of the
//! session that scheduled them, so anything still queued from a previous
//! session is dropped on delivery.

use std::time::Duration;

use tracing::{debug, trace};

use super::engine::{Snapshot, TimerEngine};
use super::scheduler::{Scheduler, SessionId, Tick, TickHandle, TickStream};
use crate::config::Config;
use crate::events::Event;
use crate::wage::parse_wage_input;

struct TickSession<H> {
    id: SessionId,
    countdown: H,
    /// Live only while the engine is accruing.
    accrual: Option<H>,
}

impl<H: TickHandle> TickSession<H> {
    fn cancel(self) {
        self.countdown.cancel();
        if let Some(accrual) = self.accrual {
            accrual.cancel();
        }
    }
}

pub struct TimerDriver<S: Scheduler> {
    engine: TimerEngine,
    scheduler: S,
    period: Duration,
    last_session: SessionId,
    session: Option<TickSession<S::Handle>>,
}

impl<S: Scheduler> TimerDriver<S> {
    pub fn new(engine: TimerEngine, scheduler: S, period: Duration) -> Self {
        Self {
            engine,
            scheduler,
            period,
            last_session: SessionId::NONE,
            session: None,
        }
    }

    pub fn from_config(config: &Config, scheduler: S) -> Self {
        Self::new(TimerEngine::from_config(config), scheduler, config.tick_period())
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Id of the live session, if the timer is ticking.
    pub fn session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.id)
    }

    pub fn is_ticking(&self) -> bool {
        self.session.is_some()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        let event = self.engine.start()?;
        self.open_session();
        Some(event)
    }

    pub fn stop(&mut self) -> Option<Event> {
        self.close_session();
        self.engine.stop()
    }

    pub fn toggle_running(&mut self) -> Option<Event> {
        if self.engine.is_running() {
            self.stop()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.close_session();
        self.engine.reset()
    }

    /// Takes effect on the next accrual tick. The accrual stream is not
    /// restarted, so no fraction of a second is dropped or counted twice.
    pub fn set_hourly_wage(&mut self, wage: f64) -> Option<Event> {
        self.engine.set_hourly_wage(wage)
    }

    /// Raw text from a wage input; unparseable text counts as zero.
    pub fn set_hourly_wage_input(&mut self, input: &str) -> Option<Event> {
        self.set_hourly_wage(parse_wage_input(input))
    }

    /// Apply a tick delivered by the scheduler.
    pub fn deliver(&mut self, tick: Tick) -> Option<Event> {
        let live = self.session_id()?;
        if tick.session != live {
            trace!(?tick, ?live, "dropping stale tick");
            return None;
        }

        match tick.stream {
            TickStream::Countdown => {
                let event = self.engine.tick();
                if event.is_some() {
                    self.sync_accrual();
                }
                event
            }
            TickStream::Accrual => {
                self.engine.accrual_tick();
                None
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn open_session(&mut self) {
        self.close_session();
        self.last_session = self.last_session.next();
        let id = self.last_session;
        let countdown = self
            .scheduler
            .schedule_repeating(id, TickStream::Countdown, self.period);
        self.session = Some(TickSession {
            id,
            countdown,
            accrual: None,
        });
        debug!(session = id.get(), "ticking session opened");
        self.sync_accrual();
    }

    fn close_session(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(session = session.id.get(), "ticking session closed");
            session.cancel();
        }
    }

    /// Keep the accrual stream alive exactly while the engine accrues.
    fn sync_accrual(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let wanted = self.engine.is_accruing();
        match (wanted, session.accrual.take()) {
            (true, None) => {
                session.accrual = Some(self.scheduler.schedule_repeating(
                    session.id,
                    TickStream::Accrual,
                    self.period,
                ));
            }
            (true, Some(handle)) => session.accrual = Some(handle),
            (false, Some(handle)) => handle.cancel(),
            (false, None) => {}
        }
    }
}
