//! Tick scheduling.
//!
//! The engine never reads the wall clock. A [`Scheduler`] turns "repeat this
//! stream every period" into [`Tick`] values delivered to the host loop, and
//! hands back a [`TickHandle`] that stops the stream. Dropping a handle
//! cancels it as well, so a lost handle can never leave a stream running.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::trace;

/// Identifies one ticking session. Every start opens a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub const NONE: SessionId = SessionId(0);

    pub fn next(self) -> Self {
        SessionId(self.0.wrapping_add(1))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickStream {
    /// Drives the countdown.
    Countdown,
    /// Drives the earnings accumulator.
    Accrual,
}

/// One delivered tick, tagged with the session that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub session: SessionId,
    pub stream: TickStream,
}

/// Cancellation handle for one repeating stream.
pub trait TickHandle {
    /// Stop the stream. No tick from it is delivered after this returns.
    fn cancel(self);
}

/// Capability to schedule repeating ticks.
pub trait Scheduler {
    type Handle: TickHandle;

    fn schedule_repeating(
        &mut self,
        session: SessionId,
        stream: TickStream,
        period: Duration,
    ) -> Self::Handle;
}

// ── Manual scheduler ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Subscription {
    key: u64,
    tick: Tick,
    period: Duration,
}

#[derive(Debug, Default)]
struct ManualInner {
    next_key: u64,
    scheduled: usize,
    live: Vec<Subscription>,
}

/// Synthetic scheduler: nothing fires until the caller asks it to.
///
/// Used by tests and by the headless simulator to inject ticks without real
/// delays.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<ManualInner>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tick a live subscription for `stream` would deliver now, if any.
    pub fn fire(&self, stream: TickStream) -> Option<Tick> {
        self.inner
            .borrow()
            .live
            .iter()
            .find(|s| s.tick.stream == stream)
            .map(|s| s.tick)
    }

    /// One nominal period: a tick from every live subscription, in the order
    /// they were scheduled.
    pub fn advance(&self) -> Vec<Tick> {
        self.inner.borrow().live.iter().map(|s| s.tick).collect()
    }

    /// Number of live subscriptions.
    pub fn active(&self) -> usize {
        self.inner.borrow().live.len()
    }

    pub fn active_for(&self, stream: TickStream) -> usize {
        self.inner
            .borrow()
            .live
            .iter()
            .filter(|s| s.tick.stream == stream)
            .count()
    }

    /// Total subscriptions ever scheduled, cancelled ones included.
    pub fn scheduled_total(&self) -> usize {
        self.inner.borrow().scheduled
    }

    /// Period of the live subscription for `stream`.
    pub fn period_of(&self, stream: TickStream) -> Option<Duration> {
        self.inner
            .borrow()
            .live
            .iter()
            .find(|s| s.tick.stream == stream)
            .map(|s| s.period)
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule_repeating(
        &mut self,
        session: SessionId,
        stream: TickStream,
        period: Duration,
    ) -> ManualHandle {
        let mut inner = self.inner.borrow_mut();
        let key = inner.next_key;
        inner.next_key += 1;
        inner.scheduled += 1;
        inner.live.push(Subscription {
            key,
            tick: Tick { session, stream },
            period,
        });
        ManualHandle {
            key,
            inner: Rc::clone(&self.inner),
        }
    }
}

#[derive(Debug)]
pub struct ManualHandle {
    key: u64,
    inner: Rc<RefCell<ManualInner>>,
}

impl TickHandle for ManualHandle {
    fn cancel(self) {
        drop(self);
    }
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        self.inner.borrow_mut().live.retain(|s| s.key != self.key);
    }
}

// ── Tokio scheduler ──────────────────────────────────────────────────

/// Real-time scheduler backed by tokio intervals.
///
/// Each stream is its own task sending into one shared channel; the host
/// loop reads the receiver returned by [`TokioScheduler::new`].
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<Tick>,
}

impl TokioScheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Tick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Scheduler for TokioScheduler {
    type Handle = TokioHandle;

    /// Must be called from within a Tokio runtime.
    fn schedule_repeating(
        &mut self,
        session: SessionId,
        stream: TickStream,
        period: Duration,
    ) -> TokioHandle {
        let period = period.max(Duration::from_millis(1));
        let tx = self.tx.clone();
        let tick = Tick { session, stream };
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                trace!(?tick, "tick fired");
                if tx.send(tick).is_err() {
                    break;
                }
            }
        });
        TokioHandle { task }
    }
}

#[derive(Debug)]
pub struct TokioHandle {
    task: JoinHandle<()>,
}

impl TickHandle for TokioHandle {
    fn cancel(self) {
        drop(self);
    }
}

impl Drop for TokioHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
