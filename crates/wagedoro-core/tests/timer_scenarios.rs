//! End-to-end timer scenarios driven through `TimerDriver` with synthetic
//! ticks from `ManualScheduler`.

use std::time::Duration;

use proptest::prelude::*;
use wagedoro_core::{
    Config, Event, ManualScheduler, Phase, TickStream, TimerDriver, TimerEngine,
};

fn default_driver() -> TimerDriver<ManualScheduler> {
    TimerDriver::from_config(&Config::default(), ManualScheduler::new())
}

fn fire(d: &mut TimerDriver<ManualScheduler>, stream: TickStream) -> Option<Event> {
    let tick = d.scheduler().fire(stream)?;
    d.deliver(tick)
}

#[test]
fn full_work_phase_earns_expected_amount() {
    let mut d = default_driver();
    d.toggle_running();

    for _ in 0..1500 {
        fire(&mut d, TickStream::Accrual);
        fire(&mut d, TickStream::Countdown);
    }

    let snap = d.snapshot();
    assert_eq!(snap.remaining_secs, 0);
    assert_eq!(snap.phase, Phase::Working);
    assert!((snap.money_earned - 25.0 * 60.0 * 20.0 / 3600.0).abs() < 1e-9);
    assert_eq!(snap.money(), "8.33");

    let event = fire(&mut d, TickStream::Countdown);
    assert!(matches!(
        event,
        Some(Event::PhaseChanged { from: Phase::Working, to: Phase::Break, remaining_secs: 300, .. })
    ));
    assert_eq!(d.snapshot().phase, Phase::Break);
    assert_eq!(d.snapshot().remaining_secs, 300);
}

#[test]
fn break_phase_does_not_accrue() {
    let mut engine = TimerEngine::from_config(&Config {
        work_minutes: 1,
        break_minutes: 1,
        ..Config::default()
    });
    engine.start();
    for _ in 0..=60 {
        engine.tick();
    }
    assert_eq!(engine.phase(), Phase::Break);

    let earned = engine.money_earned();
    for _ in 0..30 {
        engine.accrual_tick();
    }
    assert_eq!(engine.money_earned(), earned);
}

#[test]
fn mid_phase_wage_change_only_affects_later_ticks() {
    let mut d = default_driver();
    d.start();
    for _ in 0..10 {
        fire(&mut d, TickStream::Accrual);
    }
    let before = d.snapshot().money_earned;
    assert!((before - 10.0 * 20.0 / 3600.0).abs() < 1e-12);

    d.set_hourly_wage(40.0);
    assert_eq!(d.snapshot().money_earned, before);

    for _ in 0..10 {
        fire(&mut d, TickStream::Accrual);
    }
    let after = d.snapshot().money_earned;
    assert!((after - before - 10.0 * 40.0 / 3600.0).abs() < 1e-12);
}

#[test]
fn reset_from_anywhere_restores_initial_state() {
    let mut d = default_driver();
    d.start();
    for _ in 0..1700 {
        fire(&mut d, TickStream::Countdown);
        fire(&mut d, TickStream::Accrual);
    }
    assert_eq!(d.snapshot().phase, Phase::Break);

    d.reset();
    let snap = d.snapshot();
    assert_eq!(snap.phase, Phase::Working);
    assert_eq!(snap.remaining_secs, 1500);
    assert_eq!(snap.money_earned, 0.0);
    assert!(!snap.is_running);
    assert_eq!(d.scheduler().active(), 0);
}

#[test]
fn stop_is_idempotent() {
    let mut d = default_driver();
    d.start();
    fire(&mut d, TickStream::Countdown);
    d.stop();
    let once = d.snapshot();
    assert!(d.stop().is_none());
    assert_eq!(d.snapshot(), once);
}

#[test]
fn driver_uses_configured_period() {
    let config = Config { tick_interval_ms: 250, ..Config::default() };
    let mut d = TimerDriver::from_config(&config, ManualScheduler::new());
    d.start();
    assert_eq!(d.scheduler().period_of(TickStream::Countdown), Some(Duration::from_millis(250)));
}

#[derive(Debug, Clone)]
enum Step {
    Countdown,
    Accrual,
    Toggle,
    Wage(u16),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => Just(Step::Countdown),
        6 => Just(Step::Accrual),
        1 => Just(Step::Toggle),
        1 => (0u16..200).prop_map(Step::Wage),
    ]
}

proptest! {
    #[test]
    fn n_ticks_reach_zero_then_flip(n in 0u64..400) {
        let mut engine = TimerEngine::new(
            wagedoro_core::Durations { work_secs: n, break_secs: 7 },
            20.0,
        );
        engine.start();
        for _ in 0..n {
            prop_assert!(engine.tick().is_none());
        }
        prop_assert_eq!(engine.remaining_secs(), 0);
        prop_assert_eq!(engine.phase(), Phase::Working);

        prop_assert!(engine.tick().is_some());
        prop_assert_eq!(engine.phase(), Phase::Break);
        prop_assert_eq!(engine.remaining_secs(), 7);
    }

    #[test]
    fn interleaving_order_does_not_change_totals(order in prop::collection::vec(any::<bool>(), 1500)) {
        let mut d = default_driver();
        d.start();
        for countdown_first in order {
            if countdown_first {
                fire(&mut d, TickStream::Countdown);
                fire(&mut d, TickStream::Accrual);
            } else {
                fire(&mut d, TickStream::Accrual);
                fire(&mut d, TickStream::Countdown);
            }
        }
        let snap = d.snapshot();
        prop_assert_eq!(snap.remaining_secs, 0);
        prop_assert_eq!(snap.phase, Phase::Working);
        prop_assert_eq!(snap.money(), "8.33");
    }

    #[test]
    fn invariants_hold_for_any_event_sequence(steps in prop::collection::vec(step(), 0..600)) {
        let config = Config { work_minutes: 1, break_minutes: 1, ..Config::default() };
        let mut d = TimerDriver::from_config(&config, ManualScheduler::new());
        let max = d.engine().durations().max_secs();
        let mut last_phase = d.snapshot().phase;
        let mut last_money = 0.0;

        for s in steps {
            let before = d.snapshot();
            let event = match s {
                Step::Countdown => fire(&mut d, TickStream::Countdown),
                Step::Accrual => fire(&mut d, TickStream::Accrual),
                Step::Toggle => d.toggle_running(),
                Step::Wage(w) => d.set_hourly_wage(f64::from(w)),
            };
            let snap = d.snapshot();

            prop_assert!(snap.remaining_secs <= max);
            prop_assert!(snap.money_earned >= last_money);
            if snap.money_earned > last_money {
                prop_assert!(matches!(s, Step::Accrual));
                prop_assert!(before.is_running && before.phase == Phase::Working);
            }
            if let Some(Event::PhaseChanged { from, to, .. }) = event {
                prop_assert_eq!(from, last_phase);
                prop_assert_ne!(from, to);
                prop_assert_eq!(before.remaining_secs, 0);
            }
            prop_assert!(d.scheduler().active_for(TickStream::Countdown) <= 1);
            prop_assert!(d.scheduler().active_for(TickStream::Accrual) <= 1);

            last_phase = snap.phase;
            last_money = snap.money_earned;
        }
    }
}
