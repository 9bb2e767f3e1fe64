//! Headless timer run on synthetic ticks.

use clap::Args;
use serde_json::json;
use wagedoro_core::wage::parse_wage_input;
use wagedoro_core::{Config, ManualScheduler, TimerDriver};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Nominal seconds to run; each delivers every live tick stream once
    #[arg(long, default_value = "60")]
    pub seconds: u64,

    /// Change the wage before second T, as T=AMOUNT (repeatable)
    #[arg(long = "wage-at", value_name = "T=AMOUNT", value_parser = parse_wage_change)]
    pub wage_at: Vec<WageChange>,

    /// Include the emitted events in the output
    #[arg(long)]
    pub events: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WageChange {
    pub at: u64,
    pub wage: f64,
}

fn parse_wage_change(s: &str) -> Result<WageChange, String> {
    let (at, wage) = s
        .split_once('=')
        .ok_or_else(|| format!("expected T=AMOUNT, got '{s}'"))?;
    let at = at
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("invalid second '{at}': {e}"))?;
    Ok(WageChange {
        at,
        wage: parse_wage_input(wage),
    })
}

pub fn run(config: Config, args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut driver = TimerDriver::from_config(&config, ManualScheduler::new());
    let mut events = Vec::new();

    events.extend(driver.start());
    for second in 0..args.seconds {
        for change in args.wage_at.iter().filter(|c| c.at == second) {
            events.extend(driver.set_hourly_wage(change.wage));
        }
        let ticks = driver.scheduler().advance();
        for tick in ticks {
            events.extend(driver.deliver(tick));
        }
    }

    let snapshot = driver.snapshot();
    let mut output = json!({
        "seconds": args.seconds,
        "snapshot": snapshot,
        "label": snapshot.label(),
        "clock": snapshot.clock(),
        "money": snapshot.money(),
    });
    if args.events {
        output["events"] = serde_json::to_value(&events)?;
    }
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
