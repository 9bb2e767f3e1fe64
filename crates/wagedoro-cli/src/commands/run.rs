//! Interactive terminal session.
//!
//! One current-thread runtime runs everything: scheduled ticks, stdin lines
//! and Ctrl-C are handled one at a time by a single `select!` loop, so the
//! driver never needs locking.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use wagedoro_core::format::status_line;
use wagedoro_core::{Config, Event, Snapshot, TimerDriver, TokioScheduler};

const HELP: &str = "commands: <enter>/s start-stop, r reset, w <amount> set wage, h help, q quit";

#[derive(Debug, Clone, PartialEq)]
enum Input {
    Toggle,
    Reset,
    Wage(String),
    Help,
    Quit,
    Unknown(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let (cmd, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        match cmd {
            "" | "s" | "start" | "stop" => Input::Toggle,
            "r" | "reset" => Input::Reset,
            "w" | "wage" => Input::Wage(rest.trim().to_string()),
            "h" | "help" | "?" => Input::Help,
            "q" | "quit" | "exit" => Input::Quit,
            _ => Input::Unknown(line.to_string()),
        }
    }
}

pub fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(session(config))
}

async fn session(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let (scheduler, mut ticks) = TokioScheduler::new();
    let mut driver = TimerDriver::from_config(&config, scheduler);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    info!(?config, "session started");
    println!("{HELP}");
    render(&driver.snapshot())?;

    loop {
        tokio::select! {
            Some(tick) = ticks.recv() => {
                if let Some(event) = driver.deliver(tick) {
                    announce(&event)?;
                }
                render(&driver.snapshot())?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("stdin closed");
                    break;
                };
                let event = match Input::parse(&line) {
                    Input::Toggle => driver.toggle_running(),
                    Input::Reset => driver.reset(),
                    Input::Wage(raw) => driver.set_hourly_wage_input(&raw),
                    Input::Help => {
                        println!("{HELP}");
                        None
                    }
                    Input::Quit => break,
                    Input::Unknown(raw) => {
                        println!("unknown command: {raw}");
                        println!("{HELP}");
                        None
                    }
                };
                if let Some(event) = event {
                    debug!(?event, "command applied");
                }
                render(&driver.snapshot())?;
            }
            _ = &mut ctrl_c => {
                debug!("interrupted");
                break;
            }
        }
    }

    driver.stop();
    println!();
    Ok(())
}

/// Redraw the status line in place.
fn render(snapshot: &Snapshot) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    write!(out, "\r\x1b[2K{}", status_line(snapshot))?;
    out.flush()
}

fn announce(event: &Event) -> std::io::Result<()> {
    if let Event::PhaseChanged { to, .. } = event {
        info!(?event, "phase changed");
        let mut out = std::io::stdout().lock();
        writeln!(out, "\r\x1b[2K\x07{}!", to.label())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(Input::parse(""), Input::Toggle);
        assert_eq!(Input::parse(" s "), Input::Toggle);
        assert_eq!(Input::parse("r"), Input::Reset);
        assert_eq!(Input::parse("q"), Input::Quit);
        assert_eq!(Input::parse("?"), Input::Help);
    }

    #[test]
    fn wage_keeps_raw_text() {
        assert_eq!(Input::parse("w 40"), Input::Wage("40".into()));
        assert_eq!(Input::parse("wage   12.5 "), Input::Wage("12.5".into()));
        assert_eq!(Input::parse("w"), Input::Wage(String::new()));
        assert_eq!(Input::parse("w abc"), Input::Wage("abc".into()));
    }

    #[test]
    fn unknown_commands_are_reported() {
        assert_eq!(Input::parse("dance"), Input::Unknown("dance".into()));
    }
}
