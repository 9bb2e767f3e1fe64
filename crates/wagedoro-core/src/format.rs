//! Display formatting shared by every presentation.

use crate::timer::Snapshot;

/// `MM:SS`, each part zero-padded to two digits. Minutes are not wrapped
/// into hours, so long phases render as e.g. `120:00`.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Earnings with exactly two decimal places.
pub fn format_money(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Single-line rendering of a snapshot.
pub fn status_line(snapshot: &Snapshot) -> String {
    format!(
        "{:<10}  {}  Money Earned: ${}  Hourly Wage: {}  [{}]",
        snapshot.label(),
        snapshot.clock(),
        snapshot.money(),
        snapshot.hourly_wage,
        if snapshot.is_running { "running" } else { "stopped" },
    )
}
