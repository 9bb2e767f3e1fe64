use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Working,
    Break,
}

impl Phase {
    pub fn flipped(self) -> Self {
        match self {
            Phase::Working => Phase::Break,
            Phase::Break => Phase::Working,
        }
    }

    /// Heading shown above the clock.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Working => "Work Time",
            Phase::Break => "Break Time",
        }
    }

    /// Whether earnings accrue during this phase.
    pub fn accrues(self) -> bool {
        self == Phase::Working
    }
}

/// Length of each phase, fixed for the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    pub work_secs: u64,
    pub break_secs: u64,
}

impl Durations {
    /// Build durations from minutes.
    ///
    /// Uses saturating arithmetic so absurd minute counts clamp instead of
    /// overflowing.
    pub fn from_minutes(work_min: u64, break_min: u64) -> Self {
        Self {
            work_secs: work_min.saturating_mul(60),
            break_secs: break_min.saturating_mul(60),
        }
    }

    pub fn for_phase(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Working => self.work_secs,
            Phase::Break => self.break_secs,
        }
    }

    /// Upper bound for `remaining_secs` across both phases.
    pub fn max_secs(&self) -> u64 {
        self.work_secs.max(self.break_secs)
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self::from_minutes(25, 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_flips_both_ways() {
        assert_eq!(Phase::Working.flipped(), Phase::Break);
        assert_eq!(Phase::Break.flipped(), Phase::Working);
    }

    #[test]
    fn only_working_accrues() {
        assert!(Phase::Working.accrues());
        assert!(!Phase::Break.accrues());
    }

    #[test]
    fn default_durations() {
        let d = Durations::default();
        assert_eq!(d.work_secs, 1500);
        assert_eq!(d.break_secs, 300);
        assert_eq!(d.max_secs(), 1500);
        assert_eq!(d.for_phase(Phase::Break), 300);
    }

    #[test]
    fn from_minutes_saturates() {
        let d = Durations::from_minutes(u64::MAX, 1);
        assert_eq!(d.work_secs, u64::MAX);
        assert_eq!(d.break_secs, 60);
    }

    #[test]
    fn phase_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Phase::Working).unwrap(), "\"working\"");
        assert_eq!(serde_json::to_string(&Phase::Break).unwrap(), "\"break\"");
    }
}
