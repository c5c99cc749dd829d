// Duration window - look-back period the backend uses to scope records
use crate::domain::error::DashboardError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DurationWindow {
    OneHour,
    #[default]
    EightHours,
    OneDay,
}

impl DurationWindow {
    pub const ALL: [DurationWindow; 3] = [Self::OneHour, Self::EightHours, Self::OneDay];

    pub fn hours(self) -> u32 {
        match self {
            Self::OneHour => 1,
            Self::EightHours => 8,
            Self::OneDay => 24,
        }
    }

    pub fn from_hours(hours: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.hours() == hours)
    }
}

impl fmt::Display for DurationWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hours())
    }
}

impl FromStr for DurationWindow {
    type Err = DashboardError;

    /// Accepts "1", "8" or "24", optionally followed by "h"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix('h').unwrap_or(trimmed);
        digits
            .parse::<u32>()
            .ok()
            .and_then(Self::from_hours)
            .ok_or_else(|| DashboardError::InvalidDuration(s.to_string()))
    }
}
