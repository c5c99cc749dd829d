// Status labels and the accent colors cards are drawn with
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusLabel {
    Running,
    Deferred,
    Success,
    Failed,
    Upcoming,
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorToken {
    Running,
    Deferred,
    Success,
    Failed,
}

impl StatusLabel {
    pub fn parse(label: &str) -> Self {
        match label {
            "running" => Self::Running,
            "deferred" => Self::Deferred,
            "success" => Self::Success,
            "failed" => Self::Failed,
            "upcoming" => Self::Upcoming,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Running => "running",
            Self::Deferred => "deferred",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Upcoming => "upcoming",
            Self::Other(label) => label,
        }
    }

    /// Unrecognized labels fall back to the running color
    pub fn accent(&self) -> ColorToken {
        match self {
            Self::Deferred => ColorToken::Deferred,
            Self::Success => ColorToken::Success,
            Self::Failed => ColorToken::Failed,
            _ => ColorToken::Running,
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ColorToken {
    /// ANSI SGR foreground code used by the terminal renderer
    pub fn ansi_code(self) -> u8 {
        match self {
            Self::Running => 32,
            Self::Deferred => 35,
            Self::Success => 92,
            Self::Failed => 31,
        }
    }
}
