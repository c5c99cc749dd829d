// Error taxonomy for fetching and configuring the dashboard
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("dashboard request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("dashboard endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode dashboard summary: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid duration window '{0}', expected 1, 8 or 24")]
    InvalidDuration(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
