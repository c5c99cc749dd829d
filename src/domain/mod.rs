// Domain layer - Records, summary and value types
pub mod dashboard;
pub mod duration;
pub mod error;
pub mod records;
pub mod status;
