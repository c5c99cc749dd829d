// Terminal dashboard for task-instance and dag-run status
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
