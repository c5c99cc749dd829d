// Application layer - Fetching, caching and refresh scheduling
pub mod auto_refresh;
pub mod dashboard_query;
pub mod refresh_task;
pub mod summary_repository;
