// Repository trait for dashboard summary access
use crate::domain::dashboard::DashboardSummary;
use crate::domain::duration::DurationWindow;
use crate::domain::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait SummaryRepository: Send + Sync {
    /// Fetch the summary for the given look-back window (one read-only request)
    async fn fetch_summary(&self, duration: DurationWindow) -> Result<DashboardSummary>;
}
