// HTTP repository implementation for the dashboard_api endpoint
use crate::application::summary_repository::SummaryRepository;
use crate::domain::dashboard::DashboardSummary;
use crate::domain::duration::DurationWindow;
use crate::domain::error::{DashboardError, Result};
use async_trait::async_trait;
use std::time::Duration;

const DASHBOARD_PATH: &str = "/dashboard_api";

#[derive(Debug, Clone)]
pub struct HttpSummaryRepository {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSummaryRepository {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, DASHBOARD_PATH)
    }
}

#[async_trait]
impl SummaryRepository for HttpSummaryRepository {
    async fn fetch_summary(&self, duration: DurationWindow) -> Result<DashboardSummary> {
        let url = self.endpoint();
        tracing::debug!(%url, duration = duration.hours(), "requesting dashboard summary");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(&[("duration", duration.hours())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardError::Status {
                status: status.as_u16(),
                body,
            });
        }

        // Decode from bytes so schema mismatches surface as Decode rather than Http
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
