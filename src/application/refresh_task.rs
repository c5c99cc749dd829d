// Refresh task - Periodic refetch owned by the view's lifecycle
use crate::application::auto_refresh::{AutoRefresh, RefreshSettings};
use crate::application::dashboard_query::DashboardQuery;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Background ticker; aborted on `stop` or when dropped
pub struct RefreshTask {
    handle: JoinHandle<()>,
}

impl RefreshTask {
    pub fn spawn(query: DashboardQuery, auto_refresh: &AutoRefresh) -> Self {
        let settings = auto_refresh.subscribe();
        Self {
            handle: tokio::spawn(run(query, settings)),
        }
    }

    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run(query: DashboardQuery, mut settings: watch::Receiver<RefreshSettings>) {
    loop {
        let current = *settings.borrow_and_update();
        if !current.enabled {
            if settings.changed().await.is_err() {
                return;
            }
            continue;
        }

        let period = current.period();
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::debug!(period_ms = period.as_millis() as u64, "auto-refresh ticking");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if query.refetch_if_idle().is_none() {
                        tracing::debug!("refresh tick skipped, request already in flight");
                    }
                }
                changed = settings.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::summary_repository::testing::RecordingRepository;
    use crate::domain::duration::DurationWindow;
    use std::sync::Arc;
    use std::time::Duration;

    fn setup(enabled: bool) -> (Arc<RecordingRepository>, DashboardQuery, AutoRefresh) {
        let repo = Arc::new(RecordingRepository::default());
        let query = DashboardQuery::new(repo.clone(), DurationWindow::EightHours);
        let auto_refresh = AutoRefresh::new(RefreshSettings {
            enabled,
            interval_secs: Some(1),
        });
        (repo, query, auto_refresh)
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_never_ticks() {
        let (repo, query, auto_refresh) = setup(false);
        query.refetch().await.unwrap();
        let _task = RefreshTask::spawn(query.clone(), &auto_refresh);

        time::sleep(Duration::from_secs(60)).await;

        assert_eq!(repo.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enabled_ticks_use_current_window() {
        let (repo, query, auto_refresh) = setup(true);
        query.refetch().await.unwrap();
        let _task = RefreshTask::spawn(query.clone(), &auto_refresh);

        time::sleep(Duration::from_millis(1050)).await;
        query.select_duration(DurationWindow::OneDay);
        time::sleep(Duration::from_millis(1000)).await;

        assert_eq!(
            repo.calls(),
            vec![
                DurationWindow::EightHours,
                DurationWindow::EightHours,
                DurationWindow::OneDay,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_enabling_resumes_ticking() {
        let (repo, query, auto_refresh) = setup(false);
        query.refetch().await.unwrap();
        let _task = RefreshTask::spawn(query.clone(), &auto_refresh);

        time::sleep(Duration::from_secs(5)).await;
        auto_refresh.enable();
        time::sleep(Duration::from_millis(1050)).await;

        assert_eq!(repo.calls().len(), 2);

        auto_refresh.disable();
        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(repo.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_do_not_duplicate_in_flight_request() {
        let (repo, query, auto_refresh) = setup(true);
        repo.delay(DurationWindow::EightHours, Duration::from_millis(4500));
        let mount = query.refetch();
        let _task = RefreshTask::spawn(query.clone(), &auto_refresh);

        time::sleep(Duration::from_millis(4200)).await;
        assert_eq!(repo.calls().len(), 1);

        mount.await.unwrap();
        time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(repo.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_ticker() {
        let (repo, query, auto_refresh) = setup(true);
        let task = RefreshTask::spawn(query.clone(), &auto_refresh);

        time::sleep(Duration::from_millis(1050)).await;
        assert_eq!(repo.calls().len(), 1);

        task.stop();
        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(repo.calls().len(), 1);
    }
}
