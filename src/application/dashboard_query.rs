// Dashboard query - Fetches and caches the summary for the selected duration window
use crate::application::summary_repository::SummaryRepository;
use crate::domain::dashboard::DashboardSummary;
use crate::domain::duration::DurationWindow;
use crate::domain::error::Result;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Point-in-time view of the query, published after every state change
#[derive(Debug, Clone)]
pub struct QuerySnapshot {
    pub duration: DurationWindow,
    pub data: Option<Arc<DashboardSummary>>,
    pub is_error: bool,
    pub is_loading: bool,
    pub fetch_count: u64,
}

/// Tag carried by every request so late responses can be recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub duration: DurationWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Failed,
    Stale,
}

#[derive(Debug)]
struct QueryState {
    duration: DurationWindow,
    next_seq: u64,
    applied_seq: u64,
    in_flight: Vec<FetchTicket>,
    data: Option<Arc<DashboardSummary>>,
    is_error: bool,
    fetch_count: u64,
}

impl QueryState {
    fn snapshot(&self) -> QuerySnapshot {
        QuerySnapshot {
            duration: self.duration,
            data: self.data.clone(),
            is_error: self.is_error,
            is_loading: self.is_loading(),
            fetch_count: self.fetch_count,
        }
    }

    fn is_loading(&self) -> bool {
        self.in_flight.iter().any(|t| t.duration == self.duration)
    }
}

#[derive(Clone)]
pub struct DashboardQuery {
    repository: Arc<dyn SummaryRepository>,
    state: Arc<Mutex<QueryState>>,
    updates: Arc<watch::Sender<QuerySnapshot>>,
}

impl DashboardQuery {
    pub fn new(repository: Arc<dyn SummaryRepository>, duration: DurationWindow) -> Self {
        let state = QueryState {
            duration,
            next_seq: 1,
            applied_seq: 0,
            in_flight: Vec::new(),
            data: None,
            is_error: false,
            fetch_count: 0,
        };
        let (updates, _) = watch::channel(state.snapshot());
        Self {
            repository,
            state: Arc::new(Mutex::new(state)),
            updates: Arc::new(updates),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueryState> {
        // Every mutation completes under the lock, so a poisoned state is still whole
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, state: &QueryState) {
        self.updates.send_replace(state.snapshot());
    }

    pub fn duration(&self) -> DurationWindow {
        self.lock().duration
    }

    pub fn snapshot(&self) -> QuerySnapshot {
        self.lock().snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<QuerySnapshot> {
        self.updates.subscribe()
    }

    /// Switch the requested window; the cached summary belongs to the old one and is dropped
    pub fn select_duration(&self, duration: DurationWindow) -> bool {
        let mut state = self.lock();
        if state.duration == duration {
            return false;
        }
        tracing::info!(from = %state.duration, to = %duration, "duration window changed");
        state.duration = duration;
        state.data = None;
        state.is_error = false;
        self.publish(&state);
        true
    }

    /// Register a request for the current window
    pub fn begin(&self) -> FetchTicket {
        let mut state = self.lock();
        self.begin_locked(&mut state)
    }

    fn begin_locked(&self, state: &mut QueryState) -> FetchTicket {
        let ticket = FetchTicket {
            seq: state.next_seq,
            duration: state.duration,
        };
        state.next_seq += 1;
        state.fetch_count += 1;
        state.in_flight.push(ticket);
        self.publish(state);
        ticket
    }

    /// Apply a response unless a newer request or another window has superseded it
    pub fn complete(&self, ticket: FetchTicket, result: Result<DashboardSummary>) -> FetchOutcome {
        let mut state = self.lock();
        state.in_flight.retain(|t| t.seq != ticket.seq);

        let outcome = if ticket.duration != state.duration || ticket.seq <= state.applied_seq {
            tracing::debug!(
                seq = ticket.seq,
                duration = %ticket.duration,
                current = %state.duration,
                "discarding stale dashboard response"
            );
            FetchOutcome::Stale
        } else {
            state.applied_seq = ticket.seq;
            match result {
                Ok(summary) => {
                    state.data = Some(Arc::new(summary));
                    state.is_error = false;
                    FetchOutcome::Applied
                }
                Err(e) => {
                    tracing::warn!(duration = %ticket.duration, "dashboard fetch failed: {}", e);
                    state.is_error = true;
                    FetchOutcome::Failed
                }
            }
        };

        self.publish(&state);
        outcome
    }

    async fn run(self, ticket: FetchTicket) -> FetchOutcome {
        let result = self.repository.fetch_summary(ticket.duration).await;
        self.complete(ticket, result)
    }

    /// Always issue one request for the current window
    pub fn refetch(&self) -> JoinHandle<FetchOutcome> {
        let ticket = self.begin();
        tokio::spawn(self.clone().run(ticket))
    }

    /// Issue a request only if none is already in flight for the current window
    pub fn refetch_if_idle(&self) -> Option<JoinHandle<FetchOutcome>> {
        let ticket = {
            let mut state = self.lock();
            if state.is_loading() {
                return None;
            }
            self.begin_locked(&mut state)
        };
        Some(tokio::spawn(self.clone().run(ticket)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::summary_repository::testing::RecordingRepository;
    use crate::domain::error::DashboardError;
    use crate::domain::records::UpcomingDagRunRecord;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    fn summary_tagged(dag_id: &str) -> DashboardSummary {
        DashboardSummary {
            upcoming_dag_runs: vec![UpcomingDagRunRecord {
                dag_id: dag_id.to_string(),
                next_dagrun_create_after: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
                timetable_description: None,
                schedule_interval: None,
            }],
            ..Default::default()
        }
    }

    fn displayed_dag(query: &DashboardQuery) -> Option<String> {
        query
            .snapshot()
            .data
            .map(|d| d.upcoming_dag_runs[0].dag_id.clone())
    }

    #[tokio::test]
    async fn test_refetch_applies_result() {
        let repo = Arc::new(RecordingRepository::new(summary_tagged("eight")));
        let query = DashboardQuery::new(repo.clone(), DurationWindow::EightHours);
        assert!(query.snapshot().data.is_none());

        let outcome = query.refetch().await.unwrap();

        assert_eq!(outcome, FetchOutcome::Applied);
        assert_eq!(repo.calls(), vec![DurationWindow::EightHours]);
        let snapshot = query.snapshot();
        assert!(!snapshot.is_loading);
        assert!(!snapshot.is_error);
        assert_eq!(snapshot.fetch_count, 1);
        assert_eq!(displayed_dag(&query).as_deref(), Some("eight"));
    }

    #[tokio::test]
    async fn test_same_window_refetch_replaces_in_place() {
        let repo = Arc::new(RecordingRepository::new(summary_tagged("first")));
        let query = DashboardQuery::new(repo.clone(), DurationWindow::EightHours);
        query.refetch().await.unwrap();

        repo.set_summary(summary_tagged("second"));
        query.refetch().await.unwrap();

        assert_eq!(displayed_dag(&query).as_deref(), Some("second"));
        assert_eq!(query.snapshot().data.unwrap().upcoming_dag_runs.len(), 1);
    }

    #[tokio::test]
    async fn test_select_duration_invalidates_cache() {
        let repo = Arc::new(RecordingRepository::new(summary_tagged("eight")));
        let query = DashboardQuery::new(repo.clone(), DurationWindow::EightHours);
        query.refetch().await.unwrap();

        assert!(!query.select_duration(DurationWindow::EightHours));
        assert!(query.snapshot().data.is_some());

        assert!(query.select_duration(DurationWindow::OneDay));
        let snapshot = query.snapshot();
        assert_eq!(snapshot.duration, DurationWindow::OneDay);
        assert!(snapshot.data.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_window_response_is_discarded() {
        let repo = Arc::new(RecordingRepository::default());
        repo.set_summary_for(DurationWindow::EightHours, summary_tagged("eight"));
        repo.set_summary_for(DurationWindow::OneHour, summary_tagged("one"));
        repo.delay(DurationWindow::EightHours, Duration::from_millis(500));
        let query = DashboardQuery::new(repo.clone(), DurationWindow::EightHours);

        let slow = query.refetch();
        assert!(query.select_duration(DurationWindow::OneHour));
        let fast = query.refetch();

        assert_eq!(fast.await.unwrap(), FetchOutcome::Applied);
        assert_eq!(slow.await.unwrap(), FetchOutcome::Stale);
        assert_eq!(displayed_dag(&query).as_deref(), Some("one"));
        assert_eq!(repo.calls(), vec![DurationWindow::EightHours, DurationWindow::OneHour]);
    }

    #[test]
    fn test_out_of_order_responses_for_same_window() {
        let repo = Arc::new(RecordingRepository::default());
        let query = DashboardQuery::new(repo, DurationWindow::EightHours);

        let older = query.begin();
        let newer = query.begin();
        assert!(query.snapshot().is_loading);

        assert_eq!(query.complete(newer, Ok(summary_tagged("newer"))), FetchOutcome::Applied);
        assert_eq!(query.complete(older, Ok(summary_tagged("older"))), FetchOutcome::Stale);
        assert_eq!(displayed_dag(&query).as_deref(), Some("newer"));
        assert!(!query.snapshot().is_loading);
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let repo = Arc::new(RecordingRepository::default());
        let query = DashboardQuery::new(repo, DurationWindow::EightHours);

        let ticket = query.begin();
        query.complete(ticket, Ok(summary_tagged("ok")));

        let ticket = query.begin();
        let outcome = query.complete(
            ticket,
            Err(DashboardError::Status {
                status: 500,
                body: String::new(),
            }),
        );
        assert_eq!(outcome, FetchOutcome::Failed);
        let snapshot = query.snapshot();
        assert!(snapshot.is_error);
        assert_eq!(displayed_dag(&query).as_deref(), Some("ok"));

        let ticket = query.begin();
        query.complete(ticket, Ok(summary_tagged("recovered")));
        assert!(!query.snapshot().is_error);
    }

    #[tokio::test]
    async fn test_failure_without_data_stays_blank() {
        let repo = Arc::new(RecordingRepository::default());
        repo.set_failing(true);
        let query = DashboardQuery::new(repo, DurationWindow::OneHour);

        assert_eq!(query.refetch().await.unwrap(), FetchOutcome::Failed);
        let snapshot = query.snapshot();
        assert!(snapshot.is_error);
        assert!(snapshot.data.is_none());
    }

    #[tokio::test]
    async fn test_refetch_if_idle_skips_in_flight_window() {
        let repo = Arc::new(RecordingRepository::default());
        let query = DashboardQuery::new(repo, DurationWindow::EightHours);

        let ticket = query.begin();
        assert!(query.refetch_if_idle().is_none());

        // A request for another window does not block the new one
        query.select_duration(DurationWindow::OneDay);
        let handle = query.refetch_if_idle().expect("new window is idle");
        assert_eq!(handle.await.unwrap(), FetchOutcome::Applied);

        assert_eq!(query.complete(ticket, Ok(DashboardSummary::default())), FetchOutcome::Stale);
    }

    #[tokio::test]
    async fn test_subscribers_are_notified() {
        let repo = Arc::new(RecordingRepository::default());
        let query = DashboardQuery::new(repo, DurationWindow::EightHours);
        let mut updates = query.subscribe();

        query.refetch().await.unwrap();

        assert!(updates.has_changed().unwrap());
        let snapshot = updates.borrow_and_update().clone();
        assert!(snapshot.data.is_some());
        assert_eq!(snapshot.fetch_count, 1);
    }
}
