// Dashboard view - Composes the status panels for the selected duration window
use crate::application::auto_refresh::AutoRefresh;
use crate::application::dashboard_query::{DashboardQuery, FetchOutcome};
use crate::application::refresh_task::RefreshTask;
use crate::domain::dashboard::DashboardSummary;
use crate::domain::duration::DurationWindow;
use crate::presentation::grouped_list::{self, CardTracker, StatusPanel};
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;

pub const EXPERIMENTAL_NOTICE: &str =
    "This page is experimental. UI is subjected to change and might contain bugs.";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardPage {
    pub duration: DurationWindow,
    pub auto_refresh: bool,
    pub task_instances: Vec<StatusPanel>,
    pub dag_runs: Vec<StatusPanel>,
}

impl DashboardPage {
    /// Panels keyed by a stable id, in display order
    pub fn panels_mut(&mut self) -> impl Iterator<Item = (String, &mut StatusPanel)> {
        let task_instances = self
            .task_instances
            .iter_mut()
            .map(|p| (format!("task_instances.{}", p.label), p));
        let dag_runs = self
            .dag_runs
            .iter_mut()
            .map(|p| (format!("dag_runs.{}", p.label), p));
        task_instances.chain(dag_runs)
    }
}

/// Build the page for one summary without touching animation state
pub fn build_page(
    summary: &DashboardSummary,
    duration: DurationWindow,
    auto_refresh: bool,
    now: DateTime<Utc>,
) -> DashboardPage {
    let task_instances = summary
        .task_instances
        .by_status()
        .into_iter()
        .map(|(label, records)| grouped_list::render(label, Some(records), now))
        .collect();

    let mut dag_runs = vec![grouped_list::render(
        "upcoming",
        Some(summary.upcoming_dag_runs.as_slice()),
        now,
    )];
    dag_runs.extend(
        summary
            .dag_runs_current
            .by_status()
            .into_iter()
            .map(|(label, records)| grouped_list::render(label, Some(records), now)),
    );

    DashboardPage {
        duration,
        auto_refresh,
        task_instances,
        dag_runs,
    }
}

pub struct DashboardView {
    query: DashboardQuery,
    auto_refresh: AutoRefresh,
    selected: DurationWindow,
    refresh: Option<RefreshTask>,
    tracker: CardTracker,
}

impl DashboardView {
    pub fn new(query: DashboardQuery, auto_refresh: AutoRefresh) -> Self {
        let selected = query.duration();
        Self {
            query,
            auto_refresh,
            selected,
            refresh: None,
            tracker: CardTracker::default(),
        }
    }

    pub fn duration(&self) -> DurationWindow {
        self.selected
    }

    pub fn auto_refresh(&self) -> &AutoRefresh {
        &self.auto_refresh
    }

    pub fn is_mounted(&self) -> bool {
        self.refresh.is_some()
    }

    /// Initial fetch plus the refresh timer; `None` when already mounted
    pub fn mount(&mut self) -> Option<JoinHandle<FetchOutcome>> {
        if self.is_mounted() {
            return None;
        }
        tracing::info!(duration = %self.selected, "mounting dashboard");
        self.refresh = Some(RefreshTask::spawn(self.query.clone(), &self.auto_refresh));
        Some(self.query.refetch())
    }

    /// Stops the timer; requests already in flight finish on their own
    pub fn unmount(&mut self) {
        if let Some(task) = self.refresh.take() {
            task.stop();
            tracing::info!("dashboard unmounted");
        }
    }

    /// Returns the fetch issued for the new window, or `None` when nothing changed
    pub fn set_duration(&mut self, duration: DurationWindow) -> Option<JoinHandle<FetchOutcome>> {
        if duration == self.selected {
            return None;
        }
        self.selected = duration;
        self.query.select_duration(duration);
        self.tracker.forget();

        if self.refresh.is_some() {
            self.refresh = Some(RefreshTask::spawn(self.query.clone(), &self.auto_refresh));
        }
        Some(self.query.refetch())
    }

    /// Nothing is rendered until the current window has data, whether loading or failed
    pub fn render(&mut self, now: DateTime<Utc>) -> Option<DashboardPage> {
        let snapshot = self.query.snapshot();
        if snapshot.duration != self.selected {
            return None;
        }
        let summary = snapshot.data?;

        let mut page = build_page(&summary, self.selected, self.auto_refresh.is_enabled(), now);
        for (panel_id, panel) in page.panels_mut() {
            self.tracker.track(&panel_id, panel);
        }
        Some(page)
    }
}

impl Drop for DashboardView {
    fn drop(&mut self) {
        self.unmount();
    }
}
