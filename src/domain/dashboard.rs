// Dashboard domain model
use super::records::{DagRunRecord, TaskInstanceRecord, UpcomingDagRunRecord};
use serde::Deserialize;

/// Summary returned by the backend; replaced wholesale on every fetch
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(default)]
    pub task_instances: TaskInstanceBuckets,
    #[serde(default)]
    pub dag_runs_current: DagRunBuckets,
    #[serde(default, alias = "dagRuns")]
    pub upcoming_dag_runs: Vec<UpcomingDagRunRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaskInstanceBuckets {
    #[serde(default)]
    pub running: Vec<TaskInstanceRecord>,
    #[serde(default)]
    pub deferred: Vec<TaskInstanceRecord>,
    #[serde(default)]
    pub success: Vec<TaskInstanceRecord>,
    #[serde(default)]
    pub failed: Vec<TaskInstanceRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DagRunBuckets {
    #[serde(default)]
    pub running: Vec<DagRunRecord>,
    #[serde(default)]
    pub success: Vec<DagRunRecord>,
    #[serde(default)]
    pub failed: Vec<DagRunRecord>,
}

impl TaskInstanceBuckets {
    pub fn by_status(&self) -> [(&'static str, &[TaskInstanceRecord]); 4] {
        [
            ("running", &self.running),
            ("deferred", &self.deferred),
            ("success", &self.success),
            ("failed", &self.failed),
        ]
    }
}

impl DagRunBuckets {
    pub fn by_status(&self) -> [(&'static str, &[DagRunRecord]); 3] {
        [
            ("running", &self.running),
            ("success", &self.success),
            ("failed", &self.failed),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_buckets_default_to_empty() {
        let summary: DashboardSummary = serde_json::from_str("{}").unwrap();
        assert_eq!(summary, DashboardSummary::default());

        let summary: DashboardSummary =
            serde_json::from_str(r#"{"taskInstances":{"running":[]}}"#).unwrap();
        assert!(summary.task_instances.failed.is_empty());
    }

    #[test]
    fn test_legacy_upcoming_key() {
        let json = r#"{"dagRuns":[{"dagId":"d1","nextDagrunCreateAfter":"2024-01-01T00:00:00Z"}]}"#;
        let summary: DashboardSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.upcoming_dag_runs.len(), 1);
        assert_eq!(summary.upcoming_dag_runs[0].dag_id, "d1");
    }

    #[test]
    fn test_unscheduled_upcoming_run_decodes() {
        let json = r#"{
            "taskInstances":{"running":[{"dagId":"d1","runId":"r1","taskId":"t1","startDate":"2024-01-01T00:00:00Z"}]},
            "upcomingDagRuns":[{"dagId":"paused","nextDagrunCreateAfter":null},{"dagId":"bare"}]
        }"#;
        let summary: DashboardSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.task_instances.running.len(), 1);
        assert_eq!(summary.upcoming_dag_runs.len(), 2);
        assert!(summary.upcoming_dag_runs[0].next_dagrun_create_after.is_none());
        assert_ne!(summary.upcoming_dag_runs[0].key(), summary.upcoming_dag_runs[1].key());
    }

    #[test]
    fn test_bucket_order() {
        let summary = DashboardSummary::default();
        let labels: Vec<_> = summary.task_instances.by_status().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, ["running", "deferred", "success", "failed"]);
        let labels: Vec<_> = summary.dag_runs_current.by_status().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, ["running", "success", "failed"]);
    }
}
