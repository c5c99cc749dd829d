// Status record domain models
use chrono::{DateTime, Utc};
use serde::Deserialize;

fn unmapped() -> i64 {
    -1
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInstanceRecord {
    pub dag_id: String,
    pub run_id: String,
    pub task_id: String,
    #[serde(default = "unmapped")]
    pub map_index: i64,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DagRunRecord {
    pub dag_id: String,
    pub run_id: String,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingDagRunRecord {
    pub dag_id: String,
    #[serde(default)]
    pub next_dagrun_create_after: Option<DateTime<Utc>>,
    #[serde(default)]
    pub timetable_description: Option<String>,
    #[serde(default)]
    pub schedule_interval: Option<String>,
}

/// Stable identity used to key cards across re-renders
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey(String);

impl RecordKey {
    fn from_parts(parts: &[&str]) -> Self {
        // Parts are escaped so a '/' inside an id cannot collide with the separator
        let joined = parts
            .iter()
            .map(|p| urlencoding::encode(p).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        Self(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TaskInstanceRecord {
    pub fn key(&self) -> RecordKey {
        let map_index = self.map_index.to_string();
        RecordKey::from_parts(&[
            self.dag_id.as_str(),
            self.run_id.as_str(),
            self.task_id.as_str(),
            map_index.as_str(),
        ])
    }
}

impl DagRunRecord {
    pub fn key(&self) -> RecordKey {
        RecordKey::from_parts(&[self.dag_id.as_str(), self.run_id.as_str()])
    }
}

impl UpcomingDagRunRecord {
    pub fn key(&self) -> RecordKey {
        let after = self
            .next_dagrun_create_after
            .map(|ts| ts.to_rfc3339())
            .unwrap_or_default();
        RecordKey::from_parts(&[self.dag_id.as_str(), after.as_str()])
    }

    /// Timetable description wins over the raw schedule interval
    pub fn schedule(&self) -> &str {
        self.timetable_description
            .as_deref()
            .or(self.schedule_interval.as_deref())
            .unwrap_or_default()
    }
}
