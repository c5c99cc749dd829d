// Grouped list renderer - One titled panel of status cards per bucket
use crate::domain::records::{DagRunRecord, RecordKey, TaskInstanceRecord, UpcomingDagRunRecord};
use crate::domain::status::{ColorToken, StatusLabel};
use crate::presentation::datetime::{elapsed, format_duration, format_timestamp};
use crate::presentation::links;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub caption: &'static str,
    pub value: String,
    pub href: Option<String>,
}

impl Field {
    fn text(caption: &'static str, value: String) -> Self {
        Self {
            caption,
            value,
            href: None,
        }
    }

    fn link(caption: &'static str, link: Link) -> Self {
        Self {
            caption,
            value: link.label,
            href: Some(link.href),
        }
    }
}

/// Enter animation state of a card (fade and slide in from above)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Entering,
    Steady,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub key: RecordKey,
    pub title: Link,
    pub fields: Vec<Field>,
    pub transition: Transition,
}

impl Card {
    pub fn field(&self, caption: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.caption == caption)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusPanel {
    pub label: StatusLabel,
    pub accent: Option<ColorToken>,
    pub cards: Vec<Card>,
    /// Keys that left since the previous render (fade and slide out to the side)
    pub exiting: Vec<RecordKey>,
}

impl StatusPanel {
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    pub fn title(&self) -> String {
        format!("{} - {}", self.label, self.count())
    }

    pub fn keys(&self) -> Vec<&RecordKey> {
        self.cards.iter().map(|c| &c.key).collect()
    }
}

/// A record that can be drawn as one card
pub trait StatusCard {
    fn key(&self) -> RecordKey;
    fn title(&self) -> Link;
    fn fields(&self, now: DateTime<Utc>) -> Vec<Field>;
}

fn timing_fields(
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Vec<Field> {
    let mut fields = vec![Field::text("Started", format_timestamp(start))];
    if let Some(end) = end {
        fields.push(Field::text("Ended", format_timestamp(end)));
    }
    fields.push(Field::text(
        "Duration",
        format_duration(elapsed(start, end, now)),
    ));
    fields
}

fn dag_field(dag_id: &str) -> Field {
    Field::link(
        "Dag ID",
        Link {
            label: dag_id.to_string(),
            href: links::dag_grid(dag_id),
        },
    )
}

impl StatusCard for TaskInstanceRecord {
    fn key(&self) -> RecordKey {
        TaskInstanceRecord::key(self)
    }

    fn title(&self) -> Link {
        let label = if self.map_index >= 0 {
            format!("{} [{}]", self.task_id, self.map_index)
        } else {
            self.task_id.clone()
        };
        Link {
            label,
            href: links::task_instance_grid(
                &self.dag_id,
                &self.run_id,
                &self.task_id,
                self.map_index,
            ),
        }
    }

    fn fields(&self, now: DateTime<Utc>) -> Vec<Field> {
        let mut fields = vec![dag_field(&self.dag_id)];
        fields.extend(timing_fields(self.start_date, self.end_date, now));
        fields
    }
}

impl StatusCard for DagRunRecord {
    fn key(&self) -> RecordKey {
        DagRunRecord::key(self)
    }

    fn title(&self) -> Link {
        Link {
            label: self.run_id.clone(),
            href: links::dag_run_grid(&self.dag_id, &self.run_id),
        }
    }

    fn fields(&self, now: DateTime<Utc>) -> Vec<Field> {
        let mut fields = vec![dag_field(&self.dag_id)];
        fields.extend(timing_fields(self.start_date, self.end_date, now));
        fields
    }
}

impl StatusCard for UpcomingDagRunRecord {
    fn key(&self) -> RecordKey {
        UpcomingDagRunRecord::key(self)
    }

    fn title(&self) -> Link {
        Link {
            label: self.dag_id.clone(),
            href: links::dag_grid(&self.dag_id),
        }
    }

    fn fields(&self, _now: DateTime<Utc>) -> Vec<Field> {
        vec![
            Field::text(
                "Start at",
                self.next_dagrun_create_after
                    .map(format_timestamp)
                    .unwrap_or_default(),
            ),
            Field::text("Schedule", self.schedule().to_string()),
        ]
    }
}

/// Render one panel; a missing list renders as an empty one
pub fn render<R: StatusCard>(label: &str, records: Option<&[R]>, now: DateTime<Utc>) -> StatusPanel {
    let label = StatusLabel::parse(label);
    let accent = match label {
        StatusLabel::Upcoming => None,
        ref other => Some(other.accent()),
    };
    let cards = records
        .unwrap_or_default()
        .iter()
        .map(|record| Card {
            key: record.key(),
            title: record.title(),
            fields: record.fields(now),
            transition: Transition::Steady,
        })
        .collect();

    StatusPanel {
        label,
        accent,
        cards,
        exiting: Vec::new(),
    }
}

/// Remembers which keys each panel showed last time, to mark entering and exiting cards
#[derive(Debug, Default)]
pub struct CardTracker {
    previous: HashMap<String, Vec<RecordKey>>,
}

impl CardTracker {
    pub fn track(&mut self, panel_id: &str, panel: &mut StatusPanel) {
        let current: Vec<RecordKey> = panel.cards.iter().map(|c| c.key.clone()).collect();

        match self.previous.get(panel_id) {
            Some(previous) => {
                let before: HashSet<&RecordKey> = previous.iter().collect();
                let now: HashSet<&RecordKey> = current.iter().collect();
                for card in &mut panel.cards {
                    card.transition = if before.contains(&card.key) {
                        Transition::Steady
                    } else {
                        Transition::Entering
                    };
                }
                panel.exiting = previous
                    .iter()
                    .filter(|key| !now.contains(key))
                    .cloned()
                    .collect();
            }
            None => {
                for card in &mut panel.cards {
                    card.transition = Transition::Entering;
                }
                panel.exiting.clear();
            }
        }

        self.previous.insert(panel_id.to_string(), current);
    }

    pub fn forget(&mut self) {
        self.previous.clear();
    }
}
