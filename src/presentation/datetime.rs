// Date and duration display helpers
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};

/// Elapsed time from `start` until `end`, or until `now` for records still running
pub fn elapsed(start: DateTime<Utc>, end: Option<DateTime<Utc>>, now: DateTime<Utc>) -> TimeDelta {
    end.unwrap_or(now) - start
}

/// `HH:MM:SS`, prefixed with whole days (`2d03:04:05`); negative spans read as zero
pub fn format_duration(span: TimeDelta) -> String {
    let total = span.num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    if days >= 1 {
        format!("{}d{:02}:{:02}:{:02}", days, hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}
