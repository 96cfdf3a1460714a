//! Persisted session record.
//!
//! The on-disk keys (`date`, `timer`, `tag`, `desc`) are part of the log file
//! format and must not change.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// `date` format: second precision, sorts lexically, safe as a file name.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H%M%S";

pub const DEFAULT_TAG: &str = "Empty";
pub const DEFAULT_DESC: &str = "...";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionRecord {
    pub date: String,
    #[serde(rename = "timer")]
    pub duration_minutes: u64,
    pub tag: String,
    pub desc: String,
}

impl SessionRecord {
    pub fn new<Tz: TimeZone>(
        finished_at: &DateTime<Tz>,
        total_secs: u64,
        tag: &str,
        desc: &str,
    ) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            date: format_record_date(finished_at),
            duration_minutes: total_secs / 60,
            tag: tag.to_string(),
            desc: desc.to_string(),
        }
    }

    pub fn thumbnail_file_name(&self) -> String {
        format!("{}.png", self.date)
    }
}

pub fn format_record_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_record_fields() {
        let at = Utc.with_ymd_and_hms(2026, 3, 7, 9, 5, 4).unwrap();
        let record = SessionRecord::new(&at, 25 * 60 + 59, DEFAULT_TAG, DEFAULT_DESC);

        assert_eq!(record.date, "2026-03-07T090504");
        assert_eq!(record.duration_minutes, 25);
        assert_eq!(record.thumbnail_file_name(), "2026-03-07T090504.png");
    }

    #[test]
    fn test_serialized_keys() {
        let record = SessionRecord {
            date: "2026-03-07T090504".into(),
            duration_minutes: 30,
            tag: "ink".into(),
            desc: "wash study".into(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "date": "2026-03-07T090504",
                "timer": 30,
                "tag": "ink",
                "desc": "wash study"
            })
        );
    }

    #[test]
    fn test_dates_sort_chronologically() {
        let earlier = format_record_date(&Utc.with_ymd_and_hms(2026, 1, 9, 23, 59, 59).unwrap());
        let later = format_record_date(&Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap());
        assert!(earlier < later);
    }
}
