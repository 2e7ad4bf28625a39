use crate::constants::schedule::INTERVALS;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the run intervals the scheduler accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleInterval(&'static str);

impl ScheduleInterval {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        INTERVALS
            .iter()
            .copied()
            .find(|allowed| *allowed == trimmed)
            .map(ScheduleInterval)
            .ok_or_else(|| {
                format!(
                    "Invalid schedule interval '{}'. Allowed values are: {}",
                    raw,
                    INTERVALS.join(", ")
                )
            })
    }

    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ScheduleInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(alias = "id")]
    pub schedule_id: String,
    #[serde(alias = "note", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub interval: String,
    pub environment_id: String,
}

/// Body of a schedule creation request. Construct through
/// `ScheduleInterval` so only supported intervals reach the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateSchedule {
    pub environment_id: String,
    pub interval: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CreateSchedule {
    pub fn new(environment_id: String, interval: ScheduleInterval, note: Option<String>) -> Self {
        Self {
            environment_id,
            interval: interval.as_str().to_string(),
            note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_documented_interval_parses() {
        for raw in ["1m", "5m", "15m", "30m", "1h", "6h", "1d"] {
            assert_eq!(ScheduleInterval::parse(raw).map(|i| i.as_str()), Ok(raw));
        }
    }

    #[test]
    fn undocumented_interval_is_rejected_with_allowed_list() {
        let err = ScheduleInterval::parse("2h").unwrap_err();
        assert!(err.contains("'2h'"));
        assert!(err.contains("1m, 5m, 15m, 30m, 1h, 6h, 1d"));
    }

    #[test]
    fn create_body_omits_missing_note() {
        let interval = ScheduleInterval::parse("1h").expect("interval");
        let body = serde_json::to_value(CreateSchedule::new("env_1".to_string(), interval, None))
            .expect("serialize");
        assert_eq!(
            body,
            serde_json::json!({"environment_id": "env_1", "interval": "1h"})
        );
    }
}
