//! Raw wire records in, validated domain records out.
//!
//! Every formatter deserializes each record into its domain struct (which
//! drops unknown fields and fails on missing required ones) and serializes it
//! back under domain field names. Aliases on the structs accept both the wire
//! and the domain name, so formatting an already formatted record is a no-op.

mod environment;
mod team;

pub use environment::format_environments;
pub use team::{format_accounts, format_team_users};

use crate::errors::ToolError;
use crate::models::bucket::Bucket;
use crate::models::result::{TestExecution, TestResult};
use crate::models::schedule::Schedule;
use crate::models::step::TestStep;
use crate::models::test::{Test, TestMetrics};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// `(raw records, formatter params) -> validated records`.
pub type Formatter = fn(Vec<Value>, Option<&Value>) -> Result<Vec<Value>, ToolError>;

pub(crate) fn format_as<T>(entity: &str, records: Vec<Value>) -> Result<Vec<Value>, ToolError>
where
    T: DeserializeOwned + Serialize,
{
    records
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| {
            let record: T = serde_json::from_value(raw).map_err(|err| {
                ToolError::validation(format!(
                    "{} record #{} failed validation: {}",
                    entity, idx, err
                ))
            })?;
            serde_json::to_value(&record).map_err(|err| {
                ToolError::internal(format!("{} record #{} serialization: {}", entity, idx, err))
            })
        })
        .collect()
}

pub fn format_buckets(records: Vec<Value>, _params: Option<&Value>) -> Result<Vec<Value>, ToolError> {
    format_as::<Bucket>("bucket", records)
}

pub fn format_tests(records: Vec<Value>, _params: Option<&Value>) -> Result<Vec<Value>, ToolError> {
    format_as::<Test>("test", records)
}

pub fn format_test_metrics(
    records: Vec<Value>,
    _params: Option<&Value>,
) -> Result<Vec<Value>, ToolError> {
    format_as::<TestMetrics>("test metrics", records)
}

pub fn format_steps(records: Vec<Value>, _params: Option<&Value>) -> Result<Vec<Value>, ToolError> {
    format_as::<TestStep>("step", records)
}

pub fn format_schedules(
    records: Vec<Value>,
    _params: Option<&Value>,
) -> Result<Vec<Value>, ToolError> {
    format_as::<Schedule>("schedule", records)
}

pub fn format_results(records: Vec<Value>, _params: Option<&Value>) -> Result<Vec<Value>, ToolError> {
    format_as::<TestResult>("test result", records)
}

pub fn format_triggered_runs(
    records: Vec<Value>,
    _params: Option<&Value>,
) -> Result<Vec<Value>, ToolError> {
    format_as::<TestExecution>("test execution", records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ToolErrorKind;
    use serde_json::json;

    fn wire_bucket() -> Value {
        json!({
            "key": "bkt_1",
            "name": "Payments",
            "created_at": 1_700_000_000.0,
            "default": true,
            "is_private": false,
            "trigger_url": "https://api.runscope.com/radar/bucket/abc/trigger",
            "team": {"id": "team_1", "name": "Core"},
            "verify_ssl": true,
            "auth_token": "should-not-leak"
        })
    }

    #[test]
    fn bucket_is_renamed_and_unknown_fields_dropped() {
        let out = format_buckets(vec![wire_bucket()], None).expect("formatted");
        let bucket = &out[0];
        assert_eq!(bucket["bucket_key"], json!("bkt_1"));
        assert_eq!(bucket["team"]["team_id"], json!("team_1"));
        assert_eq!(bucket["tests_count"], json!(0));
        assert!(bucket.get("key").is_none());
        assert!(bucket.get("verify_ssl").is_none());
        assert!(bucket.get("auth_token").is_none());
    }

    #[test]
    fn formatting_twice_is_idempotent() {
        let once = format_buckets(vec![wire_bucket()], None).expect("first pass");
        let twice = format_buckets(once.clone(), None).expect("second pass");
        assert_eq!(once, twice);
    }

    #[test]
    fn missing_required_field_is_a_validation_error() {
        let mut raw = wire_bucket();
        raw.as_object_mut().expect("object").remove("trigger_url");
        let err = format_buckets(vec![raw], None).unwrap_err();
        assert_eq!(err.kind, ToolErrorKind::Validation);
        assert!(err.message.contains("bucket record #0"));
        assert!(err.message.contains("trigger_url"));
    }

    #[test]
    fn wrong_primitive_shape_is_a_validation_error() {
        let mut raw = wire_bucket();
        raw["default"] = json!("yes");
        assert!(format_buckets(vec![raw], None).is_err());
    }

    #[test]
    fn test_keeps_last_run_summary_only() {
        let raw = json!({
            "id": "t_1",
            "name": "Login",
            "default_environment_id": "env_1",
            "trigger_url": "https://api.runscope.com/radar/t/trigger",
            "created_by": {"id": "u_1", "email": "a@example.com", "name": "Ann"},
            "created_at": 1_700_000_000.5,
            "last_run": {"id": "run_9", "status": "completed", "agent": "x"},
            "environments": [{"id": "env_1"}],
            "schedules": []
        });
        let out = format_tests(vec![raw], None).expect("formatted");
        assert_eq!(out[0]["test_id"], json!("t_1"));
        assert_eq!(out[0]["created_by"]["user_id"], json!("u_1"));
        assert_eq!(out[0]["last_run"], json!({"test_run_id": "run_9", "status": "completed"}));
        assert!(out[0].get("environments").is_none());
        assert_eq!(out[0]["step_count"], json!(0));
    }

    #[test]
    fn metrics_rename_environment_uuid() {
        let raw = json!({
            "response_times": [{"timestamp": 1, "avg_response_time_ms": 12.5, "success_ratio": 1.0}],
            "timeframe": "day",
            "this_time_period": {"total_test_runs": 4.0},
            "change_from_last_period": {},
            "region": "all",
            "environment_uuid": "all"
        });
        let out = format_test_metrics(vec![raw], None).expect("formatted");
        assert_eq!(out[0]["environment_id"], json!("all"));
        assert_eq!(out[0]["this_time_period"], json!({"total_test_runs": 4.0}));
    }

    #[test]
    fn step_requires_step_type_and_skipped() {
        let ok = format_steps(
            vec![json!({"id": "s_1", "step_type": "pause", "skipped": false, "duration": 5})],
            None,
        )
        .expect("formatted");
        assert_eq!(ok[0]["step_id"], json!("s_1"));
        assert_eq!(ok[0]["duration"], json!(5));
        assert!(ok[0].get("url").is_none());

        assert!(format_steps(vec![json!({"id": "s_2", "skipped": false})], None).is_err());
    }

    #[test]
    fn schedule_note_becomes_description() {
        let out = format_schedules(
            vec![json!({"id": "sch_1", "note": "nightly", "interval": "1d", "environment_id": "env_1"})],
            None,
        )
        .expect("formatted");
        assert_eq!(
            out[0],
            json!({"schedule_id": "sch_1", "description": "nightly", "interval": "1d", "environment_id": "env_1"})
        );
    }

    #[test]
    fn result_request_uuid_becomes_step_id() {
        let raw = json!({
            "test_run_id": "run_1",
            "bucket_key": "bkt_1",
            "test_id": "t_1",
            "test_name": "Login",
            "assertions_defined": 2, "assertions_failed": 0, "assertions_passed": 2,
            "variables_defined": 0, "variables_passed": 0, "variables_failed": 0,
            "scripts_defined": 0, "scripts_passed": 0, "scripts_failed": 0,
            "started_at": 1.0,
            "finished_at": 2.0,
            "requests_executed": 1,
            "result": "pass",
            "source": "manual",
            "environment_id": "env_1",
            "requests": [{"uuid": "s_1", "method": "GET", "result": "pass"}]
        });
        let out = format_results(vec![raw], None).expect("formatted");
        assert_eq!(out[0]["requests"][0]["step_id"], json!("s_1"));
        assert!(out[0].get("region").is_none());
    }

    #[test]
    fn triggered_runs_keep_run_list() {
        let raw = json!({
            "runs": [{
                "test_run_id": "run_1",
                "test_id": "t_1",
                "bucket_key": "bkt_1",
                "status": "init",
                "variables": {"a": "b"}
            }],
            "runs_started": 1,
            "runs_failed": 0,
            "runs_total": 1
        });
        let out = format_triggered_runs(vec![raw], None).expect("formatted");
        assert_eq!(out[0]["runs"][0]["status"], json!("init"));
        assert!(out[0]["runs"][0].get("variables").is_none());
    }
}
