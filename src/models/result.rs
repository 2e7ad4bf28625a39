use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outcome of one request step inside a test run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestResult {
    #[serde(alias = "uuid")]
    pub step_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<Map<String, Value>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assertions: Option<Vec<Map<String, Value>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts: Option<Vec<Map<String, Value>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_messages: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assertions_defined: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assertions_passed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assertions_failed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables_defined: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables_passed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables_failed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts_defined: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts_passed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts_failed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timings: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub test_run_id: String,
    pub bucket_key: String,
    pub test_id: String,
    pub test_name: String,

    pub assertions_defined: i64,
    pub assertions_failed: i64,
    pub assertions_passed: i64,
    pub variables_defined: i64,
    pub variables_passed: i64,
    pub variables_failed: i64,
    pub scripts_defined: i64,
    pub scripts_passed: i64,
    pub scripts_failed: i64,

    pub started_at: f64,
    /// Absent while the run is still in progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<f64>,
    pub requests_executed: i64,
    /// `pass`, `fail` or `expired`.
    pub result: String,
    /// `manual`, `scheduled` or `trigger_url`.
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_by: Option<String>,
    pub environment_id: String,
    /// Listings return run summaries without per-request detail.
    #[serde(default)]
    pub requests: Vec<RequestResult>,
}

/// One run started by a trigger URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggeredRun {
    pub test_run_id: String,
    pub test_id: String,
    pub bucket_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_run_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_url: Option<String>,
}

/// Response of a trigger URL: one run per test (a single test trigger
/// yields one run, a bucket trigger one per test in the bucket).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestExecution {
    pub runs: Vec<TriggeredRun>,
    pub runs_started: i64,
    pub runs_failed: i64,
    pub runs_total: i64,
}
