#![allow(dead_code)]

use apitest_mcp::app::App;
use apitest_mcp::managers::ManagerDeps;
use apitest_mcp::services::config::AppConfig;
use apitest_mcp::services::credential::Credential;
use apitest_mcp::services::gateway::Gateway;
use apitest_mcp::services::logger::Logger;
use httpmock::MockServer;
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;

pub static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub const TOKEN: &str = "test-token";
pub const BEARER: &str = "Bearer test-token";

pub fn logger() -> Logger {
    Logger::new("apitest-test")
}

pub fn credential() -> Option<Credential> {
    Some(Credential::new(TOKEN).expect("token"))
}

pub fn gateway(server: &MockServer) -> Gateway {
    let base = url::Url::parse(&format!("{}/", server.base_url())).expect("base url");
    Gateway::new(logger(), base)
}

pub fn deps(server: &MockServer, credential: Option<Credential>) -> ManagerDeps {
    ManagerDeps::new(Arc::new(gateway(server)), credential, logger())
}

pub fn app(server: &MockServer) -> App {
    app_with(server, credential())
}

pub fn app_with(server: &MockServer, credential: Option<Credential>) -> App {
    let config = AppConfig::new(&server.base_url(), credential).expect("config");
    App::with_config(logger(), config).expect("app")
}

pub fn restore_env(key: &str, previous: Option<String>) {
    match previous {
        Some(value) => std::env::set_var(key, value),
        None => std::env::remove_var(key),
    }
}

pub fn request_step(step_id: &str) -> Value {
    json!({
        "id": step_id,
        "step_type": "request",
        "skipped": false,
        "method": "POST",
        "url": "{{base_url}}/orders",
        "headers": {"Accept": ["*/*"]},
        "assertions": [
            {"source": "response_status", "comparison": "equal_number", "value": "200"}
        ],
        "variables": [],
        "scripts": [],
        "before_scripts": []
    })
}

pub fn pause_step(step_id: &str) -> Value {
    json!({"id": step_id, "step_type": "pause", "skipped": false, "duration": 3})
}

pub fn wire_bucket(key: &str) -> Value {
    json!({
        "key": key,
        "name": "Payments",
        "created_at": 1_700_000_000.0,
        "default": false,
        "is_private": false,
        "trigger_url": format!("https://api.runscope.com/radar/bucket/{}/trigger", key),
        "team": {"id": "team_1", "name": "Core"}
    })
}

pub fn wire_test(test_id: &str) -> Value {
    json!({
        "id": test_id,
        "name": "Checkout",
        "description": "Test Checkout created via MCP tool",
        "default_environment_id": "env_1",
        "trigger_url": format!("https://api.runscope.com/radar/{}/trigger", test_id),
        "created_by": {"id": "user_1", "email": "ann@example.com", "name": "Ann"},
        "created_at": 1_700_000_000.0,
        "steps": []
    })
}

pub fn wire_result(run_id: &str) -> Value {
    json!({
        "test_run_id": run_id,
        "bucket_key": "bkt_1",
        "test_id": "test_1",
        "test_name": "Checkout",
        "assertions_defined": 1, "assertions_failed": 0, "assertions_passed": 1,
        "variables_defined": 0, "variables_passed": 0, "variables_failed": 0,
        "scripts_defined": 0, "scripts_passed": 0, "scripts_failed": 0,
        "started_at": 1_700_000_000.0,
        "finished_at": 1_700_000_001.0,
        "requests_executed": 1,
        "result": "pass",
        "source": "manual",
        "environment_id": "env_1"
    })
}
