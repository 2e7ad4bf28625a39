mod common;

use apitest_mcp::app::App;
use apitest_mcp::constants::tools;
use apitest_mcp::mcp::catalog::{tool_by_name, tool_catalog, validate_tool_args};
use httpmock::MockServer;
use serde_json::json;
use std::collections::HashSet;

#[test]
fn catalog_names_share_the_product_prefix() {
    for tool in tool_catalog() {
        assert!(
            tool.name.starts_with(tools::PREFIX),
            "{} must start with {}",
            tool.name,
            tools::PREFIX
        );
        assert!(!tool.description.trim().is_empty(), "{} needs a description", tool.name);
    }
}

#[test]
fn every_schema_takes_action_and_args_only() {
    for tool in tool_catalog() {
        let schema = &tool.input_schema;
        assert_eq!(schema["type"], json!("object"), "{}", tool.name);
        assert_eq!(schema["required"], json!(["action"]), "{}", tool.name);
        assert_eq!(schema["additionalProperties"], json!(false), "{}", tool.name);
        assert!(validate_tool_args(&tool.name, &json!({"action": "list", "args": {}})).is_ok());
    }
}

#[tokio::test]
async fn every_catalog_tool_has_a_handler() {
    let server = MockServer::start_async().await;
    let deps = common::deps(&server, common::credential());

    let handlers: HashSet<String> = App::handlers(&deps).into_keys().collect();
    let catalog: HashSet<String> = tool_catalog().iter().map(|tool| tool.name.clone()).collect();
    assert_eq!(handlers, catalog);

    let app = common::app(&server);
    for name in &catalog {
        assert!(app.tool_executor.has_handler(name));
    }
}

#[test]
fn descriptions_list_each_action() {
    let steps = tool_by_name(tools::STEPS).expect("steps tool");
    for action in [
        "read",
        "list",
        "add_pause_step",
        "add_request_step",
        "add_body_to_step",
        "add_assertion_to_step",
    ] {
        assert!(
            steps.description.contains(&format!("- {}:", action)),
            "steps description misses {}",
            action
        );
    }

    let results = tool_by_name(tools::RESULTS).expect("results tool");
    assert!(results.description.contains("- start_bucket_level_run:"));
    assert!(results.description.contains("- read_bucket_level_run:"));
}

#[test]
fn args_must_be_an_object() {
    let err = validate_tool_args(tools::BUCKETS, &json!({"action": "list", "args": "bkt_1"}))
        .expect_err("string args");
    assert!(err.starts_with("Invalid arguments for blazemeter_apitest_buckets"));
    assert!(err.contains("expected object"), "{}", err);
}

#[test]
fn unknown_tools_are_not_schema_checked() {
    assert!(tool_by_name("blazemeter_apitest_unknown").is_none());
    assert!(validate_tool_args("blazemeter_apitest_unknown", &json!({"anything": 1})).is_ok());
}
