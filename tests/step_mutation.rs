mod common;

use apitest_mcp::constants::tools;
use apitest_mcp::services::gateway::missing_credential_message;
use httpmock::Method::{GET, PUT};
use httpmock::MockServer;
use serde_json::{json, Value};

const STEP_PATH: &str = "/buckets/bkt_1/tests/test_1/steps/step_1";

fn step_call(action: &str, extra: Value) -> Value {
    let mut args = json!({"bucket_key": "bkt_1", "test_id": "test_1", "step_id": "step_1"});
    if let (Some(args), Some(extra)) = (args.as_object_mut(), extra.as_object()) {
        for (key, value) in extra {
            args.insert(key.clone(), value.clone());
        }
    }
    json!({"action": action, "args": args})
}

fn with_update(mut step: Value, update: impl FnOnce(&mut serde_json::Map<String, Value>)) -> Value {
    if let Some(map) = step.as_object_mut() {
        update(map);
    }
    step
}

#[tokio::test]
async fn json_body_is_compacted_and_content_type_set() {
    let server = MockServer::start_async().await;
    let read = server
        .mock_async(|when, then| {
            when.method(GET).path(STEP_PATH);
            then.status(200).json_body(json!({"data": common::request_step("step_1")}));
        })
        .await;
    let expected = with_update(common::request_step("step_1"), |step| {
        step.insert("body".to_string(), json!("{\"a\":1,\"b\":[true,null]}"));
        step.insert(
            "headers".to_string(),
            json!({"Accept": ["*/*"], "Content-Type": ["application/json"]}),
        );
    });
    let expected_body = expected.clone();
    let write = server
        .mock_async(move |when, then| {
            when.method(PUT).path(STEP_PATH).json_body(expected_body);
            then.status(200).json_body(json!({"data": expected}));
        })
        .await;

    let result = common::app(&server)
        .tool_executor
        .execute(
            tools::STEPS,
            step_call(
                "add_body_to_step",
                json!({"body_type": "json", "body_content": "{ \"a\": 1,\n  \"b\": [true, null] }"}),
            ),
        )
        .await
        .expect("execute");

    read.assert_calls_async(1).await;
    write.assert_calls_async(1).await;
    assert!(!result.is_error(), "{:?}", result.error);
    let step = &result.records()[0];
    assert_eq!(step["step_id"], json!("step_1"));
    assert_eq!(step["headers"]["Content-Type"], json!(["application/json"]));
}

#[tokio::test]
async fn xml_body_replaces_existing_content_type() {
    let server = MockServer::start_async().await;
    let current = with_update(common::request_step("step_1"), |step| {
        step.insert(
            "headers".to_string(),
            json!({"content-type": ["text/plain"], "X-Trace": ["1"]}),
        );
    });
    server
        .mock_async(move |when, then| {
            when.method(GET).path(STEP_PATH);
            then.status(200).json_body(json!({"data": current}));
        })
        .await;
    let expected = with_update(common::request_step("step_1"), |step| {
        step.insert("body".to_string(), json!("<order id=\"7\"><item/></order>"));
        step.insert(
            "headers".to_string(),
            json!({"X-Trace": ["1"], "Content-Type": ["application/xml"]}),
        );
    });
    let expected_body = expected.clone();
    let write = server
        .mock_async(move |when, then| {
            when.method(PUT).path(STEP_PATH).json_body(expected_body);
            then.status(200).json_body(json!({"data": expected}));
        })
        .await;

    let result = common::app(&server)
        .tool_executor
        .execute(
            tools::STEPS,
            step_call(
                "add_body_to_step",
                json!({"body_type": "XML", "body_content": "<order id='7'><item></item></order>"}),
            ),
        )
        .await
        .expect("execute");

    write.assert_calls_async(1).await;
    assert!(!result.is_error(), "{:?}", result.error);
}

#[tokio::test]
async fn html_body_is_sanitized_before_writing() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(STEP_PATH);
            then.status(200).json_body(json!({"data": common::request_step("step_1")}));
        })
        .await;
    let expected = with_update(common::request_step("step_1"), |step| {
        step.insert("body".to_string(), json!("<p>hello</p>"));
        step.insert(
            "headers".to_string(),
            json!({"Accept": ["*/*"], "Content-Type": ["text/html"]}),
        );
    });
    let expected_body = expected.clone();
    let write = server
        .mock_async(move |when, then| {
            when.method(PUT).path(STEP_PATH).json_body(expected_body);
            then.status(200).json_body(json!({"data": expected}));
        })
        .await;

    let result = common::app(&server)
        .tool_executor
        .execute(
            tools::STEPS,
            step_call(
                "add_body_to_step",
                json!({"body_type": "html", "body_content": "<p>hello</p><script>alert(1)</script>"}),
            ),
        )
        .await
        .expect("execute");

    write.assert_calls_async(1).await;
    assert!(!result.is_error(), "{:?}", result.error);
}

#[tokio::test]
async fn invalid_json_body_makes_no_calls() {
    let server = MockServer::start_async().await;
    let read = server
        .mock_async(|when, then| {
            when.method(GET).path(STEP_PATH);
            then.status(200).json_body(json!({"data": common::request_step("step_1")}));
        })
        .await;

    let result = common::app(&server)
        .tool_executor
        .execute(
            tools::STEPS,
            step_call("add_body_to_step", json!({"body_type": "json", "body_content": "{oops"})),
        )
        .await
        .expect("execute");

    read.assert_calls_async(0).await;
    let error = result.error.expect("error");
    assert!(error.starts_with("Invalid JSON body"), "{}", error);
}

#[tokio::test]
async fn unsupported_body_type_lists_allowed_values() {
    let server = MockServer::start_async().await;

    let result = common::app(&server)
        .tool_executor
        .execute(
            tools::STEPS,
            step_call("add_body_to_step", json!({"body_type": "yaml", "body_content": "a: 1"})),
        )
        .await
        .expect("execute");

    let error = result.error.expect("error");
    assert!(error.contains("'yaml'"));
    assert!(error.contains("json, xml, html, text"));
}

#[tokio::test]
async fn pause_step_is_never_written() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(STEP_PATH);
            then.status(200).json_body(json!({"data": common::pause_step("step_1")}));
        })
        .await;
    let write = server
        .mock_async(|when, then| {
            when.method(PUT).path(STEP_PATH);
            then.status(200).json_body(json!({"data": {}}));
        })
        .await;

    let result = common::app(&server)
        .tool_executor
        .execute(
            tools::STEPS,
            step_call("add_body_to_step", json!({"body_type": "text", "body_content": "hi"})),
        )
        .await
        .expect("execute");

    write.assert_calls_async(0).await;
    assert_eq!(
        result.error.as_deref(),
        Some("Step step_1 is of type 'pause'. Bodies can only be added to request steps.")
    );
}

#[tokio::test]
async fn assertion_is_appended_after_existing_ones() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(STEP_PATH);
            then.status(200).json_body(json!({"data": common::request_step("step_1")}));
        })
        .await;
    let expected = with_update(common::request_step("step_1"), |step| {
        step.insert(
            "assertions".to_string(),
            json!([
                {"source": "response_status", "comparison": "equal_number", "value": "200"},
                {"source": "response_json", "comparison": "equal", "property": "order.id", "value": "7"}
            ]),
        );
    });
    let expected_body = expected.clone();
    let write = server
        .mock_async(move |when, then| {
            when.method(PUT).path(STEP_PATH).json_body(expected_body);
            then.status(200).json_body(json!({"data": expected}));
        })
        .await;

    let result = common::app(&server)
        .tool_executor
        .execute(
            tools::STEPS,
            step_call(
                "add_assertion_to_step",
                json!({
                    "source": "response_json",
                    "comparison": "equal",
                    "property": "order.id",
                    "value": "7"
                }),
            ),
        )
        .await
        .expect("execute");

    write.assert_calls_async(1).await;
    let assertions = result.records()[0]["assertions"]
        .as_array()
        .cloned()
        .expect("assertions");
    assert_eq!(assertions.len(), 2);
    assert_eq!(assertions[1]["property"], json!("order.id"));
}

#[tokio::test]
async fn assertion_on_pause_step_is_refused() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(STEP_PATH);
            then.status(200).json_body(json!({"data": common::pause_step("step_1")}));
        })
        .await;

    let result = common::app(&server)
        .tool_executor
        .execute(
            tools::STEPS,
            step_call(
                "add_assertion_to_step",
                json!({"source": "response_status", "comparison": "equal_number", "value": 200}),
            ),
        )
        .await
        .expect("execute");

    assert_eq!(
        result.error.as_deref(),
        Some("Step step_1 is of type 'pause'. Assertions can only be added to request steps.")
    );
}

#[tokio::test]
async fn unknown_assertion_source_is_an_argument_error() {
    let server = MockServer::start_async().await;

    let result = common::app(&server)
        .tool_executor
        .execute(
            tools::STEPS,
            step_call(
                "add_assertion_to_step",
                json!({"source": "response_body", "comparison": "equal"}),
            ),
        )
        .await
        .expect("execute");

    let error = result.error.expect("error");
    assert!(error.starts_with("Invalid arguments: "), "{}", error);
    assert!(error.contains("source"));
}

#[tokio::test]
async fn missing_step_is_reported_without_writing() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(STEP_PATH);
            then.status(200).json_body(json!({"data": null}));
        })
        .await;
    let write = server
        .mock_async(|when, then| {
            when.method(PUT).path(STEP_PATH);
            then.status(200).json_body(json!({"data": {}}));
        })
        .await;

    let result = common::app(&server)
        .tool_executor
        .execute(
            tools::STEPS,
            step_call("add_body_to_step", json!({"body_type": "text", "body_content": "hi"})),
        )
        .await
        .expect("execute");

    write.assert_calls_async(0).await;
    assert_eq!(result.error.as_deref(), Some("Step step_1 not found in test test_1"));
}

#[tokio::test]
async fn rejected_read_is_returned_as_is() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(STEP_PATH);
            then.status(403).json_body(json!({"error": "No access to bucket"}));
        })
        .await;

    let result = common::app(&server)
        .tool_executor
        .execute(
            tools::STEPS,
            step_call("add_body_to_step", json!({"body_type": "text", "body_content": "hi"})),
        )
        .await
        .expect("execute");

    assert_eq!(result.error.as_deref(), Some("No access to bucket"));
}

#[tokio::test]
async fn mutation_without_token_makes_no_calls() {
    let server = MockServer::start_async().await;
    let read = server
        .mock_async(|when, then| {
            when.method(GET).path(STEP_PATH);
            then.status(200).json_body(json!({"data": common::request_step("step_1")}));
        })
        .await;

    let result = common::app_with(&server, None)
        .tool_executor
        .execute(
            tools::STEPS,
            step_call("add_body_to_step", json!({"body_type": "text", "body_content": "hi"})),
        )
        .await
        .expect("execute");

    read.assert_calls_async(0).await;
    assert_eq!(result.error, Some(missing_credential_message()));
}
