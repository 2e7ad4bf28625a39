use super::{ActionSet, ManagerDeps};
use crate::constants::api::{step_endpoint, steps_endpoint};
use crate::errors::ToolError;
use crate::formatters::format_steps;
use crate::models::step::{PAUSE_STEP_TYPE, REQUEST_STEP_TYPE};
use crate::models::ApiResult;
use crate::services::gateway::ApiRequest;
use crate::services::tool_executor::{CallContext, ToolHandler};
use crate::services::validation::STEP_METHODS;
use crate::utils::body::{prepare_body, BodyType};
use async_trait::async_trait;
use serde_json::{json, Map, Value};

pub const ASSERTION_SOURCES: &[&str] = &[
    "response_status",
    "response_headers",
    "response_json",
    "response_xml",
    "response_text",
    "response_size",
    "response_time",
];

pub const ASSERTION_COMPARISONS: &[&str] = &[
    "equal",
    "not_equal",
    "empty",
    "not_empty",
    "contains",
    "does_not_contain",
    "is_a_number",
    "equal_number",
    "is_less_than",
    "is_less_than_or_equal",
    "is_greater_than",
    "is_greater_than_or_equal",
    "has_key",
    "has_value",
    "is_null",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Read,
    List,
    AddPauseStep,
    AddRequestStep,
    AddBodyToStep,
    AddAssertionToStep,
}

impl ActionSet for StepAction {
    const FAMILY: &'static str = "steps";
    const TABLE: &'static [(&'static str, Self)] = &[
        ("read", StepAction::Read),
        ("list", StepAction::List),
        ("add_pause_step", StepAction::AddPauseStep),
        ("add_request_step", StepAction::AddRequestStep),
        ("add_body_to_step", StepAction::AddBodyToStep),
        ("add_assertion_to_step", StepAction::AddAssertionToStep),
    ];
}

/// Assertion appended to a request step. Absent optional fields are left
/// out of the payload entirely so server defaults survive.
#[derive(Debug, Clone, PartialEq)]
pub struct Assertion {
    pub source: String,
    pub comparison: String,
    pub property: Option<String>,
    pub value: Option<Value>,
}

impl Assertion {
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("source".to_string(), Value::String(self.source.clone()));
        map.insert("comparison".to_string(), Value::String(self.comparison.clone()));
        if let Some(property) = self.property.as_ref() {
            map.insert("property".to_string(), Value::String(property.clone()));
        }
        if let Some(value) = self.value.as_ref() {
            map.insert("value".to_string(), value.clone());
        }
        Value::Object(map)
    }
}

/// Identifies one step of one test.
#[derive(Debug, Clone, Copy)]
pub struct StepRef<'a> {
    pub bucket_key: &'a str,
    pub test_id: &'a str,
    pub step_id: &'a str,
}

impl StepRef<'_> {
    fn path(&self) -> String {
        step_endpoint(self.bucket_key, self.test_id, self.step_id)
    }
}

pub struct StepManager {
    deps: ManagerDeps,
}

impl StepManager {
    pub fn new(deps: &ManagerDeps) -> Self {
        Self {
            deps: deps.scoped(StepAction::FAMILY),
        }
    }

    pub async fn read(&self, step: StepRef<'_>) -> Result<ApiResult, ToolError> {
        self.deps
            .call(ApiRequest::get(step.path()).formatter(format_steps))
            .await
    }

    pub async fn list(&self, bucket_key: &str, test_id: &str) -> Result<ApiResult, ToolError> {
        self.deps
            .call(ApiRequest::get(steps_endpoint(bucket_key, test_id)).formatter(format_steps))
            .await
    }

    pub async fn add_pause_step(
        &self,
        bucket_key: &str,
        test_id: &str,
        duration: i64,
    ) -> Result<ApiResult, ToolError> {
        let body = json!({"step_type": PAUSE_STEP_TYPE, "duration": duration});
        self.deps
            .call(
                ApiRequest::post(steps_endpoint(bucket_key, test_id))
                    .json(body)
                    .formatter(format_steps),
            )
            .await
    }

    pub async fn add_request_step(
        &self,
        bucket_key: &str,
        test_id: &str,
        method: &str,
        url: &str,
    ) -> Result<ApiResult, ToolError> {
        let body = json!({"step_type": REQUEST_STEP_TYPE, "method": method, "url": url});
        self.deps
            .call(
                ApiRequest::post(steps_endpoint(bucket_key, test_id))
                    .json(body)
                    .formatter(format_steps),
            )
            .await
    }

    /// Content is validated before the step is even fetched.
    pub async fn add_body_to_step(
        &self,
        step: StepRef<'_>,
        body_type: &str,
        body_content: &str,
    ) -> Result<ApiResult, ToolError> {
        let body_type = match BodyType::parse(body_type) {
            Ok(body_type) => body_type,
            Err(message) => return Ok(ApiResult::failure(message)),
        };
        let prepared = match prepare_body(body_type, body_content) {
            Ok(prepared) => prepared,
            Err(message) => return Ok(ApiResult::failure(message)),
        };
        self.mutate_request_step(step, "Bodies", |record| {
            record.insert("body".to_string(), Value::String(prepared));
            set_content_type(record, body_type.media_type());
        })
        .await
    }

    pub async fn add_assertion_to_step(
        &self,
        step: StepRef<'_>,
        assertion: Assertion,
    ) -> Result<ApiResult, ToolError> {
        self.mutate_request_step(step, "Assertions", |record| {
            let entry = record
                .entry("assertions".to_string())
                .or_insert_with(|| Value::Array(Vec::new()));
            if !entry.is_array() {
                *entry = Value::Array(Vec::new());
            }
            if let Value::Array(assertions) = entry {
                assertions.push(assertion.to_value());
            }
        })
        .await
    }

    /// Read the raw step, check it is a request step, apply `mutate`, write
    /// the whole record back. The write only happens after a successful read.
    async fn mutate_request_step<F>(
        &self,
        step: StepRef<'_>,
        what: &str,
        mutate: F,
    ) -> Result<ApiResult, ToolError>
    where
        F: FnOnce(&mut Map<String, Value>) + Send,
    {
        let current = self.deps.call(ApiRequest::get(step.path())).await?;
        if current.is_error() {
            return Ok(current);
        }
        let Some(Value::Object(mut record)) = current.result.and_then(|records| records.into_iter().next())
        else {
            return Ok(ApiResult::failure(format!(
                "Step {} not found in test {}",
                step.step_id, step.test_id
            )));
        };

        let step_type = record
            .get("step_type")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        if step_type != REQUEST_STEP_TYPE {
            return Ok(ApiResult::failure(format!(
                "Step {} is of type '{}'. {} can only be added to request steps.",
                step.step_id, step_type, what
            )));
        }

        mutate(&mut record);
        self.deps.logger.debug(
            "writing step",
            Some(&json!({"step_id": step.step_id, "test_id": step.test_id})),
        );
        self.deps
            .call(
                ApiRequest::put(step.path())
                    .json(Value::Object(record))
                    .formatter(format_steps),
            )
            .await
    }
}

/// Headers are a map of name to value list; any earlier `Content-Type`
/// entry is replaced whatever its casing.
fn set_content_type(record: &mut Map<String, Value>, media_type: &str) {
    let headers = record
        .entry("headers".to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !headers.is_object() {
        *headers = Value::Object(Map::new());
    }
    if let Value::Object(headers) = headers {
        headers.retain(|name, _| !name.eq_ignore_ascii_case("content-type"));
        headers.insert("Content-Type".to_string(), json!([media_type]));
    }
}

#[async_trait]
impl ToolHandler for StepManager {
    fn family(&self) -> &'static str {
        StepAction::FAMILY
    }

    async fn handle(
        &self,
        action: &str,
        args: Value,
        ctx: &CallContext,
    ) -> Result<ApiResult, ToolError> {
        let action = StepAction::parse(action)?;
        self.deps.trace(ctx, action.name());
        let v = &self.deps.validation;
        let bucket_key = v.require_id(&args, "bucket_key")?;
        let test_id = v.require_id(&args, "test_id")?;
        match action {
            StepAction::List => self.list(&bucket_key, &test_id).await,
            StepAction::AddPauseStep => {
                let duration = v.ensure_positive_int(args.get("duration"), "duration")?;
                self.add_pause_step(&bucket_key, &test_id, duration).await
            }
            StepAction::AddRequestStep => {
                let method = v.require_arg(&args, "method")?;
                let method = v.ensure_one_of(&method, "method", STEP_METHODS)?;
                let url = v.ensure_step_url(&v.require_arg(&args, "url")?)?;
                self.add_request_step(&bucket_key, &test_id, method, &url).await
            }
            StepAction::Read | StepAction::AddBodyToStep | StepAction::AddAssertionToStep => {
                let step_id = v.require_id(&args, "step_id")?;
                let step = StepRef {
                    bucket_key: &bucket_key,
                    test_id: &test_id,
                    step_id: &step_id,
                };
                match action {
                    StepAction::AddBodyToStep => {
                        let body_type = v.require_arg(&args, "body_type")?;
                        let content = args.get("body_content").unwrap_or(&Value::Null);
                        let content = v.ensure_string(content, "body_content", false)?;
                        self.add_body_to_step(step, &body_type, &content).await
                    }
                    StepAction::AddAssertionToStep => {
                        let source = v.require_arg(&args, "source")?;
                        let comparison = v.require_arg(&args, "comparison")?;
                        let assertion = Assertion {
                            source: v.ensure_one_of(&source, "source", ASSERTION_SOURCES)?.to_string(),
                            comparison: v
                                .ensure_one_of(&comparison, "comparison", ASSERTION_COMPARISONS)?
                                .to_string(),
                            property: v.optional_arg(&args, "property")?,
                            value: args.get("value").filter(|value| !value.is_null()).cloned(),
                        };
                        self.add_assertion_to_step(step, assertion).await
                    }
                    _ => self.read(step).await,
                }
            }
        }
    }
}
