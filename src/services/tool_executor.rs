use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::constants::support::{ISSUES_URL, REPORT_HINT};
use crate::errors::{ErrorCode, McpError, ToolError, ToolErrorKind};
use crate::mcp::catalog::validate_tool_args;
use crate::models::ApiResult;
use crate::services::logger::Logger;
use crate::utils::suggest::suggest;

/// Per-invocation context. Only ever logged.
#[derive(Debug, Clone)]
pub struct CallContext {
    pub trace_id: String,
}

impl CallContext {
    pub fn new() -> Self {
        Self {
            trace_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Family name used in user-facing messages, e.g. `steps`.
    fn family(&self) -> &'static str;

    async fn handle(
        &self,
        action: &str,
        args: Value,
        ctx: &CallContext,
    ) -> Result<ApiResult, ToolError>;
}

#[derive(Clone)]
pub struct ToolExecutor {
    logger: Logger,
    handlers: Arc<HashMap<String, Arc<dyn ToolHandler>>>,
}

impl ToolExecutor {
    pub fn new(logger: Logger, handlers: HashMap<String, Arc<dyn ToolHandler>>) -> Self {
        Self {
            logger: logger.child("executor"),
            handlers: Arc::new(handlers),
        }
    }

    pub fn has_handler(&self, tool: &str) -> bool {
        self.handlers.contains_key(tool)
    }

    /// Runs one tool call. Only an unknown tool escapes as a protocol error;
    /// every other failure comes back as an envelope error.
    pub async fn execute(&self, tool: &str, arguments: Value) -> Result<ApiResult, McpError> {
        let Some(handler) = self.handlers.get(tool).cloned() else {
            let names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
            let suggestions = suggest(tool, &names, 3);
            let mut message = format!("Unknown tool: {}", tool);
            if !suggestions.is_empty() {
                message.push_str(&format!(". Did you mean: {}?", suggestions.join(", ")));
            }
            return Err(McpError::new(ErrorCode::InvalidParams, message));
        };

        let ctx = CallContext::new();
        let action = arguments
            .get("action")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        if let Err(message) = validate_tool_args(tool, &arguments) {
            return Ok(ApiResult::failure(message));
        }
        let args = match arguments.get("args") {
            None | Some(Value::Null) => Value::Object(Default::default()),
            Some(args) => args.clone(),
        };

        self.logger.debug(
            "tool call",
            Some(&serde_json::json!({"tool": tool, "action": action, "trace_id": ctx.trace_id})),
        );
        match handler.handle(&action, args, &ctx).await {
            Ok(result) => Ok(result),
            Err(err) => Ok(self.failure_envelope(tool, &action, &ctx, err)),
        }
    }

    fn failure_envelope(
        &self,
        tool: &str,
        action: &str,
        ctx: &CallContext,
        err: ToolError,
    ) -> ApiResult {
        match err.kind {
            ToolErrorKind::UnknownAction => with_hint(ApiResult::failure(err.message), err.hint),
            ToolErrorKind::InvalidParams => with_hint(
                ApiResult::failure(format!("Invalid arguments: {}", err.message)),
                err.hint,
            ),
            ToolErrorKind::Upstream => {
                let diagnostic = diagnostic(tool, action, ctx, &err);
                self.logger.warn(&diagnostic, None);
                ApiResult::failure(format!("HTTP Error: {}", diagnostic))
            }
            _ => {
                let diagnostic = diagnostic(tool, action, ctx, &err);
                self.logger.error(&diagnostic, None);
                ApiResult::failure(format!(
                    "Error: {}\n{} {}",
                    diagnostic, REPORT_HINT, ISSUES_URL
                ))
            }
        }
    }
}

fn with_hint(mut result: ApiResult, hint: Option<String>) -> ApiResult {
    if let Some(hint) = hint {
        result.append_hints([hint]);
    }
    result
}

pub fn diagnostic(tool: &str, action: &str, ctx: &CallContext, err: &ToolError) -> String {
    let mut parts = vec![
        format!("tool={}", tool),
        format!("action={}", action),
        format!("kind={}", err.kind.as_str()),
        format!("code={}", err.code),
        format!("message={}", err.message),
    ];
    if let Some(hint) = err.hint.as_ref() {
        parts.push(format!("hint={}", hint));
    }
    if let Some(details) = err.details.as_ref() {
        parts.push(format!("details={}", details));
    }
    parts.push(format!("trace_id={}", ctx.trace_id));
    parts.join(" ")
}
