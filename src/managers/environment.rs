use super::{ActionSet, ManagerDeps};
use crate::constants::api::{environment_endpoint, environments_endpoint};
use crate::errors::ToolError;
use crate::formatters::format_environments;
use crate::models::ApiResult;
use crate::services::gateway::ApiRequest;
use crate::services::tool_executor::{CallContext, ToolHandler};
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentAction {
    Read,
    List,
}

impl ActionSet for EnvironmentAction {
    const FAMILY: &'static str = "environments";
    const TABLE: &'static [(&'static str, Self)] = &[
        ("read", EnvironmentAction::Read),
        ("list", EnvironmentAction::List),
    ];
}

pub struct EnvironmentManager {
    deps: ManagerDeps,
}

impl EnvironmentManager {
    pub fn new(deps: &ManagerDeps) -> Self {
        Self {
            deps: deps.scoped(EnvironmentAction::FAMILY),
        }
    }

    pub async fn read(
        &self,
        bucket_key: &str,
        test_id: &str,
        environment_id: &str,
    ) -> Result<ApiResult, ToolError> {
        self.deps
            .call(ApiRequest::get(environment_endpoint(bucket_key, test_id, environment_id)).formatter(format_environments))
            .await
    }

    pub async fn list(&self, bucket_key: &str, test_id: &str) -> Result<ApiResult, ToolError> {
        self.deps
            .call(
                ApiRequest::get(environments_endpoint(bucket_key, test_id))
                    .formatter(format_environments),
            )
            .await
    }
}

#[async_trait]
impl ToolHandler for EnvironmentManager {
    fn family(&self) -> &'static str {
        EnvironmentAction::FAMILY
    }

    async fn handle(
        &self,
        action: &str,
        args: Value,
        ctx: &CallContext,
    ) -> Result<ApiResult, ToolError> {
        let action = EnvironmentAction::parse(action)?;
        self.deps.trace(ctx, action.name());
        let v = &self.deps.validation;
        let bucket_key = v.require_id(&args, "bucket_key")?;
        let test_id = v.require_id(&args, "test_id")?;
        match action {
            EnvironmentAction::Read => {
                let environment_id = v.require_id(&args, "environment_id")?;
                self.read(&bucket_key, &test_id, &environment_id).await
            }
            EnvironmentAction::List => self.list(&bucket_key, &test_id).await,
        }
    }
}
