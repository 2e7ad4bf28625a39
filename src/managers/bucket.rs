use super::{ActionSet, ManagerDeps};
use crate::constants::api::{bucket_endpoint, BUCKETS_ENDPOINT};
use crate::errors::ToolError;
use crate::formatters::format_buckets;
use crate::models::ApiResult;
use crate::services::gateway::ApiRequest;
use crate::services::tool_executor::{CallContext, ToolHandler};
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketAction {
    Read,
    Create,
    List,
}

impl ActionSet for BucketAction {
    const FAMILY: &'static str = "buckets";
    const TABLE: &'static [(&'static str, Self)] = &[
        ("read", BucketAction::Read),
        ("create", BucketAction::Create),
        ("list", BucketAction::List),
    ];
}

pub struct BucketManager {
    deps: ManagerDeps,
}

impl BucketManager {
    pub fn new(deps: &ManagerDeps) -> Self {
        Self {
            deps: deps.scoped(BucketAction::FAMILY),
        }
    }

    pub async fn read(&self, bucket_key: &str) -> Result<ApiResult, ToolError> {
        self.deps
            .call(
                ApiRequest::get(bucket_endpoint(bucket_key))
                    .formatter(format_buckets),
            )
            .await
    }

    /// The upstream takes bucket name and owning team as query parameters.
    pub async fn create(&self, bucket_name: &str, team_id: &str) -> Result<ApiResult, ToolError> {
        self.deps
            .call(
                ApiRequest::post(BUCKETS_ENDPOINT)
                    .query("name", bucket_name)
                    .query("team_uuid", team_id)
                    .formatter(format_buckets),
            )
            .await
    }

    pub async fn list(&self) -> Result<ApiResult, ToolError> {
        self.deps
            .call(ApiRequest::get(BUCKETS_ENDPOINT).formatter(format_buckets))
            .await
    }
}

#[async_trait]
impl ToolHandler for BucketManager {
    fn family(&self) -> &'static str {
        BucketAction::FAMILY
    }

    async fn handle(
        &self,
        action: &str,
        args: Value,
        ctx: &CallContext,
    ) -> Result<ApiResult, ToolError> {
        let action = BucketAction::parse(action)?;
        self.deps.trace(ctx, action.name());
        let v = &self.deps.validation;
        match action {
            BucketAction::Read => self.read(&v.require_id(&args, "bucket_key")?).await,
            BucketAction::Create => {
                let bucket_name = v.require_arg(&args, "bucket_name")?;
                let team_id = v.require_arg(&args, "team_id")?;
                self.create(&bucket_name, &team_id).await
            }
            BucketAction::List => self.list().await,
        }
    }
}
