use super::{ActionSet, ManagerDeps};
use crate::constants::api::{bucket_level_result_endpoint, result_endpoint, results_endpoint};
use crate::constants::limits::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, MIN_PAGE_LIMIT};
use crate::errors::ToolError;
use crate::formatters::{format_results, format_triggered_runs};
use crate::models::ApiResult;
use crate::services::gateway::ApiRequest;
use crate::services::tool_executor::{CallContext, ToolHandler};
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultAction {
    Start,
    Read,
    ReadBucketLevelRun,
    List,
}

impl ActionSet for ResultAction {
    const FAMILY: &'static str = "results";
    /// Test and bucket trigger URLs are fired the same way.
    const TABLE: &'static [(&'static str, Self)] = &[
        ("start", ResultAction::Start),
        ("start_bucket_level_run", ResultAction::Start),
        ("read", ResultAction::Read),
        ("read_bucket_level_run", ResultAction::ReadBucketLevelRun),
        ("list", ResultAction::List),
    ];
}

pub struct ResultManager {
    deps: ManagerDeps,
}

impl ResultManager {
    pub fn new(deps: &ManagerDeps) -> Self {
        Self {
            deps: deps.scoped(ResultAction::FAMILY),
        }
    }

    /// `trigger_url` is absolute and pre-authorized; it is called as-is.
    pub async fn start(&self, trigger_url: &str) -> Result<ApiResult, ToolError> {
        self.deps
            .call(ApiRequest::get(trigger_url).formatter(format_triggered_runs))
            .await
    }

    pub async fn read(
        &self,
        bucket_key: &str,
        test_id: &str,
        test_run_id: &str,
    ) -> Result<ApiResult, ToolError> {
        self.deps
            .call(ApiRequest::get(result_endpoint(bucket_key, test_id, test_run_id)).formatter(format_results))
            .await
    }

    /// Returned unformatted: the bucket-level run shape is not modelled.
    pub async fn read_bucket_level_run(
        &self,
        bucket_key: &str,
        bucket_level_test_run_id: &str,
    ) -> Result<ApiResult, ToolError> {
        let path = bucket_level_result_endpoint(bucket_key, bucket_level_test_run_id);
        self.deps.call(ApiRequest::get(path)).await
    }

    pub async fn list(
        &self,
        bucket_key: &str,
        test_id: &str,
        limit: i64,
    ) -> Result<ApiResult, ToolError> {
        self.deps
            .call(
                ApiRequest::get(results_endpoint(bucket_key, test_id))
                    .query("count", limit)
                    .formatter(format_results),
            )
            .await
    }
}

#[async_trait]
impl ToolHandler for ResultManager {
    fn family(&self) -> &'static str {
        ResultAction::FAMILY
    }

    async fn handle(
        &self,
        action: &str,
        args: Value,
        ctx: &CallContext,
    ) -> Result<ApiResult, ToolError> {
        let action = ResultAction::parse(action)?;
        self.deps.trace(ctx, action.name());
        let v = &self.deps.validation;
        match action {
            ResultAction::Start => self.start(&v.require_arg(&args, "trigger_url")?).await,
            ResultAction::Read => {
                let bucket_key = v.require_id(&args, "bucket_key")?;
                let test_id = v.require_id(&args, "test_id")?;
                let test_run_id = v.require_id(&args, "test_run_id")?;
                self.read(&bucket_key, &test_id, &test_run_id).await
            }
            ResultAction::ReadBucketLevelRun => {
                let bucket_key = v.require_id(&args, "bucket_key")?;
                let run_id = v.require_id(&args, "bucket_level_test_run_id")?;
                self.read_bucket_level_run(&bucket_key, &run_id).await
            }
            ResultAction::List => {
                let bucket_key = v.require_id(&args, "bucket_key")?;
                let test_id = v.require_id(&args, "test_id")?;
                let limit = v.ensure_int_in_range(
                    args.get("limit"),
                    "limit",
                    DEFAULT_PAGE_LIMIT,
                    MIN_PAGE_LIMIT,
                    MAX_PAGE_LIMIT,
                )?;
                self.list(&bucket_key, &test_id, limit).await
            }
        }
    }
}
