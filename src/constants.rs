pub mod network {
    pub const DEFAULT_BASE_URL: &str = "https://api.runscope.com";
    pub const TIMEOUT_CONNECT_MS: u64 = 15_000;
    pub const TIMEOUT_READ_MS: u64 = 60_000;
    pub const TIMEOUT_WRITE_MS: u64 = 15_000;
    pub const TIMEOUT_POOL_MS: u64 = 60_000;
    pub const ERROR_BODY_EXCERPT_BYTES: usize = 2_048;
}

pub mod api {
    pub const PRODUCT_NAME: &str = "bzm-apitest-mcp";
    pub const PRODUCT_VERSION: &str = env!("CARGO_PKG_VERSION");

    pub const ACCOUNT_ENDPOINT: &str = "/account";
    pub const TEAMS_ENDPOINT: &str = "/teams";
    pub const BUCKETS_ENDPOINT: &str = "/buckets";
    /// Schedule creation is only served under the versioned prefix.
    pub const SCHEDULE_CREATE_PREFIX: &str = "/v1";

    /// One path segment. `/`, `?`, `#` and `%` in an id are percent-encoded
    /// so the id cannot leave its segment.
    pub fn segment(id: &str) -> String {
        urlencoding::encode(id).into_owned()
    }

    pub fn team_people_endpoint(team_id: &str) -> String {
        format!("{}/{}/people", TEAMS_ENDPOINT, segment(team_id))
    }

    pub fn bucket_endpoint(bucket_key: &str) -> String {
        format!("{}/{}", BUCKETS_ENDPOINT, segment(bucket_key))
    }

    pub fn tests_endpoint(bucket_key: &str) -> String {
        format!("{}/tests", bucket_endpoint(bucket_key))
    }

    pub fn test_endpoint(bucket_key: &str, test_id: &str) -> String {
        format!("{}/{}", tests_endpoint(bucket_key), segment(test_id))
    }

    pub fn steps_endpoint(bucket_key: &str, test_id: &str) -> String {
        format!("{}/steps", test_endpoint(bucket_key, test_id))
    }

    pub fn step_endpoint(bucket_key: &str, test_id: &str, step_id: &str) -> String {
        format!("{}/{}", steps_endpoint(bucket_key, test_id), segment(step_id))
    }

    pub fn schedules_endpoint(bucket_key: &str, test_id: &str) -> String {
        format!("{}/schedules", test_endpoint(bucket_key, test_id))
    }

    pub fn schedule_endpoint(bucket_key: &str, test_id: &str, schedule_id: &str) -> String {
        format!("{}/{}", schedules_endpoint(bucket_key, test_id), segment(schedule_id))
    }

    pub fn schedules_create_endpoint(bucket_key: &str, test_id: &str) -> String {
        format!("{}{}", SCHEDULE_CREATE_PREFIX, schedules_endpoint(bucket_key, test_id))
    }

    pub fn environments_endpoint(bucket_key: &str, test_id: &str) -> String {
        format!("{}/environments", test_endpoint(bucket_key, test_id))
    }

    pub fn environment_endpoint(bucket_key: &str, test_id: &str, environment_id: &str) -> String {
        format!(
            "{}/{}",
            environments_endpoint(bucket_key, test_id),
            segment(environment_id)
        )
    }

    pub fn results_endpoint(bucket_key: &str, test_id: &str) -> String {
        format!("{}/results", test_endpoint(bucket_key, test_id))
    }

    pub fn result_endpoint(bucket_key: &str, test_id: &str, test_run_id: &str) -> String {
        format!("{}/{}", results_endpoint(bucket_key, test_id), segment(test_run_id))
    }

    pub fn metrics_endpoint(bucket_key: &str, test_id: &str) -> String {
        format!("{}/metrics", test_endpoint(bucket_key, test_id))
    }

    pub fn bucket_level_result_endpoint(bucket_key: &str, run_id: &str) -> String {
        format!(
            "{}/bucket_level_results/{}",
            bucket_endpoint(bucket_key),
            segment(run_id)
        )
    }

}

pub mod env {
    pub const TOKEN: &str = "BZM_API_TEST_TOKEN";
    pub const TOKEN_FILE: &str = "BZM_API_TEST_TOKEN_FILE";
    pub const BASE_URL: &str = "BZM_API_TEST_BASE_URL";
    pub const LOG_LEVEL: &str = "BZM_API_TEST_LOG_LEVEL";
    pub const LOG_LEVEL_FALLBACK: &str = "LOG_LEVEL";
    pub const CONTAINER_SECRET_PATH: &str = "/run/secrets/BZM_API_TEST_TOKEN";
}

pub mod limits {
    pub const DEFAULT_PAGE_LIMIT: i64 = 10;
    pub const MIN_PAGE_LIMIT: i64 = 1;
    pub const MAX_PAGE_LIMIT: i64 = 50;
    pub const DEFAULT_PAGE_OFFSET: i64 = 0;
}

pub mod schedule {
    pub const INTERVALS: &[&str] = &["1m", "5m", "15m", "30m", "1h", "6h", "1d"];
    pub const CREATED_NOTE: &str = "Schedule created via MCP tool";
}

pub mod metrics {
    pub const TIMEFRAMES: &[&str] = &["hour", "day", "week", "month"];
    pub const DEFAULT_TIMEFRAME: &str = "day";
    pub const ALL: &str = "all";
}

pub mod tools {
    pub const PREFIX: &str = "blazemeter_apitest";
    pub const TEAMS: &str = "blazemeter_apitest_teams";
    pub const BUCKETS: &str = "blazemeter_apitest_buckets";
    pub const TESTS: &str = "blazemeter_apitest_tests";
    pub const STEPS: &str = "blazemeter_apitest_steps";
    pub const SCHEDULES: &str = "blazemeter_apitest_schedules";
    pub const ENVIRONMENTS: &str = "blazemeter_apitest_environments";
    pub const RESULTS: &str = "blazemeter_apitest_results";
}

pub mod support {
    pub const ISSUES_URL: &str = "https://github.com/BlazeMeter/bzm-mcp/issues";
    pub const REPORT_HINT: &str =
        "If you think this is a bug, please contact BlazeMeter support or report issue at";
}

pub mod protocols {
    pub const ALLOWED_HTTP: &[&str] = &["http", "https"];
}
