//! Helpers shared by the integration tests: a short goose attack against a mock server.
#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use goose::{config::GooseConfiguration, metrics::GooseMetrics, prelude::*};
use gumdrop::Options;
use httpmock::MockServer;
use shop_load_test::LoadTestConfig;

/// short waits so a two seconds run goes through many transactions
pub fn fast_config() -> Arc<LoadTestConfig> {
    Arc::new(LoadTestConfig {
        wait_min: Duration::from_millis(10),
        wait_max: Duration::from_millis(30),
        request_timeout: Duration::from_secs(2),
        ..LoadTestConfig::default()
    })
}

pub fn build_configuration(server: &MockServer, users: usize) -> GooseConfiguration {
    let host = server.base_url();
    let users = users.to_string();
    let args = [
        "--host",
        host.as_str(),
        "--users",
        users.as_str(),
        "--hatch-rate",
        "10",
        "--run-time",
        "2",
        "--no-reset-metrics",
        "--quiet",
        "--no-telnet",
        "--no-websocket",
    ];
    GooseConfiguration::parse_args_default(&args).expect("failed to parse goose options")
}

pub async fn run(configuration: GooseConfiguration, scenario: Scenario) -> GooseMetrics {
    GooseAttack::initialize_with_config(configuration)
        .expect("failed to initialize goose")
        .register_scenario(scenario)
        .execute()
        .await
        .expect("load test failed")
}

/// (success, fail) counts of one named request, zero when never sent
pub fn counts(metrics: &GooseMetrics, key: &str) -> (usize, usize) {
    metrics
        .requests
        .get(key)
        .map(|r| (r.success_count, r.fail_count))
        .unwrap_or((0, 0))
}
