//! Smoke test: one health check against the product listing.
use std::sync::Arc;

use goose::prelude::*;
use goose_eggs::{validate_page, Validate};

use crate::{
    config::LoadTestConfig,
    http::{self, PRODUCTS_PATH},
};

pub const SCENARIO_NAME: &str = "SmokeTest";
pub const HEALTH_NAME: &str = "/products (health)";

pub async fn health_check(user: &mut GooseUser, config: &LoadTestConfig) -> TransactionResult {
    let goose = http::send(
        user,
        GooseMethod::Get,
        PRODUCTS_PATH,
        HEALTH_NAME,
        None,
        config.request_timeout,
    )
    .await?;
    let validate = Validate::builder().status(200).build();
    validate_page(user, goose, &validate).await?;
    Ok(())
}

pub fn scenario(config: &Arc<LoadTestConfig>) -> Result<Scenario, GooseError> {
    Ok(scenario!(SCENARIO_NAME)
        .set_weight(config.smoke_weight)?
        .set_wait_time(config.wait_min, config.wait_max)?
        .register_transaction(configured!(config, health_check).set_name("health check")))
}
