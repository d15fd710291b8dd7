//! Runs the shop load test.
//!
//! ```text
//! cargo run --release -p shop-load-test -- --host http://localhost:8080 -u 50 -r 5 -t 5m --report-file report.html
//! ```
use std::sync::Arc;

use goose::prelude::*;
use shop_load_test::{report, scenarios, LoadTestConfig, LoadTestError};

#[tokio::main]
/// Initialize and starts a GooseAttack
async fn main() -> Result<(), LoadTestError> {
    let config = Arc::new(LoadTestConfig::from_env()?);

    let mut attack = GooseAttack::initialize()?;
    for scenario in scenarios::all(&config)? {
        attack = attack.register_scenario(scenario);
    }

    let metrics = attack
        .set_default(GooseDefault::Host, "http://localhost:8080")?
        .set_default(GooseDefault::Users, 50)?
        .set_default(GooseDefault::HatchRate, "5")?
        .execute()
        .await?;
    report::print(&metrics);
    Ok(())
}
