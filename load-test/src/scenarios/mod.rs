//! The three kinds of virtual users.
//!
//! Transactions need the shared [`LoadTestConfig`], so they are registered as closures
//! owning an `Arc` of it instead of plain function pointers.
use std::sync::Arc;

use goose::prelude::*;

use crate::config::LoadTestConfig;

/// Wraps `async fn(&mut GooseUser, &LoadTestConfig) -> TransactionResult` into a [`Transaction`].
macro_rules! configured {
    ($config:expr, $func:path) => {{
        let config = std::sync::Arc::clone($config);
        let closure: goose::prelude::TransactionFunction = std::sync::Arc::new(move |user| {
            let config = std::sync::Arc::clone(&config);
            Box::pin(async move { $func(user, &config).await })
        });
        goose::prelude::Transaction::new(closure)
    }};
}

pub mod catalog;
pub mod shopper;
pub mod smoke;

/// every scenario, weighted as configured
pub fn all(config: &Arc<LoadTestConfig>) -> Result<Vec<Scenario>, GooseError> {
    Ok(vec![
        catalog::scenario(config)?,
        shopper::scenario(config)?,
        smoke::scenario(config)?,
    ])
}
