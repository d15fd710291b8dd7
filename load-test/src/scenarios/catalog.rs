//! Catalog browser: lists products and looks at one of them.
use std::sync::Arc;

use goose::prelude::*;
use goose_eggs::{validate_page, Validate};
use log::debug;

use crate::{
    config::LoadTestConfig,
    http::{self, product_path, PRODUCTS_PATH},
    ids::EntityId,
    payload,
    session::{session_or_insert_with, ProductCache},
};

pub const SCENARIO_NAME: &str = "CatalogBrowser";
pub const LIST_NAME: &str = "/products";
pub const DETAIL_NAME: &str = "/products/{id}";

/// Requests the product listing and returns the ids found in it.
pub async fn fetch_product_ids(
    user: &mut GooseUser,
    config: &LoadTestConfig,
) -> Result<Vec<EntityId>, Box<TransactionError>> {
    let goose = http::send(
        user,
        GooseMethod::Get,
        PRODUCTS_PATH,
        LIST_NAME,
        None,
        config.request_timeout,
    )
    .await?;
    http::extract(user, goose, payload::product_ids).await
}

/// Requests the detail of one product, anything but a 200 is a failure.
pub async fn view_product(
    user: &mut GooseUser,
    product_id: &EntityId,
    config: &LoadTestConfig,
) -> TransactionResult {
    let goose = http::send(
        user,
        GooseMethod::Get,
        &product_path(product_id),
        DETAIL_NAME,
        None,
        config.request_timeout,
    )
    .await?;
    let validate = Validate::builder().status(200).build();
    validate_page(user, goose, &validate).await?;
    Ok(())
}

fn cache(user: &mut GooseUser) -> &mut ProductCache {
    session_or_insert_with(user, ProductCache::default)
}

/// lists products and caches their ids
pub async fn list_products(user: &mut GooseUser, config: &LoadTestConfig) -> TransactionResult {
    let ids = fetch_product_ids(user, config).await?;
    let found = ids.len();
    if !cache(user).replace(ids) {
        debug!("product listing returned no ids, keeping the previous cache");
    } else {
        debug!("cached {found} product ids");
    }
    Ok(())
}

/// looks at a product we have seen in a listing, never at a made up id
pub async fn product_detail(user: &mut GooseUser, config: &LoadTestConfig) -> TransactionResult {
    if cache(user).is_empty() {
        list_products(user, config).await?;
    }

    let chosen = {
        let mut rng = rand::thread_rng();
        cache(user).choose(&mut rng)
    };
    let Some(product_id) = chosen else {
        debug!("no product ids cached yet, rescheduling");
        return Ok(());
    };
    view_product(user, &product_id, config).await
}

pub fn scenario(config: &Arc<LoadTestConfig>) -> Result<Scenario, GooseError> {
    Ok(scenario!(SCENARIO_NAME)
        .set_weight(config.catalog_weight)?
        .set_wait_time(config.wait_min, config.wait_max)?
        .register_transaction(
            configured!(config, list_products)
                .set_name("list products")
                .set_weight(3)?,
        )
        .register_transaction(
            configured!(config, product_detail)
                .set_name("product detail")
                .set_weight(1)?,
        ))
}
