//! Full shopper: registers, opens a cart, browses and places orders.
//!
//! An order is only sent for a registered user with an open cart and a known product;
//! when a precondition is missing the transaction simply ends and runs again later.
use std::sync::Arc;

use chrono::Local;
use goose::prelude::*;
use log::{debug, info};
use rand::Rng;

use crate::{
    config::LoadTestConfig,
    http::{self, CARTS_PATH, ORDERS_PATH, USERS_PATH},
    identity::Identity,
    payload::{self, OrderDraft, CART_ID_KEYS, ORDER_ID_KEYS, USER_ID_KEYS},
    scenarios::catalog,
    session::{session_or_insert_with, ShopperSession},
};

pub const SCENARIO_NAME: &str = "Shopper";
pub const REGISTER_NAME: &str = "/users";
pub const CART_NAME: &str = "/carts";
pub const ORDER_NAME: &str = "/orders";

fn shopper<'a>(user: &'a mut GooseUser, config: &LoadTestConfig) -> &'a mut ShopperSession {
    session_or_insert_with(user, || ShopperSession::new(Identity::generate(config)))
}

/// random fee within the configured range, rounded to cents
pub fn order_fee<R: Rng + ?Sized>(config: &LoadTestConfig, rng: &mut R) -> f64 {
    let fee = rng.gen_range(config.order_fee_min..=config.order_fee_max);
    (fee * 100.0).round() / 100.0
}

/// registers the session identity, runs once on start and again if it failed
pub async fn register(user: &mut GooseUser, config: &LoadTestConfig) -> TransactionResult {
    let session = shopper(user, config);
    if session.is_registered() {
        return Ok(());
    }
    let identity = session.identity.clone();

    let body = payload::registration_body(&identity);
    let goose = http::send(
        user,
        GooseMethod::Post,
        USERS_PATH,
        REGISTER_NAME,
        Some(&body),
        config.request_timeout,
    )
    .await?;
    let user_id = http::extract(user, goose, |v| payload::entity_id(v, USER_ID_KEYS)).await?;

    info!("registered {} as user {user_id}", identity.username);
    shopper(user, config).registered(user_id);
    Ok(())
}

/// lists products and caches their ids in the session
pub async fn browse_products(user: &mut GooseUser, config: &LoadTestConfig) -> TransactionResult {
    let ids = catalog::fetch_product_ids(user, config).await?;
    if !shopper(user, config).products.replace(ids) {
        debug!("product listing returned no ids, keeping the previous cache");
    }
    Ok(())
}

/// looks at a cached product
pub async fn view_product(user: &mut GooseUser, config: &LoadTestConfig) -> TransactionResult {
    let chosen = {
        let mut rng = rand::thread_rng();
        shopper(user, config).products.choose(&mut rng)
    };
    let Some(product_id) = chosen else {
        debug!("no product ids cached yet, rescheduling");
        return Ok(());
    };
    catalog::view_product(user, &product_id, config).await
}

/// opens a cart for the registered user, unless one is already open
pub async fn create_cart(user: &mut GooseUser, config: &LoadTestConfig) -> TransactionResult {
    let (user_id, cart_open) = {
        let session = shopper(user, config);
        (session.user_id.clone(), session.cart_open)
    };
    let Some(user_id) = user_id else {
        debug!("not registered yet, retrying registration before opening a cart");
        return register(user, config).await;
    };
    if cart_open {
        debug!("cart already open, rescheduling");
        return Ok(());
    }

    let body = payload::cart_body(&user_id);
    let goose = http::send(
        user,
        GooseMethod::Post,
        CARTS_PATH,
        CART_NAME,
        Some(&body),
        config.request_timeout,
    )
    .await?;
    let cart_id = http::extract(user, goose, |v| payload::entity_id(v, CART_ID_KEYS)).await?;

    debug!("user {user_id} opened cart {cart_id}");
    shopper(user, config).cart_opened(cart_id);
    Ok(())
}

/// orders a product with the open cart, the cart is closed once the order is accepted
pub async fn place_order(user: &mut GooseUser, config: &LoadTestConfig) -> TransactionResult {
    let Some(context) = shopper(user, config).order_context() else {
        debug!("no registered user with an open cart, rescheduling order");
        return Ok(());
    };
    if shopper(user, config).products.is_empty() {
        browse_products(user, config).await?;
    }

    let draft = {
        let mut rng = rand::thread_rng();
        let product_id = shopper(user, config).products.choose(&mut rng);
        product_id.map(|product_id| OrderDraft {
            user_id: context.user_id,
            cart_id: context.cart_id,
            product_id,
            fee: order_fee(config, &mut rng),
            date: Local::now(),
        })
    };
    let Some(draft) = draft else {
        debug!("no product ids cached yet, rescheduling order");
        return Ok(());
    };

    let body = payload::order_body(&draft);
    let goose = http::send(
        user,
        GooseMethod::Post,
        ORDERS_PATH,
        ORDER_NAME,
        Some(&body),
        config.request_timeout,
    )
    .await?;
    let order_id = http::extract(user, goose, |v| payload::entity_id(v, ORDER_ID_KEYS)).await?;

    info!(
        "order {order_id} placed: user {} cart {} product {} fee {:.2}",
        draft.user_id, draft.cart_id, draft.product_id, draft.fee
    );
    shopper(user, config).order_placed();
    Ok(())
}

pub fn scenario(config: &Arc<LoadTestConfig>) -> Result<Scenario, GooseError> {
    Ok(scenario!(SCENARIO_NAME)
        .set_weight(config.shopper_weight)?
        .set_wait_time(config.wait_min, config.wait_max)?
        .register_transaction(
            configured!(config, register)
                .set_name("register")
                .set_on_start(),
        )
        .register_transaction(
            configured!(config, browse_products)
                .set_name("list products")
                .set_weight(3)?,
        )
        .register_transaction(
            configured!(config, view_product)
                .set_name("product detail")
                .set_weight(2)?,
        )
        .register_transaction(configured!(config, create_cart).set_name("create cart"))
        .register_transaction(configured!(config, place_order).set_name("place order")))
}
