//! Request helpers on top of goose.
//!
//! Every request gets a name (so metrics group by endpoint, not by id) and the configured
//! timeout. Json answers are decoded here; a failed or malformed answer marks the request
//! as failed in the goose metrics and ends the transaction.
use std::time::Duration;

use goose::{goose::GooseResponse, metrics::GooseRequestMetric, prelude::*};
use log::warn;
use serde_json::Value;

use crate::{error::PayloadError, payload};

pub const PRODUCTS_PATH: &str = "/product-service/api/products";
pub const USERS_PATH: &str = "/user-service/api/users";
pub const CARTS_PATH: &str = "/order-service/api/carts";
pub const ORDERS_PATH: &str = "/order-service/api/orders";

pub fn product_path(id: &impl std::fmt::Display) -> String {
    format!("{PRODUCTS_PATH}/{id}")
}

/// sends a named request with an optional json body
pub async fn send(
    user: &mut GooseUser,
    method: GooseMethod,
    path: &str,
    name: &str,
    body: Option<&Value>,
    timeout: Duration,
) -> Result<GooseResponse, Box<TransactionError>> {
    let mut request_builder = user
        .get_request_builder(&method, path)?
        .header("Accept", "application/json")
        .timeout(timeout);
    if let Some(body) = body {
        request_builder = request_builder.json(body);
    }

    let goose_request = GooseRequest::builder()
        .method(method)
        .path(path)
        .name(name)
        .set_request_builder(request_builder)
        .build();

    user.request(goose_request).await
}

/// Marks `request` as failed and returns the error that ends the transaction.
pub fn fail<T>(
    user: &GooseUser,
    tag: &str,
    request: &mut GooseRequestMetric,
    body: Option<&str>,
) -> Result<T, Box<TransactionError>> {
    warn!("{tag}");
    user.set_failure(tag, request, None, body)?;
    // set_failure always returns an error
    Err(Box::new(TransactionError::RequestFailed {
        raw_request: request.clone(),
    }))
}

/// Checks the status and decodes the body as json.
pub async fn json_body(
    user: &mut GooseUser,
    goose: GooseResponse,
) -> Result<(GooseRequestMetric, Value), Box<TransactionError>> {
    let mut request = goose.request;
    let response = match goose.response {
        Ok(response) => response,
        Err(e) => {
            let tag = format!("{}: request error: {e}", request.name);
            return fail(user, &tag, &mut request, None);
        }
    };

    let status = response.status();
    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            let tag = format!("{}: unreadable body: {e}", request.name);
            return fail(user, &tag, &mut request, None);
        }
    };
    if !status.is_success() {
        let tag = format!("{}: unexpected status {status}", request.name);
        return fail(user, &tag, &mut request, Some(&text));
    }

    match payload::parse(&text) {
        Ok(value) => Ok((request, value)),
        Err(e) => {
            let tag = format!("{}: {e}", request.name);
            fail(user, &tag, &mut request, Some(&text))
        }
    }
}

/// Same as [`json_body`] then pulls a field out with `field`, a mismatch fails the request.
pub async fn extract<T, F>(
    user: &mut GooseUser,
    goose: GooseResponse,
    field: F,
) -> Result<T, Box<TransactionError>>
where
    F: FnOnce(&Value) -> Result<T, PayloadError>,
{
    let (mut request, value) = json_body(user, goose).await?;
    match field(&value) {
        Ok(v) => Ok(v),
        Err(e) => {
            let tag = format!("{}: {e}", request.name);
            fail(user, &tag, &mut request, Some(&value.to_string()))
        }
    }
}
