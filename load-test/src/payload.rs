//! Json bodies sent to the services and the fields we pull out of their answers.
//!
//! The response contracts are not fixed, so every lookup tries a list of keys in order.
use chrono::{DateTime, Local};
use serde_json::{json, Value};

use crate::{error::PayloadError, identity::Identity, ids::EntityId};

/// keys that may hold the product list, in the order they are tried
pub const COLLECTION_KEYS: &[&str] = &["content", "items", "dtoCollection", "collection", "products"];
pub const PRODUCT_ID_KEYS: &[&str] = &["productId", "id"];
pub const USER_ID_KEYS: &[&str] = &["userId", "id"];
pub const CART_ID_KEYS: &[&str] = &["cartId", "id"];
pub const ORDER_ID_KEYS: &[&str] = &["orderId", "id"];

/// date format expected by the order service
pub const ORDER_DATE_FORMAT: &str = "%d-%m-%Y__%H:%M:%S:%6f";

/// parse a body, a mismatch carries the serde message
pub fn parse(body: &str) -> Result<Value, PayloadError> {
    serde_json::from_str(body).map_err(|e| PayloadError::NotJson(e.to_string()))
}

/// Extracts the product ids of a listing.
///
/// The first collection key holding a non empty array wins; a bare array is used as is.
/// Items without a usable id are skipped.
pub fn product_ids(body: &Value) -> Result<Vec<EntityId>, PayloadError> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(map) => {
            let arrays: Vec<&Vec<Value>> = COLLECTION_KEYS
                .iter()
                .filter_map(|key| map.get(*key).and_then(Value::as_array))
                .collect();
            match arrays.iter().find(|a| !a.is_empty()).or(arrays.first()) {
                Some(items) => *items,
                None => {
                    return Err(PayloadError::MissingCollection {
                        tried: COLLECTION_KEYS,
                    })
                }
            }
        }
        _ => {
            return Err(PayloadError::MissingCollection {
                tried: COLLECTION_KEYS,
            })
        }
    };
    Ok(items
        .iter()
        .filter_map(|item| first_id(item, PRODUCT_ID_KEYS))
        .collect())
}

/// Extracts an id trying `keys` in order.
pub fn entity_id(body: &Value, keys: &'static [&'static str]) -> Result<EntityId, PayloadError> {
    first_id(body, keys).ok_or(PayloadError::MissingId { tried: keys })
}

fn first_id(body: &Value, keys: &[&str]) -> Option<EntityId> {
    keys.iter()
        .filter_map(|key| body.get(*key))
        .find_map(EntityId::from_json)
}

/// body of `POST /user-service/api/users`
pub fn registration_body(identity: &Identity) -> Value {
    json!({
        "firstName": identity.first_name,
        "lastName": identity.last_name,
        "imageUrl": identity.image_url,
        "email": identity.email,
        "phone": identity.phone,
        "credential": {
            "username": identity.username,
            "password": identity.password,
            "roleBasedAuthority": "ROLE_USER",
            "isEnabled": true,
            "isAccountNonExpired": true,
            "isAccountNonLocked": true,
            "isCredentialsNonExpired": true,
        }
    })
}

/// body of `POST /order-service/api/carts`
pub fn cart_body(user_id: &EntityId) -> Value {
    json!({ "userId": user_id })
}

#[derive(Debug, Clone, PartialEq)]
/// Everything needed to place one order
pub struct OrderDraft {
    pub user_id: EntityId,
    pub cart_id: EntityId,
    pub product_id: EntityId,
    pub fee: f64,
    pub date: DateTime<Local>,
}

/// body of `POST /order-service/api/orders`
pub fn order_body(draft: &OrderDraft) -> Value {
    json!({
        "cart": {
            "cartId": draft.cart_id,
            "userId": draft.user_id,
        },
        "orderDesc": format!("Load test order for product {}", draft.product_id),
        "orderFee": draft.fee,
        "orderDate": draft.date.format(ORDER_DATE_FORMAT).to_string(),
    })
}
