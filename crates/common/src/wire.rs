//! Request and response bodies of the HTTP surface under verification.
//!
//! One struct per endpoint body, camelCase on the wire. This is the closed
//! set of shapes the harness sends and reads; anything else in a response is
//! ignored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entity::EntityRef;
use crate::money::Money;
use crate::order_state::OrderState;

/// A person's name, as the consumer service expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub first: String,
    pub last: String,
}

/// Body of `POST /consumers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateConsumerRequest {
    pub name: PersonName,
}

/// Response of `POST /consumers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConsumerResponse {
    pub consumer_id: EntityRef,
}

/// One menu entry of a restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: Money,
}

/// Body of `POST /restaurants`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub menu: Vec<MenuItem>,
}

/// Response of `POST /restaurants`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRestaurantResponse {
    pub id: EntityRef,
}

/// One line item of an order creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub menu_item_id: String,
    pub quantity: u32,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub consumer_id: EntityRef,
    pub restaurant_id: EntityRef,
    pub line_items: Vec<OrderLineItem>,
}

/// Response of `POST /orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_id: EntityRef,
}

/// Response of `GET /orders/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOrderResponse {
    pub state: OrderState,
    pub order_total: Money,
}

/// Body of `POST /orders/{id}/revise`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviseOrderRequest {
    pub revised_line_item_quantities: HashMap<String, u32>,
}
