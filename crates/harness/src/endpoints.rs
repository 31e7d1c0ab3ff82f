//! URL and request builders for the services under verification.
//!
//! Plain functions over the closed set of typed bodies in `common`: one
//! builder per endpoint, nothing dynamic.

use std::collections::HashMap;

use common::{
    CreateConsumerRequest, CreateOrderRequest, CreateRestaurantRequest, EntityRef, MenuItem,
    OrderLineItem, ReviseOrderRequest,
};

use crate::config::HarnessConfig;
use crate::context::ScenarioSeed;

/// `POST /consumers`
pub fn consumers_url(config: &HarnessConfig) -> String {
    format!("{}/consumers", config.base_url())
}

/// `GET /accounts/{consumerId}`
pub fn account_url(config: &HarnessConfig, consumer_id: &EntityRef) -> String {
    format!("{}/accounts/{consumer_id}", config.base_url())
}

/// `POST /restaurants`
pub fn restaurants_url(config: &HarnessConfig) -> String {
    format!("{}/restaurants", config.base_url())
}

/// `GET /restaurants/{id}`
pub fn restaurant_url(config: &HarnessConfig, restaurant_id: &EntityRef) -> String {
    format!("{}/restaurants/{restaurant_id}", config.base_url())
}

/// `POST /orders`
pub fn orders_url(config: &HarnessConfig) -> String {
    format!("{}/orders", config.base_url())
}

/// `GET /orders/{id}`
pub fn order_url(config: &HarnessConfig, order_id: &EntityRef) -> String {
    format!("{}/orders/{order_id}", config.base_url())
}

/// `POST /orders/{id}/revise`
pub fn order_revise_url(config: &HarnessConfig, order_id: &EntityRef) -> String {
    format!("{}/orders/{order_id}/revise", config.base_url())
}

/// `POST /orders/{id}/cancel`
pub fn order_cancel_url(config: &HarnessConfig, order_id: &EntityRef) -> String {
    format!("{}/orders/{order_id}/cancel", config.base_url())
}

/// Builds the create-consumer body from the scenario seed.
pub fn create_consumer_request(seed: &ScenarioSeed) -> CreateConsumerRequest {
    CreateConsumerRequest {
        name: seed.consumer_name.clone(),
    }
}

/// Builds the create-restaurant body: the seed restaurant with its single
/// menu item.
pub fn create_restaurant_request(seed: &ScenarioSeed) -> CreateRestaurantRequest {
    CreateRestaurantRequest {
        name: seed.restaurant_name.clone(),
        menu: vec![MenuItem {
            id: seed.menu_item_id.clone(),
            name: seed.menu_item_name.clone(),
            price: seed.unit_price,
        }],
    }
}

/// Builds the create-order body for the seed line item at its initial
/// quantity.
pub fn create_order_request(
    seed: &ScenarioSeed,
    consumer_id: &EntityRef,
    restaurant_id: &EntityRef,
) -> CreateOrderRequest {
    CreateOrderRequest {
        consumer_id: consumer_id.clone(),
        restaurant_id: restaurant_id.clone(),
        line_items: vec![OrderLineItem {
            menu_item_id: seed.menu_item_id.clone(),
            quantity: seed.initial_quantity,
        }],
    }
}

/// Builds the revise-order body setting the seed item to its revised
/// quantity.
pub fn revise_order_request(seed: &ScenarioSeed) -> ReviseOrderRequest {
    ReviseOrderRequest {
        revised_line_item_quantities: HashMap::from([(
            seed.menu_item_id.clone(),
            seed.revised_quantity,
        )]),
    }
}
