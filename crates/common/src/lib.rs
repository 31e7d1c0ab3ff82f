//! Shared types for the saga verification harness.
//!
//! This crate holds the value objects that cross crate boundaries: exact
//! decimal money, opaque entity references returned by creation actions, the
//! observable order state machine, and the typed request/response bodies of
//! the HTTP surface under verification.

pub mod entity;
pub mod money;
pub mod order_state;
pub mod wire;

pub use entity::EntityRef;
pub use money::{Money, MoneyError};
pub use order_state::OrderState;
pub use wire::{
    CreateConsumerRequest, CreateConsumerResponse, CreateOrderRequest, CreateOrderResponse,
    CreateRestaurantRequest, CreateRestaurantResponse, GetOrderResponse, MenuItem, OrderLineItem,
    PersonName, ReviseOrderRequest,
};
