//! Order saga step names.

/// The scenario identifier for the order saga.
pub const SCENARIO_ORDER_SAGA: &str = "order_saga";

/// Step name: create the consumer.
pub const STEP_CREATE_CONSUMER: &str = "create_consumer";

/// Step name: wait for the accounting service to know the consumer.
pub const STEP_VERIFY_ACCOUNT_CREATED: &str = "verify_account_created";

/// Step name: create the restaurant with its menu.
pub const STEP_CREATE_RESTAURANT: &str = "create_restaurant";

/// Step name: wait for the restaurant to be retrievable.
pub const STEP_VERIFY_RESTAURANT_CREATED: &str = "verify_restaurant_created";

/// Step name: create the order.
pub const STEP_CREATE_ORDER: &str = "create_order";

/// Step name: wait for the order to be authorized.
pub const STEP_VERIFY_ORDER_APPROVED: &str = "verify_order_approved";

/// Step name: revise the order quantity.
pub const STEP_REVISE_ORDER: &str = "revise_order";

/// Step name: wait for the revised total and state.
pub const STEP_VERIFY_ORDER_REVISED: &str = "verify_order_revised";

/// Step name: cancel the order.
pub const STEP_CANCEL_ORDER: &str = "cancel_order";

/// Step name: wait for the cancellation to propagate.
pub const STEP_VERIFY_ORDER_CANCELLED: &str = "verify_order_cancelled";
