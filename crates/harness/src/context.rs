//! Per-run context.

use common::{EntityRef, Money, PersonName};
use serde::Serialize;
use uuid::Uuid;

use crate::error::HarnessError;

/// Fixed inputs for one scenario run.
///
/// The defaults are the reference seed data: one menu item priced at
/// `"12.34"`, ordered at quantity 5 and revised to 10.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSeed {
    pub consumer_name: PersonName,
    pub restaurant_name: String,
    pub menu_item_id: String,
    pub menu_item_name: String,
    pub unit_price: Money,
    pub initial_quantity: u32,
    pub revised_quantity: u32,
}

impl Default for ScenarioSeed {
    fn default() -> Self {
        Self {
            consumer_name: PersonName {
                first: "John".to_string(),
                last: "Doe".to_string(),
            },
            restaurant_name: "My Restaurant".to_string(),
            menu_item_id: "1".to_string(),
            menu_item_name: "Chicken Vindaloo".to_string(),
            unit_price: Money::from_minor_units(1234, 2),
            initial_quantity: 5,
            revised_quantity: 10,
        }
    }
}

/// Mutable state threaded through one scenario run.
///
/// Holds the scenario seed and the entity references returned by creation
/// actions so far. Owned by a single run; never shared across concurrent
/// runs.
#[derive(Debug, Clone, Serialize)]
pub struct RunContext {
    run_id: Uuid,
    seed: ScenarioSeed,
    consumer_id: Option<EntityRef>,
    restaurant_id: Option<EntityRef>,
    order_id: Option<EntityRef>,
}

impl RunContext {
    /// Creates a fresh context for one run.
    pub fn new(seed: ScenarioSeed) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            seed,
            consumer_id: None,
            restaurant_id: None,
            order_id: None,
        }
    }

    /// Returns the unique id of this run.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Returns the scenario seed.
    pub fn seed(&self) -> &ScenarioSeed {
        &self.seed
    }

    /// Stores the consumer id returned by the create-consumer action.
    pub fn set_consumer_id(&mut self, id: EntityRef) {
        self.consumer_id = Some(id);
    }

    /// Stores the restaurant id returned by the create-restaurant action.
    pub fn set_restaurant_id(&mut self, id: EntityRef) {
        self.restaurant_id = Some(id);
    }

    /// Stores the order id returned by the create-order action.
    pub fn set_order_id(&mut self, id: EntityRef) {
        self.order_id = Some(id);
    }

    /// Returns the consumer id, failing if no action has created one yet.
    pub fn consumer_id(&self) -> Result<&EntityRef, HarnessError> {
        self.consumer_id
            .as_ref()
            .ok_or(HarnessError::MissingEntity("consumerId"))
    }

    /// Returns the restaurant id, failing if no action has created one yet.
    pub fn restaurant_id(&self) -> Result<&EntityRef, HarnessError> {
        self.restaurant_id
            .as_ref()
            .ok_or(HarnessError::MissingEntity("restaurantId"))
    }

    /// Returns the order id, failing if no action has created one yet.
    pub fn order_id(&self) -> Result<&EntityRef, HarnessError> {
        self.order_id
            .as_ref()
            .ok_or(HarnessError::MissingEntity("orderId"))
    }
}
