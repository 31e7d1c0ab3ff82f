//! Shared stub state.
//!
//! All records live behind one lock; every mutation computes the instant at
//! which its effect becomes visible, and reads report the view as of "now".
//! Reads never mutate business state, so repeating a read is always safe.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use common::{EntityRef, MenuItem, Money, OrderLineItem, OrderState, PersonName};

use crate::error::StubError;

#[derive(Debug)]
struct ConsumerRecord {
    name: PersonName,
    /// When the accounting service starts answering for this consumer.
    account_visible_at: Instant,
}

#[derive(Debug)]
struct RestaurantRecord {
    name: String,
    menu: Vec<MenuItem>,
    visible_at: Instant,
}

#[derive(Debug)]
struct Revision {
    total: Money,
    visible_at: Instant,
}

#[derive(Debug)]
struct OrderRecord {
    restaurant_id: i64,
    line_items: Vec<OrderLineItem>,
    total: Money,
    rejected: bool,
    /// When the authorization outcome (APPROVED or REJECTED) is observable.
    authorized_visible_at: Instant,
    revision: Option<Revision>,
    cancelled_visible_at: Option<Instant>,
}

impl OrderRecord {
    /// The state and total an external observer sees at `now`.
    fn observed(&self, now: Instant) -> (OrderState, Money) {
        let total = match &self.revision {
            Some(revision) if now >= revision.visible_at => revision.total,
            _ => self.total,
        };

        if let Some(visible_at) = self.cancelled_visible_at {
            if now >= visible_at {
                return (OrderState::Cancelled, total);
            }
        }

        let state = if now < self.authorized_visible_at {
            OrderState::Pending
        } else if self.rejected {
            OrderState::Rejected
        } else {
            OrderState::Approved
        };
        (state, total)
    }
}

#[derive(Debug)]
struct Inner {
    propagation_delay: Duration,
    next_consumer_id: i64,
    next_restaurant_id: i64,
    next_order_id: i64,
    consumers: HashMap<i64, ConsumerRecord>,
    restaurants: HashMap<i64, RestaurantRecord>,
    orders: HashMap<i64, OrderRecord>,
    fail_on_create_order: bool,
    reject_orders: bool,
    order_get_count: u64,
}

/// In-memory state of all four stub services.
#[derive(Debug, Clone)]
pub struct StubState {
    inner: Arc<RwLock<Inner>>,
}

impl StubState {
    /// Creates stub state with the given propagation delay between a
    /// mutation and its observability.
    pub fn new(propagation_delay: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                propagation_delay,
                next_consumer_id: 0,
                next_restaurant_id: 0,
                next_order_id: 0,
                consumers: HashMap::new(),
                restaurants: HashMap::new(),
                orders: HashMap::new(),
                fail_on_create_order: false,
                reject_orders: false,
                order_get_count: 0,
            })),
        }
    }

    // -- Test hooks --

    /// Changes the propagation delay for subsequent mutations.
    pub fn set_propagation_delay(&self, delay: Duration) {
        self.inner.write().unwrap().propagation_delay = delay;
    }

    /// Makes the next `POST /orders` answer with a 500.
    pub fn set_fail_on_create_order(&self, fail: bool) {
        self.inner.write().unwrap().fail_on_create_order = fail;
    }

    /// Makes newly created orders converge to REJECTED instead of APPROVED.
    pub fn set_reject_orders(&self, reject: bool) {
        self.inner.write().unwrap().reject_orders = reject;
    }

    /// Returns the number of registered consumers.
    pub fn consumer_count(&self) -> usize {
        self.inner.read().unwrap().consumers.len()
    }

    /// Returns the number of registered restaurants.
    pub fn restaurant_count(&self) -> usize {
        self.inner.read().unwrap().restaurants.len()
    }

    /// Returns the number of created orders.
    pub fn order_count(&self) -> usize {
        self.inner.read().unwrap().orders.len()
    }

    /// Returns how many `GET /orders/{id}` requests the stub has served.
    pub fn order_get_count(&self) -> u64 {
        self.inner.read().unwrap().order_get_count
    }

    /// Returns the currently observable state and total of an order
    /// without counting as a served read.
    pub fn observed_order(&self, order_id: &EntityRef) -> Option<(OrderState, Money)> {
        let inner = self.inner.read().unwrap();
        let id = parse_id(&order_id.to_string())?;
        inner.orders.get(&id).map(|o| o.observed(Instant::now()))
    }

    // -- Service operations --

    /// Registers a consumer; the account record propagates asynchronously.
    pub(crate) fn create_consumer(&self, name: PersonName) -> i64 {
        let mut inner = self.inner.write().unwrap();
        inner.next_consumer_id += 1;
        let id = inner.next_consumer_id;
        let account_visible_at = Instant::now() + inner.propagation_delay;
        inner.consumers.insert(
            id,
            ConsumerRecord {
                name,
                account_visible_at,
            },
        );
        metrics::counter!("stub_consumers_created_total").increment(1);
        tracing::debug!(consumer_id = id, "consumer created");
        id
    }

    /// Returns true once the account for a consumer has propagated.
    pub(crate) fn account_exists(&self, consumer_id: &str) -> bool {
        let inner = self.inner.read().unwrap();
        parse_id(consumer_id)
            .and_then(|id| inner.consumers.get(&id))
            .is_some_and(|c| Instant::now() >= c.account_visible_at)
    }

    /// Registers a restaurant with its menu.
    pub(crate) fn create_restaurant(&self, name: String, menu: Vec<MenuItem>) -> i64 {
        let mut inner = self.inner.write().unwrap();
        inner.next_restaurant_id += 1;
        let id = inner.next_restaurant_id;
        let visible_at = Instant::now() + inner.propagation_delay;
        inner.restaurants.insert(
            id,
            RestaurantRecord {
                name,
                menu,
                visible_at,
            },
        );
        metrics::counter!("stub_restaurants_created_total").increment(1);
        tracing::debug!(restaurant_id = id, "restaurant created");
        id
    }

    /// Returns the restaurant's name and menu once it has propagated.
    pub(crate) fn get_restaurant(&self, restaurant_id: &str) -> Option<(String, Vec<MenuItem>)> {
        let inner = self.inner.read().unwrap();
        parse_id(restaurant_id)
            .and_then(|id| inner.restaurants.get(&id))
            .filter(|r| Instant::now() >= r.visible_at)
            .map(|r| (r.name.clone(), r.menu.clone()))
    }

    /// Creates an order, pricing its line items from the restaurant menu.
    /// The authorization outcome propagates asynchronously.
    pub(crate) fn create_order(
        &self,
        restaurant_id: &EntityRef,
        line_items: Vec<OrderLineItem>,
    ) -> Result<i64, StubError> {
        let mut inner = self.inner.write().unwrap();

        if inner.fail_on_create_order {
            return Err(StubError::Injected("order service unavailable".to_string()));
        }

        let restaurant_key = parse_id(&restaurant_id.to_string())
            .filter(|id| inner.restaurants.contains_key(id))
            .ok_or_else(|| {
                StubError::BadRequest(format!("unknown restaurant {restaurant_id}"))
            })?;
        let total = price_order(&inner.restaurants[&restaurant_key].menu, &line_items)?;

        inner.next_order_id += 1;
        let id = inner.next_order_id;
        let authorized_visible_at = Instant::now() + inner.propagation_delay;
        let rejected = inner.reject_orders;
        inner.orders.insert(
            id,
            OrderRecord {
                restaurant_id: restaurant_key,
                line_items,
                total,
                rejected,
                authorized_visible_at,
                revision: None,
                cancelled_visible_at: None,
            },
        );
        metrics::counter!("stub_orders_created_total").increment(1);
        tracing::debug!(order_id = id, %total, "order created");
        Ok(id)
    }

    /// Returns the observable state and total of an order.
    pub(crate) fn get_order(&self, order_id: &str) -> Option<(OrderState, Money)> {
        let mut inner = self.inner.write().unwrap();
        inner.order_get_count += 1;
        parse_id(order_id)
            .and_then(|id| inner.orders.get(&id))
            .map(|o| o.observed(Instant::now()))
    }

    /// Revises line item quantities. The new total propagates
    /// asynchronously; the order stays APPROVED throughout.
    pub(crate) fn revise_order(
        &self,
        order_id: &str,
        quantities: &HashMap<String, u32>,
    ) -> Result<(), StubError> {
        let mut inner = self.inner.write().unwrap();
        let delay = inner.propagation_delay;

        let id = parse_id(order_id)
            .filter(|id| inner.orders.contains_key(id))
            .ok_or_else(|| StubError::NotFound(format!("order {order_id} not found")))?;

        let restaurant_key = inner.orders[&id].restaurant_id;
        let menu = inner
            .restaurants
            .get(&restaurant_key)
            .map(|r| r.menu.clone())
            .ok_or_else(|| {
                StubError::BadRequest(format!("unknown restaurant {restaurant_key}"))
            })?;

        let order = inner.orders.get_mut(&id).ok_or_else(|| {
            StubError::NotFound(format!("order {order_id} not found"))
        })?;
        for menu_item_id in quantities.keys() {
            if !order.line_items.iter().any(|i| &i.menu_item_id == menu_item_id) {
                return Err(StubError::BadRequest(format!(
                    "order has no line item for menu item {menu_item_id}"
                )));
            }
        }
        for item in &mut order.line_items {
            if let Some(&quantity) = quantities.get(&item.menu_item_id) {
                item.quantity = quantity;
            }
        }

        let total = price_order(&menu, &order.line_items)?;
        order.revision = Some(Revision {
            total,
            visible_at: Instant::now() + delay,
        });
        metrics::counter!("stub_orders_revised_total").increment(1);
        tracing::debug!(order_id = id, %total, "order revised");
        Ok(())
    }

    /// Cancels an order. The CANCELLED state propagates asynchronously.
    pub(crate) fn cancel_order(&self, order_id: &str) -> Result<(), StubError> {
        let mut inner = self.inner.write().unwrap();
        let delay = inner.propagation_delay;

        let id = parse_id(order_id)
            .filter(|id| inner.orders.contains_key(id))
            .ok_or_else(|| StubError::NotFound(format!("order {order_id} not found")))?;

        if let Some(order) = inner.orders.get_mut(&id) {
            order.cancelled_visible_at = Some(Instant::now() + delay);
        }
        metrics::counter!("stub_orders_cancelled_total").increment(1);
        tracing::debug!(order_id = id, "order cancelled");
        Ok(())
    }

    /// Returns the stored consumer name, used by the accounts response.
    pub(crate) fn consumer_name(&self, consumer_id: &str) -> Option<PersonName> {
        let inner = self.inner.read().unwrap();
        parse_id(consumer_id)
            .and_then(|id| inner.consumers.get(&id))
            .map(|c| c.name.clone())
    }
}

impl Default for StubState {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

fn parse_id(s: &str) -> Option<i64> {
    s.parse().ok()
}

fn price_order(menu: &[MenuItem], line_items: &[OrderLineItem]) -> Result<Money, StubError> {
    let mut total = Money::zero();
    for item in line_items {
        let menu_item = menu
            .iter()
            .find(|m| m.id == item.menu_item_id)
            .ok_or_else(|| {
                StubError::BadRequest(format!("unknown menu item {}", item.menu_item_id))
            })?;
        total += menu_item.price.multiply(item.quantity);
    }
    Ok(total)
}
