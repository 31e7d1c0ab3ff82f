//! Scenario scripts.

use async_trait::async_trait;
use common::OrderState;
use poller::{Check, RetryPoller};
use probe::{HttpProbe, StatusCode};

use crate::config::HarnessConfig;
use crate::context::{RunContext, ScenarioSeed};
use crate::endpoints;
use crate::error::HarnessError;
use crate::orchestrator::{Orchestrator, expect_status};
use crate::report::RunReport;
use crate::steps;

/// A named, self-contained verification scenario.
///
/// Independent scenarios may run concurrently; each run owns its context
/// and shares nothing with other runs.
#[async_trait]
pub trait Scenario: Send + Sync {
    /// The scenario identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Drives the scenario once and returns its report, or the failure
    /// that aborted it.
    async fn run(&self, seed: ScenarioSeed) -> Result<RunReport, HarnessError>;
}

/// The order saga: create a consumer and a restaurant, then place, revise
/// and cancel an order, verifying convergence after every mutation.
///
/// Each action's output is only trusted as input to the next action after
/// a convergence check has seen it propagate; that ordering is the whole
/// point of the script.
pub struct OrderSagaScenario {
    probe: HttpProbe,
    config: HarnessConfig,
}

impl OrderSagaScenario {
    /// Creates the scenario against the configured target.
    pub fn new(probe: HttpProbe, config: HarnessConfig) -> Self {
        Self { probe, config }
    }

    /// Step 1: create the consumer and remember its id.
    async fn create_consumer(&self, orch: &mut Orchestrator) -> Result<(), HarnessError> {
        let url = endpoints::consumers_url(&self.config);
        let request = endpoints::create_consumer_request(orch.context().seed());
        let probe = &self.probe;

        let consumer_id = orch
            .run_action(steps::STEP_CREATE_CONSUMER, async move {
                let resp = probe.post_json(&url, &request).await?;
                expect_status(steps::STEP_CREATE_CONSUMER, &resp, StatusCode::OK)?;
                Ok(resp.entity_ref("consumerId")?)
            })
            .await?;

        orch.context_mut().set_consumer_id(consumer_id);
        Ok(())
    }

    /// Step 2: wait until the accounting service knows the consumer.
    async fn verify_account_created(&self, orch: &mut Orchestrator) -> Result<(), HarnessError> {
        let consumer_id = orch.context().consumer_id()?.clone();
        let url = endpoints::account_url(&self.config, &consumer_id);
        let description = format!("account exists for consumer {consumer_id}");
        let probe = &self.probe;
        let url = url.as_str();

        orch.run_convergence_check(
            steps::STEP_VERIFY_ACCOUNT_CREATED,
            &description,
            move || async move {
                let resp = probe.get(url).await?;
                if resp.status == StatusCode::OK {
                    Ok(Check::Pass)
                } else {
                    Ok(Check::fail(format!("account responded {}", resp.status)))
                }
            },
        )
        .await
    }

    /// Step 3: create the restaurant and remember its id.
    async fn create_restaurant(&self, orch: &mut Orchestrator) -> Result<(), HarnessError> {
        let url = endpoints::restaurants_url(&self.config);
        let request = endpoints::create_restaurant_request(orch.context().seed());
        let probe = &self.probe;

        let restaurant_id = orch
            .run_action(steps::STEP_CREATE_RESTAURANT, async move {
                let resp = probe.post_json(&url, &request).await?;
                expect_status(steps::STEP_CREATE_RESTAURANT, &resp, StatusCode::OK)?;
                Ok(resp.entity_ref("id")?)
            })
            .await?;

        orch.context_mut().set_restaurant_id(restaurant_id);
        Ok(())
    }

    /// Step 4: wait until the restaurant is retrievable.
    async fn verify_restaurant_created(&self, orch: &mut Orchestrator) -> Result<(), HarnessError> {
        let restaurant_id = orch.context().restaurant_id()?.clone();
        let url = endpoints::restaurant_url(&self.config, &restaurant_id);
        let description = format!("restaurant {restaurant_id} is retrievable");
        let probe = &self.probe;
        let url = url.as_str();

        orch.run_convergence_check(
            steps::STEP_VERIFY_RESTAURANT_CREATED,
            &description,
            move || async move {
                let resp = probe.get(url).await?;
                if resp.status == StatusCode::OK {
                    Ok(Check::Pass)
                } else {
                    Ok(Check::fail(format!("restaurant responded {}", resp.status)))
                }
            },
        )
        .await
    }

    /// Step 5: create the order and remember its id.
    async fn create_order(&self, orch: &mut Orchestrator) -> Result<(), HarnessError> {
        let consumer_id = orch.context().consumer_id()?.clone();
        let restaurant_id = orch.context().restaurant_id()?.clone();
        let request =
            endpoints::create_order_request(orch.context().seed(), &consumer_id, &restaurant_id);
        let url = endpoints::orders_url(&self.config);
        let probe = &self.probe;

        let order_id = orch
            .run_action(steps::STEP_CREATE_ORDER, async move {
                let resp = probe.post_json(&url, &request).await?;
                expect_status(steps::STEP_CREATE_ORDER, &resp, StatusCode::OK)?;
                Ok(resp.entity_ref("orderId")?)
            })
            .await?;

        orch.context_mut().set_order_id(order_id);
        Ok(())
    }

    /// Step 7: revise the order to the seed's revised quantity.
    async fn revise_order(&self, orch: &mut Orchestrator) -> Result<(), HarnessError> {
        let order_id = orch.context().order_id()?.clone();
        let request = endpoints::revise_order_request(orch.context().seed());
        let url = endpoints::order_revise_url(&self.config, &order_id);
        let probe = &self.probe;

        orch.run_action(steps::STEP_REVISE_ORDER, async move {
            let resp = probe.post_json(&url, &request).await?;
            expect_status(steps::STEP_REVISE_ORDER, &resp, StatusCode::OK)
        })
        .await
    }

    /// Step 8, first assertion: the order total reflects the revision.
    async fn verify_order_total(&self, orch: &mut Orchestrator) -> Result<(), HarnessError> {
        let order_id = orch.context().order_id()?.clone();
        let seed = orch.context().seed();
        let expected_total = seed
            .unit_price
            .multiply(seed.revised_quantity)
            .as_canonical_string();
        let url = endpoints::order_url(&self.config, &order_id);
        let description = format!("order {order_id} total is {expected_total}");
        let probe = &self.probe;
        let url = url.as_str();
        let expected_total = expected_total.as_str();

        orch.run_convergence_check(
            steps::STEP_VERIFY_ORDER_REVISED,
            &description,
            move || async move {
                let resp = probe.get(url).await?;
                if resp.status != StatusCode::OK {
                    return Ok(Check::fail(format!("order responded {}", resp.status)));
                }
                match resp.extract_str("orderTotal") {
                    Ok(total) if total == expected_total => Ok(Check::Pass),
                    Ok(total) => Ok(Check::fail(format!("orderTotal is {total}"))),
                    Err(e) => Ok(Check::fail(e.to_string())),
                }
            },
        )
        .await
    }

    /// Steps 6, 8 (second assertion) and 10: the observed order state
    /// matches the expected one.
    async fn verify_order_state(
        &self,
        orch: &mut Orchestrator,
        step: &'static str,
        expected: OrderState,
    ) -> Result<(), HarnessError> {
        let order_id = orch.context().order_id()?.clone();
        let url = endpoints::order_url(&self.config, &order_id);
        let description = format!("order {order_id} state is {expected}");
        let probe = &self.probe;
        let url = url.as_str();

        orch.run_convergence_check(step, &description, move || async move {
            let resp = probe.get(url).await?;
            if resp.status != StatusCode::OK {
                return Ok(Check::fail(format!("order responded {}", resp.status)));
            }
            match resp.extract_str("state") {
                Ok(state) if state == expected.as_str() => Ok(Check::Pass),
                Ok(state) => Ok(Check::fail(format!("state is {state}"))),
                Err(e) => Ok(Check::fail(e.to_string())),
            }
        })
        .await
    }

    /// Step 9: cancel the order.
    async fn cancel_order(&self, orch: &mut Orchestrator) -> Result<(), HarnessError> {
        let order_id = orch.context().order_id()?.clone();
        let url = endpoints::order_cancel_url(&self.config, &order_id);
        let body = serde_json::json!({});
        let probe = &self.probe;

        orch.run_action(steps::STEP_CANCEL_ORDER, async move {
            let resp = probe.post_json(&url, &body).await?;
            expect_status(steps::STEP_CANCEL_ORDER, &resp, StatusCode::OK)
        })
        .await
    }
}

#[async_trait]
impl Scenario for OrderSagaScenario {
    fn name(&self) -> &'static str {
        steps::SCENARIO_ORDER_SAGA
    }

    #[tracing::instrument(skip(self, seed), fields(scenario = steps::SCENARIO_ORDER_SAGA))]
    async fn run(&self, seed: ScenarioSeed) -> Result<RunReport, HarnessError> {
        let poller = RetryPoller::new(self.config.max_wait, self.config.interval);
        let mut orch = Orchestrator::new(RunContext::new(seed), poller, self.config.run_deadline);
        tracing::info!(run_id = %orch.context().run_id(), "scenario started");

        self.create_consumer(&mut orch).await?;
        self.verify_account_created(&mut orch).await?;

        self.create_restaurant(&mut orch).await?;
        self.verify_restaurant_created(&mut orch).await?;

        self.create_order(&mut orch).await?;
        self.verify_order_state(&mut orch, steps::STEP_VERIFY_ORDER_APPROVED, OrderState::Approved)
            .await?;

        self.revise_order(&mut orch).await?;
        self.verify_order_total(&mut orch).await?;
        self.verify_order_state(&mut orch, steps::STEP_VERIFY_ORDER_REVISED, OrderState::Approved)
            .await?;

        self.cancel_order(&mut orch).await?;
        self.verify_order_state(
            &mut orch,
            steps::STEP_VERIFY_ORDER_CANCELLED,
            OrderState::Cancelled,
        )
        .await?;

        Ok(orch.finish())
    }
}
