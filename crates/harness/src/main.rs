//! Harness entry point.

use harness::{HarnessConfig, OrderSagaScenario, Scenario, ScenarioSeed};
use probe::HttpProbe;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Load configuration and build the probe
    let config = HarnessConfig::from_env();
    tracing::info!(target_url = %config.base_url(), "starting verification run");

    let probe = HttpProbe::new(config.request_timeout).expect("failed to build HTTP probe");

    // 3. Run the scenarios
    let scenarios: Vec<Box<dyn Scenario>> =
        vec![Box::new(OrderSagaScenario::new(probe, config.clone()))];

    let mut failed = false;
    for scenario in &scenarios {
        match scenario.run(ScenarioSeed::default()).await {
            Ok(report) => {
                tracing::info!(
                    scenario = scenario.name(),
                    run_id = %report.run_id,
                    steps = report.steps.len(),
                    state = %report.state,
                    "scenario converged"
                );
            }
            Err(e) => {
                failed = true;
                tracing::error!(scenario = scenario.name(), error = %e, "scenario aborted");
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}
