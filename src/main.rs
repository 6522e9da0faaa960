//! Entry point for the Gasofilaço Engine binary.
//!
//! Running this binary starts an HTTP server exposing the counting,
//! registration and reporting API over an in-memory donation store.
//! Settings come from `GASOFILACO_*` environment variables; see
//! [`gasofilaco_engine::config::ServiceConfig`].

use gasofilaco_engine::api::{self, AppState};
use gasofilaco_engine::clock::SystemClock;
use gasofilaco_engine::config::ServiceConfig;
use gasofilaco_engine::denominations::{load_denomination_sets_from_dir, select_set};
use gasofilaco_engine::repository::InMemoryDonationRepository;
use gasofilaco_engine::service::GasofilacoService;
use gasofilaco_engine::telemetry::init_tracing;
use gasofilaco_engine::validator::GasofilacoValidator;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env()?;
    init_tracing(&config.log_level)?;

    let sets = load_denomination_sets_from_dir(&config.denominations_dir)?;
    let denominations = select_set(sets, &config.currency);
    info!(currency = %denominations.currency, version = %denominations.version, "using denomination set");

    let clock = Arc::new(SystemClock);
    let service = GasofilacoService::new(Arc::new(InMemoryDonationRepository::new(clock.clone())), clock.clone())
        .with_validator(GasofilacoValidator::with_max_amount(clock, config.max_amount));
    let state = Arc::new(AppState {
        service,
        denominations,
    });

    if let Err(err) = api::serve(&config.bind_addr, state).await {
        error!(error = %err, "server terminated");
        return Err(err);
    }
    Ok(())
}
