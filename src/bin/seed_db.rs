// src/bin/seed_db.rs

use auto_service_api::infra::telemetry;
use auto_service_api::seed::{self, SeedConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();
    let config = SeedConfig::parse();

    tracing::info!(base_url = %config.base_url, "starting database seeding");
    let report = seed::run(&config).await?;
    tracing::info!(
        cars = report.cars,
        mechanics = report.mechanics,
        orders = report.orders,
        failures = report.failures,
        "database seeding complete"
    );
    Ok(())
}
