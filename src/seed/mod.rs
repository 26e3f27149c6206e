//! Demo-data seeding through the public API.
//!
//! Creates cars, then mechanics, then orders referencing what was created. Individual
//! failures are logged and skipped so one bad record does not end the run.

pub mod client;
pub mod generator;

pub use client::ApiClient;
pub use generator::SeedGenerator;

use chrono::Utc;
use clap::Parser;

/// Populate the auto-service API with random demo data.
#[derive(Debug, Clone, Parser)]
#[command(name = "seed_db", version, about)]
pub struct SeedConfig {
    /// Base URL of a running API server.
    #[arg(long, env = "SEED_BASE_URL", default_value = "http://127.0.0.1:8000")]
    pub base_url: String,

    /// Number of cars to create.
    #[arg(long, env = "SEED_CARS", default_value_t = 50)]
    pub cars: usize,

    /// Number of mechanics to create.
    #[arg(long, env = "SEED_MECHANICS", default_value_t = 10)]
    pub mechanics: usize,

    /// Number of orders to create.
    #[arg(long, env = "SEED_ORDERS", default_value_t = 200)]
    pub orders: usize,

    /// RNG seed for a reproducible dataset.
    #[arg(long, env = "SEED_RNG_SEED")]
    pub seed: Option<u64>,
}

/// Counts of what one run created.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub cars: usize,
    pub mechanics: usize,
    pub orders: usize,
    pub failures: usize,
}

pub async fn run(config: &SeedConfig) -> anyhow::Result<SeedReport> {
    let client = ApiClient::new(&config.base_url)?;
    client.check_reachable().await?;

    let mut generator = SeedGenerator::new(config.seed, Utc::now().date_naive());
    let mut report = SeedReport::default();

    tracing::info!(count = config.cars, "creating cars");
    let mut car_ids = Vec::with_capacity(config.cars);
    for _ in 0..config.cars {
        let car = generator.car();
        match client.create_car(&car).await {
            Ok(created) => {
                tracing::info!(id = created.id, make = %created.make, vin = %created.vin, "created car");
                car_ids.push(created.id);
            }
            Err(e) => {
                tracing::warn!(vin = %car.vin, error = %format!("{:#}", e), "error creating car");
                report.failures += 1;
            }
        }
    }
    report.cars = car_ids.len();

    tracing::info!(count = config.mechanics, "creating mechanics");
    let mut mechanic_ids = Vec::with_capacity(config.mechanics);
    for _ in 0..config.mechanics {
        let Some(mechanic) = generator.mechanic() else {
            tracing::warn!("employee id space exhausted; no more mechanics");
            break;
        };
        match client.create_mechanic(&mechanic).await {
            Ok(created) => {
                tracing::info!(id = created.id, name = %created.full_name, "created mechanic");
                mechanic_ids.push(created.id);
            }
            Err(e) => {
                tracing::warn!(employee_id = %mechanic.employee_id, error = %format!("{:#}", e), "error creating mechanic");
                report.failures += 1;
            }
        }
    }
    report.mechanics = mechanic_ids.len();

    if car_ids.is_empty() || mechanic_ids.is_empty() {
        tracing::warn!("no cars or mechanics to create orders for; skipping orders");
        return Ok(report);
    }

    tracing::info!(count = config.orders, "creating orders");
    for _ in 0..config.orders {
        let Some(order) = generator.order(&car_ids, &mechanic_ids) else {
            break;
        };
        match client.create_order(&order).await {
            Ok(created) => {
                tracing::info!(id = created.id, car_id = created.car_id, "created order");
                report.orders += 1;
            }
            Err(e) => {
                tracing::warn!(car_id = order.car_id, error = %format!("{:#}", e), "error creating order");
                report.failures += 1;
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_dataset() {
        let cfg = SeedConfig::try_parse_from(["seed_db"]).unwrap();
        assert_eq!(cfg.base_url, "http://127.0.0.1:8000");
        assert_eq!((cfg.cars, cfg.mechanics, cfg.orders), (50, 10, 200));
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn counts_are_configurable() {
        let cfg = SeedConfig::try_parse_from([
            "seed_db", "--cars", "5", "--mechanics", "2", "--orders", "0", "--seed", "42",
        ])
        .unwrap();
        assert_eq!((cfg.cars, cfg.mechanics, cfg.orders), (5, 2, 0));
        assert_eq!(cfg.seed, Some(42));
    }

    #[tokio::test]
    async fn unreachable_api_is_an_error() {
        let cfg = SeedConfig::try_parse_from(["seed_db", "--base-url", "http://127.0.0.1:9"]).unwrap();
        assert!(run(&cfg).await.is_err());
    }
}
