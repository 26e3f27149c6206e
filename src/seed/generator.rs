//! Random demo data for the seeding client.
//!
//! Uniqueness of generated VINs and employee ids is tracked per generator, i.e. per run.

use crate::domain::model::{CarCreate, MechanicCreate, OrderCreate, WorkDetails};
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use std::collections::HashSet;

const FIRST_NAMES: &[&str] = &[
    "James", "John", "Robert", "Michael", "William", "David", "Richard", "Joseph", "Thomas",
    "Charles",
];
const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez",
];
const MAKES: &[&str] = &[
    "Toyota", "Ford", "Honda", "Chevrolet", "Nissan", "Jeep", "Hyundai", "Kia", "Subaru", "BMW",
];
const RANKS: &[&str] = &[
    "Apprentice",
    "Technician",
    "Senior Technician",
    "Master Technician",
];
const WORK_TYPES: &[&str] = &[
    "Oil Change",
    "Brake Repair",
    "Tire Rotation",
    "Engine Diagnostics",
    "Transmission Repair",
];

const VIN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const VIN_LEN: usize = 17;
const EMPLOYEE_ID_SPACE: u32 = 100_000;
const ISSUE_WINDOW_DAYS: i64 = 365 * 2;
const COMPLETION_RATE: f64 = 0.8;

pub struct SeedGenerator<R = StdRng> {
    rng: R,
    today: NaiveDate,
    used_vins: HashSet<String>,
    used_employee_ids: HashSet<u32>,
}

impl SeedGenerator<StdRng> {
    /// Deterministic when `seed` is given, entropy-seeded otherwise.
    pub fn new(seed: Option<u64>, today: NaiveDate) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(rng, today)
    }
}

impl<R: Rng> SeedGenerator<R> {
    pub fn with_rng(rng: R, today: NaiveDate) -> Self {
        Self {
            rng,
            today,
            used_vins: HashSet::new(),
            used_employee_ids: HashSet::new(),
        }
    }

    fn pick(&mut self, items: &[&'static str]) -> &'static str {
        items.choose(&mut self.rng).copied().unwrap_or_default()
    }

    pub fn person_name(&mut self) -> String {
        let first = self.pick(FIRST_NAMES);
        let last = self.pick(LAST_NAMES);
        format!("{} {}", first, last)
    }

    /// 17 characters from A-Z0-9, not repeated within this generator.
    pub fn vin(&mut self) -> String {
        loop {
            let vin: String = (0..VIN_LEN)
                .map(|_| VIN_CHARSET[self.rng.gen_range(0..VIN_CHARSET.len())] as char)
                .collect();
            if self.used_vins.insert(vin.clone()) {
                return vin;
            }
        }
    }

    /// `EMP-#####`, unique within this generator. `None` once all 100000 ids are taken.
    pub fn employee_id(&mut self) -> Option<String> {
        if self.used_employee_ids.len() as u32 >= EMPLOYEE_ID_SPACE {
            return None;
        }
        let mut n = self.rng.gen_range(0..EMPLOYEE_ID_SPACE);
        while !self.used_employee_ids.insert(n) {
            n = (n + 1) % EMPLOYEE_ID_SPACE;
        }
        Some(format!("EMP-{:05}", n))
    }

    pub fn car(&mut self) -> CarCreate {
        CarCreate {
            make: self.pick(MAKES).to_string(),
            year: self.rng.gen_range(2000..=2023),
            vin: self.vin(),
            owner_name: self.person_name(),
        }
    }

    pub fn mechanic(&mut self) -> Option<MechanicCreate> {
        Some(MechanicCreate {
            full_name: self.person_name(),
            experience: self.rng.gen_range(1..=30),
            rank: self.pick(RANKS).to_string(),
            employee_id: self.employee_id()?,
            phone_number: None,
        })
    }

    /// An order for a random car and mechanic; `None` if either list is empty.
    pub fn order(&mut self, car_ids: &[i32], mechanic_ids: &[i32]) -> Option<OrderCreate> {
        let car_id = *car_ids.choose(&mut self.rng)?;
        let mechanic_id = *mechanic_ids.choose(&mut self.rng)?;

        let issue_date = self.today - Duration::days(self.rng.gen_range(1..=ISSUE_WINDOW_DAYS));
        let planned_completion_date = issue_date + Duration::days(self.rng.gen_range(1..=14));
        let actual_completion_date = if self.rng.gen_bool(COMPLETION_RATE) {
            Some(planned_completion_date + Duration::days(self.rng.gen_range(-2..=5)))
        } else {
            None
        };
        let work_type = self.pick(WORK_TYPES);

        Some(OrderCreate {
            issue_date,
            cost: Decimal::new(self.rng.gen_range(5_000..=200_000), 2),
            work_type: work_type.to_string(),
            planned_completion_date,
            actual_completion_date,
            car_id,
            mechanic_id,
            work_details: Some(work_details(work_type)),
        })
    }
}

/// Canned description and parts list for a work type.
pub fn work_details(work_type: &str) -> WorkDetails {
    let (description, parts): (&str, &[&str]) = match work_type {
        "Oil Change" => (
            "Standard oil and filter change.",
            &["Oil Filter", "Synthetic Oil 5L"],
        ),
        "Brake Repair" => (
            "Replaced front brake pads and rotors.",
            &["Front Brake Pads", "Front Rotors", "Brake Fluid"],
        ),
        "Tire Rotation" => ("Rotated tires and checked pressure.", &[]),
        _ => (
            "Complex diagnostic and repair.",
            &["Sensor", "Wiring Harness", "Various clips"],
        ),
    };
    let mut details = WorkDetails::new();
    details.insert("description".to_string(), JsonValue::from(description));
    details.insert(
        "parts".to_string(),
        JsonValue::from(parts.iter().map(|p| p.to_string()).collect::<Vec<_>>()),
    );
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Validate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn same_seed_same_data() {
        let mut a = SeedGenerator::new(Some(7), today());
        let mut b = SeedGenerator::new(Some(7), today());
        assert_eq!(a.car(), b.car());
        assert_eq!(a.mechanic(), b.mechanic());
    }

    #[test]
    fn cars_are_well_formed() {
        let mut generator = SeedGenerator::new(Some(1), today());
        for _ in 0..50 {
            let car = generator.car();
            assert_eq!(car.vin.len(), VIN_LEN);
            assert!(car.vin.bytes().all(|b| VIN_CHARSET.contains(&b)));
            assert!((2000..=2023).contains(&car.year));
            assert!(MAKES.contains(&car.make.as_str()));
            assert!(car.validate().is_ok());
        }
    }

    #[test]
    fn employee_ids_are_unique_within_a_run() {
        let mut generator = SeedGenerator::new(Some(3), today());
        let ids: HashSet<String> = (0..2_000).filter_map(|_| generator.employee_id()).collect();
        assert_eq!(ids.len(), 2_000);
        assert!(ids.iter().all(|id| id.starts_with("EMP-") && id.len() == 9));
    }

    #[test]
    fn orders_respect_date_and_cost_ranges() {
        let mut generator = SeedGenerator::new(Some(11), today());
        for _ in 0..200 {
            let order = generator.order(&[1, 2, 3], &[10]).unwrap();
            assert!(order.issue_date < today());
            assert!(order.issue_date >= today() - Duration::days(ISSUE_WINDOW_DAYS));
            let lead = order.planned_completion_date - order.issue_date;
            assert!((1..=14).contains(&lead.num_days()));
            if let Some(actual) = order.actual_completion_date {
                let slip = actual - order.planned_completion_date;
                assert!((-2..=5).contains(&slip.num_days()));
            }
            assert!(order.cost >= Decimal::new(5_000, 2) && order.cost <= Decimal::new(200_000, 2));
            assert!([1, 2, 3].contains(&order.car_id));
            assert_eq!(order.mechanic_id, 10);
            assert!(order.validate().is_ok());
        }
    }

    #[test]
    fn no_order_without_cars_or_mechanics() {
        let mut generator = SeedGenerator::new(Some(2), today());
        assert!(generator.order(&[], &[1]).is_none());
        assert!(generator.order(&[1], &[]).is_none());
    }

    #[test]
    fn work_details_match_work_type() {
        let details = work_details("Tire Rotation");
        assert_eq!(details["description"], "Rotated tires and checked pressure.");
        assert_eq!(details["parts"], serde_json::json!([]));

        let details = work_details("Transmission Repair");
        assert_eq!(details["description"], "Complex diagnostic and repair.");
    }
}
