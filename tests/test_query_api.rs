//! End-to-end filtered queries: pagination, sorting, search, statistics, bulk update.
//!
//! Run with: DATABASE_URL=postgres://... cargo test --test test_query_api -- --ignored

mod common;

use auto_service_api::{Car, Mechanic, MechanicOrderStats, Order, OrderWithDetails};
use common::{car_body, mechanic_body, order_body, start_server, TestResult};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::Value;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[ignore = "requires database"]
async fn filtered_queries() -> TestResult {
    let server = start_server().await?;

    // --- Five cars, inserted out of year order ---
    let specs = [
        ("Toyota", 2010, "VIN00000000000001"),
        ("Ford", 2018, "VIN00000000000002"),
        ("Toyota", 2010, "VIN00000000000003"),
        ("Subaru", 2003, "VIN00000000000004"),
        ("Toyota", 2021, "VIN00000000000005"),
    ];
    let mut cars: Vec<Car> = Vec::new();
    for (make, year, vin) in specs {
        cars.push(server.create("/cars", car_body(make, year, vin)).await?);
    }

    // Pagination: non-overlapping windows in insertion order.
    let mut paged: Vec<Car> = Vec::new();
    for skip in [0, 2, 4] {
        let page: Vec<Car> = server.get_ok(&format!("/cars?skip={skip}&limit=2")).await?;
        assert!(page.len() <= 2);
        paged.extend(page);
    }
    assert_eq!(paged, cars);
    let empty: Vec<Car> = server.get_ok("/cars?skip=5&limit=2").await?;
    assert!(empty.is_empty());

    // Sorting by year.
    let desc: Vec<Car> = server.get_ok("/cars?sort_by_year=desc").await?;
    assert_eq!(desc.len(), 5);
    assert!(desc.windows(2).all(|w| w[0].year >= w[1].year));
    let asc: Vec<Car> = server.get_ok("/cars?sort_by_year=asc").await?;
    assert!(asc.windows(2).all(|w| w[0].year <= w[1].year));

    // Exact make + year search.
    let found: Vec<Car> = server.get_ok("/cars/search?make=Toyota&year=2010").await?;
    assert_eq!(
        found.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![cars[0].id, cars[2].id]
    );
    let none: Vec<Car> = server.get_ok("/cars/search?make=toyota&year=2010").await?;
    assert!(none.is_empty());

    // --- Mechanics: one busy, one idle ---
    let busy: Mechanic = server
        .create("/mechanics", mechanic_body("Alice Garcia", "EMP-10001"))
        .await?;
    let other: Mechanic = server
        .create("/mechanics", mechanic_body("Bob Miller", "EMP-10002"))
        .await?;
    let idle: Mechanic = server
        .create("/mechanics", mechanic_body("Zed Idle", "EMP-10003"))
        .await?;

    let o1: Order = server
        .create("/orders", order_body(cars[0].id, busy.id, "100.00", "Standard oil and filter change."))
        .await?;
    let o2: Order = server
        .create("/orders", order_body(cars[0].id, busy.id, "250.50", "Replaced front brake pads and rotors."))
        .await?;
    let o3: Order = server
        .create("/orders", order_body(cars[1].id, other.id, "75.25", "Rotated tires and checked pressure."))
        .await?;

    // --- Order counts per mechanic ---
    let stats: Vec<MechanicOrderStats> = server.get_ok("/mechanics/stats/orders").await?;
    assert_eq!(
        stats,
        vec![
            MechanicOrderStats { full_name: "Alice Garcia".into(), order_count: 2 },
            MechanicOrderStats { full_name: "Bob Miller".into(), order_count: 1 },
        ]
    );
    assert!(stats.iter().all(|s| s.full_name != idle.full_name));

    // --- Work details search ---
    let hits: Vec<Order> = server.get_ok("/orders/search-details?q=BRAKE%20PADS").await?;
    assert_eq!(hits.iter().map(|o| o.id).collect::<Vec<_>>(), vec![o2.id]);
    let misses: Vec<Order> = server.get_ok("/orders/search-details?q=windshield").await?;
    assert!(misses.is_empty());
    let literal: Vec<Order> = server.get_ok("/orders/search-details?q=%25").await?;
    assert!(literal.is_empty(), "% must match literally");

    // --- Listing with relations ---
    let details: Vec<OrderWithDetails> = server.get_ok("/orders/details?limit=2").await?;
    assert_eq!(details.len(), 2);
    assert_eq!(details[0].order.id, o1.id);
    assert_eq!(details[0].car, cars[0]);
    assert_eq!(details[0].mechanic, busy);
    let plain: Vec<Order> = server.get_ok("/orders?skip=1").await?;
    assert_eq!(plain.iter().map(|o| o.id).collect::<Vec<_>>(), vec![o2.id, o3.id]);

    // --- Bulk cost update by car ---
    let resp = server
        .client
        .put(server.url(&format!("/orders/update-costs-by-car/{}?new_cost=500.00", cars[0].id)))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await?;
    assert_eq!(body["updated"], 2);
    assert_eq!(
        body["message"],
        format!("Costs for car {} updated.", cars[0].id)
    );

    for id in [o1.id, o2.id] {
        let o: OrderWithDetails = server.get_ok(&format!("/orders/{id}")).await?;
        assert_eq!(o.order.cost, Decimal::new(50000, 2));
        assert_eq!(o.order.cost.to_string(), "500.00");
    }
    let untouched: OrderWithDetails = server.get_ok(&format!("/orders/{}", o3.id)).await?;
    assert_eq!(untouched.order.cost, Decimal::new(7525, 2));

    // A car without orders still answers 200 with zero updates.
    let resp = server
        .client
        .put(server.url(&format!("/orders/update-costs-by-car/{}?new_cost=1", cars[4].id)))
        .send()
        .await?;
    let body: Value = resp.json().await?;
    assert_eq!(body["updated"], 0);

    Ok(())
}
