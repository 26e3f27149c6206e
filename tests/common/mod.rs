//! Shared setup for the end-to-end API tests.
//!
//! Requires a reachable Postgres in `DATABASE_URL`. Every call to `start_server` truncates
//! the tables, so each test binary holds a single test.

#![allow(dead_code)]

use auto_service_api::transport::http::{create_router, AppState};
use auto_service_api::{Config, DatabaseService, ModelRegistry};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub struct TestServer {
    pub base_url: String,
    pub client: Client,
    pub db: DatabaseService,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn start_server() -> Result<TestServer, Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    let db = DatabaseService::new(&config).await?;
    db.clear_all(&ModelRegistry::auto_service()).await?;

    let router = create_router(AppState::new(db.clone()));

    // Bind to an ephemeral port to avoid conflicts if an API server is already running.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    Ok(TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        client: Client::new(),
        db,
        handle,
    })
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Result<Response> {
        self.client.get(self.url(path)).send().await
    }

    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Result<Response> {
        self.client.post(self.url(path)).json(body).send().await
    }

    pub async fn put(&self, path: &str, body: &Value) -> reqwest::Result<Response> {
        self.client.put(self.url(path)).json(body).send().await
    }

    pub async fn delete(&self, path: &str) -> reqwest::Result<Response> {
        self.client.delete(self.url(path)).send().await
    }

    /// GET that must answer 200, decoded as `T`.
    pub async fn get_ok<T: DeserializeOwned>(&self, path: &str) -> Result<T, Box<dyn std::error::Error>> {
        let resp = self.get(path).await?;
        assert_eq!(resp.status(), StatusCode::OK, "GET {}", path);
        Ok(resp.json::<T>().await?)
    }

    /// POST that must answer 201, decoded as `T`.
    pub async fn create<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T, Box<dyn std::error::Error>> {
        let resp = self.post(path, &body).await?;
        let status = resp.status();
        if status != StatusCode::CREATED {
            let text = resp.text().await.unwrap_or_default();
            return Err(format!("POST {} returned {}: {}", path, status, text).into());
        }
        Ok(resp.json::<T>().await?)
    }
}

pub fn car_body(make: &str, year: i32, vin: &str) -> Value {
    json!({ "make": make, "year": year, "vin": vin, "owner_name": "Mary Jones" })
}

pub fn mechanic_body(full_name: &str, employee_id: &str) -> Value {
    json!({
        "full_name": full_name,
        "experience": 7,
        "rank": "Technician",
        "employee_id": employee_id,
        "phone_number": "555-0100"
    })
}

pub fn order_body(car_id: i32, mechanic_id: i32, cost: &str, description: &str) -> Value {
    json!({
        "issue_date": "2024-02-01",
        "cost": cost,
        "work_type": "Brake Repair",
        "planned_completion_date": "2024-02-04",
        "actual_completion_date": null,
        "car_id": car_id,
        "mechanic_id": mechanic_id,
        "work_details": { "description": description, "parts": ["Front Brake Pads"] }
    })
}
