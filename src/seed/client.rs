//! Thin HTTP client over the API, used by the seeder.

use crate::domain::model::{Car, CarCreate, Mechanic, MechanicCreate, Order, OrderCreate};
use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fails unless `GET /health` answers 200.
    pub async fn check_reachable(&self) -> anyhow::Result<()> {
        let url = format!("{}/health", self.base_url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("API at {} is not reachable", self.base_url))?;
        if !resp.status().is_success() {
            bail!("API at {} is unhealthy: HTTP {}", self.base_url, resp.status());
        }
        Ok(())
    }

    pub async fn create_car(&self, car: &CarCreate) -> anyhow::Result<Car> {
        self.post("/cars", car).await
    }

    pub async fn create_mechanic(&self, mechanic: &MechanicCreate) -> anyhow::Result<Mechanic> {
        self.post("/mechanics", mechanic).await
    }

    pub async fn create_order(&self, order: &OrderCreate) -> anyhow::Result<Order> {
        self.post("/orders", order).await
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> anyhow::Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.http.post(&url).json(body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            bail!("POST {} failed: HTTP {}: {}", path, status, text);
        }
        Ok(resp.json::<R>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://127.0.0.1:8000/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
    }
}
