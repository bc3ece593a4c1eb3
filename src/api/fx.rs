//! USD to IDR conversion for trading capital amounts.
//!
//! The spot rate comes from the public Frankfurter API on every call,
//! nothing is cached. At journal-entry volume the repeated fetch is an
//! accepted cost.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

use super::error::ApiError;
use crate::models::ModalType;

const FRANKFURTER_URL: &str = "https://api.frankfurter.app";

/// Source of the USD to IDR spot rate, a seam for tests to pin a rate.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn usd_to_idr(&self) -> Result<f64, ApiError>;
}

#[derive(Debug, Deserialize)]
struct RateResponse {
    #[serde(default)]
    rates: HashMap<String, f64>,
}

/// Live rates from the Frankfurter (ECB) API.
pub struct FrankfurterRates {
    http: reqwest::Client,
    base_url: String,
}

impl FrankfurterRates {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: FRANKFURTER_URL.to_string(),
        }
    }

    /// Point at a different host, used by tests.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for FrankfurterRates {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateSource for FrankfurterRates {
    async fn usd_to_idr(&self) -> Result<f64, ApiError> {
        let url = format!("{}/latest?from=USD&to=IDR", self.base_url);
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::RateUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::RateUnavailable(format!(
                "rate endpoint answered {}",
                response.status()
            )));
        }

        let body: RateResponse = response
            .json()
            .await
            .map_err(|e| ApiError::RateUnavailable(e.to_string()))?;

        match body.rates.get("IDR") {
            Some(rate) if rate.is_finite() && *rate > 0.0 => Ok(*rate),
            _ => Err(ApiError::RateUnavailable(
                "response carried no numeric IDR rate".to_string(),
            )),
        }
    }
}

/// Convert a capital amount in `unit` to IDR.
///
/// IDR input is an identity, no network call happens. A zero or
/// non-finite amount short-circuits to zero the same way.
pub async fn normalize(amount: f64, unit: ModalType, rates: &dyn RateSource) -> Result<f64, ApiError> {
    if !amount.is_finite() || amount == 0.0 {
        return Ok(0.0);
    }

    let usd_value = match unit {
        ModalType::Idr => return Ok(amount),
        ModalType::Usd => amount,
        ModalType::Usc => amount / 100.0,
    };

    let rate = rates.usd_to_idr().await?;
    Ok(usd_value * rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct FixedRate(f64);

    #[async_trait]
    impl RateSource for FixedRate {
        async fn usd_to_idr(&self) -> Result<f64, ApiError> {
            Ok(self.0)
        }
    }

    struct DeadSource;

    #[async_trait]
    impl RateSource for DeadSource {
        async fn usd_to_idr(&self) -> Result<f64, ApiError> {
            Err(ApiError::RateUnavailable("down".to_string()))
        }
    }

    #[tokio::test]
    async fn test_normalize_usd_multiplies_by_rate() {
        let idr = normalize(10.0, ModalType::Usd, &FixedRate(16000.0)).await.unwrap();
        assert_eq!(idr, 160_000.0);
    }

    #[tokio::test]
    async fn test_normalize_cents_divides_first() {
        let idr = normalize(250.0, ModalType::Usc, &FixedRate(16000.0)).await.unwrap();
        assert_eq!(idr, 40_000.0);
    }

    #[tokio::test]
    async fn test_normalize_idr_is_identity_without_fetch() {
        // DeadSource would fail if a fetch happened
        let idr = normalize(5_000_000.0, ModalType::Idr, &DeadSource).await.unwrap();
        assert_eq!(idr, 5_000_000.0);
    }

    #[tokio::test]
    async fn test_normalize_zero_amount_short_circuits() {
        let idr = normalize(0.0, ModalType::Usd, &DeadSource).await.unwrap();
        assert_eq!(idr, 0.0);
    }

    #[tokio::test]
    async fn test_frankfurter_parses_rate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("from", "USD"))
            .and(query_param("to", "IDR"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "base": "USD",
                "rates": { "IDR": 16234.5 }
            })))
            .mount(&server)
            .await;

        let rates = FrankfurterRates::new().with_base_url(server.uri());
        assert_eq!(rates.usd_to_idr().await.unwrap(), 16234.5);
    }

    #[tokio::test]
    async fn test_frankfurter_missing_rate_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "base": "USD",
                "rates": {}
            })))
            .mount(&server)
            .await;

        let rates = FrankfurterRates::new().with_base_url(server.uri());
        let err = rates.usd_to_idr().await.unwrap_err();
        assert!(matches!(err, ApiError::RateUnavailable(_)));
    }

    #[tokio::test]
    async fn test_frankfurter_http_failure_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let rates = FrankfurterRates::new().with_base_url(server.uri());
        let err = rates.usd_to_idr().await.unwrap_err();
        assert!(matches!(err, ApiError::RateUnavailable(_)));
    }
}
