//! Client for the government environmental data API
//!
//! Every metric is served by its own endpoint taking a `date_time` query
//! parameter. Responses are handed on as raw JSON; the metric normalizer
//! knows where to look inside each shape.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::Result;
use crate::config::ApiConfig;
use crate::error::DashboardError;

/// Upstream endpoints, relative to the configured base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    TwoHourForecast,
    FourDayForecast,
    AirTemperature,
    RelativeHumidity,
    Rainfall,
    Pm25,
    Psi,
    UvIndex,
}

impl Endpoint {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::TwoHourForecast => "environment/2-hour-weather-forecast",
            Endpoint::FourDayForecast => "environment/4-day-weather-forecast",
            Endpoint::AirTemperature => "environment/air-temperature",
            Endpoint::RelativeHumidity => "environment/relative-humidity",
            Endpoint::Rainfall => "environment/rainfall",
            Endpoint::Pm25 => "environment/pm25",
            Endpoint::Psi => "environment/psi",
            Endpoint::UvIndex => "environment/uv-index",
        }
    }
}

/// ISO-8601 at whole-second precision with a `Z` suffix, e.g. `2024-05-01T06:30:00Z`.
#[must_use]
pub fn request_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// A source of environmental readings, one JSON document per endpoint
#[async_trait]
pub trait EnvironmentSource: Send + Sync {
    /// Fetch the snapshot valid at `at`.
    async fn fetch(&self, endpoint: Endpoint, at: DateTime<Utc>) -> Result<Value>;
}

/// HTTP client for the data.gov.sg real-time environment API
pub struct DataGovClient {
    client: Client,
    base_url: String,
}

impl DataGovClient {
    /// Create a client with the configured timeout and user agent
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DashboardError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }
}

#[async_trait]
impl EnvironmentSource for DataGovClient {
    #[instrument(skip(self), fields(endpoint = endpoint.path()))]
    async fn fetch(&self, endpoint: Endpoint, at: DateTime<Utc>) -> Result<Value> {
        let url = self.endpoint_url(endpoint);
        let date_time = request_timestamp(at);
        debug!("GET {} date_time={}", url, date_time);
        let start_time = Instant::now();

        let response = self
            .client
            .get(&url)
            .query(&[("date_time", date_time.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::upstream(format!(
                "{} answered with status {}",
                endpoint.path(),
                status
            )));
        }

        let payload: Value = response.json().await?;

        let elapsed = start_time.elapsed();
        if elapsed.as_secs() > 5 {
            warn!("Slow API response detected: {:.3}s", elapsed.as_secs_f64());
        }
        debug!("{} answered in {:.3}s", endpoint.path(), elapsed.as_secs_f64());

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mockito::Matcher;
    use serde_json::json;

    fn api_config(base_url: &str, timeout_seconds: u64) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            timeout_seconds,
            user_agent: "envdash-test".to_string(),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 6, 30, 15).unwrap()
    }

    #[test]
    fn test_request_timestamp_drops_subseconds() {
        let now = fixed_now() + chrono::Duration::milliseconds(987);
        assert_eq!(request_timestamp(now), "2024-05-01T06:30:15Z");
    }

    #[test]
    fn test_endpoint_url_joins_base() {
        let client = DataGovClient::new(&api_config("https://example.test/v1/", 5)).unwrap();
        assert_eq!(
            client.endpoint_url(Endpoint::Pm25),
            "https://example.test/v1/environment/pm25"
        );
    }

    #[tokio::test]
    async fn test_fetch_sends_date_time() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({ "items": [{ "timestamp": "2024-05-01T14:30:00+08:00" }] });
        let mock = server
            .mock("GET", "/environment/uv-index")
            .match_query(Matcher::UrlEncoded(
                "date_time".into(),
                "2024-05-01T06:30:15Z".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = DataGovClient::new(&api_config(&server.url(), 5)).unwrap();
        let payload = client.fetch(Endpoint::UvIndex, fixed_now()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(payload, body);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/environment/psi")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        let client = DataGovClient::new(&api_config(&server.url(), 5)).unwrap();
        let err = client.fetch(Endpoint::Psi, fixed_now()).await.unwrap_err();
        assert!(matches!(err, DashboardError::Upstream { .. }));
    }

    #[tokio::test]
    async fn test_fetch_invalid_json() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/environment/rainfall")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{\"items\": [")
            .create_async()
            .await;

        let client = DataGovClient::new(&api_config(&server.url(), 5)).unwrap();
        let err = client.fetch(Endpoint::Rainfall, fixed_now()).await.unwrap_err();
        assert!(matches!(err, DashboardError::Payload { .. }));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host() {
        // Port 9 (discard) on localhost is not expected to be listening.
        let client = DataGovClient::new(&api_config("http://127.0.0.1:9", 1)).unwrap();
        let err = client
            .fetch(Endpoint::AirTemperature, fixed_now())
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::Upstream { .. }));
    }
}
