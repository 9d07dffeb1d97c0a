use super::util::{RetryPolicy, with_retry};
use crate::core::config::ApiConfig;
use crate::core::connectivity::{ConnectionStatus, ConnectivityChecker};
use crate::core::rate::Rate;
use crate::core::rates::{ApiResponse, RateProvider};
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error, instrument};

pub const NO_NETWORK_MESSAGE: &str = "Please turn on your internet settings.";
pub const UNREACHABLE_MESSAGE: &str = "Check your internet connection.";

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP access to the exchange rate service.
pub struct ApiService {
    client: reqwest::Client,
    probe_url: String,
    policy: RetryPolicy,
}

impl ApiService {
    pub fn new(probe_url: &str, policy: RetryPolicy) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("forex/0.1")
            .build()?;
        Ok(Self {
            client,
            probe_url: probe_url.to_string(),
            policy,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(
            &config.base_url,
            RetryPolicy::new(config.retries, config.retry_delay_ms),
        )
    }
}

#[async_trait]
impl ConnectivityChecker for ApiService {
    async fn check_connection(&self) -> ConnectionStatus {
        debug!("Probing {}", self.probe_url);
        match self
            .client
            .head(&self.probe_url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
        {
            // Any answer, even an error status, means the host is reachable
            Ok(response) => {
                debug!(status = %response.status(), "Probe answered");
                ConnectionStatus::ok()
            }
            Err(e) if e.is_connect() => {
                debug!(error = %e, "Probe could not connect");
                ConnectionStatus::failed(NO_NETWORK_MESSAGE)
            }
            Err(e) => {
                debug!(error = %e, "Probe failed");
                ConnectionStatus::failed(UNREACHABLE_MESSAGE)
            }
        }
    }
}

#[async_trait]
impl RateProvider for ApiService {
    #[instrument(name = "RateListFetch", skip(self))]
    async fn get_list(&self, base_url: &str, path: &str) -> ApiResponse<Rate> {
        let url = format!("{base_url}{path}");
        debug!("Requesting rate list from {}", url);

        let response = match with_retry(|| self.client.get(&url).send(), self.policy).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Rate list request failed");
                return ApiResponse::failure(e.to_string());
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return ApiResponse::failure(e.to_string()),
        };

        if !status.is_success() {
            debug!(%status, "Rate service returned an error status");
            return ApiResponse::failure(text);
        }

        match serde_json::from_str::<Vec<Rate>>(&text) {
            Ok(rates) => {
                debug!(count = rates.len(), "Received rate list");
                ApiResponse::success(rates)
            }
            Err(e) => {
                error!(
                    error = ?e,
                    response = %text,
                    "Failed to parse rate list response"
                );
                ApiResponse::failure(format!("Failed to parse rate list: {e}"))
            }
        }
    }
}
