use crate::metrics::{ApiMetrics, MetricsCollector, RequestMetrics};
use crate::rate_limiter::{RateLimitConfig, RateLimiter};
use crate::retry::{RetryConfig, RetryExecutor, RetryMetrics};
use pulse_core::{AppConfig, CoreError, ErrorExt, RedditApiError};
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

pub const REDDIT_WEB_API_BASE: &str = "https://www.reddit.com";
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub user_agent: String,
    pub timeout: Duration,
    pub requests_per_minute: u32,
    /// Attempts beyond the first for transient failures.
    pub max_retries: u32,
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ClientConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            timeout: config.request_timeout(),
            requests_per_minute: config.requests_per_minute,
            max_retries: config.max_retries,
            base_url: REDDIT_WEB_API_BASE.to_string(),
        }
    }
}

/// Client for Reddit's public, unauthenticated JSON endpoints.
#[derive(Debug)]
pub struct RedditApiClient {
    http_client: Client,
    base_url: String,
    rate_limiter: Arc<RateLimiter>,
    retry: RetryExecutor,
    metrics: Arc<MetricsCollector>,
}

impl RedditApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let http_client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()?;

        let rate_limiter = Arc::new(RateLimiter::new(RateLimitConfig::per_minute(
            config.requests_per_minute,
        )));

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            rate_limiter,
            retry: RetryExecutor::new(RetryConfig::reddit(config.max_retries)),
            metrics: Arc::new(MetricsCollector::new()),
        })
    }

    /// Fetch `[submission listing, comment listing]` for a thread.
    pub async fn fetch_thread_json(&self, thread_id: &str) -> Result<Value, CoreError> {
        let endpoint = format!("/comments/{}.json", thread_id);
        self.retry
            .execute(&endpoint, || self.get_json(&endpoint, &[]))
            .await
    }

    /// Fetch the search listing for a free-text query.
    pub async fn search_json(
        &self,
        term: &str,
        sort: &str,
        limit: u32,
    ) -> Result<Value, CoreError> {
        let limit = limit.to_string();
        let params = [("q", term), ("sort", sort), ("limit", limit.as_str())];
        self.retry
            .execute("/search.json", || self.get_json("/search.json", &params))
            .await
    }

    async fn get_json(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Value, CoreError> {
        let _permit = self.rate_limiter.acquire_permit().await?;
        debug!("Acquired rate limit permit for {}", endpoint);

        let start_time = Instant::now();
        let outcome = self.send(endpoint, query).await;

        let (success, status_code, error_type, rate_limited) = match &outcome {
            Ok((status, _)) => (true, Some(status.as_u16()), None, false),
            Err(e) => (
                false,
                status_of(e),
                Some(e.error_code()),
                matches!(
                    e,
                    CoreError::RedditApi(RedditApiError::RateLimitExceeded { .. })
                ),
            ),
        };

        self.metrics
            .record_request(RequestMetrics {
                endpoint: endpoint.to_string(),
                status_code,
                response_time: start_time.elapsed(),
                success,
                rate_limited,
                error_type,
            })
            .await;

        outcome.map(|(_, value)| value)
    }

    async fn send(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<(StatusCode, Value), CoreError> {
        let url = format!("{}{}", self.base_url, endpoint);

        info!("Fetching {}", endpoint);
        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                error!("Network error for {}: {}", endpoint, e);
                if e.is_timeout() {
                    CoreError::RedditApi(RedditApiError::RequestTimeout)
                } else {
                    CoreError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            let api_error = status_error(status.as_u16(), endpoint, retry_after);
            warn!("Request to {} failed: {}", endpoint, api_error);
            return Err(CoreError::RedditApi(api_error));
        }

        let value = response.json::<Value>().await.map_err(|e| {
            error!("Failed to decode JSON from {}: {}", endpoint, e);
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("{} returned invalid JSON: {}", endpoint, e),
            })
        })?;

        debug!("Request successful: {} {}", status, endpoint);
        Ok((status, value))
    }

    pub async fn get_metrics(&self) -> ApiMetrics {
        self.metrics.get_metrics().await
    }

    pub fn get_retry_metrics(&self) -> RetryMetrics {
        self.retry.get_metrics()
    }

    pub async fn export_metrics(&self) -> Result<String, serde_json::Error> {
        self.metrics.export_metrics().await
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Map a non-success HTTP status to a [`RedditApiError`].
pub fn status_error(status_code: u16, resource: &str, retry_after: Option<u64>) -> RedditApiError {
    match status_code {
        403 => RedditApiError::Forbidden {
            resource: resource.to_string(),
        },
        404 => RedditApiError::NotFound {
            resource: resource.to_string(),
        },
        429 => RedditApiError::RateLimitExceeded {
            retry_after: retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS),
        },
        500..=599 => RedditApiError::ServerError { status_code },
        _ => RedditApiError::UnexpectedStatus {
            status_code,
            resource: resource.to_string(),
        },
    }
}

fn status_of(error: &CoreError) -> Option<u16> {
    match error {
        CoreError::RedditApi(api_error) => match api_error {
            RedditApiError::Forbidden { .. } => Some(403),
            RedditApiError::NotFound { .. } => Some(404),
            RedditApiError::RateLimitExceeded { .. } => Some(429),
            RedditApiError::ServerError { status_code }
            | RedditApiError::UnexpectedStatus { status_code, .. } => Some(*status_code),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(404, "/comments/x.json", None),
            RedditApiError::NotFound { resource } if resource == "/comments/x.json"
        ));
        assert!(matches!(
            status_error(403, "/search.json", None),
            RedditApiError::Forbidden { .. }
        ));
        assert!(matches!(
            status_error(429, "/search.json", Some(7)),
            RedditApiError::RateLimitExceeded { retry_after: 7 }
        ));
        assert!(matches!(
            status_error(429, "/search.json", None),
            RedditApiError::RateLimitExceeded { retry_after: 60 }
        ));
        assert!(matches!(
            status_error(502, "/search.json", None),
            RedditApiError::ServerError { status_code: 502 }
        ));
        assert!(matches!(
            status_error(301, "/search.json", None),
            RedditApiError::UnexpectedStatus { status_code: 301, .. }
        ));
    }

    #[test]
    fn test_status_of_round_trips_mapping() {
        for code in [403, 404, 429, 500, 503, 418] {
            let error = CoreError::RedditApi(status_error(code, "/x", None));
            assert_eq!(status_of(&error), Some(code));
        }
        assert_eq!(
            status_of(&CoreError::RedditApi(RedditApiError::RequestTimeout)),
            None
        );
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = RedditApiClient::new(ClientConfig {
            base_url: "https://example.test/".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(client.base_url(), "https://example.test");
        let metrics = client.get_metrics().await;
        assert_eq!(metrics.total_requests, 0);
        assert_eq!(client.get_retry_metrics(), RetryMetrics::default());
    }

    #[tokio::test]
    async fn test_connection_failure_is_recorded() {
        let client = RedditApiClient::new(ClientConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            max_retries: 0,
            timeout: Duration::from_secs(2),
            ..Default::default()
        })
        .unwrap();

        let result = client.search_json("tariff", "relevance", 5).await;
        assert!(result.is_err());

        let metrics = client.get_metrics().await;
        assert_eq!(metrics.total_requests, 1);
        assert_eq!(metrics.failed_requests, 1);
        assert!(metrics.requests_by_endpoint.contains_key("/search.json"));
        assert_eq!(client.get_retry_metrics().failed_operations, 1);
    }
}
