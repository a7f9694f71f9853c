//! Paced HTTP client shared by the remote endpoints
//!
//! Every request waits on a client-side governor before it is sent. Failures
//! are returned as-is; nothing here retries.

use super::rate_limit_info::RateLimitInfo;
use crate::shared::errors::{AppError, AppResult};
use governor::{
    clock::DefaultClock,
    middleware::NoOpMiddleware,
    state::{direct::NotKeyed, InMemoryState},
    Quota, RateLimiter as GovernorRateLimiter,
};
use reqwest::{Client, Response};
use serde_json::Value;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use crate::shared::utils::logger::LogContext;

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

const USER_AGENT: &str = "fable-gacha/1.0";

/// HTTP client that paces requests through a rate limiter
pub struct RateLimitClient {
    client: Client,
    rate_limiter: DirectRateLimiter,
    user_agent: String,
    service_name: String,
    bearer: Option<String>,
}

impl RateLimitClient {
    /// Client for the AniList GraphQL endpoint
    pub fn for_anilist(requests_per_second: f64, burst_size: u32) -> AppResult<Self> {
        Self::new("AniList", requests_per_second, burst_size)
    }

    /// Client for the inventory backend, authenticated with a bearer secret
    pub fn for_inventory(secret: &str) -> AppResult<Self> {
        // The backend does its own throttling
        Ok(Self::new("Inventory", 50.0, 50)?.with_bearer(secret))
    }

    pub fn new(service_name: &str, requests_per_second: f64, burst_size: u32) -> AppResult<Self> {
        Ok(Self {
            client: Client::new(),
            rate_limiter: Self::create_rate_limiter(requests_per_second, burst_size)?,
            user_agent: USER_AGENT.to_string(),
            service_name: service_name.to_string(),
            bearer: None,
        })
    }

    pub fn with_bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }

    fn create_rate_limiter(requests_per_second: f64, burst_size: u32) -> AppResult<DirectRateLimiter> {
        if requests_per_second <= 0.0 || !requests_per_second.is_finite() {
            return Err(AppError::ConfigError(format!(
                "Requests per second must be positive, got {}",
                requests_per_second
            )));
        }

        let period = Duration::from_secs_f64(1.0 / requests_per_second);
        let burst = NonZeroU32::new(burst_size).unwrap_or(NonZeroU32::MIN);

        let quota = Quota::with_period(period)
            .ok_or_else(|| AppError::ConfigError("Rate limit period is zero".to_string()))?
            .allow_burst(burst);

        Ok(GovernorRateLimiter::direct(quota))
    }

    /// POST a JSON body and decode the JSON response
    pub async fn post_json<T>(&self, url: &str, body: &Value) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.rate_limiter.until_ready().await;

        LogContext::api_call(&self.service_name, url, "POST", None);
        let started = Instant::now();

        let mut request = self
            .client
            .post(url)
            .header("User-Agent", &self.user_agent)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(body);

        if let Some(token) = &self.bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            log::warn!("{}: Request failed: {}", self.service_name, e);
            AppError::from(e)
        })?;

        let status = response.status();

        LogContext::api_call(
            &self.service_name,
            url,
            status.as_str(),
            Some(started.elapsed().as_millis() as u64),
        );

        if status.as_u16() == 429 {
            let info = RateLimitInfo::from_headers(response.headers());
            return Err(AppError::RateLimitError(match info.recommended_delay() {
                Some(delay) => format!(
                    "{} rate limit exceeded, retry after {:?}",
                    self.service_name, delay
                ),
                None => format!("{} rate limit exceeded", self.service_name),
            }));
        }

        if !status.is_success() {
            return Err(AppError::ApiError(format!(
                "{} API returned error: {}",
                self.service_name, status
            )));
        }

        self.parse_response(response).await
    }

    async fn parse_response<T>(&self, response: Response) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response_text = response.text().await.map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to read {} response: {}",
                self.service_name, e
            ))
        })?;

        serde_json::from_str(&response_text).map_err(|e| {
            let preview: String = response_text.chars().take(200).collect();
            AppError::SerializationError(format!(
                "Failed to parse {} response: {}. Response: {}",
                self.service_name, e, preview
            ))
        })
    }

    /// Check if a request can be made now (for testing/debugging)
    pub fn can_make_request_now(&self) -> bool {
        self.rate_limiter.check().is_ok()
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}
