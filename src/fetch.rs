//! Upstream photo API access.
//!
//! The controller talks to the network only through [`PhotoSource`], so tests
//! can drive it with scripted responses. [`UnsplashClient`] is the real
//! implementation: one blocking `GET /photos/random` per call.
//!
//! ## Failure classes
//!
//! | Cause | Error |
//! |-------|-------|
//! | HTTP 401, or no access key configured | [`FetchError::InvalidCredentials`] |
//! | HTTP 403 | [`FetchError::RateLimited`] |
//! | any other non-2xx | [`FetchError::Upstream`] |
//! | connect/read failure, malformed JSON | [`FetchError::Transport`] |
//!
//! The two remaining variants never come from the network: they are raised by
//! [`crate::throttle`] before a request is attempted.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::config::{ApiConfig, ContentFilter, FetchConfig};
use crate::throttle::format_remaining;
use crate::types::RawPhoto;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("invalid or missing API access key")]
    InvalidCredentials,
    #[error("API rate limit reached")]
    RateLimited,
    #[error("upstream returned HTTP {status}")]
    Upstream { status: u16 },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("fetching paused until {until}")]
    CoolingDown { until: DateTime<Utc> },
    #[error("hourly request budget spent, resets at {resets_at}")]
    BudgetExhausted { resets_at: DateTime<Utc> },
}

impl FetchError {
    /// Message shown to the user in place of the error itself.
    pub fn user_message(&self, now: DateTime<Utc>) -> String {
        match self {
            Self::InvalidCredentials => {
                "Invalid or missing API key. Set api.access_key or the configured environment variable.".to_string()
            }
            Self::RateLimited => {
                "The photo API rate limit was reached. Fetching is paused for a while.".to_string()
            }
            Self::Upstream { status } => {
                format!("Failed to fetch photos (HTTP {status}). Please try again.")
            }
            Self::Transport(_) => "Failed to fetch photos. Please try again.".to_string(),
            Self::CoolingDown { until } => format!(
                "Rate limited. Try again in {}.",
                format_remaining(*until - now)
            ),
            Self::BudgetExhausted { resets_at } => format!(
                "Hourly request budget used up. Resets in {}.",
                format_remaining(*resets_at - now)
            ),
        }
    }
}

/// Anything that can hand out random raw photos.
pub trait PhotoSource {
    /// Local preconditions for a request, checked before it is counted
    /// against the hourly budget.
    fn ready(&self) -> Result<(), FetchError> {
        Ok(())
    }

    fn fetch_random(&mut self, count: u32) -> Result<Vec<RawPhoto>, FetchError>;
}

/// Map a non-2xx status to its error class.
pub fn classify_status(status: u16) -> FetchError {
    match status {
        401 => FetchError::InvalidCredentials,
        403 => FetchError::RateLimited,
        _ => FetchError::Upstream { status },
    }
}

fn classify_ureq_failure(error: ureq::Error) -> FetchError {
    match error {
        ureq::Error::Status(code, _) => classify_status(code),
        ureq::Error::Transport(transport) => FetchError::Transport(transport.to_string()),
    }
}

/// Decode a `/photos/random?count=N` body (always a JSON array).
pub fn parse_batch(body: &str) -> Result<Vec<RawPhoto>, FetchError> {
    serde_json::from_str(body)
        .map_err(|e| FetchError::Transport(format!("invalid JSON response: {e}")))
}

/// Blocking Unsplash client.
pub struct UnsplashClient {
    agent: ureq::Agent,
    base_url: String,
    access_key: String,
    content_filter: ContentFilter,
    topics: Vec<String>,
}

impl UnsplashClient {
    pub fn new(api: &ApiConfig, fetch: &FetchConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(api.timeout())
            .timeout(api.timeout())
            .build();
        Self {
            agent,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            access_key: api.resolve_access_key(),
            content_filter: fetch.content_filter,
            topics: fetch.topics.clone(),
        }
    }

    fn random_url(&self) -> String {
        format!("{}/photos/random", self.base_url)
    }
}

impl PhotoSource for UnsplashClient {
    fn ready(&self) -> Result<(), FetchError> {
        if self.access_key.is_empty() {
            return Err(FetchError::InvalidCredentials);
        }
        Ok(())
    }

    fn fetch_random(&mut self, count: u32) -> Result<Vec<RawPhoto>, FetchError> {
        self.ready()?;

        let url = self.random_url();
        log::debug!("GET {url} count={count}");

        let mut request = self
            .agent
            .get(&url)
            .set("Authorization", &format!("Client-ID {}", self.access_key))
            .set("Accept-Version", "v1")
            .query("count", &count.to_string())
            .query("content_filter", self.content_filter.as_str());
        if !self.topics.is_empty() {
            request = request.query("topics", &self.topics.join(","));
        }

        let response = request.call().map_err(|error| {
            let classified = classify_ureq_failure(error);
            log::warn!("request to {url} failed: {classified}");
            classified
        })?;
        let body = response
            .into_string()
            .map_err(|e| FetchError::Transport(format!("failed to read response: {e}")))?;
        let photos = parse_batch(&body)?;
        log::info!("fetched {} photos", photos.len());
        Ok(photos)
    }
}
