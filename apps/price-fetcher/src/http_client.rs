//! Authenticated GET client for the market data REST API.
//!
//! A request rejected with 408, 429 or 5xx, or lost in transport, is sent
//! again on an exponential schedule until `RetryConfig::max_attempts` is
//! spent. A 429 carrying `Retry-After` waits that long instead. Paged
//! endpoints are walked through `next_page_token` by [`AlpacaHttpClient::get_paged`].

use std::fmt;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::api_types::{AlpacaErrorResponse, Paged};
use crate::config::{AlpacaConfig, RetryConfig};
use crate::error::AlpacaError;

const KEY_HEADER: &str = "APCA-API-KEY-ID";
const SECRET_HEADER: &str = "APCA-API-SECRET-KEY";
const PAGE_TOKEN_PARAM: &str = "page_token";

/// Fallback wait reported when a 429 never clears.
const DEFAULT_RATE_LIMIT_SECS: u64 = 60;

/// Market data client holding credentials and the retry policy.
#[derive(Debug, Clone)]
pub struct AlpacaHttpClient {
    client: Client,
    api_key: String,
    api_secret: String,
    data_base_url: String,
    retry: RetryConfig,
}

impl AlpacaHttpClient {
    /// Build a client from config.
    ///
    /// # Errors
    ///
    /// `AuthenticationFailed` when a credential is empty, `Network` when
    /// the underlying client cannot be built.
    pub fn new(config: &AlpacaConfig) -> Result<Self, AlpacaError> {
        if config.api_key.is_empty() || config.api_secret.is_empty() {
            return Err(AlpacaError::AuthenticationFailed);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AlpacaError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            data_base_url: config.data_base_url.clone(),
            retry: config.retry.clone(),
        })
    }

    /// GET `path` and decode the JSON body, retrying transient failures.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AlpacaError> {
        let url = format!("{}{path}", self.data_base_url);
        let mut schedule = RetrySchedule::new(&self.retry);

        loop {
            let rejection = match self.send(&url, query).await {
                Ok(response) if response.status().is_success() => return decode(response).await,
                Ok(response) => Rejection::read(response).await,
                Err(e) => Rejection::Transport(e.to_string()),
            };

            if rejection.class() == RetryClass::Fatal {
                return Err(rejection.into_error(path));
            }
            let Some(backoff) = schedule.next_delay() else {
                return Err(rejection.exhausted(schedule.attempts));
            };
            let delay = rejection.retry_after().unwrap_or(backoff);

            tracing::warn!(
                path,
                %rejection,
                attempt = schedule.attempts,
                delay_ms = delay.as_millis() as u64,
                "Request rejected, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// GET every page of `path`, in order.
    ///
    /// Each page is requested through [`get`](Self::get), so a retry
    /// repeats only the page that failed.
    pub async fn get_paged<T: DeserializeOwned + Paged>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, AlpacaError> {
        let mut page_query = query.to_vec();
        let mut pages = Vec::new();

        loop {
            let page: T = self.get(path, &page_query).await?;
            let next = page.next_page_token().map(str::to_owned);
            pages.push(page);

            let Some(token) = next else {
                return Ok(pages);
            };
            page_query.retain(|(key, _)| *key != PAGE_TOKEN_PARAM);
            page_query.push((PAGE_TOKEN_PARAM, token));
        }
    }

    async fn send(&self, url: &str, query: &[(&str, String)]) -> reqwest::Result<Response> {
        self.client
            .get(url)
            .query(query)
            .header(KEY_HEADER, &self.api_key)
            .header(SECRET_HEADER, &self.api_secret)
            .send()
            .await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AlpacaError> {
    let body = response
        .text()
        .await
        .map_err(|e| AlpacaError::Network(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| AlpacaError::JsonParse(e.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RetryClass {
    Throttled,
    Transient,
    Fatal,
}

const fn retry_class(status: StatusCode) -> RetryClass {
    match status.as_u16() {
        429 => RetryClass::Throttled,
        408 | 500..=599 => RetryClass::Transient,
        _ => RetryClass::Fatal,
    }
}

/// One failed attempt.
#[derive(Debug)]
enum Rejection {
    Transport(String),
    Status {
        status: StatusCode,
        retry_after_secs: Option<u64>,
        code: String,
        message: String,
    },
}

impl Rejection {
    async fn read(response: Response) -> Self {
        let status = response.status();
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let body = response.text().await.unwrap_or_default();
        Self::from_body(status, retry_after_secs, &body)
    }

    /// Prefer the API's own code and message; fall back to the status and raw body.
    fn from_body(status: StatusCode, retry_after_secs: Option<u64>, body: &str) -> Self {
        let (code, message) = match serde_json::from_str::<AlpacaErrorResponse>(body) {
            Ok(err) => (
                err.code.unwrap_or_else(|| u64::from(status.as_u16())).to_string(),
                err.message,
            ),
            Err(_) => (status.as_u16().to_string(), body.to_string()),
        };
        Self::Status {
            status,
            retry_after_secs,
            code,
            message,
        }
    }

    const fn class(&self) -> RetryClass {
        match self {
            Self::Transport(_) => RetryClass::Transient,
            Self::Status { status, .. } => retry_class(*status),
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Status {
                status,
                retry_after_secs: Some(secs),
                ..
            } if *status == StatusCode::TOO_MANY_REQUESTS => Some(Duration::from_secs(*secs)),
            _ => None,
        }
    }

    fn exhausted(self, attempts: u32) -> AlpacaError {
        match self {
            Self::Status {
                status: StatusCode::TOO_MANY_REQUESTS,
                retry_after_secs,
                ..
            } => AlpacaError::RateLimited {
                retry_after_secs: retry_after_secs.unwrap_or(DEFAULT_RATE_LIMIT_SECS),
            },
            _ => AlpacaError::MaxRetriesExceeded { attempts },
        }
    }

    fn into_error(self, path: &str) -> AlpacaError {
        match self {
            Self::Transport(message) => AlpacaError::Network(message),
            Self::Status {
                status: StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN,
                ..
            } => AlpacaError::AuthenticationFailed,
            Self::Status {
                status: StatusCode::NOT_FOUND,
                ..
            } => AlpacaError::NotFound {
                path: path.to_string(),
            },
            Self::Status { code, message, .. } => AlpacaError::Api { code, message },
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "transport: {message}"),
            Self::Status {
                status,
                code,
                message,
                ..
            } => write!(f, "{} ({code}): {message}", status.as_u16()),
        }
    }
}

/// Delays between attempts; the first attempt is free.
struct RetrySchedule {
    attempts: u32,
    max_attempts: u32,
    next: Duration,
    ceiling: Duration,
    multiplier: f64,
}

impl RetrySchedule {
    const fn new(config: &RetryConfig) -> Self {
        Self {
            attempts: 0,
            max_attempts: config.max_attempts,
            next: config.initial_backoff,
            ceiling: config.max_backoff,
            multiplier: config.multiplier,
        }
    }

    /// Record a failed attempt; `None` once the budget is spent.
    fn next_delay(&mut self) -> Option<Duration> {
        self.attempts += 1;
        if self.attempts >= self.max_attempts {
            return None;
        }

        let delay = self.next;
        self.next = self.next.mul_f64(self.multiplier).min(self.ceiling);
        Some(delay)
    }
}
