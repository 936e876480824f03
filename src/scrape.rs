//! Firecrawl scrape client
//!
//! The single point of entry for job-posting scraping. Wraps Firecrawl's
//! `POST /v1/scrape` endpoint with retry on transient failures. The response
//! schema is owned by Firecrawl and has shifted between SDK versions, so
//! content extraction tolerates the shapes seen in the wild rather than
//! binding to one struct.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "FIRECRAWL_API_KEY";

/// Optional endpoint override, mainly for tests
pub const API_URL_ENV: &str = "FIRECRAWL_API_URL";

const BASE_URL: &str = "https://api.firecrawl.dev";
const REQUEST_TIMEOUT_SECS: u64 = 60;
const MAX_RETRIES: u32 = 2;
const BACKOFF_FACTOR: f64 = 1.5;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("FIRECRAWL_API_KEY is not set - export it or add it to a .env file")]
    MissingApiKey,

    #[error("HTTP error calling Firecrawl: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Firecrawl scrape failed (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("no content returned by Firecrawl")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: &'a [&'a str],
    #[serde(rename = "onlyMainContent", skip_serializing_if = "Option::is_none")]
    only_main_content: Option<bool>,
}

/// Minimal Firecrawl API client
pub struct FirecrawlClient {
    http: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
}

impl FirecrawlClient {
    /// Build a client from `FIRECRAWL_API_KEY`, consulting a local `.env`
    /// file first. Fails before any network work when the key is absent.
    pub fn from_env() -> Result<Self, ScrapeError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| ScrapeError::MissingApiKey)?;
        let client = Self::new(api_key)?;
        match std::env::var(API_URL_ENV) {
            Ok(base_url) if !base_url.is_empty() => Ok(client.with_base_url(base_url)),
            _ => Ok(client),
        }
    }

    pub fn new(api_key: String) -> Result<Self, ScrapeError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            api_key,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Point the client at a different endpoint (tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Scrape one URL, returning the parsed response body.
    ///
    /// Retries 429 and 5xx responses and transport errors with exponential
    /// backoff; other non-success statuses abort with the server-provided
    /// message when one is parseable.
    pub fn scrape(&self, url: &str, only_main_content: bool) -> Result<Value, ScrapeError> {
        let payload = ScrapeRequest {
            url,
            formats: &["markdown"],
            only_main_content: only_main_content.then_some(true),
        };
        let endpoint = format!("{}/v1/scrape", self.base_url);

        let mut attempt = 0;
        loop {
            attempt += 1;

            let response = match self
                .http
                .post(&endpoint)
                .bearer_auth(&self.api_key)
                .json(&payload)
                .send()
            {
                Ok(response) => response,
                Err(e) => {
                    if attempt <= MAX_RETRIES {
                        backoff(attempt);
                        continue;
                    }
                    return Err(ScrapeError::Http(e));
                }
            };

            let status = response.status();
            if status.is_success() {
                return Ok(response.json()?);
            }

            if retryable(status.as_u16()) && attempt <= MAX_RETRIES {
                backoff(attempt);
                continue;
            }

            let body = response.text().unwrap_or_default();
            return Err(ScrapeError::Api {
                status: status.as_u16(),
                message: api_message(&body),
            });
        }
    }
}

fn retryable(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

fn backoff(attempt: u32) {
    let secs = BACKOFF_FACTOR.powi(attempt.saturating_sub(1) as i32);
    std::thread::sleep(Duration::from_secs_f64(secs));
}

/// Server-provided error message, falling back to the raw body (truncated)
fn api_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return message.to_string();
        }
        if let Some(message) = value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
        {
            return message.to_string();
        }
    }
    body.chars().take(500).collect()
}

/// Normalize content across the response shapes Firecrawl has used:
/// `data.markdown`/`data.html`, the same fields at the top level, or a
/// `content`/`text` field carrying markdown-like text.
pub fn extract_content(response: &Value) -> Option<String> {
    let node = match response.get("data") {
        Some(data) if data.is_object() => data,
        _ => response,
    };

    for key in ["markdown", "html", "content", "text"] {
        if let Some(text) = node.get(key).and_then(Value::as_str) {
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}
