//! Appfigures-specific adapter implementation.
//!
//! This file contains the concrete implementation of the `UpstreamApi` trait for
//! the Appfigures v2 REST API: bearer-token authentication, request logging,
//! error body extraction, and the endpoint check used for diagnosing tokens.

use std::fmt;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::AdapterError;
use crate::models::json_kind;
use crate::{QueryParams, UpstreamApi};

pub const DEFAULT_BASE_URL: &str = "https://api.appfigures.com/v2";

/// Endpoints hit by [`check_endpoints`] when checking a token by hand.
pub const CHECK_ENDPOINTS: [&str; 4] = [
    "/products",
    "/products/mine?store=apple",
    "/reports/sales",
    "/users/info",
];

const SAMPLE_LEN: usize = 200;

#[derive(Clone)]
pub struct AppfiguresConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl AppfiguresConfig {
    pub fn new(token: Option<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// First five characters of the token, for startup diagnostics.
    pub fn masked_token(&self) -> String {
        match self.token.as_deref().filter(|t| !t.trim().is_empty()) {
            Some(token) => format!("{}...", token.chars().take(5).collect::<String>()),
            None => "Not set".to_string(),
        }
    }
}

impl fmt::Debug for AppfiguresConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppfiguresConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.masked_token())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppfiguresClient {
    http: reqwest::Client,
    config: AppfiguresConfig,
}

impl AppfiguresClient {
    pub fn new(config: AppfiguresConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn token(&self) -> Result<&str, AdapterError> {
        self.config
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                AdapterError::Configuration(
                    "Appfigures access token is not configured".to_string(),
                )
            })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }
}

#[async_trait]
impl UpstreamApi for AppfiguresClient {
    async fn request(
        &self,
        endpoint: &str,
        params: Option<QueryParams<'_>>,
    ) -> Result<Value, AdapterError> {
        let token = self.token()?;
        let url = self.url(endpoint);
        info!(%url, ?params, "making request to appfigures");

        let mut request = self
            .http
            .get(&url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json");
        if let Some(params) = params {
            request = request.query(params);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AdapterError::Http {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let data: Value = serde_json::from_str(&body).map_err(|source| AdapterError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })?;
        debug!(
            kind = json_kind(&data),
            sample = %sample(&body),
            "appfigures response received"
        );
        Ok(data)
    }
}

/// Detail for a failed call: the `message` field when the body is a JSON
/// object, the raw body otherwise.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(details)) => match details.get("message") {
            Some(Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        },
        _ => body.to_string(),
    }
}

fn sample(body: &str) -> String {
    let mut sample: String = body.chars().take(SAMPLE_LEN).collect();
    if sample.len() < body.len() {
        sample.push_str("...");
    }
    sample
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Success,
    Failed(String),
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("Success"),
            Self::Failed(reason) => write!(f, "Failed: {reason}"),
        }
    }
}

/// Calls each endpoint without parameters and reports which ones the
/// configured token can reach. Failures are collected, never returned early.
pub async fn check_endpoints<A>(api: &A, endpoints: &[&str]) -> Vec<(String, CheckOutcome)>
where
    A: UpstreamApi + ?Sized,
{
    let mut results = Vec::with_capacity(endpoints.len());
    for endpoint in endpoints {
        let outcome = match api.request(endpoint, None).await {
            Ok(_) => CheckOutcome::Success,
            Err(err) => CheckOutcome::Failed(err.to_string()),
        };
        results.push((endpoint.to_string(), outcome));
    }
    results
}
