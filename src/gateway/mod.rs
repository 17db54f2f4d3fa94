use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// One protection capability exposed by the WAF backend.
///
/// `enabled` is the only field this client ever mutates; everything else is
/// opaque server data displayed as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeStatus {
    pub message: String,
}

/// Classified result of submitting an input sample to the WAF.
///
/// A non-2xx response is not an error at this level: the backend uses HTTP
/// status to signal "blocked", so it maps to `blocked = true` with the
/// server-provided text.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub blocked: bool,
    pub status: u16,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("connection to the WAF backend failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("request to the WAF backend timed out")]
    Timeout,

    #[error("WAF backend returned HTTP {0}")]
    Http(u16),

    #[error("unexpected response from the WAF backend: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::Network(err)
        }
    }
}

#[derive(Deserialize)]
struct RulesPayload {
    rules: Vec<Rule>,
}

#[derive(Deserialize)]
struct CheckReply {
    message: Option<String>,
    error: Option<String>,
}

/// HTTP client for the external WAF API.
///
/// Owns timeout and error normalization. Each operation issues exactly one
/// outbound request: no retries, no caching, no coalescing. Retry policy, if
/// any, belongs to the caller.
pub struct GatewayClient {
    client: reqwest::Client,
    endpoint: String,
}

impl GatewayClient {
    /// `endpoint` must already be validated (see config::validator); this
    /// constructor never falls back to a default origin.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GatewayError::Network)?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET /api/home
    pub async fn fetch_home_status(&self) -> Result<HomeStatus, GatewayError> {
        let url = format!("{}/api/home", self.endpoint);
        debug!("Fetching home status from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Http(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| GatewayError::MalformedResponse(format!("home status: {}", e)))
    }

    /// GET /api/protection-rules
    ///
    /// The payload must be an object with a `rules` array of rule-shaped
    /// records; anything else is `MalformedResponse`. The body is read as
    /// text first so a shape mismatch is never misreported as a transport
    /// failure.
    pub async fn fetch_rules(&self) -> Result<Vec<Rule>, GatewayError> {
        let url = format!("{}/api/protection-rules", self.endpoint);
        debug!("Fetching protection rules from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Http(status.as_u16()));
        }

        let body = response.text().await?;
        let payload: RulesPayload = serde_json::from_str(&body)
            .map_err(|e| GatewayError::MalformedResponse(format!("rules list: {}", e)))?;

        Ok(payload.rules)
    }

    /// PATCH /api/protection-rules/{id} with `{"enabled": bool}`.
    ///
    /// The response body is ignored; only the status matters.
    pub async fn set_rule_enabled(&self, id: &str, enabled: bool) -> Result<(), GatewayError> {
        let url = format!("{}/api/protection-rules/{}", self.endpoint, id);
        debug!("Setting rule {} enabled={}", id, enabled);

        let response = self
            .client
            .patch(&url)
            .json(&serde_json::json!({ "enabled": enabled }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Http(status.as_u16()));
        }

        Ok(())
    }

    /// POST /api/user-input with `{"input": string}`.
    ///
    /// 2xx means the input passed: `blocked = false` with the server message.
    /// Non-2xx means the WAF blocked it: `blocked = true` with the server's
    /// `error` text, or a generic message when the body carries none.
    pub async fn submit_input(&self, raw_input: &str) -> Result<CheckOutcome, GatewayError> {
        let url = format!("{}/api/user-input", self.endpoint);
        debug!("Submitting input sample to {}", url);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "input": raw_input }))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let reply: CheckReply = serde_json::from_str(&body).unwrap_or(CheckReply {
            message: None,
            error: None,
        });

        if (200..300).contains(&status) {
            Ok(CheckOutcome {
                blocked: false,
                status,
                message: reply
                    .message
                    .unwrap_or_else(|| "Input accepted".to_string()),
            })
        } else {
            Ok(CheckOutcome {
                blocked: true,
                status,
                message: reply
                    .error
                    .unwrap_or_else(|| "Blocked by WAF".to_string()),
            })
        }
    }
}
