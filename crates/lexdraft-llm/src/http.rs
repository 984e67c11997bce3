//! HTTP Service Implementation
//!
//! Talks to the LegalBot REST API:
//!
//! - `POST /api/ai/generate/` with `{prompt, conversation_history}`
//! - `POST /api/ai/refine/` with `{current_draft, user_request}`
//!
//! Both answer `{"result": "..."}` on success. Error bodies carry an `error`
//! field whose text is passed through untouched so the user sees what the
//! server said.
//!
//! # Examples
//!
//! ```no_run
//! use lexdraft_llm::HttpService;
//! use lexdraft_domain::GenerationService;
//!
//! # async fn example() -> Result<(), lexdraft_llm::ServiceError> {
//! let service = HttpService::new("http://localhost:8000")?;
//! let draft = service.refine("PROPERTY TRANSFER AGREEMENT ...", "Add the date").await?;
//! # Ok(())
//! # }
//! ```

use crate::ServiceError;
use lexdraft_domain::{ChatMessage, GenerationService};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// Default timeout for a single request (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of attempts per request
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;

/// Upper bound on the delay between attempts
const MAX_BACKOFF_SECS: u64 = 30;

/// REST client for the generation service
#[derive(Debug, Clone)]
pub struct HttpService {
    endpoint: String,
    client: reqwest::Client,
    api_token: Option<String>,
    max_attempts: u32,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    conversation_history: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct RefineRequest<'a> {
    current_draft: &'a str,
    user_request: &'a str,
}

#[derive(Deserialize)]
struct ResultResponse {
    result: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: Option<String>,
    detail: Option<String>,
}

impl HttpService {
    /// Create a service for the given base URL with the default timeout
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ServiceError> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a service with an explicit per-request timeout
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client,
            api_token: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Retry transport failures up to `max_attempts` times in total
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Base URL requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post_for_result<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<String, ServiceError> {
        let url = format!("{}{}", self.endpoint, path);
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_attempts {
            let mut request = self.client.post(&url).json(body);
            if let Some(token) = &self.api_token {
                request = request.bearer_auth(token);
            }

            match request.send().await {
                Ok(response) => return Self::read_result(response).await,
                Err(e) => {
                    warn!("Request to {} failed: {}", url, e);
                    last_error = Some(ServiceError::Transport(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_attempts {
                tokio::time::sleep(backoff_delay(attempts)).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| ServiceError::Transport("Max retries exceeded".to_string())))
    }

    async fn read_result(response: reqwest::Response) -> Result<String, ServiceError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            warn!("Service answered HTTP {}", status.as_u16());
            return Err(ServiceError::Server {
                status: status.as_u16(),
                message: server_message(&body),
            });
        }

        let parsed: ResultResponse = serde_json::from_str(&body)
            .map_err(|e| ServiceError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
        debug!("Service returned {} chars", parsed.result.len());
        Ok(parsed.result)
    }
}

/// Exponential backoff after the given failed attempt: 1s, 2s, 4s, ... capped
fn backoff_delay(attempt: u32) -> Duration {
    let secs = 2u64.saturating_pow(attempt.saturating_sub(1));
    Duration::from_secs(secs.min(MAX_BACKOFF_SECS))
}

/// Pull the human-readable message out of an error body
fn server_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse { error: Some(message), .. }) => message,
        Ok(ErrorResponse { detail: Some(message), .. }) => message,
        _ if body.trim().is_empty() => "Request failed".to_string(),
        _ => body.trim().to_string(),
    }
}

impl GenerationService for HttpService {
    type Error = ServiceError;

    async fn generate(&self, prompt: &str, history: &[ChatMessage]) -> Result<String, ServiceError> {
        let request = GenerateRequest {
            prompt,
            conversation_history: history
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        };
        self.post_for_result("/api/ai/generate/", &request).await
    }

    async fn refine(&self, current_draft: &str, user_request: &str) -> Result<String, ServiceError> {
        let request = RefineRequest {
            current_draft,
            user_request,
        };
        self.post_for_result("/api/ai/refine/", &request).await
    }
}
