//! Lexdraft Generation Service Layer
//!
//! Implementations of the `GenerationService` trait from `lexdraft-domain`.
//!
//! # Providers
//!
//! - `MockService`: Deterministic, scriptable service for testing
//! - `HttpService`: REST client for the LegalBot AI endpoints
//!
//! # Examples
//!
//! ```
//! use lexdraft_llm::MockService;
//! use lexdraft_domain::GenerationService;
//!
//! # async fn example() {
//! let service = MockService::new("Hello from the service!");
//! let result = service.generate("test prompt", &[]).await.unwrap();
//! assert_eq!(result, "Hello from the service!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod http;

use lexdraft_domain::{ChatMessage, GenerationService};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tokio::sync::Notify;

pub use http::HttpService;

/// Errors that can occur while talking to the generation service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Network or connection failure before a response arrived
    #[error("Communication error: {0}")]
    Transport(String),

    /// Server answered with a non-success status
    ///
    /// Displays the server's message alone; the status is only logged.
    #[error("{message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Server-supplied error message, or the raw body
        message: String,
    },

    /// Success status but the body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Scripted failure from `MockService`
    #[error("{0}")]
    Mock(String),
}

/// Marker response that makes `MockService` fail for a given prompt
const ERROR_MARKER: &str = "ERROR";

#[derive(Debug, Default)]
struct MockState {
    generate_responses: HashMap<String, String>,
    refine_response: Option<String>,
    refine_error: Option<String>,
    generate_calls: usize,
    refine_calls: usize,
    last_prompt: Option<String>,
    last_history_len: usize,
    last_refine: Option<(String, String)>,
}

/// Mock generation service for deterministic testing
///
/// Returns pre-configured responses without any network calls. Clones share
/// state, so a clone kept by a test observes calls made through another.
///
/// # Examples
///
/// ```
/// use lexdraft_llm::MockService;
/// use lexdraft_domain::GenerationService;
///
/// # async fn example() {
/// let service = MockService::new("fixed").with_refine_response("refined draft");
/// assert_eq!(service.generate("any prompt", &[]).await.unwrap(), "fixed");
/// assert_eq!(service.refine("draft", "shorter").await.unwrap(), "refined draft");
/// assert_eq!(service.call_count(), 2);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockService {
    default_response: String,
    state: Arc<Mutex<MockState>>,
    hold: Option<Arc<Notify>>,
}

impl MockService {
    /// Create a MockService with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            state: Arc::new(Mutex::new(MockState::default())),
            hold: None,
        }
    }

    /// Set the text returned by `refine`
    ///
    /// Without one, `refine` echoes the draft with the request appended.
    pub fn with_refine_response(self, response: impl Into<String>) -> Self {
        self.state().refine_response = Some(response.into());
        self
    }

    /// Make every `refine` call fail with the given message
    pub fn with_refine_error(self, message: impl Into<String>) -> Self {
        self.state().refine_error = Some(message.into());
        self
    }

    /// Park every call until the returned handle is notified
    ///
    /// Each `notify_one` releases one pending call.
    pub fn with_hold(mut self) -> (Self, Arc<Notify>) {
        let notify = Arc::new(Notify::new());
        self.hold = Some(Arc::clone(&notify));
        (self, notify)
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.state()
            .generate_responses
            .insert(prompt.into(), response.into());
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.state()
            .generate_responses
            .insert(prompt.into(), ERROR_MARKER.to_string());
    }

    /// Total number of calls to `generate` and `refine`
    pub fn call_count(&self) -> usize {
        let state = self.state();
        state.generate_calls + state.refine_calls
    }

    /// Number of `generate` calls
    pub fn generate_calls(&self) -> usize {
        self.state().generate_calls
    }

    /// Number of `refine` calls
    pub fn refine_calls(&self) -> usize {
        self.state().refine_calls
    }

    /// Prompt passed to the most recent `generate` call
    pub fn last_prompt(&self) -> Option<String> {
        self.state().last_prompt.clone()
    }

    /// History length passed to the most recent `generate` call
    pub fn last_history_len(&self) -> usize {
        self.state().last_history_len
    }

    /// `(current_draft, user_request)` of the most recent `refine` call
    pub fn last_refine(&self) -> Option<(String, String)> {
        self.state().last_refine.clone()
    }

    /// Reset the call counters
    pub fn reset_call_count(&self) {
        let mut state = self.state();
        state.generate_calls = 0;
        state.refine_calls = 0;
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A poisoned lock only means another test thread panicked mid-call
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn wait_for_release(&self) {
        if let Some(hold) = &self.hold {
            hold.notified().await;
        }
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl GenerationService for MockService {
    type Error = ServiceError;

    async fn generate(&self, prompt: &str, history: &[ChatMessage]) -> Result<String, ServiceError> {
        let scripted = {
            let mut state = self.state();
            state.generate_calls += 1;
            state.last_prompt = Some(prompt.to_string());
            state.last_history_len = history.len();
            state.generate_responses.get(prompt).cloned()
        };

        self.wait_for_release().await;

        match scripted {
            Some(response) if response == ERROR_MARKER => {
                Err(ServiceError::Mock("Mock error".to_string()))
            }
            Some(response) => Ok(response),
            None => Ok(self.default_response.clone()),
        }
    }

    async fn refine(&self, current_draft: &str, user_request: &str) -> Result<String, ServiceError> {
        let (response, error) = {
            let mut state = self.state();
            state.refine_calls += 1;
            state.last_refine = Some((current_draft.to_string(), user_request.to_string()));
            (state.refine_response.clone(), state.refine_error.clone())
        };

        self.wait_for_release().await;

        if let Some(message) = error {
            return Err(ServiceError::Mock(message));
        }
        Ok(response.unwrap_or_else(|| format!("{}\n\n{}", current_draft, user_request)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_service_default() {
        let service = MockService::new("Test response");
        let result = service.generate("any prompt", &[]).await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_service_specific_responses() {
        let mut service = MockService::default();
        service.add_response("hello", "world");
        service.add_response("foo", "bar");

        assert_eq!(service.generate("hello", &[]).await.unwrap(), "world");
        assert_eq!(service.generate("foo", &[]).await.unwrap(), "bar");
        assert_eq!(
            service.generate("unknown", &[]).await.unwrap(),
            "Default mock response"
        );
    }

    #[tokio::test]
    async fn test_mock_service_call_count() {
        let service = MockService::new("test");
        assert_eq!(service.call_count(), 0);

        service.generate("prompt1", &[]).await.unwrap();
        service.refine("draft", "change").await.unwrap();
        assert_eq!(service.generate_calls(), 1);
        assert_eq!(service.refine_calls(), 1);
        assert_eq!(service.call_count(), 2);

        service.reset_call_count();
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_service_error() {
        let mut service = MockService::default();
        service.add_error("bad prompt");

        let result = service.generate("bad prompt", &[]).await;
        assert!(matches!(result, Err(ServiceError::Mock(_))));
    }

    #[tokio::test]
    async fn test_mock_service_records_requests() {
        let service = MockService::new("ok");
        let history = vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")];

        service.generate("draft a lease", &history).await.unwrap();
        service.refine("the draft", "add a clause").await.unwrap();

        assert_eq!(service.last_prompt().as_deref(), Some("draft a lease"));
        assert_eq!(service.last_history_len(), 2);
        assert_eq!(
            service.last_refine(),
            Some(("the draft".to_string(), "add a clause".to_string()))
        );
    }

    #[tokio::test]
    async fn test_mock_refine_echo_and_error() {
        let service = MockService::default();
        assert_eq!(service.refine("draft", "more").await.unwrap(), "draft\n\nmore");

        let failing = MockService::default().with_refine_error("quota exceeded");
        let err = failing.refine("draft", "more").await.unwrap_err();
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[tokio::test]
    async fn test_mock_service_clone_shares_state() {
        let service1 = MockService::new("test");
        let service2 = service1.clone();

        service1.generate("test", &[]).await.unwrap();
        assert_eq!(service1.call_count(), 1);
        assert_eq!(service2.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_hold_releases_on_notify() {
        let (service, release) = MockService::new("held").with_hold();
        release.notify_one();
        assert_eq!(service.generate("p", &[]).await.unwrap(), "held");
    }

    #[test]
    fn test_server_error_display() {
        let err = ServiceError::Server {
            status: 503,
            message: "AI backend unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "AI backend unavailable");
    }
}
