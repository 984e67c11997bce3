//! Core DetailExtractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_response;
use crate::prompt::PromptBuilder;
use crate::types::Extraction;
use lexdraft_domain::GenerationService;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Pulls structured details out of a draft through the generation service
pub struct DetailExtractor<S> {
    service: Arc<S>,
    config: ExtractorConfig,
}

impl<S> Clone for DetailExtractor<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            config: self.config.clone(),
        }
    }
}

impl<S> DetailExtractor<S>
where
    S: GenerationService + Send + Sync,
{
    /// Create a new DetailExtractor
    pub fn new(service: S, config: ExtractorConfig) -> Self {
        Self::with_shared(Arc::new(service), config)
    }

    /// Create a DetailExtractor over a service shared with other components
    pub fn with_shared(service: Arc<S>, config: ExtractorConfig) -> Self {
        Self { service, config }
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract details from a document body
    ///
    /// Returns `Ok(None)` without contacting the service when `content` is
    /// empty. Unusable responses never fail; they degrade through the parse
    /// stages down to a synthesized record.
    pub async fn extract(&self, content: &str) -> Result<Option<Extraction>, ExtractorError> {
        if content.is_empty() {
            debug!("No document content, skipping extraction");
            return Ok(None);
        }

        info!("Starting detail extraction, content length {}", content.len());

        let prompt = PromptBuilder::new(content).build();
        debug!("Prompt length: {} chars", prompt.len());

        // Runs to completion; only the transport bounds how long this waits
        let response = self.call_service(&prompt).await?;

        debug!("Service response length: {} chars", response.len());

        let extraction = parse_response(&response, content, self.config.preview_chars);

        info!(
            "Extraction complete: {} details via {} stage",
            extraction.details.len(),
            extraction.stage
        );

        Ok(Some(extraction))
    }

    async fn call_service(&self, prompt: &str) -> Result<String, ExtractorError> {
        self.service.generate(prompt, &[]).await.map_err(|e| {
            warn!("Extraction request failed: {}", e);
            ExtractorError::Service(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParseStage;
    use lexdraft_domain::ChatMessage;
    use lexdraft_llm::{MockService, ServiceError};

    #[tokio::test]
    async fn test_empty_content_skips_service() {
        let service = MockService::new(r#"{"Date": "2024-01-01"}"#);
        let extractor = DetailExtractor::new(service.clone(), ExtractorConfig::default());

        let result = extractor.extract("").await.unwrap();

        assert!(result.is_none());
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn test_prompt_is_sent_with_empty_history() {
        let service = MockService::new("{}");
        let extractor = DetailExtractor::new(service.clone(), ExtractorConfig::default());

        extractor.extract("LEASE AGREEMENT").await.unwrap();

        let prompt = service.last_prompt().unwrap();
        assert!(prompt.contains("LEASE AGREEMENT"));
        assert!(prompt.starts_with("Please analyze this legal document"));
        assert_eq!(service.last_history_len(), 0);
    }

    #[tokio::test]
    async fn test_service_error_is_reported() {
        let mut service = MockService::default();
        service.add_error(PromptBuilder::new("doc").build());
        let extractor = DetailExtractor::new(service, ExtractorConfig::default());

        let err = extractor.extract("doc").await.unwrap_err();
        assert_eq!(err, ExtractorError::Service("Mock error".to_string()));
    }

    /// Answers every call with an HTTP error
    struct RejectingService;

    impl GenerationService for RejectingService {
        type Error = ServiceError;

        async fn generate(&self, _prompt: &str, _history: &[ChatMessage]) -> Result<String, ServiceError> {
            Err(ServiceError::Server {
                status: 400,
                message: "Prompt is required".to_string(),
            })
        }

        async fn refine(&self, _draft: &str, _request: &str) -> Result<String, ServiceError> {
            Err(ServiceError::Mock("unused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_server_message_is_passed_through() {
        let extractor = DetailExtractor::new(RejectingService, ExtractorConfig::default());

        let err = extractor.extract("doc").await.unwrap_err();
        assert_eq!(err, ExtractorError::Service("Prompt is required".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_service_is_awaited_past_timeout_secs() {
        let (service, release) = MockService::new(r#"{"Date": "2024-01-01"}"#).with_hold();
        let config = ExtractorConfig {
            timeout_secs: 5,
            ..Default::default()
        };
        let extractor = DetailExtractor::new(service, config);

        let (extraction, _) = tokio::join!(extractor.extract("doc"), async {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
            release.notify_one();
        });

        let extraction = extraction.unwrap().unwrap();
        assert_eq!(extraction.details.get("Date"), Some("2024-01-01"));
    }

    #[tokio::test]
    async fn test_stage_is_reported() {
        let service = MockService::new("Party 1 Name: Alice");
        let extractor = DetailExtractor::new(service, ExtractorConfig::default());

        let extraction = extractor.extract("doc").await.unwrap().unwrap();
        assert_eq!(extraction.stage, ParseStage::HeuristicLines);
    }
}
