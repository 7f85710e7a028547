//! Per-session orchestration: one primed conversation, one request per action.

use crate::ai::{AnalysisService, GeminiAnalysisClient};
use crate::models::{AnalysisRequest, AnalysisResult, Config, ConversationPrimer, ImagePayload};
use crate::Result;
use tracing::info;

/// Explicit session context threaded through every analysis call: the primer
/// built once at startup plus the transport holding the resolved access key.
///
/// Sessions share no mutable state with each other; concurrent users each get
/// their own.
pub struct Session {
    primer: ConversationPrimer,
    service: Box<dyn AnalysisService>,
}

impl Session {
    /// Build a session backed by the real Gemini transport.
    pub fn new(config: &Config) -> Self {
        info!("Analysis model: {}", config.model);
        Self::with_service(Box::new(GeminiAnalysisClient::new(
            config.gemini_api_key.clone(),
            config.model.clone(),
            config.request_timeout,
        )))
    }

    /// Build a session from an injected service, for tests and harnesses.
    pub fn with_service(service: Box<dyn AnalysisService>) -> Self {
        Self {
            primer: ConversationPrimer::new(),
            service,
        }
    }

    pub fn primer(&self) -> &ConversationPrimer {
        &self.primer
    }

    /// Analyze one uploaded image.
    ///
    /// Validates the payload first; invalid input fails here and no outbound
    /// call is made. A valid payload results in exactly one submission, never
    /// retried, with the response text returned unmodified.
    pub async fn analyze(&self, image: ImagePayload) -> Result<AnalysisResult> {
        image.validate()?;

        info!(
            "Analyzing image ({} bytes, {})",
            image.bytes.len(),
            image.media_type
        );

        let request = AnalysisRequest::new(image);
        self.service.submit(&self.primer, &request).await
    }
}
