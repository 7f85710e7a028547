//! AI service integration for medical image analysis
//!
//! Provides the transport seam between the session layer and the remote
//! generative-AI model, plus a mock implementation for tests.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::GeminiAnalysisClient;
pub use mock::MockAnalysisClient;

use crate::models::{AnalysisRequest, AnalysisResult, ConversationPrimer};
use crate::Result;
use async_trait::async_trait;

/// Submits one analysis message against a primed conversation and returns the
/// model's text response. Implementations make exactly one outbound call per
/// invocation and never retry.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn submit(
        &self,
        primer: &ConversationPrimer,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult>;
}
