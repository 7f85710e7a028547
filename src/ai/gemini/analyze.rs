use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, InlineData, Part};
use crate::ai::AnalysisService;
use crate::models::{AnalysisRequest, AnalysisResult, ConversationPrimer};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
    response_mime_type: String,
}

impl GenerationConfig {
    // Sampling parameters the analyzer has always run with.
    fn analysis() -> Self {
        Self {
            temperature: 1.0,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
            response_mime_type: "text/plain".to_string(),
        }
    }
}

/// Submits analysis messages to Gemini's `generateContent` endpoint, sending
/// the primer turns as conversation history ahead of the caption + inline
/// image message.
pub struct GeminiAnalysisClient {
    http: GeminiHttpClient,
}

impl GeminiAnalysisClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Self {
        Self::new_with_client(api_key, model, timeout, reqwest::Client::new())
    }

    pub fn new_with_client(
        api_key: String,
        model: String,
        timeout: Duration,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, timeout, client),
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        response.candidates.first().and_then(|c| {
            c.content.parts.iter().find_map(|p| match p {
                Part::Text { text } => Some(text.clone()),
                Part::InlineData { .. } => None,
            })
        })
    }
}

#[async_trait]
impl AnalysisService for GeminiAnalysisClient {
    async fn submit(
        &self,
        primer: &ConversationPrimer,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult> {
        tracing::debug!(
            "Submitting analysis request ({} bytes, {}) via Gemini",
            request.image.bytes.len(),
            request.image.media_type
        );

        use base64::Engine as _;
        let base64_image = base64::engine::general_purpose::STANDARD.encode(&request.image.bytes);

        let mut contents: Vec<Content> = primer
            .turns()
            .iter()
            .map(|turn| Content {
                role: Some(turn.role.to_string()),
                parts: vec![Part::Text {
                    text: turn.text.to_string(),
                }],
            })
            .collect();

        contents.push(Content {
            role: Some("user".to_string()),
            parts: vec![
                Part::Text {
                    text: request.caption.clone(),
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: request.image.media_type.clone(),
                        data: base64_image,
                    },
                },
            ],
        });

        let wire_request = GenerateContentRequest {
            contents,
            generation_config: GenerationConfig::analysis(),
        };

        let response: GenerateContentResponse = self.http.generate_content(&wire_request).await?;

        let text = Self::extract_text(&response).ok_or_else(|| {
            Error::RemoteService("No text in Gemini analysis response".to_string())
        })?;

        Ok(AnalysisResult { text })
    }
}
