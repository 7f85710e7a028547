//! Data models and structures
//!
//! Defines the conversation primer, the per-request payload/result types, and
//! application configuration.

use crate::prompts;
use crate::{Error, Result};
use std::time::Duration;

/// Media types the analyzer accepts. Anything else is rejected before a
/// request is made.
pub const ACCEPTED_MEDIA_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

const DEFAULT_MODEL: &str = "gemini-1.5-pro";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One turn of the primed conversation, using the wire role names
/// (`user` for the instruction issuer, `model` for the acknowledgement).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: &'static str,
    pub text: &'static str,
}

/// Fixed instruction/acknowledgement turn pair that establishes the
/// assistant's role before any user content is sent.
///
/// Construction is pure and deterministic; the primer is immutable and scoped
/// to one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationPrimer {
    turns: [Turn; 2],
}

impl ConversationPrimer {
    pub fn new() -> Self {
        Self {
            turns: [
                Turn {
                    role: "user",
                    text: prompts::ANALYSIS_SYSTEM,
                },
                Turn {
                    role: "model",
                    text: prompts::ANALYSIS_ACK,
                },
            ],
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }
}

impl Default for ConversationPrimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw upload bytes plus the declared media type.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub media_type: String,
}

impl ImagePayload {
    pub fn new(bytes: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            bytes,
            media_type: media_type.into(),
        }
    }

    /// Reject empty uploads and unsupported media types before any network
    /// call is made.
    pub fn validate(&self) -> Result<()> {
        if self.bytes.is_empty() {
            return Err(Error::InvalidInput("no image data supplied".to_string()));
        }
        if !ACCEPTED_MEDIA_TYPES.contains(&self.media_type.as_str()) {
            return Err(Error::InvalidInput(format!(
                "unsupported media type '{}' (accepted: {})",
                self.media_type,
                ACCEPTED_MEDIA_TYPES.join(", ")
            )));
        }
        Ok(())
    }
}

/// One outbound analysis message: the fixed caption plus the image as inline
/// binary content. Constructed fresh per user action and sent exactly once.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub caption: String,
    pub image: ImagePayload,
}

impl AnalysisRequest {
    pub fn new(image: ImagePayload) -> Self {
        Self {
            caption: prompts::ANALYSIS_CAPTION.to_string(),
            image,
        }
    }
}

/// Verbatim response text from the remote model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub text: String,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub model: String,
    pub request_timeout: Duration,
}

impl Config {
    /// Resolve configuration from the process environment, loading a local
    /// `.env` file first when present. Platform-provided secrets and env
    /// files both surface as environment variables, so this is the single
    /// entry point for either deployment style.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary lookup, so tests can supply
    /// values without mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config("GEMINI_API_KEY not set".to_string()))?;

        let model = lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                Error::Config(format!("REQUEST_TIMEOUT_SECS is not a number: '{}'", raw))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            gemini_api_key,
            model,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_primer_is_deterministic() {
        assert_eq!(ConversationPrimer::new(), ConversationPrimer::new());
    }

    #[test]
    fn test_primer_has_instruction_then_acknowledgement() {
        let primer = ConversationPrimer::new();
        let turns = primer.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, "user");
        assert_eq!(turns[0].text, crate::prompts::ANALYSIS_SYSTEM);
        assert_eq!(turns[1].role, "model");
        assert_eq!(turns[1].text, crate::prompts::ANALYSIS_ACK);
    }

    #[test]
    fn test_validate_accepts_jpeg_and_png() {
        for media_type in ACCEPTED_MEDIA_TYPES {
            let payload = ImagePayload::new(vec![1, 2, 3], media_type);
            assert!(payload.validate().is_ok());
        }
    }

    #[test]
    fn test_validate_rejects_empty_bytes() {
        let payload = ImagePayload::new(vec![], "image/png");
        let err = payload.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_validate_rejects_unsupported_media_type() {
        let payload = ImagePayload::new(vec![1], "image/webp");
        let err = payload.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("image/webp"));
    }

    #[test]
    fn test_analysis_request_carries_fixed_caption() {
        let request = AnalysisRequest::new(ImagePayload::new(vec![1], "image/png"));
        assert_eq!(request.caption, "Please analyze this medical image:");
    }

    #[test]
    fn test_config_requires_api_key() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_config_rejects_blank_api_key() {
        let err = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "key")])).unwrap();
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "key"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_config_rejects_bad_timeout() {
        let err = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "key"),
            ("REQUEST_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
