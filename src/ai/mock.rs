use super::AnalysisService;
use crate::models::{AnalysisRequest, AnalysisResult, ConversationPrimer};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// What the mock saw for one submitted request.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub caption: String,
    pub media_type: String,
    pub byte_len: usize,
    pub primer_turns: usize,
}

/// Test double for [`AnalysisService`] that records every call and replays
/// configured responses. Clones share state so tests can keep a probe handle.
#[derive(Clone)]
pub struct MockAnalysisClient {
    responses: Arc<Mutex<Vec<String>>>,
    error_message: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockAnalysisClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            error_message: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    /// Make every subsequent call fail as a remote service error.
    pub fn with_error(self, message: String) -> Self {
        *self.error_message.lock().unwrap() = Some(message);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAnalysisClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisService for MockAnalysisClient {
    async fn submit(
        &self,
        primer: &ConversationPrimer,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(RecordedCall {
            caption: request.caption.clone(),
            media_type: request.image.media_type.clone(),
            byte_len: request.image.bytes.len(),
            primer_turns: primer.turns().len(),
        });
        let count = calls.len();
        drop(calls);

        if let Some(message) = self.error_message.lock().unwrap().clone() {
            return Err(Error::RemoteService(message));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(AnalysisResult {
                text: "Mock analysis: no findings.".to_string(),
            })
        } else {
            let index = (count - 1) % responses.len();
            Ok(AnalysisResult {
                text: responses[index].clone(),
            })
        }
    }
}
