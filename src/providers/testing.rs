//! Scripted provider for unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::*;

/// Returns the same scripted outcome for every call and records what it saw.
pub(crate) struct ScriptedProvider {
    reply: Result<String, AiError>,
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerationRequest>>,
    api_keys: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub(crate) fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(Ok(text.into()))
    }

    pub(crate) fn failing(error: AiError) -> Self {
        Self::with_reply(Err(error))
    }

    fn with_reply(reply: Result<String, AiError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            api_keys: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<GenerationRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub(crate) fn last_api_key(&self) -> Option<String> {
        self.api_keys.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl GenerativeProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        self.api_keys.lock().unwrap().push(api_key.to_string());

        self.reply.clone().map(|text| GenerationResponse {
            text,
            model: request.model.clone(),
            usage: None,
            finish_reason: Some("STOP".to_string()),
        })
    }
}
