use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AiError;

pub mod gemini;
pub mod schema;

#[cfg(test)]
pub(crate) mod testing;

pub use schema::{Schema, SchemaType};

/// A single generation call, independent of any vendor wire format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    /// Persona or system-level directive, sent apart from the prompt
    pub system_instruction: Option<String>,
    /// When set, the provider must answer with JSON matching this shape
    pub response_schema: Option<Schema>,
}

impl GenerationRequest {
    pub fn text(model: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            prompt: prompt.to_string(),
            system_instruction: None,
            response_schema: None,
        }
    }

    pub fn with_system_instruction(mut self, instruction: &str) -> Self {
        self.system_instruction = Some(instruction.to_string());
        self
    }

    pub fn with_response_schema(mut self, schema: Schema) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn is_structured(&self) -> bool {
        self.response_schema.is_some()
    }
}

/// Response from a generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub text: String,
    pub model: String,
    pub usage: Option<TokenUsage>,
    pub finish_reason: Option<String>,
}

/// Token usage information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Transport-level configuration for a provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Boundary to an external generative model.
///
/// Implementations perform exactly one outbound call per `generate` and never
/// retry. The credential is owned by [`crate::client::AiClient`] and handed in
/// per call, so a provider can be shared between differently keyed clients.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Get provider name
    fn name(&self) -> &str;

    /// Issue one generation request
    async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, AiError>;
}
