use std::fmt;
use std::sync::Arc;

use crate::error::AiError;
use crate::providers::gemini::{GeminiProvider, DEFAULT_BASE_URL};
use crate::providers::{GenerationRequest, GenerativeProvider, ProviderConfig, Schema};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings the shared client needs to reach the model
#[derive(Debug, Clone, PartialEq)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Shared AI client wrapper.
///
/// Owns the credential and model selection and exposes the two primitives the
/// adapters build on. A client constructed without a usable credential never
/// touches the provider: every call fails with [`AiError::MissingCredential`].
pub struct AiClient {
    credential: Option<String>,
    model: String,
    provider: Arc<dyn GenerativeProvider>,
}

impl AiClient {
    pub fn new(config: &AiConfig, provider: Arc<dyn GenerativeProvider>) -> Self {
        let credential = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        if credential.is_none() {
            tracing::warn!(
                provider = provider.name(),
                "no API key configured; AI features will return fallbacks"
            );
        }

        Self {
            credential,
            model: config.model.clone(),
            provider,
        }
    }

    /// Build a client backed by the Gemini REST API
    pub fn from_config(config: &AiConfig) -> anyhow::Result<Self> {
        let provider = GeminiProvider::new(ProviderConfig {
            base_url: Some(config.base_url.clone()),
            timeout_secs: Some(config.timeout_secs),
        })?;

        Ok(Self::new(config, Arc::new(provider)))
    }

    pub fn is_configured(&self) -> bool {
        self.credential.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask for JSON text matching `schema`.
    pub async fn generate_structured(&self, prompt: &str, schema: &Schema) -> Result<String, AiError> {
        let request = GenerationRequest::text(&self.model, prompt).with_response_schema(schema.clone());
        self.dispatch(request).await
    }

    /// Ask for free text, steered by a separate system directive.
    pub async fn generate_text(&self, prompt: &str, system_directive: &str) -> Result<String, AiError> {
        let request = GenerationRequest::text(&self.model, prompt).with_system_instruction(system_directive);
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: GenerationRequest) -> Result<String, AiError> {
        let api_key = self.credential.as_deref().ok_or(AiError::MissingCredential)?;

        if request.prompt.trim().is_empty() {
            return Err(AiError::EmptyPrompt);
        }

        let response = self.provider.generate(api_key, &request).await?;
        Ok(response.text)
    }
}

impl fmt::Debug for AiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiClient")
            .field("provider", &self.provider.name())
            .field("model", &self.model)
            .field("configured", &self.is_configured())
            .finish()
    }
}
