pub mod gig;
pub mod language;
pub mod prompt;

use std::sync::Arc;

use regex::Regex;
use serde_json::value::RawValue;

use crate::client::AiClient;
use crate::error::{AdapterResult, AiError};

pub use gig::{Difficulty, Gig, GigProposal, GigStatus, GigValidationError};
pub use language::{Language, UnknownLanguage};

use gig::RawGig;

/// Upper bound on proposals returned per request
pub const MAX_PROPOSALS: usize = 3;

lazy_static::lazy_static! {
    static ref CODE_FENCE: Regex =
        Regex::new(r"(?s)^\s*```(?:json)?\s*(.*?)\s*```\s*$").expect("valid fence pattern");
}

/// Turns an SME's free-text task description into structured gig proposals
#[derive(Debug, Clone)]
pub struct TaskShaper {
    client: Arc<AiClient>,
}

impl TaskShaper {
    pub fn new(client: Arc<AiClient>) -> Self {
        Self { client }
    }

    /// Shape a task into at most [`MAX_PROPOSALS`] valid proposals.
    ///
    /// Never fails: any error yields an empty list, which callers should
    /// present as "try rephrasing or adding detail".
    pub async fn shape_task(&self, description: &str, language: Language) -> Vec<GigProposal> {
        match self.try_shape_task(description, language).await {
            Ok(proposals) => proposals,
            Err(e) if e.is_configuration() => {
                tracing::debug!(reason = e.reason_code(), "AI not configured; no gig proposals");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(reason = e.reason_code(), error = %e, "task shaping failed");
                Vec::new()
            }
        }
    }

    /// Same as [`TaskShaper::shape_task`] but keeps the failure reason.
    pub async fn try_shape_task(
        &self,
        description: &str,
        language: Language,
    ) -> AdapterResult<Vec<GigProposal>> {
        if description.trim().is_empty() {
            tracing::debug!("empty task description; skipping model call");
            return Ok(Vec::new());
        }

        let directive = prompt::build_directive(description, language);
        let raw = self
            .client
            .generate_structured(&directive, &prompt::proposal_schema())
            .await?;

        let proposals = decode_proposals(&raw)?;
        tracing::info!(count = proposals.len(), language = %language, "shaped task into gig proposals");
        Ok(proposals)
    }
}

/// Remove a surrounding Markdown code fence, if the model added one.
fn strip_code_fence(text: &str) -> &str {
    CODE_FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or_else(|| text.trim())
}

/// Decode model output into validated proposals.
///
/// The array itself must parse or the whole batch fails. Items are decoded
/// one by one, so an item that breaks an invariant (including a number JSON
/// can't represent) is dropped on its own. Survivors are cut to
/// [`MAX_PROPOSALS`] in the order the model returned them.
pub(crate) fn decode_proposals(raw: &str) -> AdapterResult<Vec<GigProposal>> {
    let items: Vec<Box<RawValue>> = serde_json::from_str(strip_code_fence(raw))
        .map_err(|e| AiError::Decode(format!("expected a JSON array of gigs: {}", e)))?;

    let total = items.len();
    let mut dropped = 0usize;
    let proposals: Vec<GigProposal> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match RawGig::parse(item.get()).and_then(RawGig::validate) {
            Ok(proposal) => Some(proposal),
            Err(e) => {
                tracing::debug!(index, error = %e, "dropping invalid gig proposal");
                dropped += 1;
                None
            }
        })
        .take(MAX_PROPOSALS)
        .collect();

    if dropped > 0 {
        tracing::warn!(
            received = total,
            dropped,
            kept = proposals.len(),
            "model returned invalid gig proposals"
        );
    }

    Ok(proposals)
}
