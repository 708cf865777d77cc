pub mod transcript;

use std::sync::Arc;

use crate::client::AiClient;

pub use transcript::{ChatMessage, Sender, Transcript};

/// Persona sent as the system instruction on every coaching call
pub const COACH_PERSONA: &str = "\
You are 'Tangira Coach', a friendly, encouraging digital skills mentor for Zimbabwean youth.
Your goal is to help them learn, execute gigs, and improve their Skills Credit Score.

Specific duties:
1. Give specific feedback on gig tasks (e.g. \"Your Excel formula looks wrong, try VLOOKUP\").
2. Explain concepts simply.
3. Keep answers short and practical.
4. Use local context (EcoCash, WhatsApp bundles, Econet) where relevant.

Be motivating but professional.";

/// Reply when the learner sent nothing
pub const EMPTY_MESSAGE_FALLBACK: &str =
    "Ask me anything about your gigs, courses or skills and I'll help you out.";

/// Reply when the model answered with nothing
pub const ENCOURAGEMENT_FALLBACK: &str = "Keep going! You're doing great.";

/// Reply for any failure, including a missing API key
pub const CONNECTIVITY_FALLBACK: &str =
    "I'm having trouble connecting to the network right now. Try again later!";

/// Best-effort learner coach; always produces something to display
#[derive(Debug, Clone)]
pub struct Coach {
    client: Arc<AiClient>,
}

impl Coach {
    pub fn new(client: Arc<AiClient>) -> Self {
        Self { client }
    }

    /// One stateless coaching turn.
    pub async fn coach(&self, message: &str) -> String {
        if message.trim().is_empty() {
            return EMPTY_MESSAGE_FALLBACK.to_string();
        }

        match self.client.generate_text(message, COACH_PERSONA).await {
            Ok(text) => {
                let reply = text.trim();
                if reply.is_empty() {
                    tracing::debug!("coach returned empty text");
                    ENCOURAGEMENT_FALLBACK.to_string()
                } else {
                    reply.to_string()
                }
            }
            Err(e) if e.is_configuration() => {
                tracing::debug!(reason = e.reason_code(), "AI not configured; using fallback reply");
                CONNECTIVITY_FALLBACK.to_string()
            }
            Err(e) => {
                tracing::warn!(reason = e.reason_code(), error = %e, "coach request failed");
                CONNECTIVITY_FALLBACK.to_string()
            }
        }
    }

    /// Record the learner's turn and the coach's reply in `transcript`.
    ///
    /// Blank input is answered but not recorded as a learner turn.
    pub async fn respond<'t>(&self, transcript: &'t mut Transcript, message: &str) -> &'t ChatMessage {
        if !message.trim().is_empty() {
            transcript.push_user(message.trim());
        }
        let reply = self.coach(message).await;
        transcript.push_coach(reply)
    }
}
