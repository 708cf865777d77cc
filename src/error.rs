/// Failures surfaced by the shared AI client.
///
/// Adapters never let these escape to the UI; they are mapped to an empty
/// proposal list or a fallback reply at the adapter boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AiError {
    #[error("API key not configured")]
    MissingCredential,

    #[error("Prompt is empty")]
    EmptyPrompt,

    #[error("Network error: {0}")]
    Transport(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl AiError {
    /// Stable, machine-readable reason for the failure.
    pub fn reason_code(&self) -> &'static str {
        match self {
            AiError::MissingCredential => "missing-credential",
            AiError::EmptyPrompt => "empty-prompt",
            AiError::Transport(_) => "transport",
            AiError::Api { .. } => "api-status",
            AiError::Decode(_) => "decode",
        }
    }

    /// True for configuration problems that no retry will fix.
    pub fn is_configuration(&self) -> bool {
        matches!(self, AiError::MissingCredential)
    }
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AiError::Decode(err.to_string())
        } else {
            AiError::Transport(err.to_string())
        }
    }
}

/// Outcome of a single adapter call.
pub type AdapterResult<T> = Result<T, AiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes_are_stable() {
        assert_eq!(AiError::MissingCredential.reason_code(), "missing-credential");
        assert_eq!(AiError::Transport("reset".into()).reason_code(), "transport");
        assert_eq!(
            AiError::Api { status: 503, message: "overloaded".into() }.reason_code(),
            "api-status"
        );
        assert_eq!(AiError::Decode("eof".into()).reason_code(), "decode");
    }

    #[test]
    fn test_only_missing_credential_is_configuration() {
        assert!(AiError::MissingCredential.is_configuration());
        assert!(!AiError::Transport("timeout".into()).is_configuration());
    }
}
