use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("API key not found. Please select a valid key.")]
    MissingCredential,

    #[error("No response from the model.")]
    EmptyResponse,

    #[error("The model did not generate an image. Try shortening the thumbnail text.")]
    NoImageProduced,

    #[error("Transport error: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("Invalid image input: {0}")]
    InvalidImage(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl GenerationError {
    /// Permission failures are detected by message text, not by status code,
    /// because the host UI keys its credential prompt off the same substrings.
    pub fn is_permission_denied(&self) -> bool {
        let message = self.to_string();
        message.contains("403") || message.contains("PERMISSION_DENIED")
    }

    pub fn is_credential_problem(&self) -> bool {
        matches!(self, GenerationError::MissingCredential) || self.is_permission_denied()
    }

    pub fn transport(message: impl Into<String>) -> Self {
        GenerationError::Transport {
            status: None,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_is_matched_on_message_text() {
        let err = GenerationError::Transport {
            status: Some(403),
            message: "403 Forbidden: {\"error\":{\"status\":\"PERMISSION_DENIED\"}}".into(),
        };
        assert!(err.is_permission_denied());
        assert!(err.is_credential_problem());

        let err = GenerationError::transport("status PERMISSION_DENIED from upstream");
        assert!(err.is_permission_denied());
    }

    #[test]
    fn unrelated_digits_still_match() {
        // The substring contract misfires on any message carrying "403".
        let err = GenerationError::transport("request 14030 timed out");
        assert!(err.is_permission_denied());
    }

    #[test]
    fn other_failures_are_not_credential_problems() {
        assert!(!GenerationError::EmptyResponse.is_credential_problem());
        assert!(!GenerationError::NoImageProduced.is_credential_problem());
        assert!(!GenerationError::transport("500 Internal Server Error").is_credential_problem());
        assert!(GenerationError::MissingCredential.is_credential_problem());
        assert!(!GenerationError::MissingCredential.is_permission_denied());
    }

    #[test]
    fn no_image_message_suggests_shorter_text() {
        let msg = GenerationError::NoImageProduced.to_string();
        assert!(msg.contains("shortening the thumbnail text"));
    }
}
