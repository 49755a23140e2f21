use crate::ai::client::Provider;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PegError {
    #[error("No API key configured for {provider}")]
    MissingCredential { provider: Provider },

    #[error("{provider} rejected the API key: {message}")]
    InvalidCredential { provider: Provider, message: String },

    #[error("{provider} quota or rate limit exceeded: {message}")]
    RateLimited { provider: Provider, message: String },

    #[error("{provider} error: {message}")]
    Provider { provider: Provider, message: String },

    #[error("HTTP Error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Prompt is empty")]
    EmptyPrompt,

    #[error("Invalid update: {0}")]
    InvalidUpdate(String),
}

impl PegError {
    /// Text suitable for showing next to the action that failed.
    pub fn user_message(&self) -> String {
        match self {
            PegError::MissingCredential { provider } => format!(
                "{} API key not found. Set {} or pass a key for this request.",
                provider.display_name(),
                provider.env_var()
            ),
            PegError::InvalidCredential { provider, .. } => format!(
                "{} API key is invalid or was rejected. Check the key and try again.",
                provider.display_name()
            ),
            PegError::RateLimited { provider, .. } => format!(
                "{} quota or rate limit exceeded. Please try again later.",
                provider.display_name()
            ),
            PegError::EmptyPrompt => {
                "Prompt is empty. Fill in the required fields first.".to_string()
            }
            other => format!("Error: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_names_provider_and_variable() {
        let msg = PegError::MissingCredential {
            provider: Provider::OpenAi,
        }
        .user_message();
        assert!(msg.contains("OpenAI"));
        assert!(msg.contains("OPENAI_API_KEY"));
    }

    #[test]
    fn rate_limit_asks_to_retry_later() {
        let err = PegError::RateLimited {
            provider: Provider::Gemini,
            message: "RESOURCE_EXHAUSTED".into(),
        };
        assert!(err.user_message().contains("try again later"));
    }

    #[test]
    fn generic_errors_keep_underlying_message() {
        let err = PegError::Provider {
            provider: Provider::Gemini,
            message: "model overloaded".into(),
        };
        assert_eq!(err.user_message(), "Error: Gemini error: model overloaded");
    }
}
