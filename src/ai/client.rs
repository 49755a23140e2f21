use super::prompts::PEG_SYSTEM_PROMPT;
use super::{gemini, openai};
use crate::config::AiConfig;
use crate::error::PegError;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MIN_MAX_TOKENS: u32 = 100;
pub const MAX_MAX_TOKENS: u32 = 4000;
pub const MIN_TEMPERATURE: f64 = 0.0;
pub const MAX_TEMPERATURE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenAi => "openai",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Provider::Gemini => "Gemini",
            Provider::OpenAi => "OpenAI",
        }
    }

    /// Environment variable holding the process-wide key.
    pub fn env_var(self) -> &'static str {
        match self {
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Runtime parameters for a single test call.
#[derive(Debug, Clone, PartialEq)]
pub struct InvokeOptions {
    /// Falls back to the provider's configured model.
    pub model: Option<String>,
    pub max_tokens: u32,
    pub temperature: f64,
    /// Falls back to the process-wide key.
    pub api_key: Option<String>,
}

impl Default for InvokeOptions {
    fn default() -> Self {
        Self {
            model: None,
            max_tokens: 1000,
            temperature: 0.7,
            api_key: None,
        }
    }
}

impl InvokeOptions {
    /// `(max_tokens, temperature)` clamped to the accepted ranges.
    pub fn bounded(&self) -> (u32, f64) {
        let max_tokens = self.max_tokens.clamp(MIN_MAX_TOKENS, MAX_MAX_TOKENS);
        let temperature = if self.temperature.is_nan() {
            InvokeOptions::default().temperature
        } else {
            self.temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
        };
        if max_tokens != self.max_tokens || temperature != self.temperature {
            log::warn!(
                "Clamped max_tokens {} -> {max_tokens}, temperature {} -> {temperature}",
                self.max_tokens,
                self.temperature
            );
        }
        (max_tokens, temperature)
    }
}

/// Everything a provider needs to build one request.
pub(super) struct Call<'a> {
    pub base_url: &'a str,
    pub api_key: &'a str,
    pub model: &'a str,
    pub system_prompt: &'a str,
    pub message: &'a str,
    pub max_tokens: u32,
    pub temperature: f64,
}

/// Single pass-through adapter to a hosted text model. No retries, no cache.
pub struct AiClient {
    http: reqwest::Client,
    config: AiConfig,
}

impl AiClient {
    pub fn new(config: AiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn has_api_key(&self, provider: Provider) -> bool {
        self.config.resolve_key(provider, None).is_some()
    }

    /// Sends `compiled_prompt` as the system instruction and `message` as
    /// the user turn, returning the model's text. A blank prompt falls back
    /// to [`PEG_SYSTEM_PROMPT`].
    pub async fn invoke(
        &self,
        provider: Provider,
        compiled_prompt: &str,
        message: &str,
        options: &InvokeOptions,
    ) -> Result<String, PegError> {
        let api_key = self
            .config
            .resolve_key(provider, options.api_key.as_deref())
            .ok_or(PegError::MissingCredential { provider })?;

        let settings = self.config.provider(provider);
        let model = options
            .model
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(settings.model.as_str());
        let (max_tokens, temperature) = options.bounded();

        let call = Call {
            base_url: settings.base_url.trim_end_matches('/'),
            api_key: &api_key,
            model,
            system_prompt: if compiled_prompt.trim().is_empty() {
                PEG_SYSTEM_PROMPT
            } else {
                compiled_prompt
            },
            message,
            max_tokens,
            temperature,
        };

        log::info!(
            "Testing prompt with {provider} ({model}, max_tokens={max_tokens}, temperature={temperature})"
        );

        let request = match provider {
            Provider::Gemini => gemini::build_request(&self.http, &call),
            Provider::OpenAi => openai::build_request(&self.http, &call),
        };
        let res = request.send().await?;

        if !res.status().is_success() {
            let status = res.status();
            let err_text = res.text().await.unwrap_or_default();
            log::error!("{provider} API Error {status}: {err_text}");
            return Err(classify_failure(provider, status, &err_text));
        }

        let body: Value = res.json().await?;
        let text = match provider {
            Provider::Gemini => gemini::extract_text(&body),
            Provider::OpenAi => openai::extract_text(&body),
        };

        text.ok_or_else(|| PegError::Provider {
            provider,
            message: "No text content returned".into(),
        })
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

/// Maps a non-success response to the failure category shown to the user.
pub fn classify_failure(provider: Provider, status: StatusCode, body: &str) -> PegError {
    let message = error_message(body);
    let lowered = body.to_ascii_lowercase();

    let bad_key = matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        || lowered.contains("api_key_invalid")
        || lowered.contains("api key not valid")
        || lowered.contains("invalid_api_key");
    let exhausted = status == StatusCode::TOO_MANY_REQUESTS
        || lowered.contains("resource_exhausted")
        || lowered.contains("insufficient_quota");

    if bad_key {
        PegError::InvalidCredential { provider, message }
    } else if exhausted {
        PegError::RateLimited { provider, message }
    } else if message.is_empty() {
        PegError::Provider {
            provider,
            message: status.to_string(),
        }
    } else {
        PegError::Provider { provider, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_are_clamped_to_bounds() {
        let opts = InvokeOptions {
            max_tokens: 50_000,
            temperature: 3.5,
            ..Default::default()
        };
        assert_eq!(opts.bounded(), (4000, 2.0));

        let opts = InvokeOptions {
            max_tokens: 10,
            temperature: -1.0,
            ..Default::default()
        };
        assert_eq!(opts.bounded(), (100, 0.0));

        assert_eq!(InvokeOptions::default().bounded(), (1000, 0.7));
    }

    #[test]
    fn classifies_auth_failures() {
        let err = classify_failure(Provider::OpenAi, StatusCode::UNAUTHORIZED, "{}");
        assert!(matches!(err, PegError::InvalidCredential { .. }));

        let gemini_body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        let err = classify_failure(Provider::Gemini, StatusCode::BAD_REQUEST, gemini_body);
        match err {
            PegError::InvalidCredential { message, .. } => {
                assert!(message.starts_with("API key not valid"))
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn classifies_quota_failures() {
        let err = classify_failure(Provider::Gemini, StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert!(matches!(err, PegError::RateLimited { .. }));

        let body =
            r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota"}}"#;
        let err = classify_failure(Provider::OpenAi, StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, PegError::RateLimited { .. }));
    }

    #[test]
    fn other_failures_carry_the_message() {
        let err = classify_failure(
            Provider::OpenAi,
            StatusCode::INTERNAL_SERVER_ERROR,
            "upstream died",
        );
        match err {
            PegError::Provider { message, .. } => assert_eq!(message, "upstream died"),
            other => panic!("unexpected {other:?}"),
        }

        let err = classify_failure(Provider::OpenAi, StatusCode::BAD_GATEWAY, "");
        match err {
            PegError::Provider { message, .. } => assert_eq!(message, "502 Bad Gateway"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn provider_names() {
        assert_eq!(Provider::OpenAi.to_string(), "OpenAI");
        assert_eq!(Provider::Gemini.as_str(), "gemini");
        assert_eq!(serde_json::to_string(&Provider::OpenAi).unwrap(), "\"openai\"");
    }
}
