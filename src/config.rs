use crate::ai::client::Provider;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const GEMINI_MODEL: &str = "gemini-1.5-pro";
const OPENAI_MODEL: &str = "gpt-4";

/// Endpoint, default model and process-wide key for one provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

/// Process-wide settings injected into the AI client.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub gemini: ProviderConfig,
    pub openai: ProviderConfig,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini: ProviderConfig {
                base_url: GEMINI_BASE_URL.to_string(),
                model: GEMINI_MODEL.to_string(),
                api_key: None,
            },
            openai: ProviderConfig {
                base_url: OPENAI_BASE_URL.to_string(),
                model: OPENAI_MODEL.to_string(),
                api_key: None,
            },
        }
    }
}

impl AiConfig {
    /// Reads keys and overrides from the environment (and `.env`, if present).
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        config.gemini.api_key = read(Provider::Gemini.env_var());
        config.openai.api_key = read(Provider::OpenAi.env_var());

        if let Some(url) = read("GEMINI_BASE_URL") {
            config.gemini.base_url = url;
        }
        if let Some(url) = read("OPENAI_BASE_URL") {
            config.openai.base_url = url;
        }
        if let Some(model) = read("GEMINI_MODEL") {
            config.gemini.model = model;
        }
        if let Some(model) = read("OPENAI_MODEL") {
            config.openai.model = model;
        }
        config
    }

    pub fn provider(&self, provider: Provider) -> &ProviderConfig {
        match provider {
            Provider::Gemini => &self.gemini,
            Provider::OpenAi => &self.openai,
        }
    }

    /// Per-call key first, then the process-wide key. Blank keys are ignored.
    pub fn resolve_key(&self, provider: Provider, explicit: Option<&str>) -> Option<String> {
        explicit
            .filter(|k| !k.trim().is_empty())
            .map(str::to_string)
            .or_else(|| self.provider(provider).api_key.clone())
    }
}
