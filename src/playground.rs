use crate::ai::client::{AiClient, InvokeOptions, Provider};
use crate::core::store::FormStore;
use crate::error::PegError;

pub const DEFAULT_TEST_MESSAGE: &str = "Write an article about AI and the future of technology";

/// One "test AI response" action.
#[derive(Debug, Clone)]
pub struct TestRequest {
    pub provider: Provider,
    pub message: String,
    pub options: InvokeOptions,
}

impl TestRequest {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            message: DEFAULT_TEST_MESSAGE.to_string(),
            options: InvokeOptions::default(),
        }
    }
}

/// Runs the store's current prompt against a provider. Only reads the
/// store, so a failed call leaves the form exactly as it was.
pub struct Playground {
    client: AiClient,
}

impl Playground {
    pub fn new(client: AiClient) -> Self {
        Self { client }
    }

    pub fn has_api_key(&self, provider: Provider) -> bool {
        self.client.has_api_key(provider)
    }

    pub async fn run_test(
        &self,
        store: &FormStore,
        request: &TestRequest,
    ) -> Result<String, PegError> {
        let prompt = store.generated_prompt();
        if prompt.trim().is_empty() {
            log::warn!(
                "Test requested while the form is not ready: {:?}",
                store.validation().errors
            );
            return Err(PegError::EmptyPrompt);
        }

        match self
            .client
            .invoke(request.provider, prompt, &request.message, &request.options)
            .await
        {
            Ok(text) => {
                log::info!("{} responded with {} chars", request.provider, text.len());
                Ok(text)
            }
            Err(e) => {
                log::error!("AI test failed: {e}");
                Err(e)
            }
        }
    }
}
