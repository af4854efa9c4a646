use crate::config::{AiConfig, Provider};
use crate::core::error::SwaboxError;
use crate::providers::factory::ProviderFactory;
use crate::providers::{AiContext, LLMProvider};
use tracing::debug;

/// Owns the AI configuration and exactly one active provider.
pub struct ProviderManager {
    config: AiConfig,
    provider: Box<dyn LLMProvider>,
    factory: ProviderFactory,
}

impl ProviderManager {
    /// Builds a manager from `config`, or from the default AI config when
    /// none is given. Fails only on an unsupported provider name.
    pub fn new(config: Option<AiConfig>) -> Result<Self, SwaboxError> {
        let config = config.unwrap_or_default();
        let factory = ProviderFactory::new();
        let provider = Self::initialize_provider(&factory, &config)?;
        Ok(Self {
            config,
            provider,
            factory,
        })
    }

    fn initialize_provider(
        factory: &ProviderFactory,
        config: &AiConfig,
    ) -> Result<Box<dyn LLMProvider>, SwaboxError> {
        let provider = factory.create(config)?;
        debug!(
            provider = %provider.provider(),
            model = provider.model(),
            endpoint = provider.endpoint(),
            "initialized AI provider"
        );
        Ok(provider)
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn active_provider(&self) -> Provider {
        self.provider.provider()
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    pub fn endpoint(&self) -> &str {
        self.provider.endpoint()
    }

    /// Replaces the active provider by name.
    ///
    /// The new provider is built before anything is changed, so an
    /// unsupported name leaves the current provider and config untouched.
    /// The model is reset to the new provider's default.
    pub fn switch_provider(&mut self, name: &str) -> Result<String, SwaboxError> {
        let name = name.trim();
        let mut config = self.config.clone();
        config.provider = name.to_lowercase();
        if Provider::from_str(name) != Some(self.provider.provider()) {
            config.model = None;
        }

        let provider = Self::initialize_provider(&self.factory, &config)?;
        self.provider = provider;
        self.config = config;
        Ok(format!("Switched to {} provider", self.provider.provider()))
    }

    pub async fn get_command_suggestion(&self, context: &AiContext) -> String {
        self.provider.get_suggestion(context).await
    }

    pub async fn process_natural_language(&self, query: &str) -> String {
        self.provider.process_natural_language(query).await
    }
}
