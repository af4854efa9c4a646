use crate::config::{AiConfig, Provider};
use crate::core::error::SwaboxError;
use crate::providers::{LLMProvider, anthropic::AnthropicProvider, openai::OpenAIProvider};
use std::collections::HashMap;

type ProviderCreator = Box<dyn Fn(&AiConfig) -> Box<dyn LLMProvider> + Send + Sync>;

pub struct ProviderFactory {
    creators: HashMap<Provider, ProviderCreator>,
}

impl ProviderFactory {
    pub fn new() -> Self {
        let mut creators = HashMap::new();

        creators.insert(
            Provider::Anthropic,
            Box::new(|config: &AiConfig| {
                let provider = Provider::Anthropic;
                let api_key = config.resolve_api_key(provider);
                let model = config.resolve_model(provider);
                let provider = match config.base_url_for(provider) {
                    Some(base_url) => {
                        AnthropicProvider::with_endpoint(base_url.to_string(), api_key, model)
                    }
                    None => AnthropicProvider::new(api_key, model),
                };
                Box::new(provider) as Box<dyn LLMProvider>
            }) as ProviderCreator,
        );

        creators.insert(
            Provider::OpenAI,
            Box::new(|config: &AiConfig| {
                let provider = Provider::OpenAI;
                let api_key = config.resolve_api_key(provider);
                let model = config.resolve_model(provider);
                let provider = match config.base_url_for(provider) {
                    Some(base_url) => {
                        OpenAIProvider::with_endpoint(base_url.to_string(), api_key, model)
                    }
                    None => OpenAIProvider::new(api_key, model),
                };
                Box::new(provider) as Box<dyn LLMProvider>
            }) as ProviderCreator,
        );

        Self { creators }
    }

    /// Builds the provider named by `config.provider` (case-insensitive).
    pub fn create(&self, config: &AiConfig) -> Result<Box<dyn LLMProvider>, SwaboxError> {
        let provider = Provider::from_str(&config.provider)
            .ok_or_else(|| SwaboxError::UnsupportedProvider(config.provider.clone()))?;

        self.creators
            .get(&provider)
            .map(|creator| creator(config))
            .ok_or_else(|| SwaboxError::UnsupportedProvider(config.provider.clone()))
    }
}

impl Default for ProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_each_known_provider() {
        let factory = ProviderFactory::new();
        for provider in Provider::ALL {
            let config = AiConfig {
                api_key: Some("k".to_string()),
                ..AiConfig::for_provider(provider)
            };
            let created = factory.create(&config).unwrap();
            assert_eq!(created.provider(), provider);
            assert_eq!(created.model(), provider.default_model());
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let config = AiConfig {
            provider: "bogus".to_string(),
            ..AiConfig::default()
        };
        match ProviderFactory::new().create(&config) {
            Err(SwaboxError::UnsupportedProvider(name)) => assert_eq!(name, "bogus"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("bogus provider was accepted"),
        }
    }

    #[test]
    fn name_match_ignores_case() {
        let config = AiConfig {
            provider: "OPENAI".to_string(),
            ..AiConfig::default()
        };
        let created = ProviderFactory::new().create(&config).unwrap();
        assert_eq!(created.provider(), Provider::OpenAI);
    }
}
