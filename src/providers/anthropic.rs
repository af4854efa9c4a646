use crate::config::Provider;
use crate::core::error::SwaboxError;
use crate::providers::LLMProvider;
use crate::providers::base_client::HttpClient;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 100;

#[derive(Clone)]
pub struct AnthropicProvider {
    client: HttpClient,
    api_key: Option<String>,
    model: String,
}

impl AnthropicProvider {
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self::with_endpoint(
            Provider::Anthropic.default_base_url().to_string(),
            api_key,
            model,
        )
    }

    pub fn with_endpoint(endpoint: String, api_key: Option<String>, model: String) -> Self {
        let mut extra_headers = HashMap::new();
        extra_headers.insert("anthropic-version".to_string(), ANTHROPIC_VERSION.to_string());
        let auth_header = api_key
            .as_ref()
            .map(|key| ("x-api-key".to_string(), key.clone()));
        Self {
            client: HttpClient::new(endpoint, auth_header, Some(extra_headers)),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl LLMProvider for AnthropicProvider {
    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    async fn complete(&self, prompt: &str) -> Result<String, SwaboxError> {
        if self.api_key.is_none() {
            return Err(SwaboxError::MissingApiKey {
                env_var: Provider::Anthropic.api_key_env(),
            });
        }

        let payload = AnthropicRequest {
            model: &self.model,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_TOKENS,
        };

        let response = self.client.post("messages", &payload).await?;
        let parsed: AnthropicResponse = response.json().await?;

        Ok(parsed
            .content
            .into_iter()
            .find_map(|block| block.text)
            .unwrap_or_default())
    }
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct AnthropicMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}
