use crate::config::Provider;
use crate::core::error::SwaboxError;
use crate::providers::LLMProvider;
use crate::providers::base_client::HttpClient;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const MAX_TOKENS: u32 = 100;
const TEMPERATURE: f32 = 0.5;

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatCompletionMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: Option<String>,
}

#[derive(Clone)]
pub struct OpenAIProvider {
    client: HttpClient,
    api_key: Option<String>,
    model: String,
}

impl OpenAIProvider {
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self::with_endpoint(
            Provider::OpenAI.default_base_url().to_string(),
            api_key,
            model,
        )
    }

    pub fn with_endpoint(endpoint: String, api_key: Option<String>, model: String) -> Self {
        let auth_header = api_key
            .as_ref()
            .map(|key| ("Authorization".to_string(), format!("Bearer {}", key)));
        Self {
            client: HttpClient::new(endpoint, auth_header, None),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    fn provider(&self) -> Provider {
        Provider::OpenAI
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
                env_var: Provider::OpenAI.api_key_env(),
            });
        }

        let payload = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatCompletionMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self.client.post("chat/completions", &payload).await?;
        let parsed: ChatCompletionResponse = response.json().await?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}
