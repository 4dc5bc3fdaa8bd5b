use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::OpenAiEndpoint;
use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::Prompt;

pub struct OpenAiClient {
    endpoint: OpenAiEndpoint,
    model: String,
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(endpoint: OpenAiEndpoint, model: String, temperature: Option<f32>) -> Self {
        Self {
            endpoint,
            model,
            temperature,
        }
    }

    fn build_messages<'a>(prompt: &'a Prompt) -> Vec<ChatMessage<'a>> {
        prompt
            .history
            .iter()
            .map(|m| ChatMessage {
                role: m.role.as_str(),
                content: &m.content,
            })
            .chain(std::iter::once(ChatMessage {
                role: "user",
                content: &prompt.user,
            }))
            .collect()
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    #[tracing::instrument(skip(self, prompt), fields(model = %self.model, history = prompt.history.len()))]
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmClientError> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: Self::build_messages(prompt),
            temperature: self.temperature,
        };

        let response = self
            .endpoint
            .post(&self.model, "chat/completions")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmClientError::InvalidResponse("empty choices".to_string()))
    }
}
