use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Default chat completions endpoint (GitHub Models inference service)
pub const DEFAULT_ENDPOINT: &str = "https://models.inference.ai.azure.com";

/// Default model used when none is configured
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// OpenAI-compatible chat completions client
#[derive(Debug)]
pub struct ChatClient {
    /// HTTP client for API requests
    client: Client,
    /// Bearer token for authentication
    token: String,
    /// Endpoint base URL
    endpoint: String,
    /// Model ID sent with every request
    model: String,
}

/// Chat completion request
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<ChatMessage>,

    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Chat message format
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct ChatUsage {
    /// Number of prompt tokens
    pub prompt_tokens: u32,
    /// Number of completion tokens
    pub completion_tokens: u32,
}

/// One completion choice in a chat response
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// The generated message
    pub message: ChatMessage,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// The completion choices
    pub choices: Vec<ChatChoice>,
    /// Token usage information, when the service reports it
    pub usage: Option<ChatUsage>,
}

impl ChatRequest {
    /// Create a new chat request for the given model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

impl ChatClient {
    /// Create a new chat client
    pub fn new(
        token: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            token: token.into(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    /// Start a request against this client's configured model
    pub fn request(&self) -> ChatRequest {
        ChatRequest::new(&self.model)
    }

    /// The configured model ID
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Provider for ChatClient {
    type Request = ChatRequest;
    type Response = ChatResponse;

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        let api_url = if self.endpoint.is_empty() {
            format!("{}/chat/completions", DEFAULT_ENDPOINT)
        } else {
            format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
        };

        let response = self
            .client
            .post(&api_url)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Chat API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = self.request().add_message("user", "Hello");
        self.complete(request).await?;
        Ok(())
    }

    fn extract_text(response: &ChatResponse) -> String {
        response
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_serialization_shouldSkipAbsentTemperature() {
        let request = ChatRequest::new("gpt-4.1-mini").add_message("user", "hi");
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"model\":\"gpt-4.1-mini\""));
        assert!(!json.contains("temperature"));
    }

    #[test]
    fn test_chat_response_deserialization_shouldReadChoicesAndUsage() {
        let json = r#"{
            "choices": [{"message": {"role": "assistant", "content": "bonjour"}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 2}
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(ChatClient::extract_text(&response), "bonjour");
        assert_eq!(response.usage.unwrap().prompt_tokens, 10);
    }

    #[test]
    fn test_extract_text_withEmptyChoices_shouldReturnEmptyString() {
        let response = ChatResponse {
            choices: Vec::new(),
            usage: None,
        };
        assert_eq!(ChatClient::extract_text(&response), "");
    }
}
