use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::LlmError;
use crate::llm::chat::{ChatMessage, Role, TextGeneration};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

fn http_client(endpoint: &str) -> Result<reqwest::blocking::Client, LlmError> {
    reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| LlmError::Request {
            endpoint: endpoint.to_string(),
            source: e,
        })
}

fn send_json<T: Serialize>(
    client: &reqwest::blocking::Client,
    endpoint: &str,
    api_key: Option<&str>,
    body: &T,
) -> Result<reqwest::blocking::Response, LlmError> {
    let mut request = client.post(endpoint).json(body);
    if let Some(key) = api_key {
        request = request.bearer_auth(key);
    }

    let response = request.send().map_err(|e| LlmError::Request {
        endpoint: endpoint.to_string(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(LlmError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

// ============================================================================
// OpenAI-compatible chat completions
// ============================================================================

pub struct ChatCompletionsBackend {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl Default for ChatCompletionsBackend {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o".to_string(),
            api_key: None,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
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

impl ChatCompletionsBackend {
    pub fn new(endpoint: &str, model: &str, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            api_key,
        }
    }
}

impl TextGeneration for ChatCompletionsBackend {
    fn complete(&self, messages: &[ChatMessage], max_tokens: Option<u32>) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            max_tokens,
        };

        info!(endpoint = %self.endpoint, model = %self.model, messages = messages.len(), "chat completion request");
        let client = http_client(&self.endpoint)?;
        let response = send_json(&client, &self.endpoint, self.api_key.as_deref(), &request)?;

        let parsed: ChatResponse = response.json().map_err(|e| LlmError::Response {
            endpoint: self.endpoint.clone(),
            reason: e.to_string(),
        })?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)?;

        debug!(chars = text.len(), "chat completion received");
        Ok(text)
    }
}

// ============================================================================
// Ollama Backend
// ============================================================================

pub struct OllamaBackend {
    pub endpoint: String,
    pub model: String,
}

impl Default for OllamaBackend {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434/api/generate".to_string(),
            model: "qwen2.5:1.5b".to_string(),
        }
    }
}

#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

#[derive(Serialize)]
struct OllamaOptions {
    num_predict: u32,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

impl OllamaBackend {
    pub fn new(endpoint: &str, model: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            model: model.to_string(),
        }
    }

    /// `/api/generate` takes a single prompt, so the conversation is laid
    /// out as labelled blocks.
    pub fn flatten_messages(messages: &[ChatMessage]) -> String {
        messages
            .iter()
            .map(|m| {
                let label = match m.role {
                    Role::System => "SYSTEM",
                    Role::User => "USER",
                    Role::Assistant => "ASSISTANT",
                };
                format!("{}:\n{}", label, m.content.trim())
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl TextGeneration for OllamaBackend {
    fn complete(&self, messages: &[ChatMessage], max_tokens: Option<u32>) -> Result<String, LlmError> {
        let request = OllamaRequest {
            model: self.model.clone(),
            prompt: Self::flatten_messages(messages),
            stream: false,
            options: max_tokens.map(|num_predict| OllamaOptions { num_predict }),
        };

        info!(endpoint = %self.endpoint, model = %self.model, "ollama generate request");
        let client = http_client(&self.endpoint)?;
        let response = send_json(&client, &self.endpoint, None, &request)?;

        let ollama_response: OllamaResponse = response.json().map_err(|e| LlmError::Response {
            endpoint: self.endpoint.clone(),
            reason: e.to_string(),
        })?;

        if ollama_response.response.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(ollama_response.response)
    }
}
