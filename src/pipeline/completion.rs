use serde::{Deserialize, Serialize};

use super::CompletionError;
use crate::config::CompletionSettings;

/// Text-completion capability (allows mocking).
///
/// The returned text is only *intended* to match the instructed shape;
/// callers must route it through the schema gate before trusting it.
pub trait CompletionClient {
    fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint (OpenRouter by default).
pub struct OpenAiCompatClient {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
}

impl OpenAiCompatClient {
    pub fn new(settings: &CompletionSettings) -> Result<Self, CompletionError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| CompletionError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Request body for `/chat/completions`
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response body from `/chat/completions`
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl CompletionClient for OpenAiCompatClient {
    fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            temperature: 0.0,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut request = self.client.post(&url).json(&body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().map_err(|e| {
            if e.is_connect() {
                CompletionError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                CompletionError::Timeout
            } else {
                CompletionError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| CompletionError::ResponseParsing(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or(CompletionError::EmptyChoices)
    }
}

/// Mock completion client for testing; returns a configurable response.
pub struct MockCompletionClient {
    response: String,
}

impl MockCompletionClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

impl CompletionClient for MockCompletionClient {
    fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
        Ok(self.response.clone())
    }
}

#[cfg(test)]
pub(crate) use scripted::ScriptedCompletionClient;
