//! Chat backend trait and the Ollama HTTP transport.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default backend host, matching the compose-network service name.
pub const DEFAULT_HOST: &str = "http://ollama:11434";

/// Connect timeout for the pooled HTTP client.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from one backend attempt.
///
/// All variants are treated as transient by the retry loop; the client
/// decides when to give up, not the backend.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned status {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// One message in a chat request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// Create a user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Generation options forwarded to the backend.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChatOptions {
    pub temperature: f64,
}

impl Default for ChatOptions {
    fn default() -> Self {
        // The temperature every experiment runs at.
        Self { temperature: 0.7 }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: ChatOptions,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// A transport that can perform one chat-completion call.
///
/// One call returns one complete unit of text or an error; there is no
/// streaming or partial delivery.
#[allow(async_fn_in_trait)]
pub trait ChatBackend {
    /// Send one chat request and return the response content.
    async fn chat(&self, model: &str, messages: &[ChatMessage]) -> Result<String, ClientError>;
}

/// HTTP transport for an Ollama-style `/api/chat` endpoint.
pub struct OllamaBackend {
    http: reqwest::Client,
    base_url: String,
    options: ChatOptions,
}

impl OllamaBackend {
    /// Create a backend for the given host with the given request timeout.
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            options: ChatOptions::default(),
        })
    }

    /// Create a backend from the `OLLAMA_HOST` environment variable,
    /// falling back to [`DEFAULT_HOST`].
    pub fn from_env(request_timeout: Duration) -> Result<Self, ClientError> {
        let host = std::env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        Self::new(host, request_timeout)
    }

    /// Override the generation options.
    #[must_use]
    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url.trim_end_matches('/'))
    }
}

impl ChatBackend for OllamaBackend {
    async fn chat(&self, model: &str, messages: &[ChatMessage]) -> Result<String, ClientError> {
        let request = ChatRequest {
            model,
            messages,
            stream: false,
            options: self.options,
        };

        let response = self.http.post(self.chat_url()).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message: String = body.chars().take(200).collect();
            return Err(ClientError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;
        Ok(parsed.message.content)
    }
}
