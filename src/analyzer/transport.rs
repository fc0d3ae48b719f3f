use crate::error::RentGuardError;
use crate::models::ContractFile;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub const FILE_EXTRACT_PURPOSE: &str = "file-extract";
pub const WEB_SEARCH_TOOL: &str = "$web_search";

pub type TransportFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, RentGuardError>> + Send + 'a>>;

/// The three remote calls an analysis needs. Implementations carry the
/// credential themselves.
pub trait KimiTransport: Send + Sync {
    /// Uploads raw bytes for text extraction, returning the remote file id.
    fn upload_file<'a>(&'a self, file: &'a ContractFile) -> TransportFuture<'a, String>;

    /// Fetches the text extracted from a previously uploaded file.
    fn file_content<'a>(&'a self, file_id: &'a str) -> TransportFuture<'a, String>;

    /// Sends one chat completion and returns the text of the first choice.
    fn chat_completion<'a>(&'a self, request: &'a ChatCompletionRequest) -> TransportFuture<'a, String>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user<S: Into<String>>(content: S) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFunction {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: ToolFunction,
}

impl Tool {
    pub fn web_search() -> Self {
        Self {
            tool_type: "builtin_function".to_string(),
            function: ToolFunction {
                name: WEB_SEARCH_TOOL.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub tools: Vec<Tool>,
}

impl ChatCompletionRequest {
    pub fn user_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// How a request failed before a usable body came back.
enum SendFailure {
    Network(reqwest::Error),
    Status(Option<String>),
}

impl SendFailure {
    /// Keeps the connection or timeout cause, for the inline extraction placeholder.
    fn into_detailed(self) -> RentGuardError {
        match self {
            SendFailure::Network(e) => RentGuardError::remote(network_failure_message(&e)),
            SendFailure::Status(message) => RentGuardError::remote(message.unwrap_or_default()),
        }
    }

    /// Only an upstream `error.message` is surfaced; anything else gets the default message.
    fn into_upstream(self) -> RentGuardError {
        match self {
            SendFailure::Network(_) => RentGuardError::remote(""),
            SendFailure::Status(message) => RentGuardError::remote(message.unwrap_or_default()),
        }
    }
}

fn network_failure_message(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("request timed out: {}", error)
    } else {
        error.to_string()
    }
}

/// reqwest-backed transport talking to the Moonshot (Kimi) API.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(
        base_url: &str,
        credential: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, RentGuardError> {
        let mut headers = HeaderMap::new();
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", credential.trim()))
            .map_err(|_| RentGuardError::InvalidArguments("API key contains invalid characters".to_string()))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| RentGuardError::remote(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, SendFailure> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "request to Kimi API failed");
            SendFailure::Network(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::warn!(error = %e, "failed to read Kimi API response body");
            SendFailure::Network(e)
        })?;

        if status.is_success() {
            Ok(body)
        } else {
            tracing::warn!(status = status.as_u16(), "Kimi API returned an error status");
            Err(SendFailure::Status(upstream_error_message(&body)))
        }
    }

    async fn upload(&self, file: &ContractFile) -> Result<String, RentGuardError> {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| RentGuardError::remote(format!("Invalid MIME type {}: {}", file.mime_type, e)))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("purpose", FILE_EXTRACT_PURPOSE);

        let body = self
            .send(self.client.post(self.endpoint("/files")).multipart(form))
            .await
            .map_err(SendFailure::into_detailed)?;

        let upload: UploadResponse = serde_json::from_str(&body)
            .map_err(|e| RentGuardError::remote(format!("Unexpected upload response: {}", e)))?;
        Ok(upload.id)
    }

    async fn content(&self, file_id: &str) -> Result<String, RentGuardError> {
        let body = self
            .send(self.client.get(self.endpoint(&format!("/files/{}/content", file_id))))
            .await
            .map_err(SendFailure::into_detailed)?;
        Ok(extracted_text(body))
    }

    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String, RentGuardError> {
        let body = self
            .send(self.client.post(self.endpoint("/chat/completions")).json(request))
            .await
            .map_err(SendFailure::into_upstream)?;

        let response: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| RentGuardError::remote(format!("Unexpected completion response: {}", e)))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| RentGuardError::remote("Completion response contained no choices"))?;

        Ok(choice.message.content.unwrap_or_default())
    }
}

impl KimiTransport for HttpTransport {
    fn upload_file<'a>(&'a self, file: &'a ContractFile) -> TransportFuture<'a, String> {
        Box::pin(self.upload(file))
    }

    fn file_content<'a>(&'a self, file_id: &'a str) -> TransportFuture<'a, String> {
        Box::pin(self.content(file_id))
    }

    fn chat_completion<'a>(&'a self, request: &'a ChatCompletionRequest) -> TransportFuture<'a, String> {
        Box::pin(self.complete(request))
    }
}

/// `error.message` from an OpenAI-style error body, if present.
pub fn upstream_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error.message)
        .filter(|m| !m.trim().is_empty())
}

/// The content endpoint answers with a JSON envelope whose `content` field
/// holds the text; anything else is used as-is.
fn extracted_text(body: String) -> String {
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(serde_json::Value::Object(envelope)) => match envelope.get("content") {
            Some(serde_json::Value::String(text)) => text.clone(),
            _ => body,
        },
        _ => body,
    }
}
