use crate::analyzer::normalizer::{normalize_reply, ParsedReply};
use crate::analyzer::prompts::PromptTemplate;
use crate::analyzer::transport::{ChatCompletionRequest, ChatMessage, HttpTransport, KimiTransport, Tool};
use crate::error::RentGuardError;
use crate::models::{AnalysisResult, ContractFile};
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DEFAULT_BASE_URL: &str = "https://api.moonshot.cn/v1";
pub const DEFAULT_MODEL: &str = "kimi-k2-turbo-preview";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub base_url: String,
    pub model_name: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// No timeout is applied unless one is configured.
    pub timeout_seconds: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model_name: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_seconds: None,
        }
    }
}

impl LlmConfig {
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model_name = model.into();
        self
    }

    pub fn with_timeout(mut self, seconds: Option<u64>) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

/// Client bound to one credential. Uploads contract files, asks the model
/// for an assessment and normalizes whatever comes back.
pub struct KimiClient {
    config: LlmConfig,
    credential: String,
    transport: Arc<dyn KimiTransport>,
}

impl KimiClient {
    pub fn new(credential: &str, config: LlmConfig) -> Result<Self, RentGuardError> {
        let transport = HttpTransport::new(&config.base_url, credential, config.timeout())?;
        Ok(Self::with_transport(credential, config, Arc::new(transport)))
    }

    pub fn with_transport(
        credential: &str,
        config: LlmConfig,
        transport: Arc<dyn KimiTransport>,
    ) -> Self {
        Self {
            config,
            credential: credential.to_string(),
            transport,
        }
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Extracts text from every file. A failing file contributes a
    /// placeholder at its own position instead of failing the batch.
    pub async fn upload_and_extract(&self, files: &[ContractFile]) -> Vec<String> {
        let extractions = files.iter().map(|file| async move {
            match self.extract_one(file).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(file = %file.name, error = %e, "text extraction failed");
                    format!("[文件 {} 处理失败: {}]", file.name, e)
                }
            }
        });

        join_all(extractions).await
    }

    async fn extract_one(&self, file: &ContractFile) -> Result<String, RentGuardError> {
        let file_id = self.transport.upload_file(file).await?;
        tracing::debug!(file = %file.name, file_id = %file_id, "uploaded contract file");
        self.transport.file_content(&file_id).await
    }

    pub fn build_request(&self, contract_text: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model_name.clone(),
            messages: vec![
                ChatMessage::system(PromptTemplate::build_system_prompt()),
                ChatMessage::user(PromptTemplate::build_user_prompt(contract_text)),
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            tools: vec![Tool::web_search()],
        }
    }

    pub async fn analyze(&self, files: &[ContractFile]) -> Result<AnalysisResult, RentGuardError> {
        let start_time = Instant::now();

        let texts = self.upload_and_extract(files).await;
        let contract_text = PromptTemplate::join_contract_texts(&texts);
        let request = self.build_request(&contract_text);

        tracing::debug!(
            model = %self.config.model_name,
            files = files.len(),
            estimated_tokens = request.user_prompt().map(PromptTemplate::estimate_tokens).unwrap_or(0),
            "sending chat completion"
        );

        let reply = self
            .transport
            .chat_completion(&request)
            .await
            .map_err(RentGuardError::with_default_message)?;

        let result = Self::parse_analysis_response(&reply, files.len());

        tracing::info!(
            risk_level = result.risk_level.as_str(),
            items = result.risk_items.len(),
            duration_ms = start_time.elapsed().as_millis() as u64,
            "contract analysis finished"
        );

        Ok(result)
    }

    pub fn parse_analysis_response(reply: &str, file_count: usize) -> AnalysisResult {
        let parsed = ParsedReply::parse(reply);
        if !parsed.is_structured() {
            tracing::warn!("model reply contained no JSON object, using raw text");
        }
        normalize_reply(parsed, file_count)
    }
}
