// Analyzer module - remote Kimi integration, reply normalization and orchestration

pub mod llm_client;
pub mod normalizer;
pub mod orchestrator;
pub mod prompts;
pub mod transport;

pub use llm_client::{KimiClient, LlmConfig};
pub use normalizer::ParsedReply;
pub use orchestrator::{AnalysisOrchestrator, TransportFactory};
pub use prompts::PromptTemplate;
pub use transport::{HttpTransport, KimiTransport};
