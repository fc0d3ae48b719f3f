pub mod analyzer;
pub mod cli;
pub mod credential;
pub mod error;
pub mod guide;
pub mod localization;
pub mod logging;
pub mod models;

pub use error::RentGuardError;

// Re-export commonly used types
pub use models::{
    AnalysisResult, ContractFile, OutputLanguage, Reference, RiskItem, RiskLevel, RiskType,
};

pub use analyzer::{AnalysisOrchestrator, KimiClient, LlmConfig};

pub use cli::CliHandler;
