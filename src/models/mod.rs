pub mod analysis;
pub mod contract_file;
pub mod output_language;

pub use analysis::{AnalysisResult, Reference, RiskItem, RiskLevel, RiskType};
pub use contract_file::{ContractFile, MAX_FILES_PER_BATCH, MAX_FILE_SIZE};
pub use output_language::OutputLanguage;
