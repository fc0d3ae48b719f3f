use crate::error::RentGuardError;
use serde::{Deserialize, Serialize};

/// Language used for report labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputLanguage {
    #[default]
    English,
    Chinese,
}

impl OutputLanguage {
    pub fn from_str(s: &str) -> Result<Self, RentGuardError> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(OutputLanguage::English),
            "chinese" | "zh" | "zh-cn" | "中文" => Ok(OutputLanguage::Chinese),
            other => Err(RentGuardError::InvalidArguments(format!(
                "Unsupported output language '{}'. Use english or chinese",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputLanguage::English => "english",
            OutputLanguage::Chinese => "chinese",
        }
    }
}
