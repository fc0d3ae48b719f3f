use thiserror::Error;

/// User-facing message used when an upstream failure carries no message of its own.
pub const DEFAULT_REMOTE_ERROR: &str = "合同分析失败，请检查API密钥或稍后重试";

#[derive(Error, Debug)]
pub enum RentGuardError {
    #[error("Kimi API key is not configured (请先配置Kimi API密钥)")]
    MissingCredential,

    #[error("No valid contract files: upload JPG/PNG images or PDF documents (请上传有效的图片文件)")]
    NoValidFiles,

    #[error("{0}")]
    Remote(String),

    #[error("File {name} is too large ({size} bytes, limit {limit} bytes)")]
    FileTooLarge { name: String, size: u64, limit: u64 },

    #[error("Too many files: {count} given, at most {limit} per batch")]
    TooManyFiles { count: usize, limit: usize },

    #[error("Cannot read file {name}: {reason}")]
    UnreadableFile { name: String, reason: String },

    #[error("Credential store error: {0}")]
    CredentialStore(String),

    #[error("Invalid command line arguments: {0}")]
    InvalidArguments(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl RentGuardError {
    /// Builds a remote error, substituting the default message for a blank one.
    pub fn remote<S: Into<String>>(message: S) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            RentGuardError::Remote(DEFAULT_REMOTE_ERROR.to_string())
        } else {
            RentGuardError::Remote(message)
        }
    }

    /// Re-wraps errors whose message came out empty.
    pub fn with_default_message(self) -> Self {
        match self {
            RentGuardError::Remote(message) => RentGuardError::remote(message),
            other => other,
        }
    }

    /// True for failures that happen before any network call is attempted.
    pub fn is_local(&self) -> bool {
        !matches!(self, RentGuardError::Remote(_))
    }
}
