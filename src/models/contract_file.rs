use crate::error::RentGuardError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
pub const MAX_FILES_PER_BATCH: usize = 5;

/// One in-memory contract page or document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl ContractFile {
    pub fn new<N: Into<String>, M: Into<String>>(name: N, mime_type: M, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Reads a file from disk, inferring its MIME type from the extension.
    pub fn from_path(path: &Path) -> Result<Self, RentGuardError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let metadata = std::fs::metadata(path).map_err(|e| RentGuardError::UnreadableFile {
            name: name.clone(),
            reason: e.to_string(),
        })?;

        if metadata.len() > MAX_FILE_SIZE {
            return Err(RentGuardError::FileTooLarge {
                name,
                size: metadata.len(),
                limit: MAX_FILE_SIZE,
            });
        }

        let bytes = std::fs::read(path).map_err(|e| RentGuardError::UnreadableFile {
            name: name.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self::new(name, mime_type_for_path(path), bytes))
    }

    /// Only images and PDFs are sent for analysis.
    pub fn is_analyzable(&self) -> bool {
        let mime = self.mime_type.trim().to_lowercase();
        mime.starts_with("image/") || mime == "application/pdf"
    }
}

pub fn mime_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        "tif" | "tiff" => "image/tiff",
        "pdf" => "application/pdf",
        "txt" | "md" => "text/plain",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

/// Loads a batch of files, enforcing the per-batch and per-file limits.
pub fn load_batch<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<ContractFile>, RentGuardError> {
    if paths.len() > MAX_FILES_PER_BATCH {
        return Err(RentGuardError::TooManyFiles {
            count: paths.len(),
            limit: MAX_FILES_PER_BATCH,
        });
    }

    paths
        .iter()
        .map(|p| ContractFile::from_path(p.as_ref()))
        .collect()
}
