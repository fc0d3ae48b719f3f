use crate::error::RentGuardError;
use std::path::{Path, PathBuf};

/// Name of the file holding the stored key.
pub const CREDENTIAL_KEY: &str = "kimi_api_key";
pub const HOME_ENV: &str = "RENTGUARD_HOME";
pub const API_KEY_ENV: &str = "KIMI_API_KEY";

/// Persists the Kimi API key on the local machine only.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// `$RENTGUARD_HOME`, falling back to `$HOME/.rentguard`.
    pub fn from_env() -> Result<Self, RentGuardError> {
        if let Ok(dir) = std::env::var(HOME_ENV) {
            if !dir.trim().is_empty() {
                return Ok(Self::new(dir));
            }
        }

        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| {
                RentGuardError::CredentialStore(format!(
                    "cannot locate a home directory; set {}",
                    HOME_ENV
                ))
            })?;

        Ok(Self::new(Path::new(&home).join(".rentguard")))
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(CREDENTIAL_KEY)
    }

    pub fn save(&self, credential: &str) -> Result<(), RentGuardError> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(RentGuardError::CredentialStore(
                "refusing to save an empty API key".to_string(),
            ));
        }

        std::fs::create_dir_all(&self.dir)?;
        let path = self.path();
        std::fs::write(&path, credential)?;
        restrict_permissions(&path)?;

        tracing::debug!(path = %path.display(), "stored API key");
        Ok(())
    }

    pub fn load(&self) -> Result<Option<String>, RentGuardError> {
        match std::fs::read_to_string(self.path()) {
            Ok(contents) => {
                let trimmed = contents.trim();
                Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Removing a key that was never stored is not an error.
    pub fn clear(&self) -> Result<(), RentGuardError> {
        match std::fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Explicit flag, then environment, then the stored key.
pub fn resolve_credential(
    explicit: Option<&str>,
    store: &CredentialStore,
) -> Result<Option<String>, RentGuardError> {
    if let Some(key) = explicit.map(str::trim).filter(|k| !k.is_empty()) {
        return Ok(Some(key.to_string()));
    }

    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            return Ok(Some(key.trim().to_string()));
        }
    }

    store.load()
}

/// Shows the first and last four characters only.
pub fn mask(credential: &str) -> String {
    let chars: Vec<char> = credential.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 8), tail)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), RentGuardError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), RentGuardError> {
    Ok(())
}
