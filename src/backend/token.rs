//! Bearer token lookup: persisted client storage first, configuration second.

use std::path::{Path, PathBuf};

use crate::errors::AppError;

/// Where the access token comes from.
#[derive(Debug, Clone)]
pub struct TokenSource {
    path: Option<PathBuf>,
    fallback: Option<String>,
}

impl TokenSource {
    pub fn new(path: Option<PathBuf>, fallback: Option<String>) -> Self {
        Self { path, fallback }
    }

    /// A fixed token, no persisted storage.
    pub fn fixed(token: impl Into<String>) -> Self {
        Self::new(None, Some(token.into()))
    }

    /// Resolve the token to send. Fails with [`AppError::MissingToken`]
    /// before any request is built.
    pub fn resolve(&self) -> Result<String, AppError> {
        if let Some(stored) = self.path.as_deref().and_then(read_token) {
            return Ok(stored);
        }
        self.fallback
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .ok_or(AppError::MissingToken)
    }

    /// Persist a token so later lookups prefer it over the configured one.
    pub fn persist(&self, token: &str) -> Result<(), AppError> {
        let path = self
            .path
            .as_deref()
            .ok_or_else(|| AppError::Internal("No token storage configured".to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::Internal(format!("Cannot create token directory: {}", e)))?;
        }
        std::fs::write(path, token.trim())
            .map_err(|e| AppError::Internal(format!("Cannot store token: {}", e)))?;
        tracing::debug!("Access token persisted to {:?}", path);
        Ok(())
    }

    /// Forget the persisted token. Missing storage is not an error.
    pub fn clear(&self) -> Result<(), AppError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Internal(format!("Cannot remove token: {}", e))),
        }
    }
}

fn read_token(path: &Path) -> Option<String> {
    let token = std::fs::read_to_string(path).ok()?;
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}
