//! Creator name lookup with a per-process cache.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::AppError;

/// Display name for creators that cannot be resolved.
pub const UNKNOWN_USER: &str = "Unknown";

/// Source of user display names.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn user_name(&self, id: i64) -> Result<Option<String>, AppError>;
}

/// Append-only memo of creator names. Entries are never evicted.
pub struct UserNameCache<D> {
    directory: D,
    names: RwLock<HashMap<i64, String>>,
}

impl<D: UserDirectory> UserNameCache<D> {
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            names: RwLock::new(HashMap::new()),
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Resolve a creator id. Lookup failures are not memoized.
    pub async fn name_of(&self, id: Option<i64>) -> String {
        let Some(id) = id else {
            return UNKNOWN_USER.to_string();
        };

        if let Some(name) = self.names.read().await.get(&id) {
            return name.clone();
        }

        let name = match self.directory.user_name(id).await {
            Ok(name) => name.unwrap_or_else(|| UNKNOWN_USER.to_string()),
            Err(e) => {
                tracing::warn!("Failed to resolve user {}: {}", id, e);
                return UNKNOWN_USER.to_string();
            }
        };

        self.names
            .write()
            .await
            .entry(id)
            .or_insert(name)
            .clone()
    }

    pub async fn len(&self) -> usize {
        self.names.read().await.len()
    }
}
