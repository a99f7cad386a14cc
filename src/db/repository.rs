//! Database repository for users and the quiz selection.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::errors::AppError;
use crate::models::User;
use crate::table::UserDirectory;

/// A user row including the stored password, never serialized.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password: String,
}

#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== USER OPERATIONS ====================

    pub async fn create_user(&self, name: &str, password: &str) -> Result<User, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::invalid("User name is required."));
        }
        if self.find_user_by_name(name).await?.is_some() {
            return Err(AppError::Conflict(format!("User {} already exists", name)));
        }

        let result = sqlx::query("INSERT INTO users (name, password) VALUES (?, ?)")
            .bind(name)
            .bind(password)
            .execute(&self.pool)
            .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    pub async fn get_user(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query("SELECT id, name FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    pub async fn find_user_by_name(&self, name: &str) -> Result<Option<UserCredentials>, AppError> {
        let row = sqlx::query("SELECT id, name, password FROM users WHERE name = ?")
            .bind(name.trim())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| UserCredentials {
            user: user_from_row(&row),
            password: row.get("password"),
        }))
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query("SELECT id, name FROM users ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    // ==================== SELECTION OPERATIONS ====================

    /// Remember the questionnaire the quiz view should load.
    pub async fn select_questionnaire(&self, questionnaire_id: &str) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query("UPDATE selection SET questionnaire_id = ?, selected_at = ? WHERE id = 1")
            .bind(questionnaire_id)
            .bind(&now)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn selected_questionnaire(&self) -> Result<Option<String>, AppError> {
        let row = sqlx::query("SELECT questionnaire_id FROM selection WHERE id = 1")
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.and_then(|row| row.get::<Option<String>, _>("questionnaire_id")))
    }

    pub async fn clear_selection(&self) -> Result<(), AppError> {
        sqlx::query("UPDATE selection SET questionnaire_id = NULL, selected_at = NULL WHERE id = 1")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for Repository {
    async fn user_name(&self, id: i64) -> Result<Option<String>, AppError> {
        Ok(self.get_user(id).await?.map(|u| u.name))
    }
}

fn user_from_row(row: &SqliteRow) -> User {
    User {
        id: row.get("id"),
        name: row.get("name"),
    }
}
