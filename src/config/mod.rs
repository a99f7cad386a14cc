//! Configuration module for the quiz frontend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the question bank REST backend
    pub api_url: String,
    /// Bearer token used when none is persisted in client storage
    pub api_token: Option<String>,
    /// File holding the persisted access token
    pub token_path: PathBuf,
    /// Path to the SQLite database with users and the selected questionnaire
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Id of the signed-in user, used for edit permissions in tables
    pub user_id: Option<i64>,
    /// Timeout applied to every backend request
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = env::var("QUIZBANK_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string())
            .trim_end_matches('/')
            .to_string();

        let api_token = env::var("QUIZBANK_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let token_path = env::var("QUIZBANK_TOKEN_PATH")
            .unwrap_or_else(|_| "./data/access_token".to_string())
            .into();

        let db_path = env::var("QUIZBANK_DB_PATH")
            .unwrap_or_else(|_| "./data/users.sqlite".to_string())
            .into();

        let bind_addr = env::var("QUIZBANK_BIND_ADDR")
            .ok()
            .and_then(|addr| match addr.parse() {
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    eprintln!("Invalid QUIZBANK_BIND_ADDR {:?}, using default", addr);
                    None
                }
            })
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 5000)));

        let log_level = env::var("QUIZBANK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let user_id = env::var("QUIZBANK_USER_ID")
            .ok()
            .and_then(|id| id.trim().parse().ok());

        let request_timeout = env::var("QUIZBANK_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|secs| secs.trim().parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        Self {
            api_url,
            api_token,
            token_path,
            db_path,
            bind_addr,
            log_level,
            user_id,
            request_timeout,
        }
    }
}
