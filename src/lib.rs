//! Question bank frontend
//!
//! Form state machine for the question and questionnaire editors, a typed
//! client for the question bank backend, results tables, the quiz view and
//! the small HTTP server that exposes them to the browser.

pub mod api;
pub mod auth;
pub mod backend;
pub mod config;
pub mod db;
pub mod errors;
pub mod form;
pub mod modal;
pub mod models;
pub mod quiz;
pub mod table;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use backend::ApiClient;
use config::Config;
use db::Repository;
use errors::AppError;
use table::UserNameCache;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub backend: Arc<ApiClient>,
    pub user_names: Arc<UserNameCache<Repository>>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Open the database and build the backend client.
    pub async fn from_config(config: Config) -> Result<Self, AppError> {
        let pool = db::init_database(&config.db_path).await?;
        let repo = Repository::new(pool);
        let backend = ApiClient::new(&config)?;
        Ok(Self::new(repo, backend, config))
    }

    pub fn new(repo: Repository, backend: ApiClient, config: Config) -> Self {
        Self {
            user_names: Arc::new(UserNameCache::new(repo.clone())),
            repo: Arc::new(repo),
            backend: Arc::new(backend),
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Forms
        .route("/forms/evaluate", post(api::evaluate_form))
        .route("/forms/validate", post(api::validate_form))
        // Tables
        .route("/questions/table", get(api::question_table))
        .route("/questionnaires/table", get(api::questionnaire_table))
        // Quiz
        .route("/questionnaire/{id}/select", post(api::select_questionnaire))
        .route("/quiz", get(api::get_quiz))
        .route("/quiz/grade", post(api::grade_quiz))
        // Users
        .route("/users/{id}/name", get(api::get_user_name));

    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/login", post(auth::login));

    Router::new()
        .nest("/api", api_routes)
        .merge(public_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
