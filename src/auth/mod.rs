//! Sign-in against the frontend's user table.
//!
//! Passwords are compared in constant time to mitigate timing attacks.

use axum::{extract::State, Json};
use subtle::ConstantTimeEq;

use crate::api::{success, ApiResult};
use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{LoginRequest, LoginResponse, User};
use crate::AppState;

const INVALID_CREDENTIALS: &str = "Invalid name or password.";

/// POST /login - Check a name and password.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let user = authenticate(&state.repo, &request.name, &request.password).await?;
    tracing::info!("User {} signed in", user.id);

    success(LoginResponse {
        id: Some(user.id),
        name: user.name,
        is_auth: true,
    })
}

/// Resolve a user by name and verify the password.
pub async fn authenticate(repo: &Repository, name: &str, password: &str) -> Result<User, AppError> {
    if name.trim().is_empty() || password.is_empty() {
        return Err(AppError::invalid("Name and password are required."));
    }

    let Some(credentials) = repo.find_user_by_name(name).await? else {
        // Same work as a wrong password.
        constant_time_compare(password, "");
        tracing::debug!("Sign-in refused for unknown user");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    if constant_time_compare(password, &credentials.password) {
        Ok(credentials.user)
    } else {
        tracing::debug!("Sign-in refused for user {}", credentials.user.id);
        Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
