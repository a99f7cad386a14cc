//! User name endpoint used by the results tables.

use axum::extract::{Path, State};
use axum::Json;

use crate::models::UserName;
use crate::AppState;

/// GET /api/users/{id}/name - Display name, `Unknown` when absent.
/// Served as a bare `{userName}` body, outside the `{success, data}` envelope.
pub async fn get_user_name(State(state): State<AppState>, Path(id): Path<i64>) -> Json<UserName> {
    let user_name = state.user_names.name_of(Some(id)).await;
    Json(UserName { user_name })
}
