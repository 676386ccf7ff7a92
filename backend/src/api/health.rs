//! Health check endpoint.

use axum::{extract::State, Json};

use super::ApiResult;
use crate::models::Health;
use crate::AppState;

/// GET /health - Report liveness and the number of stored students.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<Health>> {
    let students = state.repo.count_students().await?;

    Ok(Json(Health {
        status: "ok".to_string(),
        students,
    }))
}
