//! Student API endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

use super::{parse_id, ApiResult};
use crate::errors::AppError;
use crate::models::{DeleteConfirmation, Student, StudentInput};
use crate::AppState;

/// GET /students - List all students.
pub async fn list_students(State(state): State<AppState>) -> ApiResult<Json<Vec<Student>>> {
    let students = state.repo.list_students().await?;
    Ok(Json(students))
}

/// GET /students/:id - Get a single student.
pub async fn get_student(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Student>> {
    let Path(raw_id) = path?;
    let id = parse_id(&raw_id)?;

    state
        .repo
        .get_student(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::student_not_found(id))
}

/// POST /students - Create a new student.
pub async fn create_student(
    State(state): State<AppState>,
    body: Result<Json<StudentInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Student>)> {
    let Json(request) = body?;
    let input = request.validate()?;

    let student = state.repo.create_student(&input).await?;
    tracing::info!(id = student.id, "Created student");

    Ok((StatusCode::CREATED, Json(student)))
}

/// PUT /students/:id - Replace a student's name and email.
pub async fn update_student(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<StudentInput>, JsonRejection>,
) -> ApiResult<Json<Student>> {
    let Path(raw_id) = path?;
    let id = parse_id(&raw_id)?;
    let Json(request) = body?;
    let input = request.validate()?;

    match state.repo.update_student(id, &input).await? {
        Some(student) => {
            tracing::info!(id, "Updated student");
            Ok(Json(student))
        }
        None => Err(AppError::student_not_found(id)),
    }
}

/// DELETE /students/:id - Delete a student.
pub async fn delete_student(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<DeleteConfirmation>> {
    let Path(raw_id) = path?;
    let id = parse_id(&raw_id)?;

    if !state.repo.delete_student(id).await? {
        return Err(AppError::student_not_found(id));
    }

    tracing::info!(id, "Deleted student");
    Ok(Json(DeleteConfirmation::new(id)))
}
