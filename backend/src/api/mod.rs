//! REST API module.
//!
//! Contains all routes and handlers of the student records contract.

mod health;
mod students;

pub use health::*;
pub use students::*;

use axum::http::{Method, Uri};

use crate::errors::AppError;

/// Response type of every handler.
pub type ApiResult<T> = Result<T, AppError>;

/// Parse an id taken from the request path.
///
/// Ids are integers; a segment that is not one can name no record.
pub(crate) fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| AppError::student_not_found(raw))
}

/// Fallback for paths no route matches.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

/// Fallback for known paths requested with an unsupported method.
pub async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed(format!("Method {} not allowed on {}", method, uri.path()))
}
