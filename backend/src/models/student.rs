//! Student record model.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// A stored student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Request body for creating or replacing a student.
///
/// Update replaces both fields wholesale, so create and update share one shape.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl StudentInput {
    /// Check required fields and return the trimmed input.
    pub fn validate(&self) -> Result<StudentInput, AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Name is required".to_string()));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(AppError::Validation("Email is required".to_string()));
        }

        Ok(StudentInput {
            name: name.to_string(),
            email: email.to_string(),
        })
    }
}

/// Response body for a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
    pub id: i64,
}

impl DeleteConfirmation {
    pub fn new(id: i64) -> Self {
        Self {
            message: "Student deleted successfully".to_string(),
            id,
        }
    }
}

/// Response body of the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub students: i64,
}
