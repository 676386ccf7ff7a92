//! Database repository for CRUD operations.
//!
//! Every operation is a single prepared statement; no cross-request transactions.

use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{Student, StudentInput};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all students in ascending id order.
    pub async fn list_students(&self) -> Result<Vec<Student>, AppError> {
        let rows = sqlx::query("SELECT id, name, email FROM students ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(student_from_row).collect())
    }

    /// Get a student by ID.
    pub async fn get_student(&self, id: i64) -> Result<Option<Student>, AppError> {
        let row = sqlx::query("SELECT id, name, email FROM students WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(student_from_row))
    }

    /// Create a new student. The id is assigned by the database.
    pub async fn create_student(&self, input: &StudentInput) -> Result<Student, AppError> {
        let row =
            sqlx::query("INSERT INTO students (name, email) VALUES (?, ?) RETURNING id, name, email")
                .bind(&input.name)
                .bind(&input.email)
                .fetch_one(&self.pool)
                .await?;

        Ok(student_from_row(&row))
    }

    /// Replace name and email of an existing student.
    ///
    /// Returns `None` when no row has the given id.
    pub async fn update_student(
        &self,
        id: i64,
        input: &StudentInput,
    ) -> Result<Option<Student>, AppError> {
        let row = sqlx::query(
            "UPDATE students SET name = ?, email = ? WHERE id = ? RETURNING id, name, email",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(student_from_row))
    }

    /// Delete a student. Returns `false` when zero rows were affected.
    pub async fn delete_student(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count stored students.
    pub async fn count_students(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM students")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("count"))
    }
}

fn student_from_row(row: &sqlx::sqlite::SqliteRow) -> Student {
    Student {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
    }
}
