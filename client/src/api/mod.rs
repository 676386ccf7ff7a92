//! Access to the record store.

mod http;

pub use http::*;

use async_trait::async_trait;

use crate::errors::ClientError;
use crate::models::{Student, StudentInput};

/// Operations the record store offers.
///
/// Each call is one request/response round trip. Nothing is retried.
#[async_trait]
pub trait StudentApi: Send + Sync {
    /// Fetch the whole collection in ascending id order.
    async fn list(&self) -> Result<Vec<Student>, ClientError>;

    /// Fetch one record.
    async fn get(&self, id: i64) -> Result<Student, ClientError>;

    /// Create a record; the server assigns the id.
    async fn create(&self, input: &StudentInput) -> Result<Student, ClientError>;

    /// Replace name and email of an existing record.
    async fn update(&self, id: i64, input: &StudentInput) -> Result<Student, ClientError>;

    /// Delete a record.
    async fn delete(&self, id: i64) -> Result<(), ClientError>;
}
