//! Student Records Client
//!
//! Talks to the student record store over HTTP and keeps a disposable local copy
//! of the collection in sync with it.

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod session;

pub use api::{HttpStudentApi, StudentApi};
pub use config::ClientConfig;
pub use errors::ClientError;
pub use models::{Student, StudentInput};
pub use session::{quick_filter, Confirm, Draft, Mode, Notice, Session};
