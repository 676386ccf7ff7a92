//! Client configuration.

use std::env;

use url::Url;

/// Default address of a locally running record store.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Configuration for reaching the record store.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the record store API
    pub api_base_url: Url,
}

impl ClientConfig {
    /// Build a configuration from an explicit base URL.
    pub fn new(api_base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            api_base_url: Url::parse(api_base_url)?,
        })
    }

    /// Load configuration from `STUDENTS_API_URL`, falling back to the local default.
    pub fn from_env() -> Result<Self, url::ParseError> {
        dotenvy::dotenv().ok();

        let api_url = env::var("STUDENTS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(&api_url)
    }
}
