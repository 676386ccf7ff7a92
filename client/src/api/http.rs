//! `reqwest` implementation of [`StudentApi`].

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::StudentApi;
use crate::config::ClientConfig;
use crate::errors::{ClientError, ErrorBody};
use crate::models::{Student, StudentInput};

/// HTTP client for the record store.
#[derive(Debug, Clone)]
pub struct HttpStudentApi {
    client: Client,
    base_url: String,
}

impl HttpStudentApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.api_base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/students", self.base_url)
    }

    fn record_url(&self, id: i64) -> String {
        format!("{}/students/{}", self.base_url, id)
    }
}

/// Decode a success body, or turn an error status into a [`ClientError`].
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let response = check_status(response).await?;
    Ok(response.json::<T>().await?)
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

    tracing::debug!(status = status.as_u16(), %message, "Request rejected");
    Err(ClientError::from_status(status, message))
}

#[async_trait]
impl StudentApi for HttpStudentApi {
    async fn list(&self) -> Result<Vec<Student>, ClientError> {
        let response = self.client.get(self.collection_url()).send().await?;
        decode(response).await
    }

    async fn get(&self, id: i64) -> Result<Student, ClientError> {
        let response = self.client.get(self.record_url(id)).send().await?;
        decode(response).await
    }

    async fn create(&self, input: &StudentInput) -> Result<Student, ClientError> {
        let response = self
            .client
            .post(self.collection_url())
            .json(input)
            .send()
            .await?;
        decode(response).await
    }

    async fn update(&self, id: i64, input: &StudentInput) -> Result<Student, ClientError> {
        let response = self
            .client
            .put(self.record_url(id))
            .json(input)
            .send()
            .await?;
        decode(response).await
    }

    async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let response = self.client.delete(self.record_url(id)).send().await?;
        check_status(response).await?;
        Ok(())
    }
}
