use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use tarefas_core::{OrdemUpdate, Tarefa, TarefaInput};

/// Errors produced by talking to the tarefas server.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with an error status and a message body.
    #[error("{message}")]
    Api { status: StatusCode, message: String },
    /// The request never produced a response (connection refused, timeout).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP API client for communicating with the tarefas server
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get all tarefas, ordered by `ordem`.
    pub async fn list_tarefas(&self) -> ClientResult<Vec<Tarefa>> {
        let url = format!("{}/tarefas", self.base_url);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        response
            .json::<Vec<Tarefa>>()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Create a tarefa. The server assigns id and ordem.
    pub async fn create_tarefa(&self, input: &TarefaInput) -> ClientResult<Tarefa> {
        let url = format!("{}/tarefas", self.base_url);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(input).send().await?;
        if response.status() != StatusCode::CREATED {
            return Err(Self::error_from_response(response).await);
        }

        response
            .json::<Tarefa>()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Replace the editable fields of a tarefa.
    pub async fn update_tarefa(&self, id: i64, input: &TarefaInput) -> ClientResult<Tarefa> {
        let url = format!("{}/tarefas/{}", self.base_url, id);
        debug!("PUT {}", url);

        let response = self.client.put(&url).json(input).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        response
            .json::<Tarefa>()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Delete a tarefa by id.
    pub async fn delete_tarefa(&self, id: i64) -> ClientResult<()> {
        let url = format!("{}/tarefas/{}", self.base_url, id);
        debug!("DELETE {}", url);

        let response = self.client.delete(&url).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        Ok(())
    }

    /// Apply a batch of ordem changes in one atomic request.
    pub async fn reorder_tarefas(&self, updates: &[OrdemUpdate]) -> ClientResult<()> {
        let url = format!("{}/tarefas/reordenar", self.base_url);
        debug!("PATCH {} ({} entries)", url, updates.len());

        let response = self
            .client
            .patch(&url)
            .json(&json!({ "tarefas": updates }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        Ok(())
    }

    async fn error_from_response(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("HTTP {}", status),
        };
        debug!("Server error {}: {}", status, message);
        ClientError::Api { status, message }
    }
}
