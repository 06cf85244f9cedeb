//! # Outline publisher
//!
//! [`OutlineClient`] implements [`Publisher`] against Outline's `documents.update` endpoint.
//! It owns the bearer credential; the endpoint comes from each entry's [`Destination`].
//!
//! Outline mirrors the HTTP status in the JSON body (`{"status": 200, "data": {...}}` or
//! `{"status": 403, "message": "..."}`), so the body is decoded whatever the status line
//! says and the body's `status` decides success.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;

use crate::contract::{DocumentUpdate, Publisher, UpdatedDocument};
use crate::destination::Destination;
use crate::error::PublishError;

pub struct OutlineClient {
    client: Client,
    api_key: String,
}

impl OutlineClient {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        tracing::info!(api_key_set = !api_key.is_empty(), "Initialized OutlineClient");
        Self { client, api_key }
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: u16,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<DocumentData>,
}

#[derive(Debug, Deserialize)]
struct DocumentData {
    title: String,
}

/// Turns a decoded response body into the outcome of the update.
fn interpret(http_status: u16, body: &str) -> Result<UpdatedDocument, PublishError> {
    let response: ApiResponse =
        serde_json::from_str(body).map_err(|e| PublishError::Decode {
            http_status,
            reason: e.to_string(),
        })?;

    if response.status != 200 {
        return Err(PublishError::Api {
            status: response.status,
            message: response
                .message
                .unwrap_or_else(|| format!("Outline returned status {}", response.status)),
        });
    }

    match response.data {
        Some(data) => Ok(UpdatedDocument { title: data.title }),
        None => Err(PublishError::Decode {
            http_status,
            reason: "status 200 without a `data` object".to_string(),
        }),
    }
}

#[async_trait]
impl Publisher for OutlineClient {
    async fn update_document(
        &self,
        destination: &Destination,
        update: &DocumentUpdate,
    ) -> Result<UpdatedDocument, PublishError> {
        tracing::info!(
            api_endpoint = %destination.api_endpoint,
            document_id = %update.id,
            append = update.append,
            "Making send request to Outline API"
        );

        let response = self
            .client
            .post(destination.api_endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(update)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, api_endpoint = %destination.api_endpoint, "Request to Outline failed");
                PublishError::Transport(e.to_string())
            })?;

        let http_status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            tracing::error!(error = %e, http_status, "Failed to read Outline response body");
            PublishError::Transport(e.to_string())
        })?;

        match interpret(http_status, &body) {
            Ok(doc) => {
                tracing::info!(document_id = %update.id, title = %doc.title, "Document updated");
                Ok(doc)
            }
            Err(e) => {
                tracing::error!(error = %e, status = ?e.status(), document_id = %update.id, "Outline rejected document update");
                Err(e)
            }
        }
    }
}
