//! # contract: the two network seams of a run
//!
//! [`Fetcher`] retrieves source text, [`Publisher`] writes it into an Outline document.
//! The synchronise pipeline only talks to these traits, so tests drive it with the
//! `mockall`-generated `MockFetcher` and `MockPublisher` (exported under the
//! `test-export-mocks` feature) and the binary plugs in the reqwest clients.

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;
use url::Url;

use crate::destination::Destination;
use crate::error::{FetchError, PublishError};

/// Body of a `documents.update` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentUpdate {
    pub id: String,
    pub text: String,
    pub append: bool,
    pub publish: bool,
}

/// What Outline reports back about a successfully updated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedDocument {
    pub title: String,
}

#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET the source and return its body as text. Only HTTP 200 counts as success.
    async fn fetch(&self, source: &Url) -> Result<String, FetchError>;
}

#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Publisher: Send + Sync {
    /// POST `update` to the destination's API endpoint.
    async fn update_document(
        &self,
        destination: &Destination,
        update: &DocumentUpdate,
    ) -> Result<UpdatedDocument, PublishError>;
}
