//! Decomposes an Outline document URL into the pieces an update request needs.
//!
//! A document URL looks like `https://<host>[/<mount>]/doc/<slug-or-id>`. The document ID is
//! the final path segment; the API lives next to the `doc` route, so the endpoint keeps the
//! scheme, host, port and any mount prefix, and replaces the document route with
//! [`API_UPDATE_PATH`].

use thiserror::Error;
use url::Url;

/// Path of the Outline endpoint that replaces or appends document text.
pub const API_UPDATE_PATH: &str = "api/documents.update";

/// Path segment Outline uses for document pages.
const DOC_ROUTE: &str = "doc";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DestinationError {
    #[error("{0}")]
    Parse(#[from] url::ParseError),
    #[error("unsupported scheme `{0}`, expected http or https")]
    Scheme(String),
    #[error("URL has no host")]
    NoHost,
    #[error("URL has no path segment to use as the document id")]
    NoDocumentId,
}

/// A parsed destination document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub url: Url,
    pub document_id: String,
    pub api_endpoint: Url,
}

impl Destination {
    pub fn parse(raw: &str) -> Result<Self, DestinationError> {
        Self::from_url(Url::parse(raw)?)
    }

    pub fn from_url(url: Url) -> Result<Self, DestinationError> {
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(DestinationError::Scheme(other.to_string())),
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(DestinationError::NoHost);
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();
        let (document_id, parents) = segments
            .split_last()
            .ok_or(DestinationError::NoDocumentId)?;

        let prefix = match parents.iter().position(|s| *s == DOC_ROUTE) {
            Some(doc_at) => &parents[..doc_at],
            // No document route: drop the document segment and its parent.
            None => &parents[..parents.len().saturating_sub(1)],
        };

        let mut path = String::new();
        for segment in prefix {
            path.push('/');
            path.push_str(segment);
        }
        path.push('/');
        path.push_str(API_UPDATE_PATH);

        let mut api_endpoint = url.clone();
        api_endpoint.set_path(&path);
        api_endpoint.set_query(None);
        api_endpoint.set_fragment(None);

        Ok(Destination {
            document_id: (*document_id).to_string(),
            api_endpoint,
            url,
        })
    }
}
