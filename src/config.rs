use tracing::{debug, info};
use url::Url;

use crate::destination::Destination;

/// A fully loaded run configuration: credential resolved, every URL validated.
pub struct Config {
    pub outline_api: String,
    pub entries: Vec<SyncEntry>,
}

// Hand-written so the API key never lands in logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("outline_api", &"<redacted>")
            .field("entries", &self.entries)
            .finish()
    }
}

impl Config {
    pub fn trace_loaded(&self) {
        info!(entries_count = self.entries.len(), "Loaded Config");
        for entry in &self.entries {
            entry.trace_loaded();
        }
        debug!(?self, "Config loaded (full debug)");
    }
}

/// One source document to copy into one Outline document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEntry {
    pub source: Url,
    pub destination: Destination,
}

impl SyncEntry {
    pub fn trace_loaded(&self) {
        info!(
            source = %self.source,
            destination = %self.destination.url,
            document_id = %self.destination.document_id,
            api_endpoint = %self.destination.api_endpoint,
            "Loaded sync entry"
        );
    }
}
