//! `load_config`: reads the JSON config file and maps it onto the typed [`Config`].
//!
//! This is the only place untrusted input is parsed. The file schema is
//!
//! ```json
//! {
//!   "outline_api": "<bearer token>",
//!   "data": [{ "source": "<raw text URL>", "destination": "<document URL>" }]
//! }
//! ```
//!
//! When `outline_api` is missing or empty the key is taken from `OUTLINE_API_KEY`.
//! Every `source` and `destination` is parsed here, so a loaded [`Config`] never holds a
//! URL the run would have to reject later.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{error, info};
use url::Url;

use crate::config::{Config, SyncEntry};
use crate::destination::Destination;
use crate::error::ConfigError;

/// Environment variable consulted when the file carries no API key.
pub const API_KEY_ENV: &str = "OUTLINE_API_KEY";

#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    outline_api: Option<String>,
    #[serde(default)]
    data: Vec<RawEntry>,
}

#[derive(Deserialize)]
struct RawEntry {
    source: String,
    destination: String,
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(ConfigError::Read {
                path: path_ref.to_path_buf(),
                source: e,
            });
        }
    };

    let raw: RawConfig = match serde_json::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config JSON successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config JSON");
            return Err(ConfigError::Parse(e));
        }
    };

    let outline_api = resolve_api_key(raw.outline_api)?;

    let entries = raw
        .data
        .into_iter()
        .enumerate()
        .map(|(index, entry)| parse_entry(index, entry))
        .collect::<Result<Vec<_>, _>>()?;

    let config = Config {
        outline_api,
        entries,
    };
    config.trace_loaded();
    Ok(config)
}

fn resolve_api_key(from_file: Option<String>) -> Result<String, ConfigError> {
    if let Some(key) = from_file.filter(|k| !k.trim().is_empty()) {
        info!("Outline API key found in config file");
        return Ok(key);
    }
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => {
            info!("{API_KEY_ENV} found in env");
            Ok(key)
        }
        _ => {
            error!("No Outline API key in config file or {API_KEY_ENV}");
            Err(ConfigError::MissingCredential)
        }
    }
}

fn parse_entry(index: usize, entry: RawEntry) -> Result<SyncEntry, ConfigError> {
    let source = Url::parse(&entry.source).map_err(|e| {
        error!(index, source = %entry.source, error = %e, "Invalid source URL");
        ConfigError::InvalidUrl {
            index,
            field: "source",
            value: entry.source.clone(),
            reason: e.to_string(),
        }
    })?;

    let destination = Destination::parse(&entry.destination).map_err(|e| {
        error!(index, destination = %entry.destination, error = %e, "Invalid destination URL");
        ConfigError::InvalidUrl {
            index,
            field: "destination",
            value: entry.destination.clone(),
            reason: e.to_string(),
        }
    })?;

    Ok(SyncEntry {
        source,
        destination,
    })
}
