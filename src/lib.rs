//! outline-sync: copy markdown from raw-text URLs into Outline documents.
//!
//! The pipeline lives in [`synchronise`]; the network seams are the traits in [`contract`],
//! implemented by [`download::HttpFetcher`] and [`upload::OutlineClient`].

pub mod cli;
pub mod config;
pub mod contract;
pub mod destination;
pub mod download;
pub mod error;
pub mod load_config;
pub mod synchronise;
pub mod upload;

pub use cli::{run, Cli};
