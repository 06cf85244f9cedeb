//! CLI glue for outline-sync: argument parsing, wiring the HTTP clients, and printing each
//! entry's outcome as it finishes.
//!
//! Programmatic callers and integration tests use [`run`] with a constructed [`Cli`];
//! `main` only adds tracing setup and the exit code.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::download::HttpFetcher;
use crate::load_config::load_config;
use crate::synchronise::{synchronise_with, EntryOutcome};
use crate::upload::OutlineClient;

/// Copy markdown from raw-text URLs into Outline documents.
#[derive(Parser, Debug)]
#[clap(
    name = "outline-sync",
    version,
    about = "Copy markdown from raw-text URLs into Outline documents"
)]
pub struct Cli {
    /// Path to the JSON config file
    #[clap(short = 'f', long = "file")]
    pub file: PathBuf,

    /// Append to the existing document text instead of replacing it
    #[clap(short = 'a', long = "append")]
    pub append: bool,
}

pub async fn run(cli: Cli) -> Result<()> {
    // Emitted first so tests can observe that tracing is wired.
    tracing::info!("trace_initialised");

    let config = load_config(&cli.file)?;
    let client = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;
    let fetcher = HttpFetcher::new(client.clone());
    let publisher = OutlineClient::new(client, config.outline_api.clone());

    tracing::info!(command = "sync", append = cli.append, "Starting synchronisation process");
    println!("Synchronise starting...");
    let report = synchronise_with(
        &config.entries,
        cli.append,
        &fetcher,
        &publisher,
        print_outcome,
    )
    .await;

    match &report.aborted {
        None => {
            println!(
                "Synchronise complete: {} published, {} skipped.",
                report.published(),
                report.skipped()
            );
            Ok(())
        }
        Some(aborted) => {
            eprintln!("[ERROR]: {}", aborted.error);
            if let Some(status) = aborted.error.status() {
                eprintln!("Returned with status code {status}");
            }
            Err(anyhow::anyhow!(
                "Synchronisation aborted at entry {} (document {})",
                aborted.index,
                aborted.document_id
            ))
        }
    }
}

fn print_outcome(outcome: &EntryOutcome) {
    match outcome {
        EntryOutcome::Published { document_id, title } => {
            println!("Successfully sent content to document: {title} ({document_id})");
        }
        EntryOutcome::Skipped { source, reason } => {
            eprintln!("[ERROR] Failed to retrieve content from {source}: {reason}");
        }
    }
}
