//! High-level pipeline: fetch → publish for every configured entry, in order.
//!
//! Per entry the states are `Pending → Fetched → Published`, or `Pending → Skipped` when the
//! fetch fails. Skipping never affects the other entries. A failed publish stops the run:
//! no later entry is fetched, and the report records which entry aborted it and why.
//!
//! The pipeline does no console output of its own; it logs through `tracing`, reports each
//! finished entry to an optional callback ([`synchronise_with`]) and hands a
//! [`SynchroniseReport`] back so the caller decides which exit code to use.

use tracing::{error, info, warn};
use url::Url;

use crate::config::SyncEntry;
use crate::contract::{DocumentUpdate, Fetcher, Publisher};
use crate::error::{FetchError, PublishError};

/// Result of one entry that was fully handled.
#[derive(Debug)]
pub enum EntryOutcome {
    Published { document_id: String, title: String },
    Skipped { source: Url, reason: FetchError },
}

/// The entry whose publish failed and ended the run.
#[derive(Debug)]
pub struct AbortedEntry {
    pub index: usize,
    pub document_id: String,
    pub error: PublishError,
}

#[derive(Debug, Default)]
pub struct SynchroniseReport {
    /// Outcomes of the entries processed before the run ended, in config order.
    pub outcomes: Vec<EntryOutcome>,
    pub aborted: Option<AbortedEntry>,
}

impl SynchroniseReport {
    pub fn published(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, EntryOutcome::Published { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, EntryOutcome::Skipped { .. }))
            .count()
    }

    pub fn fatal(&self) -> usize {
        usize::from(self.aborted.is_some())
    }

    pub fn is_success(&self) -> bool {
        self.aborted.is_none()
    }
}

pub async fn synchronise<F, P>(
    entries: &[SyncEntry],
    append: bool,
    fetcher: &F,
    publisher: &P,
) -> SynchroniseReport
where
    F: Fetcher + ?Sized,
    P: Publisher + ?Sized,
{
    synchronise_with(entries, append, fetcher, publisher, |_| {}).await
}

/// Like [`synchronise`], calling `on_outcome` as soon as each entry is published or skipped.
pub async fn synchronise_with<F, P, O>(
    entries: &[SyncEntry],
    append: bool,
    fetcher: &F,
    publisher: &P,
    mut on_outcome: O,
) -> SynchroniseReport
where
    F: Fetcher + ?Sized,
    P: Publisher + ?Sized,
    O: FnMut(&EntryOutcome),
{
    info!(entries = entries.len(), append, "[SYNC] Starting synchronisation");
    let mut report = SynchroniseReport::default();

    for (index, entry) in entries.iter().enumerate() {
        let document_id = &entry.destination.document_id;
        info!(index, source = %entry.source, document_id = %document_id, "[SYNC] Fetching source");

        let text = match fetcher.fetch(&entry.source).await {
            Ok(text) => text,
            Err(reason) => {
                warn!(index, source = %entry.source, error = %reason, "[SYNC] Fetch failed, skipping entry");
                let outcome = EntryOutcome::Skipped {
                    source: entry.source.clone(),
                    reason,
                };
                on_outcome(&outcome);
                report.outcomes.push(outcome);
                continue;
            }
        };

        let update = DocumentUpdate {
            id: document_id.clone(),
            text,
            append,
            publish: true,
        };

        match publisher.update_document(&entry.destination, &update).await {
            Ok(doc) => {
                info!(index, document_id = %document_id, title = %doc.title, "[SYNC] Published");
                let outcome = EntryOutcome::Published {
                    document_id: document_id.clone(),
                    title: doc.title,
                };
                on_outcome(&outcome);
                report.outcomes.push(outcome);
            }
            Err(e) => {
                error!(index, document_id = %document_id, error = %e, "[SYNC][ERROR] Publish failed, aborting run");
                report.aborted = Some(AbortedEntry {
                    index,
                    document_id: document_id.clone(),
                    error: e,
                });
                break;
            }
        }
    }

    info!(
        published = report.published(),
        skipped = report.skipped(),
        fatal = report.fatal(),
        "[SYNC] Synchronisation finished"
    );
    report
}
