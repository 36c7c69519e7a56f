use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::client::covers::gate::{LoadGate, Visibility};
use crate::client::covers::image::secure_image_url;
use crate::client::covers::placeholder::{placeholder_card, Placeholder};
use crate::client::covers::providers::{BookMetadata, ImageProbe};
use crate::models::{Candidate, SavedBook};

/// What a finished resolution displays
#[derive(Debug, Clone, PartialEq)]
pub enum CoverArt {
    /// A fetched image URL
    Remote(String),
    /// Generated title card (terminal fallback)
    Placeholder(Placeholder),
}

/// The book fields the pipeline works from
#[derive(Debug, Clone, Default)]
pub struct CoverSubject {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub stored_url: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl From<&SavedBook> for CoverSubject {
    fn from(book: &SavedBook) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: non_empty(&book.isbn),
            stored_url: non_empty(&book.cover_image),
        }
    }
}

impl From<&Candidate> for CoverSubject {
    fn from(candidate: &Candidate) -> Self {
        Self {
            title: candidate.title.clone(),
            author: candidate.author.clone(),
            isbn: non_empty(&candidate.isbn),
            // Candidates are never persisted, so they carry no stored source.
            stored_url: None,
        }
    }
}

/// Per-card inputs tying a resolution to its view lifecycle.
///
/// The cancellation token replaces the "still mounted" flag: it is checked
/// at every stage boundary, so a torn-down card never produces a late
/// result.
pub struct CardContext {
    pub gate: LoadGate,
    pub visibility: Visibility,
    pub cancel: CancellationToken,
}

/// Three-tier resolver used by reading-list cards
pub struct CoverResolver {
    metadata: Arc<dyn BookMetadata>,
    probe: Arc<dyn ImageProbe>,
}

impl CoverResolver {
    pub fn new(metadata: Arc<dyn BookMetadata>, probe: Arc<dyn ImageProbe>) -> Self {
        Self { metadata, probe }
    }

    /// Resolves the cover for one card.
    ///
    /// Returns `None` only when the resolution was cancelled or its view
    /// went away; every other failure degrades to the next stage, ending at
    /// the placeholder.
    pub async fn resolve(
        &self,
        subject: &CoverSubject,
        index: usize,
        ctx: &mut CardContext,
    ) -> Option<CoverArt> {
        // Nothing loads before the page-wide delay elapses.
        tokio::select! {
            opened = ctx.gate.wait_open() => {
                if !opened {
                    return None;
                }
            }
            _ = ctx.cancel.cancelled() => return None,
        }

        // Stage 0: stored source, if the book has one and it still loads.
        if let Some(stored) = subject.stored_url.as_deref() {
            let url = secure_image_url(stored);
            let loads = tokio::select! {
                loads = self.probe.loads(&url) => loads,
                _ = ctx.cancel.cancelled() => return None,
            };
            if loads {
                return Some(CoverArt::Remote(url));
            }
        }

        // Stage 1 issues external lookups, so it waits for the card to have
        // actually been on screen.
        tokio::select! {
            visible = ctx.visibility.wait_visible() => {
                if !visible {
                    return None;
                }
            }
            _ = ctx.cancel.cancelled() => return None,
        }

        let looked_up = tokio::select! {
            url = self.lookup(subject) => url,
            _ = ctx.cancel.cancelled() => return None,
        };
        if let Some(url) = looked_up {
            return Some(CoverArt::Remote(url));
        }

        if ctx.cancel.is_cancelled() {
            return None;
        }

        // Stage 2: terminal placeholder.
        Some(CoverArt::Placeholder(placeholder_card(
            &subject.title,
            &subject.author,
            index,
        )))
    }

    /// Stage 1 lookup: ISBN-keyed query first, title+author keywords as the
    /// fallback. Errors, non-success statuses, and volumes without image
    /// links are all just "no data".
    async fn lookup(&self, subject: &CoverSubject) -> Option<String> {
        if let Some(isbn) = subject.isbn.as_deref() {
            if let Ok(Some(info)) = self.metadata.find_by_isbn(isbn).await {
                if let Some(url) = info.image_links.as_ref().and_then(|links| links.best()) {
                    return Some(url);
                }
            }
        }

        let query = format!("{} {}", subject.title, subject.author);
        match self.metadata.find_by_query(&query).await {
            Ok(Some(info)) => info.image_links.as_ref().and_then(|links| links.best()),
            _ => None,
        }
    }
}
