//! Pending-URL list with validation and dedup.
//!
//! The list is an owned collection held by whoever drives the intake flow
//! (the CLI, a wizard screen, a test). It is never process-global; callers
//! mutate it through `&mut` and freeze it into a `CrawlRequest` at submit
//! time.

use tracing::debug;
use url::Url;

use scrapeflow_shared::{Result, ScrapeFlowError};

// ---------------------------------------------------------------------------
// ImportSummary
// ---------------------------------------------------------------------------

/// Partition counts from a bulk import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Lines that parsed and were new — merged into the list.
    pub added: usize,
    /// Lines that failed URL parsing.
    pub invalid: usize,
    /// Lines already in the list, or repeated within the same blob.
    pub duplicate: usize,
}

// ---------------------------------------------------------------------------
// UrlList
// ---------------------------------------------------------------------------

/// Ordered, case-sensitive-unique collection of pending crawl URLs.
#[derive(Debug, Clone, Default)]
pub struct UrlList {
    urls: Vec<Url>,
}

impl UrlList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a single URL candidate.
    ///
    /// Fails with [`ScrapeFlowError::InvalidUrl`] if `candidate` is not an
    /// absolute URL, or [`ScrapeFlowError::DuplicateUrl`] if an exact
    /// (case-sensitive) match is already present. On success the URL is
    /// appended, preserving insertion order.
    pub fn add(&mut self, candidate: &str) -> Result<&Url> {
        let url = Url::parse(candidate).map_err(|_| ScrapeFlowError::InvalidUrl {
            candidate: candidate.to_string(),
        })?;

        if self.contains(&url) {
            return Err(ScrapeFlowError::DuplicateUrl {
                url: url.to_string(),
            });
        }

        self.urls.push(url);
        Ok(self.urls.last().expect("just pushed"))
    }

    /// Bulk-import a newline-separated blob of URL candidates.
    ///
    /// Lines are trimmed; empty lines are dropped. Each remaining line is
    /// categorized rather than rejected: malformed lines count as
    /// `invalid`, exact matches against the list or earlier lines of the
    /// same blob count as `duplicate`, and the rest are merged in original
    /// order. Never errors.
    pub fn import(&mut self, blob: &str) -> ImportSummary {
        let mut summary = ImportSummary::default();

        for line in blob.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let Ok(url) = Url::parse(line) else {
                debug!(candidate = line, "skipping unparseable line");
                summary.invalid += 1;
                continue;
            };

            if self.contains(&url) {
                summary.duplicate += 1;
                continue;
            }

            self.urls.push(url);
            summary.added += 1;
        }

        debug!(
            added = summary.added,
            invalid = summary.invalid,
            duplicate = summary.duplicate,
            "bulk import merged"
        );

        summary
    }

    /// Remove the entry at `index`, leaving the rest in order.
    /// Returns `None` when `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> Option<Url> {
        if index < self.urls.len() {
            Some(self.urls.remove(index))
        } else {
            None
        }
    }

    /// The pending URLs, in insertion order.
    pub fn urls(&self) -> &[Url] {
        &self.urls
    }

    /// Number of pending URLs.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Drop all pending URLs.
    pub fn clear(&mut self) {
        self.urls.clear();
    }

    /// Consume the list, yielding the URLs in order.
    pub fn into_urls(self) -> Vec<Url> {
        self.urls
    }

    fn contains(&self, url: &Url) -> bool {
        // Exact string comparison: the spec's dedup is case-sensitive and
        // deliberately does not normalize beyond what Url::parse does.
        self.urls.iter().any(|u| u.as_str() == url.as_str())
    }
}
