//! Core domain types for ScrapeFlow crawl batches.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::error::{Result, ScrapeFlowError};

/// Crawl depth must stay within this inclusive range.
pub const DEPTH_RANGE: (u8, u8) = (1, 5);

/// Max-pages-per-URL must stay within this inclusive range.
pub const MAX_PAGES_RANGE: (u8, u8) = (1, 50);

// ---------------------------------------------------------------------------
// TaskId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper for crawl task identifiers (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub Uuid);

impl TaskId {
    /// Generate a new time-sortable task identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// AiProvider
// ---------------------------------------------------------------------------

/// Which AI backend analyzes the scraped content.
///
/// A closed enumeration: unknown provider strings are rejected at parse
/// time rather than mapped to [`AiProvider::Default`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Default,
    OpenAi,
    Gemini,
    Claude,
}

impl AiProvider {
    /// Wire-format tag for this provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Claude => "claude",
        }
    }
}

impl std::fmt::Display for AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AiProvider {
    type Err = ScrapeFlowError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "default" => Ok(Self::Default),
            "openai" => Ok(Self::OpenAi),
            "gemini" => Ok(Self::Gemini),
            "claude" => Ok(Self::Claude),
            other => Err(ScrapeFlowError::validation(format!(
                "unknown AI provider '{other}' (expected default, openai, gemini, or claude)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// CrawlOptions / CrawlRequest
// ---------------------------------------------------------------------------

/// Per-batch crawl settings shared by every URL in the batch.
///
/// Out-of-range depth and max-pages values are clamped here, at the
/// boundary that builds the request; the pure estimation and
/// classification functions downstream assume in-range input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlOptions {
    /// Link-follow depth from each start URL, clamped to `[1, 5]`.
    pub depth: u8,
    /// Page cap per start URL, clamped to `[1, 50]`.
    pub max_pages: u8,
    /// Whether `selectors` should be sent with each task.
    pub use_custom_selectors: bool,
    /// Named CSS-like selectors, opaque to this core.
    #[serde(default)]
    pub selectors: BTreeMap<String, String>,
    /// Whether the crawl result should be auto-saved to the catalog.
    pub auto_save: bool,
    /// AI backend for content analysis.
    #[serde(default)]
    pub ai_provider: AiProvider,
}

impl CrawlOptions {
    /// Clamp `depth` and `max_pages` into their valid ranges.
    pub fn clamped(mut self) -> Self {
        self.depth = self.depth.clamp(DEPTH_RANGE.0, DEPTH_RANGE.1);
        self.max_pages = self.max_pages.clamp(MAX_PAGES_RANGE.0, MAX_PAGES_RANGE.1);
        self
    }
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            depth: 2,
            max_pages: 10,
            use_custom_selectors: false,
            selectors: BTreeMap::new(),
            auto_save: true,
            ai_provider: AiProvider::Default,
        }
    }
}

/// Shared configuration plus the ordered target URL list for one batch.
///
/// The URL list is case-sensitive unique with insertion order preserved;
/// [`crate::config`]-level defaults and intake-level dedup guarantee that
/// before a request is constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlRequest {
    pub urls: Vec<Url>,
    #[serde(flatten)]
    pub options: CrawlOptions,
}

impl CrawlRequest {
    /// Build a request, clamping option ranges at this boundary.
    pub fn new(urls: Vec<Url>, options: CrawlOptions) -> Self {
        Self {
            urls,
            options: options.clamped(),
        }
    }

    /// Freeze this request into one immutable [`CrawlTask`] per URL,
    /// in list order. Selectors are carried only when custom selectors
    /// are enabled.
    pub fn tasks(&self) -> Vec<CrawlTask> {
        self.urls
            .iter()
            .map(|url| CrawlTask {
                id: TaskId::new(),
                url: url.clone(),
                depth: self.options.depth,
                max_pages: self.options.max_pages,
                selectors: self
                    .options
                    .use_custom_selectors
                    .then(|| self.options.selectors.clone()),
                auto_save: self.options.auto_save,
                ai_provider: self.options.ai_provider,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// CrawlTask
// ---------------------------------------------------------------------------

/// One URL's fully-resolved submission, derived from a [`CrawlRequest`]
/// at submit time. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlTask {
    pub id: TaskId,
    pub url: Url,
    pub depth: u8,
    pub max_pages: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectors: Option<BTreeMap<String, String>>,
    pub auto_save: bool,
    pub ai_provider: AiProvider,
}

// ---------------------------------------------------------------------------
// Crawl results (external wire shapes)
// ---------------------------------------------------------------------------

/// Unstructured key/value data scraped from a page, before classification.
pub type RawMetadataMap = serde_json::Map<String, serde_json::Value>;

/// Structured output of the external crawl/AI pipeline for one page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub metadata: RawMetadataMap,
}

/// AI-produced analysis attached to a crawl result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// One record from the crawl result source (§external interfaces):
/// arrives out-of-band, after the batch that created its task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlRecord {
    pub id: String,
    pub task_id: TaskId,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_content: Option<String>,
    pub processed_data: ProcessedData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AiAnalysis>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(s: &str) -> Url {
        Url::parse(s).expect("test url")
    }

    #[test]
    fn task_id_roundtrip() {
        let id = TaskId::new();
        let s = id.to_string();
        let parsed: TaskId = s.parse().expect("parse TaskId");
        assert_eq!(id, parsed);
    }

    #[test]
    fn provider_lookup_table() {
        assert_eq!("openai".parse::<AiProvider>().unwrap(), AiProvider::OpenAi);
        assert_eq!("claude".parse::<AiProvider>().unwrap(), AiProvider::Claude);
        assert_eq!(AiProvider::Gemini.as_str(), "gemini");
        assert!("gpt-5".parse::<AiProvider>().is_err());
    }

    #[test]
    fn options_are_clamped_at_the_boundary() {
        let opts = CrawlOptions {
            depth: 9,
            max_pages: 200,
            ..CrawlOptions::default()
        };
        let request = CrawlRequest::new(vec![u("https://example.com/")], opts);
        assert_eq!(request.options.depth, 5);
        assert_eq!(request.options.max_pages, 50);

        let opts = CrawlOptions {
            depth: 0,
            max_pages: 0,
            ..CrawlOptions::default()
        };
        let request = CrawlRequest::new(vec![u("https://example.com/")], opts);
        assert_eq!(request.options.depth, 1);
        assert_eq!(request.options.max_pages, 1);
    }

    #[test]
    fn tasks_follow_url_order_and_share_options() {
        let urls = vec![
            u("https://a.example.com/p/1"),
            u("https://b.example.com/p/2"),
        ];
        let request = CrawlRequest::new(urls.clone(), CrawlOptions::default());
        let tasks = request.tasks();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].url, urls[0]);
        assert_eq!(tasks[1].url, urls[1]);
        assert!(tasks.iter().all(|t| t.depth == 2 && t.max_pages == 10));
    }

    #[test]
    fn selectors_only_carried_when_enabled() {
        let mut selectors = BTreeMap::new();
        selectors.insert("price".to_string(), ".price .amount".to_string());

        let opts = CrawlOptions {
            use_custom_selectors: false,
            selectors: selectors.clone(),
            ..CrawlOptions::default()
        };
        let request = CrawlRequest::new(vec![u("https://example.com/")], opts);
        assert!(request.tasks()[0].selectors.is_none());

        let opts = CrawlOptions {
            use_custom_selectors: true,
            selectors,
            ..CrawlOptions::default()
        };
        let request = CrawlRequest::new(vec![u("https://example.com/")], opts);
        let tasks = request.tasks();
        assert_eq!(
            tasks[0].selectors.as_ref().unwrap()["price"],
            ".price .amount"
        );
    }

    #[test]
    fn crawl_record_camel_case_roundtrip() {
        let json = r#"{
            "id": "r-1",
            "taskId": "01890a5d-ac96-774b-bcce-b302099a8057",
            "status": "completed",
            "processedData": {
                "title": "Widget",
                "metadata": { "spec_color": "red" }
            },
            "aiAnalysis": { "sentiment": 0.6, "confidenceScore": 0.9 },
            "createdAt": "2025-11-02T10:00:00Z"
        }"#;

        let record: CrawlRecord = serde_json::from_str(json).expect("deserialize");
        assert_eq!(record.status, "completed");
        assert_eq!(
            record.processed_data.metadata["spec_color"],
            serde_json::json!("red")
        );
        assert_eq!(record.ai_analysis.as_ref().unwrap().sentiment, Some(0.6));

        let out = serde_json::to_string(&record).expect("serialize");
        assert!(out.contains("taskId"));
        assert!(out.contains("confidenceScore"));
        assert!(!out.contains("rawHtml"));
    }
}
