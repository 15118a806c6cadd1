//! Scraped-metadata noise filtering and semantic grouping.
//!
//! Raw scraped key/value maps are noisy: they carry form controls, entry
//! placeholders, and script fragments alongside real product data. The
//! classifier drops the noise and buckets what survives into display
//! groups, recomputed fresh from the raw map on every call.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::trace;

use scrapeflow_shared::RawMetadataMap;

/// String values longer than this many characters are treated as page
/// debris, not data.
const MAX_VALUE_LEN: usize = 500;

// ---------------------------------------------------------------------------
// MetadataGroup
// ---------------------------------------------------------------------------

/// Semantic bucket a metadata entry is displayed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetadataGroup {
    ProductDetails,
    Specifications,
    Pricing,
    Shipping,
    Other,
}

impl MetadataGroup {
    /// Fixed display order.
    pub const ALL: [MetadataGroup; 5] = [
        Self::ProductDetails,
        Self::Specifications,
        Self::Pricing,
        Self::Shipping,
        Self::Other,
    ];

    /// Human-readable group heading.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ProductDetails => "Product Details",
            Self::Specifications => "Specifications",
            Self::Pricing => "Pricing",
            Self::Shipping => "Shipping & Availability",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for MetadataGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// NoisePolicy
// ---------------------------------------------------------------------------

/// Substring keyword sets for group classification, checked in priority
/// order after the Specifications key-shape check.
const PRICING_KEYWORDS: [&str; 4] = ["price", "discount", "sale", "cost"];
const SHIPPING_KEYWORDS: [&str; 5] = ["shipping", "delivery", "availability", "stock", "inventory"];
const DETAIL_KEYWORDS: [&str; 14] = [
    "dimension",
    "weight",
    "size",
    "color",
    "material",
    "brand",
    "model",
    "manufacturer",
    "sku",
    "upc",
    "ean",
    "gtin",
    "mpn",
    "isbn",
];

/// Default form-noise patterns, matched case-insensitively against both
/// the key and (for strings) the value.
const DEFAULT_NOISE_PATTERNS: [&str; 7] = [
    // Combined price/availability form fields
    r"price\s*[/&_]?\s*availability",
    // "url ..." markers left by the scraper
    r"^url\s",
    // Shipping-cost entry fields
    r"shipping\s+cost",
    // Date-entry placeholders and bare numeric dates
    r"^[dm]{2}/[dm]{2}/y{2,4}$",
    r"^\d{1,2}/\d{1,2}/\d{2,4}$",
    // Instructional form phrases
    r"please\s+select|enter\s+the|where\s+you\s+found|submit|feedback",
    // Bare availability toggle words
    r"^(online|offline)$",
];

static DEFAULT_NOISE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    DEFAULT_NOISE_PATTERNS
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).expect("valid noise pattern"))
        .collect()
});

/// Replaceable noise-filtering policy.
///
/// The default pattern set is a heuristic that can both over- and
/// under-filter (a legitimate value containing "please select" is
/// dropped); callers with better knowledge of their sources supply their
/// own compiled set via [`NoisePolicy::with_patterns`].
#[derive(Debug, Clone, Default)]
pub struct NoisePolicy {
    patterns: Option<Vec<Regex>>,
}

impl NoisePolicy {
    /// Replace the default pattern set entirely.
    pub fn with_patterns(patterns: Vec<Regex>) -> Self {
        Self {
            patterns: Some(patterns),
        }
    }

    fn patterns(&self) -> &[Regex] {
        match &self.patterns {
            Some(p) => p,
            None => &DEFAULT_NOISE,
        }
    }

    /// Whether a key or trimmed string value looks like form noise.
    fn is_noise(&self, text: &str) -> bool {
        let text = text.trim();
        self.patterns().iter().any(|re| re.is_match(text))
    }
}

// ---------------------------------------------------------------------------
// CategorizedMetadata
// ---------------------------------------------------------------------------

/// Raw metadata reorganized into named semantic groups with noise removed.
///
/// Only non-empty groups are present; entries keep the lexicographic key
/// order they were classified in.
#[derive(Debug, Clone, Default)]
pub struct CategorizedMetadata {
    sections: Vec<(MetadataGroup, Vec<(String, String)>)>,
}

impl CategorizedMetadata {
    /// Groups in display order, each with its `(display key, display value)` entries.
    pub fn sections(&self) -> &[(MetadataGroup, Vec<(String, String)>)] {
        &self.sections
    }

    /// The entries of a single group, if it survived classification.
    pub fn group(&self, group: MetadataGroup) -> Option<&[(String, String)]> {
        self.sections
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, entries)| entries.as_slice())
    }

    /// Whether every entry was filtered out. Not an error state.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total entry count across all groups.
    pub fn len(&self) -> usize {
        self.sections.iter().map(|(_, e)| e.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// organize
// ---------------------------------------------------------------------------

/// Classify a raw metadata map with the default noise policy.
pub fn organize(raw: &RawMetadataMap) -> CategorizedMetadata {
    organize_with(raw, &NoisePolicy::default())
}

/// Classify a raw metadata map under a caller-supplied noise policy.
pub fn organize_with(raw: &RawMetadataMap, policy: &NoisePolicy) -> CategorizedMetadata {
    // Lexicographic key order defines the display tie-break within groups.
    let mut keys: Vec<&String> = raw.keys().collect();
    keys.sort();

    let mut buckets: [Vec<(String, String)>; 5] = Default::default();

    for key in keys {
        let value = &raw[key];

        if value.is_null() {
            continue;
        }
        if let Value::String(s) = value {
            if s.is_empty() {
                continue;
            }
            if s.chars().nth(MAX_VALUE_LEN).is_some()
                || s.contains("function(")
                || s.contains("var ")
            {
                trace!(key, "dropping script/overlong value");
                continue;
            }
            if policy.is_noise(s) {
                trace!(key, "dropping noisy value");
                continue;
            }
        }
        if policy.is_noise(key) {
            trace!(key, "dropping noisy key");
            continue;
        }

        let (group, display_key) = classify_key(key);
        buckets[group as usize].push((format_key(&display_key), format_value(value)));
    }

    let sections = MetadataGroup::ALL
        .into_iter()
        .zip(buckets)
        .filter(|(_, entries)| !entries.is_empty())
        .collect();

    CategorizedMetadata { sections }
}

/// Classify one key, returning its group and the key to display
/// (the `spec_` prefix is stripped for Specifications entries).
fn classify_key(key: &str) -> (MetadataGroup, String) {
    let lower = key.to_lowercase();

    // Strip the prefix from the original key so its casing survives for
    // the space-before-uppercase display rule.
    if key
        .get(..5)
        .is_some_and(|p| p.eq_ignore_ascii_case("spec_"))
    {
        return (MetadataGroup::Specifications, key[5..].to_string());
    }
    if lower.contains("specification") {
        return (MetadataGroup::Specifications, key.to_string());
    }
    if PRICING_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return (MetadataGroup::Pricing, key.to_string());
    }
    if SHIPPING_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return (MetadataGroup::Shipping, key.to_string());
    }
    if DETAIL_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return (MetadataGroup::ProductDetails, key.to_string());
    }
    (MetadataGroup::Other, key.to_string())
}

// ---------------------------------------------------------------------------
// Display formatting
// ---------------------------------------------------------------------------

/// Render a raw metadata value for display.
///
/// Arrays are comma-joined, objects become JSON, null becomes `"N/A"`.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "N/A".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
        other => other.to_string(),
    }
}

/// Turn a raw key into a display label: underscores become spaces, a
/// space is inserted before each internal uppercase letter, and the first
/// character is capitalized.
pub fn format_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);

    for (i, ch) in key.chars().enumerate() {
        if ch == '_' {
            out.push(' ');
        } else if ch.is_uppercase() && i > 0 {
            out.push(' ');
            out.push(ch);
        } else {
            out.push(ch);
        }
    }

    let trimmed = out.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
