//! Free-text structure detection for scraped descriptions.
//!
//! Descriptions scraped from product pages often embed a bullet list in
//! the middle of prose. The detector splits around the first contiguous
//! bullet block so the renderer can lay it out as a real list; everything
//! else stays a plain paragraph with line breaks preserved.

/// Default character budget for collapsed description text.
pub const TRUNCATE_LIMIT: usize = 800;

/// Bullet markers recognized at the start of a line.
const BULLET_MARKERS: [&str; 3] = ["• ", "- ", "— "];

// ---------------------------------------------------------------------------
// TextBlock
// ---------------------------------------------------------------------------

/// Structured view of a free-text description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextBlock {
    /// Text split around its first contiguous bullet block.
    Bulleted {
        /// Lines before the bullet block, joined with line breaks.
        prefix: String,
        /// Bullet items, markers stripped and trimmed.
        bullets: Vec<String>,
        /// Lines after the bullet block, joined with line breaks.
        suffix: String,
    },
    /// No bullet structure found; line breaks preserved.
    Paragraph(String),
}

/// Detect bullet-list structure in `text`.
///
/// The first contiguous run of bullet-prefixed lines becomes the bullet
/// block; bullets empty after marker stripping are discarded. When no
/// such run exists (or every bullet strips to nothing), the whole text is
/// returned as a paragraph.
pub fn detect_bullet_structure(text: &str) -> TextBlock {
    let lines: Vec<&str> = text.lines().collect();

    let Some(start) = lines.iter().position(|l| bullet_content(l).is_some()) else {
        return TextBlock::Paragraph(text.to_string());
    };

    let mut end = start;
    while end < lines.len() && bullet_content(lines[end]).is_some() {
        end += 1;
    }

    let bullets: Vec<String> = lines[start..end]
        .iter()
        .filter_map(|l| bullet_content(l))
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
        .collect();

    if bullets.is_empty() {
        return TextBlock::Paragraph(text.to_string());
    }

    TextBlock::Bulleted {
        prefix: lines[..start].join("\n").trim().to_string(),
        bullets,
        suffix: lines[end..].join("\n").trim().to_string(),
    }
}

/// The content of a line after its bullet marker, if the line is one.
fn bullet_content(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    for marker in BULLET_MARKERS {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            return Some(rest);
        }
    }
    // A bare marker with nothing after it still belongs to the block.
    for marker in ["•", "-", "—"] {
        if trimmed == marker {
            return Some("");
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Truncation
// ---------------------------------------------------------------------------

/// A possibly-shortened view over description text. Expand/collapse state
/// belongs to the caller, not this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncated<'a> {
    /// The text to show.
    pub visible: &'a str,
    /// Whether anything was cut off.
    pub truncated: bool,
}

/// Cut `text` down to at most `limit` characters.
///
/// Counts characters rather than bytes so multi-byte text never splits
/// mid-character.
pub fn truncate(text: &str, limit: usize) -> Truncated<'_> {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => Truncated {
            visible: &text[..byte_idx],
            truncated: true,
        },
        None => Truncated {
            visible: text,
            truncated: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_bullet_block_with_prefix_and_suffix() {
        let block = detect_bullet_structure("Intro\n• One\n• Two\nOutro");
        assert_eq!(
            block,
            TextBlock::Bulleted {
                prefix: "Intro".into(),
                bullets: vec!["One".into(), "Two".into()],
                suffix: "Outro".into(),
            }
        );
    }

    #[test]
    fn only_first_contiguous_block_is_split() {
        let block =
            detect_bullet_structure("Top\n- a\n- b\nmiddle\n- c");
        match block {
            TextBlock::Bulleted {
                bullets, suffix, ..
            } => {
                assert_eq!(bullets, ["a", "b"]);
                // The second run stays in the suffix untouched.
                assert_eq!(suffix, "middle\n- c");
            }
            other => panic!("expected bulleted block, got {other:?}"),
        }
    }

    #[test]
    fn hyphen_and_em_dash_markers() {
        let block = detect_bullet_structure("- first\n— second");
        match block {
            TextBlock::Bulleted { prefix, bullets, suffix } => {
                assert!(prefix.is_empty());
                assert_eq!(bullets, ["first", "second"]);
                assert!(suffix.is_empty());
            }
            other => panic!("expected bulleted block, got {other:?}"),
        }
    }

    #[test]
    fn hyphenated_words_are_not_bullets() {
        let text = "A well-known product\nwith multi-line text";
        assert_eq!(
            detect_bullet_structure(text),
            TextBlock::Paragraph(text.to_string())
        );
    }

    #[test]
    fn plain_text_keeps_line_breaks() {
        let text = "Line one\nLine two\n\nLine four";
        assert_eq!(
            detect_bullet_structure(text),
            TextBlock::Paragraph(text.to_string())
        );
    }

    #[test]
    fn empty_bullets_are_discarded() {
        let block = detect_bullet_structure("Intro\n• One\n•\n• Two");
        match block {
            TextBlock::Bulleted { bullets, .. } => {
                assert_eq!(bullets, ["One", "Two"]);
            }
            other => panic!("expected bulleted block, got {other:?}"),
        }
    }

    #[test]
    fn all_empty_bullets_fall_back_to_paragraph() {
        let text = "Header\n•\n-";
        assert_eq!(
            detect_bullet_structure(text),
            TextBlock::Paragraph(text.to_string())
        );
    }

    #[test]
    fn truncate_short_text_untouched() {
        let t = truncate("short", TRUNCATE_LIMIT);
        assert_eq!(t.visible, "short");
        assert!(!t.truncated);
    }

    #[test]
    fn truncate_exactly_at_limit_untouched() {
        let text = "x".repeat(800);
        let t = truncate(&text, TRUNCATE_LIMIT);
        assert!(!t.truncated);
        assert_eq!(t.visible.len(), 800);
    }

    #[test]
    fn truncate_long_text_cuts_at_limit() {
        let text = "x".repeat(801);
        let t = truncate(&text, TRUNCATE_LIMIT);
        assert!(t.truncated);
        assert_eq!(t.visible.chars().count(), 800);
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        let text = "é".repeat(10);
        let t = truncate(&text, 4);
        assert!(t.truncated);
        assert_eq!(t.visible, "éééé");
    }
}
