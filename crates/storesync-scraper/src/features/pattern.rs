//! Labeled-section matching: finds a "features:" block in rendered page text.

use regex::Regex;

use super::vocabulary::LabelPattern;

/// Whitespace and zero-width joiners that may separate the words of an
/// anchor. Persian markup mixes ZWNJ, ZWJ, NBSP and plain spaces freely.
const WORD_GAP: &str = r"[\s\x{200C}\x{200D}\x{00A0}]*";

/// Two or more blank lines close a labeled block. A single blank line is
/// common inside a block and does not.
const BLANK_LINES: &str = r"\n[^\S\n]*\n[^\S\n]*\n";

/// Label rules compiled to regexes, in rule order.
///
/// Rules whose pattern fails to compile are logged and left out.
#[derive(Debug, Clone, Default)]
pub struct LabelRules {
    compiled: Vec<Regex>,
}

impl LabelRules {
    #[must_use]
    pub fn compile(labels: &[LabelPattern]) -> Self {
        Self {
            compiled: labels.iter().filter_map(build_label_regex).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    /// Returns the text following the first matching anchor, up to the first
    /// terminator or the end of `text`.
    ///
    /// Rules are tried in order; a rule whose capture is empty after
    /// trimming is skipped. Matching is case-insensitive.
    #[must_use]
    pub fn find_span(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }

        self.compiled.iter().find_map(|re| {
            let caps = re.captures(text)?;
            let body = caps.name("body")?.as_str().trim();
            (!body.is_empty()).then(|| body.to_string())
        })
    }
}

/// One-shot form of [`LabelRules::find_span`]. Returns `None` when no anchor
/// produces a non-empty span.
#[must_use]
pub fn extract_labeled_span(text: &str, labels: &[LabelPattern]) -> Option<String> {
    LabelRules::compile(labels).find_span(text)
}

/// Compiles `anchor [:] body (terminator | end)` for one rule.
///
/// Terminator phrases only close the block when they begin a word, so a
/// stop-phrase embedded in a longer word does not truncate the capture.
fn build_label_regex(label: &LabelPattern) -> Option<Regex> {
    let anchor = phrase_pattern(&label.anchor)?;

    let mut terminators = vec![BLANK_LINES.to_string()];
    terminators.extend(
        label
            .terminators
            .iter()
            .filter_map(|t| phrase_pattern(t))
            .map(|p| format!(r"[\s\x{{200C}}]{p}")),
    );

    let pattern = format!(
        r"(?is)\b{anchor}\b{WORD_GAP}[:：]?(?P<body>.*?)(?:{}|\z)",
        terminators.join("|")
    );

    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(anchor = %label.anchor, error = %e, "skipping label rule with invalid pattern");
            None
        }
    }
}

/// Escapes each word of `phrase` and joins them with [`WORD_GAP`].
fn phrase_pattern(phrase: &str) -> Option<String> {
    let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
    (!words.is_empty()).then(|| words.join(WORD_GAP))
}
