//! Free-text splitting into candidate feature statements.
//!
//! Splits are zero-width: the delimiter that triggers a split (a numbered
//! marker, a bullet glyph, a keyword hint) stays at the head of the next
//! segment, and marker/bullet prefixes are stripped afterwards.

/// Segments shorter than this many characters are discarded as noise.
pub(crate) const MIN_SEGMENT_CHARS: usize = 4;

const TRAILING_SEPARATORS: &[char] = &[',', '،', ';', '؛'];

/// Splits `text` into trimmed feature candidates.
///
/// A new segment starts:
/// - at every line break;
/// - before a numbered marker such as `"2."` or `"۲."` that is not glued to a
///   preceding word or digit and is not a decimal point;
/// - before a `•`, or before a `-`/`*` that follows whitespace (so `Wi-Fi`
///   stays whole);
/// - before any of `hints` that begins a word.
///
/// Each segment loses its marker/bullet prefix and trailing list separators,
/// is trimmed, and is dropped when shorter than four characters. Never fails;
/// an input without delimiters comes back as a single trimmed segment.
#[must_use]
pub fn segment(text: &str, hints: &[&str]) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut cuts = vec![0usize];

    for idx in 1..chars.len() {
        let (pos, ch) = chars[idx];
        let prev = chars[idx - 1].1;
        let word_start = !prev.is_alphanumeric() && prev != '\u{200C}' && prev != '\u{200D}';

        let is_cut = matches!(ch, '\n' | '\r' | '•')
            || (matches!(ch, '-' | '*') && prev.is_whitespace())
            || (is_digit(ch) && word_start && numeric_marker_at(&chars, idx))
            || (word_start
                && hints
                    .iter()
                    .any(|hint| !hint.is_empty() && text[pos..].starts_with(hint)));

        if is_cut {
            cuts.push(pos);
        }
    }
    cuts.push(text.len());
    cuts.dedup();

    cuts.windows(2)
        .filter_map(|w| clean_segment(&text[w[0]..w[1]]))
        .collect()
}

/// Returns `true` if a run of digits starting at `idx` is immediately
/// followed by a `.` that is not itself followed by another digit.
fn numeric_marker_at(chars: &[(usize, char)], idx: usize) -> bool {
    let mut j = idx;
    while j < chars.len() && is_digit(chars[j].1) {
        j += 1;
    }
    if j == idx || j >= chars.len() || chars[j].1 != '.' {
        return false;
    }
    chars.get(j + 1).is_none_or(|&(_, next)| !is_digit(next))
}

/// ASCII, Persian (`۰`–`۹`) and Arabic-Indic (`٠`–`٩`) digits.
pub(crate) fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit() || ('۰'..='۹').contains(&ch) || ('٠'..='٩').contains(&ch)
}

/// Removes any leading numbered-marker or bullet prefixes from `s`.
pub(crate) fn strip_marker_prefix(s: &str) -> &str {
    let mut rest = s.trim_start();
    loop {
        if let Some(stripped) = rest.strip_prefix(['•', '-', '*']) {
            rest = stripped.trim_start();
            continue;
        }
        let digits_end = rest
            .char_indices()
            .find(|&(_, c)| !is_digit(c))
            .map_or(rest.len(), |(i, _)| i);
        if digits_end > 0 {
            if let Some(stripped) = rest[digits_end..].strip_prefix('.') {
                if !stripped.starts_with(is_digit) {
                    rest = stripped.trim_start();
                    continue;
                }
            }
        }
        return rest;
    }
}

/// Returns `true` when `s` opens with a numbered marker or a bullet glyph.
pub(crate) fn starts_with_marker(s: &str) -> bool {
    let trimmed = s.trim_start();
    strip_marker_prefix(trimmed).len() != trimmed.len()
}

fn clean_segment(raw: &str) -> Option<String> {
    let cleaned = strip_marker_prefix(raw)
        .trim()
        .trim_end_matches(TRAILING_SEPARATORS)
        .trim_end();
    (cleaned.chars().count() >= MIN_SEGMENT_CHARS).then(|| cleaned.to_string())
}
