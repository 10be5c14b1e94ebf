//! Bilingual vocabulary shared by the segmenter, the markup extractor and the
//! labeled-section matcher.
//!
//! The stock table targets Persian-language storefronts selling small
//! appliances and personal mobility products, with English fallbacks for the
//! anchors and stop-phrases. Callers that scrape a different vertical can
//! build their own [`Vocabulary`] and hand it to
//! [`FeaturePipeline::with_vocabulary`](super::FeaturePipeline::with_vocabulary).

/// Domain words that start a new feature when no other delimiter is present
/// (motor, speed, blade, battery, charge, weight, dimensions, material,
/// length, capacity, time, power).
const KEYWORD_HINTS: &[&str] = &[
    "موتور", "سرعت", "تیغه", "باتری", "شارژ", "وزن", "ابعاد", "جنس", "طول", "ظرفیت", "زمان",
    "توان", "قدرت",
];

/// Administrative labels that storefront themes render next to the real
/// features: brand, category, price, in stock, stock, quantity, add to cart,
/// support.
const STOP_PHRASES: &[&str] = &[
    "برند",
    "دسته",
    "قیمت",
    "موجود در انبار",
    "موجودی",
    "تعداد",
    "افزودن به سبد",
    "پشتیبانی",
    "brand",
    "category",
    "categories",
    "price",
    "in stock",
    "quantity",
    "add to cart",
    "support",
    "sku",
];

/// Section labels that introduce a feature block, most specific first.
const ANCHORS: &[&str] = &[
    "ویژگی های محصول",
    "مشخصات فنی",
    "مشخصات محصول",
    "ویژگی ها",
    "product features",
    "key features",
    "specifications",
    "features",
];

/// One labeled-section rule: the phrase that opens a feature block and the
/// phrases that close it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPattern {
    pub anchor: String,
    pub terminators: Vec<String>,
}

/// Word tables injected into every text heuristic of the feature pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    pub keyword_hints: Vec<String>,
    pub stop_phrases: Vec<String>,
    pub anchors: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            keyword_hints: to_owned_vec(KEYWORD_HINTS),
            stop_phrases: to_owned_vec(STOP_PHRASES),
            anchors: to_owned_vec(ANCHORS),
        }
    }
}

impl Vocabulary {
    /// Returns the keyword hints as borrowed slices for [`super::segment`].
    #[must_use]
    pub fn hints(&self) -> Vec<&str> {
        self.keyword_hints.iter().map(String::as_str).collect()
    }

    /// Builds the ordered anchor/terminator rules for
    /// [`super::extract_labeled_span`]. Every anchor shares the stop-phrase
    /// vocabulary as its terminator set.
    #[must_use]
    pub fn label_patterns(&self) -> Vec<LabelPattern> {
        self.anchors
            .iter()
            .map(|anchor| LabelPattern {
                anchor: anchor.clone(),
                terminators: self.stop_phrases.clone(),
            })
            .collect()
    }

    /// Returns `true` when `entry` begins with a stop-phrase.
    ///
    /// Comparison is case-insensitive and ignores leading whitespace.
    #[must_use]
    pub fn is_stop_phrase(&self, entry: &str) -> bool {
        let lower = entry.trim_start().to_lowercase();
        self.stop_phrases
            .iter()
            .any(|phrase| lower.starts_with(&phrase.to_lowercase()))
    }

    /// Returns `true` when `text` opens with one of the keyword hints.
    #[must_use]
    pub fn starts_with_hint(&self, text: &str) -> bool {
        let trimmed = text.trim_start();
        self.keyword_hints
            .iter()
            .any(|hint| trimmed.starts_with(hint.as_str()))
    }
}

fn to_owned_vec(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_phrase_matches_persian_prefix() {
        let vocab = Vocabulary::default();
        assert!(vocab.is_stop_phrase("برند: شیائومی"));
        assert!(vocab.is_stop_phrase("  دسته بندی: اسکوتر"));
        assert!(vocab.is_stop_phrase("موجود در انبار"));
    }

    #[test]
    fn stop_phrase_is_case_insensitive_for_latin() {
        let vocab = Vocabulary::default();
        assert!(vocab.is_stop_phrase("Add to cart"));
        assert!(vocab.is_stop_phrase("PRICE: 120"));
    }

    #[test]
    fn stop_phrase_ignores_real_features() {
        let vocab = Vocabulary::default();
        assert!(!vocab.is_stop_phrase("Battery 2000mAh"));
        assert!(!vocab.is_stop_phrase("موتور قوی"));
    }

    #[test]
    fn label_patterns_keep_anchor_order() {
        let vocab = Vocabulary::default();
        let patterns = vocab.label_patterns();
        assert_eq!(patterns.len(), ANCHORS.len());
        assert_eq!(patterns[0].anchor, "ویژگی های محصول");
        assert_eq!(patterns.last().map(|p| p.anchor.as_str()), Some("features"));
        assert!(patterns.iter().all(|p| p.terminators == vocab.stop_phrases));
    }

    #[test]
    fn starts_with_hint_detects_domain_word() {
        let vocab = Vocabulary::default();
        assert!(vocab.starts_with_hint(" باتری لیتیومی"));
        assert!(!vocab.starts_with_hint("رنگ مشکی"));
    }
}
