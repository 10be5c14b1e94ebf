//! Price text normalization.
//!
//! Persian storefronts print prices as `۱۲۰٬۰۰۰ تومان`, Latin ones as
//! `1,200.50 $`. Both normalize to a plain ASCII decimal string, which is
//! what the WooCommerce API expects in `regular_price`/`sale_price`.

use scraper::ElementRef;

use crate::selectors::{first_match, first_text, SelectorSpec};

/// Regular and sale price of one product, already normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceInfo {
    pub regular: Option<String>,
    pub sale: Option<String>,
}

const AMOUNT_SELECTORS: &[SelectorSpec] = &[
    SelectorSpec::ClassContains("amount"),
    SelectorSpec::ClassContains("price-value"),
    SelectorSpec::HasAttr("data-price"),
];

/// Reads prices from the first element matching `price_selectors`.
///
/// A struck-through `<del>` next to an `<ins>` means the product is on sale:
/// `del` holds the regular price and `ins` the sale price. Otherwise the
/// first amount inside the container is the regular price. A sale price
/// that is not below the regular price is dropped.
#[must_use]
pub fn extract_prices(root: ElementRef<'_>, price_selectors: &[SelectorSpec]) -> PriceInfo {
    let Some(container) = first_match(root, price_selectors) else {
        return PriceInfo::default();
    };

    let struck = first_text(container, &[SelectorSpec::Tag("del"), SelectorSpec::Tag("s")]);
    let current = first_text(container, &[SelectorSpec::Tag("ins")]);

    if let (Some(struck), Some(current)) = (struck, current) {
        let regular = normalize_price(&struck);
        let sale = normalize_price(&current);
        let sale = match (&regular, sale) {
            (Some(r), Some(s)) if is_lower(&s, r) => Some(s),
            (None, s) => s,
            (Some(_), _) => None,
        };
        return match (regular, sale) {
            (None, sale) => PriceInfo {
                regular: sale,
                sale: None,
            },
            (regular, sale) => PriceInfo { regular, sale },
        };
    }

    let text = first_text(container, AMOUNT_SELECTORS).unwrap_or_else(|| {
        crate::selectors::collapse_whitespace(&container.text().collect::<String>())
    });
    PriceInfo {
        regular: normalize_price(&text),
        sale: None,
    }
}

/// Converts a displayed price to an ASCII decimal string.
///
/// Persian and Arabic-Indic digits become ASCII, thousands separators and
/// currency words are dropped. A `.` or `٫` followed by one or two digits at
/// the end of the number is kept as the decimal point. Ranges (`۱۰۰ – ۲۰۰`)
/// yield their first number. Returns `None` when no digit is present or the
/// amount is zero.
#[must_use]
pub fn normalize_price(raw: &str) -> Option<String> {
    let mut number = String::new();
    let mut started = false;

    for ch in raw.chars() {
        if let Some(d) = ascii_digit(ch) {
            number.push(d);
            started = true;
        } else if matches!(ch, '.' | '٫') && started {
            number.push('.');
        } else if started && !is_group_separator(ch) {
            break;
        }
    }

    let number = number.trim_end_matches('.').to_string();
    let cleaned = match number.rfind('.') {
        Some(pos) if number.len() - pos - 1 <= 2 && number.matches('.').count() == 1 => number,
        _ => number.replace('.', ""),
    };

    let cleaned = cleaned.trim_start_matches('0');
    let cleaned = if cleaned.starts_with('.') || cleaned.is_empty() {
        format!("0{cleaned}")
    } else {
        cleaned.to_string()
    };

    let is_zero = cleaned.chars().all(|c| c == '0' || c == '.');
    (!is_zero).then_some(cleaned)
}

/// Thousands separators. A space also separates the currency word, which
/// then ends the number.
fn is_group_separator(ch: char) -> bool {
    matches!(ch, ',' | '٬' | '،' | '\'' | '\u{00A0}' | ' ')
}

fn ascii_digit(ch: char) -> Option<char> {
    match ch {
        '0'..='9' => Some(ch),
        '۰'..='۹' => char::from_digit(ch as u32 - '۰' as u32, 10),
        '٠'..='٩' => char::from_digit(ch as u32 - '٠' as u32, 10),
        _ => None,
    }
}

fn is_lower(candidate: &str, reference: &str) -> bool {
    match (candidate.parse::<f64>(), reference.parse::<f64>()) {
        (Ok(c), Ok(r)) => c < r,
        _ => true,
    }
}
