//! Storefront platform detection.

use std::fmt;

use serde::Serialize;

/// Storefront platform a product page was rendered by. Decides which
/// selector tables the page extractor uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteKind {
    WooCommerce,
    Custom,
}

impl fmt::Display for SiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::WooCommerce => "woocommerce",
            Self::Custom => "custom",
        })
    }
}

/// Markup fingerprints left by WordPress and the WooCommerce plugin.
/// Two hits are required so that a blog post linking to a WooCommerce shop
/// is not mistaken for one.
const WOO_MARKERS: &[&str] = &[
    "woocommerce",
    "/wp-content/",
    "wp-json",
    "name=\"generator\" content=\"wordpress",
    "product_title",
    "wc-block",
];

const REQUIRED_MARKERS: usize = 2;

/// Classifies a page by counting platform fingerprints in its markup.
#[must_use]
pub fn detect_site_kind(html: &str) -> SiteKind {
    let lowered = html.to_ascii_lowercase();
    let hits = WOO_MARKERS
        .iter()
        .filter(|marker| lowered.contains(*marker))
        .count();

    if hits >= REQUIRED_MARKERS {
        SiteKind::WooCommerce
    } else {
        SiteKind::Custom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_woocommerce_product_page() {
        let html = r#"<html><head><meta name="generator" content="WordPress 6.5">
            <link rel="stylesheet" href="/wp-content/plugins/woocommerce/style.css"></head>
            <body class="product-template-default woocommerce"><h1 class="product_title">X</h1></body></html>"#;
        assert_eq!(detect_site_kind(html), SiteKind::WooCommerce);
    }

    #[test]
    fn single_marker_is_not_enough() {
        let html = r#"<p>Buy at <a href="https://woocommerce.com">our shop</a></p>"#;
        assert_eq!(detect_site_kind(html), SiteKind::Custom);
    }

    #[test]
    fn plain_storefront_is_custom() {
        let html = r#"<div class="product-page"><h1>Scooter</h1></div>"#;
        assert_eq!(detect_site_kind(html), SiteKind::Custom);
    }

    #[test]
    fn display_names() {
        assert_eq!(SiteKind::WooCommerce.to_string(), "woocommerce");
        assert_eq!(SiteKind::Custom.to_string(), "custom");
    }
}
