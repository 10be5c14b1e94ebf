//! Gallery image URL collection.

use std::collections::HashSet;

use scraper::{ElementRef, Selector};

use crate::client::absolutize_url;
use crate::selectors::{first_match, SelectorSpec};

/// Attributes that may hold the full-size image, best first. Lazy-loading
/// themes put a placeholder in `src` and the real URL in a data attribute.
const IMAGE_ATTRS: &[&str] = &[
    "data-large_image",
    "data-zoom-image",
    "data-full",
    "data-src",
    "data-lazy-src",
    "src",
];

/// Substrings of URLs that are spinners or blanks rather than product photos.
const PLACEHOLDER_MARKERS: &[&str] = &[
    "placeholder",
    "blank.gif",
    "spinner",
    "loading.gif",
    "lazy.png",
    "transparent.png",
];

/// Returns absolute, deduplicated image URLs from the first gallery
/// container matched by `gallery_selectors`, in document order.
///
/// Gallery links (`<a href>` around an `<img>`) that point at an image file
/// are used when the image itself carries no full-size attribute.
#[must_use]
pub fn collect_image_urls(
    root: ElementRef<'_>,
    gallery_selectors: &[SelectorSpec],
    page_url: &str,
) -> Vec<String> {
    let Some(gallery) = first_match(root, gallery_selectors) else {
        return Vec::new();
    };
    let Ok(img_selector) = Selector::parse("img") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    for img in gallery.select(&img_selector) {
        let candidate = image_source(img).or_else(|| linked_image(img));
        let Some(url) = candidate.and_then(|src| absolutize_url(page_url, &src)) else {
            continue;
        };
        if is_placeholder(&url) {
            tracing::debug!(url = %url, "skipping placeholder image");
            continue;
        }
        if seen.insert(url.clone()) {
            urls.push(url);
        }
    }

    urls
}

fn image_source(img: ElementRef<'_>) -> Option<String> {
    IMAGE_ATTRS.iter().find_map(|attr| {
        img.value()
            .attr(attr)
            .map(str::trim)
            .filter(|v| !v.is_empty() && !v.starts_with("data:") && !is_placeholder(v))
            .map(str::to_owned)
    })
}

fn linked_image(img: ElementRef<'_>) -> Option<String> {
    let parent = img.parent().and_then(ElementRef::wrap)?;
    if parent.value().name() != "a" {
        return None;
    }
    parent
        .value()
        .attr("href")
        .filter(|href| looks_like_image_file(href))
        .map(str::to_owned)
}

fn looks_like_image_file(href: &str) -> bool {
    let path = href.split(['?', '#']).next().unwrap_or(href).to_ascii_lowercase();
    [".jpg", ".jpeg", ".png", ".webp", ".gif", ".avif"]
        .iter()
        .any(|ext| path.ends_with(ext))
}

fn is_placeholder(url: &str) -> bool {
    let lowered = url.to_ascii_lowercase();
    PLACEHOLDER_MARKERS.iter().any(|m| lowered.contains(m))
}

/// Content of `<meta property="og:image">`, the fallback when no gallery is
/// found.
#[must_use]
pub fn og_image(document_root: ElementRef<'_>, page_url: &str) -> Option<String> {
    let selector = Selector::parse(r#"meta[property="og:image"]"#).ok()?;
    document_root
        .select(&selector)
        .filter_map(|meta| meta.value().attr("content"))
        .find_map(|content| absolutize_url(page_url, content))
        .filter(|url| !is_placeholder(url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const GALLERY: &[SelectorSpec] = &[SelectorSpec::ClassContains("gallery")];
    const PAGE: &str = "https://shop.example.ir/product/scooter-x/";

    #[test]
    fn prefers_full_size_attributes_and_dedups() {
        let html = Html::parse_fragment(
            r#"<div class="woocommerce-product-gallery">
                 <div><a href="/wp-content/uploads/a.jpg"><img src="/wp-content/uploads/a-100x100.jpg" data-large_image="/wp-content/uploads/a.jpg"></a></div>
                 <div><a href="/wp-content/uploads/b.jpg"><img src="/wp-content/uploads/b-100x100.jpg" data-large_image="/wp-content/uploads/b.jpg"></a></div>
                 <div><img data-large_image="/wp-content/uploads/a.jpg"></div>
               </div>"#,
        );
        assert_eq!(
            collect_image_urls(html.root_element(), GALLERY, PAGE),
            vec![
                "https://shop.example.ir/wp-content/uploads/a.jpg",
                "https://shop.example.ir/wp-content/uploads/b.jpg",
            ]
        );
    }

    #[test]
    fn lazy_src_beats_placeholder() {
        let html = Html::parse_fragment(
            r#"<div class="gallery"><img src="data:image/gif;base64,R0lGOD" data-src="//cdn.example.ir/c.webp"></div>"#,
        );
        assert_eq!(
            collect_image_urls(html.root_element(), GALLERY, PAGE),
            vec!["https://cdn.example.ir/c.webp"]
        );
    }

    #[test]
    fn falls_back_to_gallery_link() {
        let html = Html::parse_fragment(
            r#"<div class="gallery"><a href="https://shop.example.ir/d.png"><img src="/img/placeholder.png"></a></div>"#,
        );
        assert_eq!(
            collect_image_urls(html.root_element(), GALLERY, PAGE),
            vec!["https://shop.example.ir/d.png"]
        );
    }

    #[test]
    fn skips_placeholders() {
        let html = Html::parse_fragment(
            r#"<div class="gallery"><img src="/wp-content/uploads/woocommerce-placeholder.png"></div>"#,
        );
        assert!(collect_image_urls(html.root_element(), GALLERY, PAGE).is_empty());
    }

    #[test]
    fn no_gallery_no_images() {
        let html = Html::parse_fragment(r#"<img src="/logo.png">"#);
        assert!(collect_image_urls(html.root_element(), GALLERY, PAGE).is_empty());
    }

    #[test]
    fn og_image_is_absolutized() {
        let html = Html::parse_document(
            r#"<html><head><meta property="og:image" content="/uploads/og.jpg"></head><body></body></html>"#,
        );
        assert_eq!(
            og_image(html.root_element(), PAGE).as_deref(),
            Some("https://shop.example.ir/uploads/og.jpg")
        );
    }
}
