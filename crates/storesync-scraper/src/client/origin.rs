//! URL helpers shared by the page client and the extractors.

use reqwest::Url;

/// Extracts the scheme+host origin of a product URL, used as the `Referer`
/// of the page request.
///
/// Given `"https://shop.example.ir/product/scooter-x/"`, returns
/// `"https://shop.example.ir"`.
#[must_use]
pub fn extract_origin(page_url: &str) -> String {
    Url::parse(page_url).map_or_else(
        |_| {
            page_url
                .trim_end_matches('/')
                .splitn(4, '/')
                .take(3)
                .collect::<Vec<_>>()
                .join("/")
        },
        |u| u.origin().ascii_serialization(),
    )
}

/// Extracts the hostname for error messages. Falls back to the input.
#[must_use]
pub fn extract_domain(page_url: &str) -> String {
    Url::parse(page_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| page_url.to_owned())
}

/// Resolves `href` (absolute, protocol-relative or relative) against the page
/// URL. Returns `None` for empty references, inline `data:` URIs, fragments
/// and anything that does not resolve to http(s).
#[must_use]
pub fn absolutize_url(page_url: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') || href.starts_with("data:") {
        return None;
    }

    let resolved = match Url::parse(href) {
        Ok(url) => url,
        Err(_) => Url::parse(page_url).ok()?.join(href).ok()?,
    };

    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}

/// Parses `page_url` as an http(s) URL.
///
/// # Errors
///
/// Returns the reason as a string when the URL is unparseable or uses
/// another scheme.
pub(crate) fn parse_page_url(page_url: &str) -> Result<Url, String> {
    let url = Url::parse(page_url.trim()).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme \"{other}\"")),
    }
}
