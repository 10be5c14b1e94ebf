//! Gallery image handling before upload: verification and re-hosting.
//!
//! WooCommerce downloads every image in the payload and rejects the whole
//! product when one of them fails, so broken gallery URLs are dropped here.
//! Re-hosting copies each image into the store's media library so the
//! product no longer depends on the source site. Both steps handle one image
//! at a time.

use anyhow::{bail, Context};
use reqwest::{Client, Url};
use storesync_woo::WooClient;

/// Checks each URL with a HEAD request, one at a time, and returns those that
/// answer 2xx with an `image/*` content type. Order is preserved.
pub(crate) async fn verify_image_urls(client: &Client, urls: &[String]) -> Vec<String> {
    let mut verified = Vec::with_capacity(urls.len());
    let mut rejected = 0usize;

    for url in urls {
        match client.head(url).send().await {
            Ok(resp) if resp.status().is_success() => {
                let content_type = resp
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_ascii_lowercase();
                if content_type.starts_with("image/") {
                    verified.push(url.clone());
                } else {
                    rejected += 1;
                    tracing::warn!(
                        url = %url,
                        content_type = %content_type,
                        "image URL does not serve an image, dropping"
                    );
                }
            }
            Ok(resp) => {
                rejected += 1;
                tracing::warn!(
                    url = %url,
                    status = resp.status().as_u16(),
                    "image URL verification failed, dropping"
                );
            }
            Err(e) => {
                rejected += 1;
                tracing::warn!(
                    url = %url,
                    error = %e,
                    "image URL verification failed, dropping"
                );
            }
        }
    }

    tracing::info!(ok = verified.len(), rejected, "verified image URLs");
    verified
}

/// Downloads each image and uploads it to the store's media library,
/// strictly one image at a time.
///
/// Returns one URL per input in the same order: the store's copy when both
/// steps worked, the original URL otherwise.
pub(crate) async fn rehost_images(client: &Client, woo: &WooClient, urls: &[String]) -> Vec<String> {
    let mut hosted = Vec::with_capacity(urls.len());
    let mut failed = 0usize;

    for (index, url) in urls.iter().enumerate() {
        match rehost_one(client, woo, url, index).await {
            Ok(source_url) => hosted.push(source_url),
            Err(e) => {
                failed += 1;
                tracing::warn!(url = %url, error = %format!("{e:#}"), "could not re-host image, keeping source URL");
                hosted.push(url.clone());
            }
        }
    }

    tracing::info!(rehosted = urls.len() - failed, failed, "re-hosted images");
    hosted
}

async fn rehost_one(
    client: &Client,
    woo: &WooClient,
    url: &str,
    index: usize,
) -> anyhow::Result<String> {
    let resp = client
        .get(url)
        .send()
        .await
        .context("downloading image")?;
    let status = resp.status();
    if !status.is_success() {
        bail!("download returned HTTP {status}");
    }

    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if !content_type.starts_with("image/") {
        bail!("download is not an image (content type \"{content_type}\")");
    }

    let bytes = resp.bytes().await.context("reading image body")?;
    let filename = image_filename(url, index);
    let media = woo
        .upload_media(&filename, &content_type, bytes.to_vec())
        .await
        .context("uploading image")?;
    tracing::debug!(url, media_id = media.id, source_url = %media.source_url, "image re-hosted");
    Ok(media.source_url)
}

/// The last path segment of `url`, or `image-<n>` when it has none.
fn image_filename(url: &str, index: usize) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("image-{}", index + 1))
}
