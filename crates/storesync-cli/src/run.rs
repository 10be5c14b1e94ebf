//! The import run: fetch, extract, map, upload.

use std::time::Duration;

use anyhow::Context;
use storesync_core::AppConfig;
use storesync_scraper::{extract_features, extract_page, FeatureSource, PageClient, ScrapedPage};
use storesync_woo::{
    map_to_platform_product, CategoryRef, ImageRef, MapperOptions, PlatformProduct, ProductRecord,
    WooClient, FEATURES_META_KEY,
};

use crate::images::{rehost_images, verify_image_urls};

/// What one run produced.
#[derive(Debug)]
pub(crate) struct ImportOutcome {
    /// The payload that was (or, on a dry run, would have been) submitted.
    pub product: PlatformProduct,
    pub feature_source: Option<FeatureSource>,
    /// The stored product; `None` on a dry run.
    pub created: Option<ProductRecord>,
}

/// Imports the product at `url`.
///
/// A dry run stops after mapping and never contacts the store, so the
/// payload carries no category and images keep their source URLs.
///
/// # Errors
///
/// Returns an error if the page cannot be fetched or has no product name,
/// if the store cannot be reached, or if the upload fails after the SKU
/// retry.
pub(crate) async fn run_import(
    config: &AppConfig,
    url: &str,
    dry_run: bool,
) -> anyhow::Result<ImportOutcome> {
    let page_client = PageClient::new(
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
        config.scraper_max_retries,
        config.scraper_retry_backoff_base_secs,
    )?;
    let html = page_client
        .fetch_page(url)
        .await
        .with_context(|| format!("fetching {url}"))?;
    let scraped = extract_page(&html, url)?;

    let features = extract_features(&scraped.page, &scraped.region());
    let feature_source = features.source();
    tracing::info!(
        name = %scraped.page.name,
        site_kind = %scraped.site_kind,
        features = features.len(),
        source = feature_source.map_or("none", FeatureSource::as_str),
        "extracted product"
    );

    let image_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.scraper_request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(config.scraper_user_agent.as_str())
        .build()?;
    let image_urls = if config.verify_images {
        verify_image_urls(&image_client, &scraped.image_urls).await
    } else {
        scraped.image_urls.clone()
    };

    let options = MapperOptions {
        summary_limit: config.summary_feature_limit,
    };

    if dry_run {
        let base = build_base_product(&scraped, &image_urls, None);
        let product = map_to_platform_product(base, features.items(), &options)?;
        return Ok(ImportOutcome {
            product,
            feature_source,
            created: None,
        });
    }

    let woo = WooClient::new(
        &config.woo_base_url,
        &config.woo_consumer_key,
        &config.woo_consumer_secret,
        config.woo_request_timeout_secs,
    )?;

    let image_urls = if config.rehost_images {
        rehost_images(&image_client, &woo, &image_urls).await
    } else {
        image_urls
    };

    let category_id = resolve_category(
        &woo,
        &scraped.category_names,
        config.default_category.as_deref(),
    )
    .await?;

    let base = build_base_product(&scraped, &image_urls, category_id);
    let mut product = map_to_platform_product(base, features.items(), &options)?;

    if let Some(sku) = product.sku.clone() {
        if let Some(existing) = woo.find_product_by_sku(&sku).await? {
            tracing::warn!(
                sku = %sku,
                existing_id = existing.id,
                "SKU already in use, uploading without it"
            );
            product = product.without_sku();
        }
    }

    let outcome = woo.submit_product(&product).await;
    tracing::info!(trail = %outcome.trail_string(), "submission finished");
    if let Some(err) = &outcome.resubmission_error {
        tracing::warn!(error = %err, "resubmission without SKU also failed");
    }
    let record = outcome.into_result().context("uploading product")?;

    let has_feature_meta = record.meta_data.iter().any(|m| m.key == FEATURES_META_KEY);
    if !has_feature_meta && !product.meta_data.is_empty() {
        let updates: Vec<_> = product
            .meta_data
            .iter()
            .map(storesync_woo::PlatformMetaEntry::to_meta_datum)
            .collect();
        if let Err(err) = woo.merge_product_meta(record.id, &updates).await {
            tracing::warn!(id = record.id, error = %err, "could not store feature meta");
        }
    }

    Ok(ImportOutcome {
        product,
        feature_source,
        created: Some(record),
    })
}

/// The payload before features are mapped in.
pub(crate) fn build_base_product(
    scraped: &ScrapedPage,
    image_urls: &[String],
    category_id: Option<u64>,
) -> PlatformProduct {
    PlatformProduct {
        regular_price: scraped.regular_price.clone(),
        sale_price: scraped.sale_price.clone(),
        sku: scraped.sku.clone(),
        description: scraped.page.description_html.clone(),
        short_description: scraped.page.short_description_html.clone(),
        images: image_urls
            .iter()
            .map(|src| ImageRef { src: src.clone() })
            .collect(),
        categories: category_id.map(|id| CategoryRef { id }).into_iter().collect(),
        ..PlatformProduct::new(scraped.page.name.clone())
    }
}

/// Category names to look up, most specific first, then the configured
/// default.
pub(crate) fn category_candidates<'a>(
    page_categories: &'a [String],
    default_category: Option<&'a str>,
) -> Vec<&'a str> {
    let mut candidates: Vec<&str> = page_categories.iter().rev().map(String::as_str).collect();
    if let Some(default) = default_category {
        if !candidates.contains(&default) {
            candidates.push(default);
        }
    }
    candidates
}

async fn resolve_category(
    woo: &WooClient,
    page_categories: &[String],
    default_category: Option<&str>,
) -> anyhow::Result<Option<u64>> {
    for name in category_candidates(page_categories, default_category) {
        if let Some(category) = woo.find_category_by_name(name).await? {
            tracing::debug!(name, id = category.id, "resolved category");
            return Ok(Some(category.id));
        }
    }
    tracing::warn!(
        candidates = page_categories.len(),
        "no matching store category, uploading uncategorized"
    );
    Ok(None)
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
