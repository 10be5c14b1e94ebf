//! HTTP client for the WooCommerce REST API (v3).
//!
//! Authenticates with the store's consumer key and secret over HTTP basic
//! auth. Non-2xx responses are decoded from WooCommerce's `{code, message}`
//! error body into [`WooError::Api`]. Calls are issued one at a time; there
//! is no retry at this layer apart from the SKU-conflict resubmission in
//! [`WooClient::submit_product`].
//!
//! Media uploads go to the WordPress core API (`wp/v2/media`) under the same
//! credentials, since WooCommerce itself has no media endpoint.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::WooError;
use crate::submit::{submit_with_sku_retry, SubmitOutcome};
use crate::types::{
    ApiErrorBody, Category, MediaRecord, MetaDatum, PlatformProduct, ProductRecord,
};

const API_PREFIX: &str = "wp-json/wc/v3/";
const MEDIA_PATH: &str = "wp-json/wp/v2/media";

/// Longest slice of an unparseable error body kept in [`WooError::Api`].
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

/// Client for one WooCommerce store.
pub struct WooClient {
    client: Client,
    api_base: Url,
    media_url: Url,
    consumer_key: String,
    consumer_secret: String,
}

impl WooClient {
    /// Creates a client for the store rooted at `store_url`
    /// (e.g. `https://shop.example.ir`).
    ///
    /// # Errors
    ///
    /// Returns [`WooError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`WooError::InvalidBaseUrl`] if `store_url` does
    /// not parse.
    pub fn new(
        store_url: &str,
        consumer_key: &str,
        consumer_secret: &str,
        timeout_secs: u64,
    ) -> Result<Self, WooError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("storesync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // A single trailing slash keeps `Url::join` from replacing the last
        // path segment of stores installed under a subdirectory.
        let root = store_url.trim_end_matches('/');
        let parse = |raw: String| {
            Url::parse(&raw).map_err(|e| WooError::InvalidBaseUrl {
                url: store_url.to_owned(),
                reason: e.to_string(),
            })
        };
        let api_base = parse(format!("{root}/{API_PREFIX}"))?;
        let media_url = parse(format!("{root}/{MEDIA_PATH}"))?;

        Ok(Self {
            client,
            api_base,
            media_url,
            consumer_key: consumer_key.to_owned(),
            consumer_secret: consumer_secret.to_owned(),
        })
    }

    /// Looks up a product category by name.
    ///
    /// Searches with `search=<name>` and picks the first result whose name
    /// equals `name` ignoring case and surrounding whitespace. WooCommerce
    /// search is a substring match, so near-misses are ignored.
    ///
    /// # Errors
    ///
    /// - [`WooError::Api`] on a non-2xx response.
    /// - [`WooError::Http`] on network failure.
    /// - [`WooError::Deserialize`] if the response is not a category list.
    pub async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, WooError> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return Ok(None);
        }

        let url = self.endpoint("products/categories")?;
        let request = self
            .client
            .get(url)
            .query(&[("search", name.trim()), ("per_page", "100")]);
        let categories: Vec<Category> = self
            .send_json(request, &format!("categories(search={name})"))
            .await?;

        let found = categories
            .into_iter()
            .find(|c| unescape_entities(c.name.trim()).to_lowercase() == wanted);
        tracing::debug!(name, found = found.as_ref().map(|c| c.id), "category lookup");
        Ok(found)
    }

    /// Returns the product carrying `sku`, if any.
    ///
    /// # Errors
    ///
    /// - [`WooError::Api`] on a non-2xx response.
    /// - [`WooError::Http`] on network failure.
    /// - [`WooError::Deserialize`] if the response is not a product list.
    pub async fn find_product_by_sku(&self, sku: &str) -> Result<Option<ProductRecord>, WooError> {
        let url = self.endpoint("products")?;
        let request = self
            .client
            .get(url)
            .query(&[("sku", sku), ("per_page", "1")]);
        let products: Vec<ProductRecord> = self
            .send_json(request, &format!("products(sku={sku})"))
            .await?;
        Ok(products.into_iter().next())
    }

    /// Creates `product` with a single `POST /products`.
    ///
    /// # Errors
    ///
    /// - [`WooError::Api`] on a non-2xx response, including SKU rejections.
    /// - [`WooError::Http`] on network failure.
    /// - [`WooError::Deserialize`] if the response is not a product.
    pub async fn create_product(&self, product: &PlatformProduct) -> Result<ProductRecord, WooError> {
        let url = self.endpoint("products")?;
        let record: ProductRecord = self
            .send_json(self.client.post(url).json(product), "create product")
            .await?;
        tracing::info!(id = record.id, name = %product.name, "created product");
        Ok(record)
    }

    /// Creates `product`, resubmitting once without its SKU if the store
    /// rejects the SKU. See [`submit_with_sku_retry`].
    pub async fn submit_product(&self, product: &PlatformProduct) -> SubmitOutcome {
        let outcome = submit_with_sku_retry(product, move |payload| async move {
            self.create_product(&payload).await
        })
        .await;
        tracing::debug!(trail = %outcome.trail_string(), "product submission finished");
        outcome
    }

    /// Fetches a stored product by id.
    ///
    /// # Errors
    ///
    /// - [`WooError::Api`] on a non-2xx response (404 for unknown ids).
    /// - [`WooError::Http`] on network failure.
    /// - [`WooError::Deserialize`] if the response is not a product.
    pub async fn get_product(&self, id: u64) -> Result<ProductRecord, WooError> {
        let url = self.endpoint(&format!("products/{id}"))?;
        self.send_json(self.client.get(url), &format!("product(id={id})"))
            .await
    }

    /// Replaces the product's `meta_data` with `meta` via `PUT /products/{id}`.
    ///
    /// WooCommerce updates entries that carry an `id` and adds the rest.
    ///
    /// # Errors
    ///
    /// - [`WooError::Api`] on a non-2xx response.
    /// - [`WooError::Http`] on network failure.
    /// - [`WooError::Deserialize`] if the response is not a product.
    pub async fn update_product_meta(
        &self,
        id: u64,
        meta: &[MetaDatum],
    ) -> Result<ProductRecord, WooError> {
        let url = self.endpoint(&format!("products/{id}"))?;
        let body = serde_json::json!({ "meta_data": meta });
        self.send_json(
            self.client.put(url).json(&body),
            &format!("update product meta(id={id})"),
        )
        .await
    }

    /// Reads the product's current meta, folds `updates` into it with
    /// [`merge_meta`], and writes the result back.
    ///
    /// # Errors
    ///
    /// Any error from [`WooClient::get_product`] or
    /// [`WooClient::update_product_meta`].
    pub async fn merge_product_meta(
        &self,
        id: u64,
        updates: &[MetaDatum],
    ) -> Result<ProductRecord, WooError> {
        let current = self.get_product(id).await?;
        let merged = merge_meta(&current.meta_data, updates);
        tracing::debug!(
            id,
            existing = current.meta_data.len(),
            merged = merged.len(),
            "merging product meta"
        );
        self.update_product_meta(id, &merged).await
    }

    /// Uploads one image to the store's media library and returns the new
    /// attachment, whose `source_url` is served by the store itself.
    ///
    /// # Errors
    ///
    /// - [`WooError::Api`] on a non-2xx response (e.g. 401 when the key lacks
    ///   upload rights, 415 for rejected file types).
    /// - [`WooError::Http`] on network failure.
    /// - [`WooError::Deserialize`] if the response is not a media object.
    pub async fn upload_media(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<MediaRecord, WooError> {
        let size = bytes.len();
        let request = self
            .client
            .post(self.media_url.clone())
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(
                reqwest::header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename.replace('"', "")),
            )
            .body(bytes);
        let media: MediaRecord = self
            .send_json(request, &format!("upload media({filename})"))
            .await?;
        tracing::debug!(id = media.id, filename, size, "uploaded media");
        Ok(media)
    }

    fn endpoint(&self, path: &str) -> Result<Url, WooError> {
        self.api_base
            .join(path)
            .map_err(|e| WooError::InvalidBaseUrl {
                url: self.api_base.to_string(),
                reason: e.to_string(),
            })
    }

    /// Sends an authenticated request and decodes a 2xx body as `T`.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, WooError> {
        let response = request
            .basic_auth(&self.consumer_key, Some(&self.consumer_secret))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| WooError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Builds [`WooError::Api`] from a non-2xx response body.
fn api_error(status: u16, body: &str) -> WooError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => WooError::Api {
            status,
            code: parsed.code,
            message: parsed.message,
        },
        Err(_) => WooError::Api {
            status,
            code: String::new(),
            message: body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect(),
        },
    }
}

/// Folds `updates` into `existing` meta.
///
/// An update whose key already exists replaces that entry's value and keeps
/// its id, so WooCommerce edits the entry in place. Updates with new keys are
/// appended in order. Entries untouched by `updates` are kept as they are.
#[must_use]
pub fn merge_meta(existing: &[MetaDatum], updates: &[MetaDatum]) -> Vec<MetaDatum> {
    let mut merged = existing.to_vec();
    for update in updates {
        match merged.iter_mut().find(|m| m.key == update.key) {
            Some(slot) => slot.value = update.value.clone(),
            None => merged.push(MetaDatum {
                id: None,
                key: update.key.clone(),
                value: update.value.clone(),
            }),
        }
    }
    merged
}

/// Undoes the HTML escaping WooCommerce applies to term names.
fn unescape_entities(s: &str) -> String {
    s.replace("&#039;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
