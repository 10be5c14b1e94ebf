//! WooCommerce REST v3 payload and response types.
//!
//! Request types serialize to the shape of `POST /wp-json/wc/v3/products`.
//! Absent optionals and empty collections are omitted so that a payload
//! only carries what the scrape actually found.

use serde::{Deserialize, Serialize};

/// Product type. Only simple products are created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    Simple,
}

/// Publication status. Imports land as drafts for manual review.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Draft,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: u64,
}

/// A product attribute as WooCommerce stores it: a label and its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformAttribute {
    pub name: String,
    pub options: Vec<String>,
    pub visible: bool,
    pub variation: bool,
}

/// One `{title, detail}` row of the features meta entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureMetaValue {
    pub title: String,
    pub detail: String,
}

/// A `meta_data` entry carrying structured features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformMetaEntry {
    pub key: String,
    pub value: Vec<FeatureMetaValue>,
}

impl PlatformMetaEntry {
    /// The entry as a stored-product meta element without an id.
    #[must_use]
    pub fn to_meta_datum(&self) -> MetaDatum {
        let value = self
            .value
            .iter()
            .map(|row| serde_json::json!({ "title": row.title, "detail": row.detail }))
            .collect();
        MetaDatum {
            id: None,
            key: self.key.clone(),
            value: serde_json::Value::Array(value),
        }
    }
}

/// The product-create payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlatformProduct {
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub status: ProductStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub short_description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<CategoryRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<PlatformAttribute>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub meta_data: Vec<PlatformMetaEntry>,
}

impl PlatformProduct {
    /// A draft simple product with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The same payload without its SKU, for resubmission after the store
    /// rejected the SKU.
    #[must_use]
    pub fn without_sku(&self) -> Self {
        Self {
            sku: None,
            ..self.clone()
        }
    }
}

/// A product category as returned by `GET /products/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

/// An attachment as returned by `POST /wp-json/wp/v2/media`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MediaRecord {
    pub id: u64,
    pub source_url: String,
}

/// One `meta_data` element of a stored product. `value` is left as raw JSON
/// because other plugins store arbitrary shapes there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaDatum {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub key: String,
    pub value: serde_json::Value,
}

/// The subset of a stored product this tool reads back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductRecord {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub meta_data: Vec<MetaDatum>,
}

/// Error body WooCommerce returns with non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}
