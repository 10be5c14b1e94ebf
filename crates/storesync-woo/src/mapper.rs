//! Maps an extracted feature list onto a product payload.
//!
//! Features land in three places: one visible product attribute, one
//! structured meta entry, and a rendered list at the top of the description.
//! A short comma-joined summary is also prepended to the short description.

use crate::error::WooError;
use crate::types::{FeatureMetaValue, PlatformAttribute, PlatformMetaEntry, PlatformProduct};

/// Attribute name and heading of the rendered list ("product features").
pub const FEATURES_LABEL: &str = "ویژگی‌های محصول";

/// `meta_data` key of the structured feature list.
pub const FEATURES_META_KEY: &str = "_product_features";

/// Persian list separator used in the short-description summary.
pub const SUMMARY_SEPARATOR: &str = "، ";

pub const DEFAULT_SUMMARY_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapperOptions {
    /// How many features the short-description summary lists.
    pub summary_limit: usize,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            summary_limit: DEFAULT_SUMMARY_LIMIT,
        }
    }
}

/// Adds `features` to `base`.
///
/// With no features the payload comes back unchanged. Otherwise an
/// attribute and a meta entry are attached, the rendered list is prepended
/// to the description, and, unless the short description already mentions
/// the features label, a summary of the first `summary_limit` features is
/// prepended to it.
///
/// # Errors
///
/// Returns [`WooError::MappingPrecondition`] when `base.name` is blank.
pub fn map_to_platform_product(
    base: PlatformProduct,
    features: &[String],
    options: &MapperOptions,
) -> Result<PlatformProduct, WooError> {
    if base.name.trim().is_empty() {
        return Err(WooError::MappingPrecondition { field: "name" });
    }
    if features.is_empty() {
        return Ok(base);
    }

    let mut product = base;

    product.attributes.push(PlatformAttribute {
        name: FEATURES_LABEL.to_string(),
        options: features.to_vec(),
        visible: true,
        variation: false,
    });

    product.meta_data.push(PlatformMetaEntry {
        key: FEATURES_META_KEY.to_string(),
        value: features
            .iter()
            .map(|title| FeatureMetaValue {
                title: title.clone(),
                detail: String::new(),
            })
            .collect(),
    });

    product.description = prepend_line(&render_features_html(features), &product.description);

    if !product.short_description.contains(FEATURES_LABEL) {
        let summary = features
            .iter()
            .take(options.summary_limit)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(SUMMARY_SEPARATOR);
        if !summary.is_empty() {
            product.short_description = prepend_line(&summary, &product.short_description);
        }
    }

    Ok(product)
}

/// `<h3>label</h3><ul><li>…</li></ul>`, with `<` and `>` escaped in each
/// feature.
#[must_use]
pub fn render_features_html(features: &[String]) -> String {
    let items: String = features
        .iter()
        .map(|f| format!("<li>{}</li>", escape_angle_brackets(f)))
        .collect();
    format!("<h3>{FEATURES_LABEL}</h3><ul>{items}</ul>")
}

fn escape_angle_brackets(s: &str) -> String {
    s.replace('<', "&lt;").replace('>', "&gt;")
}

fn prepend_line(head: &str, existing: &str) -> String {
    if existing.is_empty() {
        head.to_string()
    } else {
        format!("{head}\n{existing}")
    }
}
