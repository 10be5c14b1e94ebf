pub mod client;
pub mod error;
pub mod mapper;
pub mod submit;
pub mod types;

pub use client::{merge_meta, WooClient};
pub use error::WooError;
pub use mapper::{
    map_to_platform_product, render_features_html, MapperOptions, DEFAULT_SUMMARY_LIMIT,
    FEATURES_LABEL, FEATURES_META_KEY,
};
pub use submit::{submit_with_sku_retry, SubmitOutcome, SubmitState};
pub use types::{
    Category, CategoryRef, FeatureMetaValue, ImageRef, MediaRecord, MetaDatum, PlatformAttribute,
    PlatformMetaEntry, PlatformProduct, ProductRecord, ProductStatus, ProductType,
};
