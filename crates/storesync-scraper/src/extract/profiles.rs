//! Per-platform selector tables, highest priority first.

use crate::selectors::SelectorSpec;
use crate::site::SiteKind;

/// Where each piece of a product page lives on one storefront platform.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SiteProfile {
    pub region: &'static [SelectorSpec],
    pub name: &'static [SelectorSpec],
    pub price: &'static [SelectorSpec],
    pub sku: &'static [SelectorSpec],
    pub description: &'static [SelectorSpec],
    pub short_description: &'static [SelectorSpec],
    pub gallery: &'static [SelectorSpec],
    pub categories: &'static [SelectorSpec],
}

pub(crate) fn profile_for(kind: SiteKind) -> &'static SiteProfile {
    match kind {
        SiteKind::WooCommerce => &WOOCOMMERCE,
        SiteKind::Custom => &CUSTOM,
    }
}

static WOOCOMMERCE: SiteProfile = SiteProfile {
    region: &[
        SelectorSpec::Css("div.product.type-product"),
        SelectorSpec::Css("div[id^=\"product-\"]"),
        SelectorSpec::Css("div.product"),
        SelectorSpec::Tag("main"),
    ],
    name: &[
        SelectorSpec::Css("h1.product_title"),
        SelectorSpec::Css(".product_title"),
        SelectorSpec::Tag("h1"),
    ],
    price: &[
        SelectorSpec::Css(".summary p.price"),
        SelectorSpec::Css(".summary .price"),
        SelectorSpec::Css("p.price"),
        SelectorSpec::Css(".price"),
    ],
    sku: &[
        SelectorSpec::Css(".sku_wrapper .sku"),
        SelectorSpec::Css("span.sku"),
        SelectorSpec::Css("[itemprop=\"sku\"]"),
    ],
    description: &[
        SelectorSpec::Id("tab-description"),
        SelectorSpec::Css(".woocommerce-Tabs-panel--description"),
        SelectorSpec::Css(".woocommerce-product-details__description"),
    ],
    short_description: &[
        SelectorSpec::Css(".woocommerce-product-details__short-description"),
        SelectorSpec::Css(".summary [itemprop=\"description\"]"),
    ],
    gallery: &[
        SelectorSpec::Css(".woocommerce-product-gallery"),
        SelectorSpec::Css("div.images"),
    ],
    categories: &[
        SelectorSpec::Css(".posted_in a"),
        SelectorSpec::Css(".woocommerce-breadcrumb a"),
    ],
};

static CUSTOM: SiteProfile = SiteProfile {
    region: &[
        SelectorSpec::Css("[itemtype*=\"schema.org/Product\"]"),
        SelectorSpec::ClassContains("product-detail"),
        SelectorSpec::ClassContains("single-product"),
        SelectorSpec::ClassContains("product-page"),
        SelectorSpec::Tag("main"),
        SelectorSpec::Tag("article"),
    ],
    name: &[
        SelectorSpec::Tag("h1"),
        SelectorSpec::Css("[itemtype*=\"schema.org/Product\"] [itemprop=\"name\"]"),
        SelectorSpec::ClassContains("product-title"),
        SelectorSpec::ClassContains("product-name"),
    ],
    price: &[
        SelectorSpec::Css("[itemprop=\"price\"]"),
        SelectorSpec::ClassContains("product-price"),
        SelectorSpec::ClassContains("price"),
    ],
    sku: &[
        SelectorSpec::Css("[itemprop=\"sku\"]"),
        SelectorSpec::ClassContains("sku"),
        SelectorSpec::ClassContains("product-code"),
    ],
    description: &[
        SelectorSpec::Id("description"),
        SelectorSpec::Css("[itemprop=\"description\"]"),
        SelectorSpec::ClassContains("product-description"),
        SelectorSpec::IdContains("description"),
        SelectorSpec::Css("[class*=\"description\"]:not([class*=\"short\"])"),
    ],
    short_description: &[
        SelectorSpec::ClassContains("short-description"),
        SelectorSpec::ClassContains("short_description"),
        SelectorSpec::ClassContains("excerpt"),
        SelectorSpec::ClassContains("product-summary"),
    ],
    gallery: &[
        SelectorSpec::ClassContains("gallery"),
        SelectorSpec::ClassContains("product-image"),
        SelectorSpec::ClassContains("product-slider"),
        SelectorSpec::ClassContains("slider"),
    ],
    categories: &[
        SelectorSpec::Css("[class*=\"breadcrumb\"] a"),
        SelectorSpec::Css("a[rel~=\"tag\"]"),
    ],
};
