use super::*;
use crate::features::{extract_features, FeatureSource};

const WOO_URL: &str = "https://shop.example.ir/product/scooter-x/";

const WOO_PAGE: &str = r#"<!DOCTYPE html>
<html><head>
<meta name="generator" content="WordPress 6.5">
<meta property="og:title" content="اسکوتر برقی X - فروشگاه">
<link rel="stylesheet" href="https://shop.example.ir/wp-content/plugins/woocommerce/assets/css/woocommerce.css">
</head>
<body class="product-template-default single single-product woocommerce">
<nav class="woocommerce-breadcrumb"><a href="/">خانه</a> / <a href="/c/scooter">اسکوتر</a> / اسکوتر برقی X</nav>
<div id="product-42" class="product type-product">
  <div class="woocommerce-product-gallery">
    <div class="woocommerce-product-gallery__image"><a href="/wp-content/uploads/x1.jpg"><img src="/wp-content/uploads/x1-100x100.jpg" data-large_image="/wp-content/uploads/x1.jpg"></a></div>
  </div>
  <div class="summary entry-summary">
    <h1 class="product_title entry-title">اسکوتر برقی X</h1>
    <p class="price"><del><span class="woocommerce-Price-amount amount">۲۰٬۰۰۰٬۰۰۰ تومان</span></del> <ins><span class="woocommerce-Price-amount amount">۱۸٬۵۰۰٬۰۰۰ تومان</span></ins></p>
    <div class="woocommerce-product-details__short-description"><p>اسکوتر تاشو شهری</p><p>۱. بدنه آلومینیومی ۲. ترمز دیسکی</p></div>
    <div class="product_meta">
      <span class="sku_wrapper">شناسه محصول: <span class="sku">SC-X-01</span></span>
      <span class="posted_in">دسته: <a href="/c/scooter" rel="tag">اسکوتر</a>, <a href="/c/mobility" rel="tag">حمل و نقل شخصی</a></span>
    </div>
  </div>
  <div class="woocommerce-tabs">
    <div class="woocommerce-Tabs-panel woocommerce-Tabs-panel--description" id="tab-description">
      <h2>توضیحات</h2>
      <p>ویژگی های محصول: موتور ۳۵۰ وات سرعت ۲۵ کیلومتر باتری ۱۰ آمپر</p>
    </div>
  </div>
</div>
</body></html>"#;

const CUSTOM_PAGE: &str = r#"<html><head>
<meta property="og:title" content="Blender Pro">
<meta property="og:image" content="https://cdn.example.com/blender.jpg">
</head><body>
<header><a href="/">Home</a></header>
<main>
  <div class="breadcrumb"><a href="/">Home</a> <a href="/kitchen">Kitchen</a> <a href="/kitchen/blenders">Blenders</a></div>
  <h1>Blender Pro</h1>
  <div class="product-price">1,200.50 $</div>
  <div class="product-code">Code: BL-900</div>
  <div id="description"><p>Powerful blender.</p><ul><li>Stainless blade</li><li>Two speeds</li></ul></div>
</main>
</body></html>"#;

#[test]
fn woocommerce_page_is_fully_extracted() {
    let scraped = extract_page(WOO_PAGE, WOO_URL).expect("page should extract");

    assert_eq!(scraped.site_kind, SiteKind::WooCommerce);
    assert_eq!(scraped.page.name, "اسکوتر برقی X");
    assert_eq!(scraped.regular_price.as_deref(), Some("20000000"));
    assert_eq!(scraped.sale_price.as_deref(), Some("18500000"));
    assert_eq!(scraped.sku.as_deref(), Some("SC-X-01"));
    assert_eq!(
        scraped.image_urls,
        vec!["https://shop.example.ir/wp-content/uploads/x1.jpg"]
    );
    assert_eq!(scraped.category_names, vec!["اسکوتر", "حمل و نقل شخصی"]);
    assert!(scraped.page.description_html.starts_with("<h2>توضیحات</h2>"));
    assert_eq!(
        scraped.page.short_description_text,
        "اسکوتر تاشو شهری\n۱. بدنه آلومینیومی ۲. ترمز دیسکی"
    );
    assert!(scraped
        .page
        .short_description_html
        .contains("<p>اسکوتر تاشو شهری</p>"));
}

#[test]
fn woocommerce_page_feeds_the_feature_pipeline() {
    let scraped = extract_page(WOO_PAGE, WOO_URL).expect("page should extract");
    let features = extract_features(&scraped.page, &scraped.region());

    assert_eq!(features.source(), Some(FeatureSource::LabeledTextPattern));
    assert_eq!(
        features.items(),
        ["موتور ۳۵۰ وات", "سرعت ۲۵ کیلومتر", "باتری ۱۰ آمپر"]
    );
}

#[test]
fn custom_page_uses_generic_selectors_and_og_fallbacks() {
    let scraped =
        extract_page(CUSTOM_PAGE, "https://blend.example.com/p/blender-pro").expect("extract");

    assert_eq!(scraped.site_kind, SiteKind::Custom);
    assert_eq!(scraped.page.name, "Blender Pro");
    assert_eq!(scraped.regular_price.as_deref(), Some("1200.50"));
    assert_eq!(scraped.sale_price, None);
    assert_eq!(scraped.sku.as_deref(), Some("BL-900"));
    assert_eq!(
        scraped.image_urls,
        vec!["https://cdn.example.com/blender.jpg"]
    );
    assert_eq!(scraped.category_names, vec!["Kitchen", "Blenders"]);

    let features = extract_features(&scraped.page, &scraped.region());
    assert_eq!(features.source(), Some(FeatureSource::DescriptionListMarkup));
    assert_eq!(
        features.items(),
        ["Powerful blender.", "Stainless blade", "Two speeds"]
    );
}

#[test]
fn og_title_stands_in_for_missing_heading() {
    let html = r#"<html><head><meta property="og:title" content="Kettle"></head><body><p>x</p></body></html>"#;
    let scraped = extract_page(html, "https://example.com/kettle").expect("extract");
    assert_eq!(scraped.page.name, "Kettle");
}

#[test]
fn page_without_name_is_missing_field() {
    let err = extract_page("<html><body><p>nothing</p></body></html>", "https://example.com/p")
        .unwrap_err();
    assert!(
        matches!(err, ScraperError::MissingField { field: "name", .. }),
        "expected MissingField, got: {err:?}"
    );
}

#[test]
fn invalid_page_url_is_rejected() {
    let err = extract_page("<h1>Kettle</h1>", "not a url").unwrap_err();
    assert!(matches!(err, ScraperError::InvalidUrl { .. }));
}

#[test]
fn placeholder_skus_are_dropped() {
    assert_eq!(clean_sku("N/A"), None);
    assert_eq!(clean_sku("SKU: ندارد"), None);
    assert_eq!(clean_sku(" AB-12 ").as_deref(), Some("AB-12"));
}

#[test]
fn render_text_puts_blocks_on_lines() {
    let html = Html::parse_fragment(
        "<div><h2>Title</h2><p>First  line</p><p>Second<br>third</p><script>var x = 1;</script></div>",
    );
    assert_eq!(
        render_text(html.root_element()),
        "Title\nFirst line\nSecond\nthird"
    );
}

#[test]
fn render_text_opens_sections_with_two_blank_lines() {
    let html = Html::parse_fragment("<p>Intro</p><h3>Specs</h3><p>Weight 12 kg</p>");
    assert_eq!(
        render_text(html.root_element()),
        "Intro\n\n\nSpecs\nWeight 12 kg"
    );
}

#[test]
fn labeled_heading_block_ends_at_next_section() {
    let html = r#"<html><body><main>
  <h1>Blender Pro</h1>
  <div id="description">
    <h2>Features</h2>
    <ul><li>Stainless blade</li><li>Two speeds</li></ul>
    <h2>Shipping</h2>
    <p>Ships within three days to any city</p>
    <h2>Reviews</h2>
    <p>Great blender, would buy again</p>
  </div>
</main></body></html>"#;
    let scraped = extract_page(html, "https://blender.example.com/p/pro").unwrap();
    assert!(scraped
        .page
        .visible_text
        .contains("Two speeds\n\n\nShipping"));

    let features = extract_features(&scraped.page, &scraped.region());
    assert_eq!(features.source(), Some(FeatureSource::LabeledTextPattern));
    assert_eq!(features.items(), ["Stainless blade", "Two speeds"]);
}

#[test]
fn render_text_ignores_source_indentation() {
    let html = Html::parse_fragment("<ul>\n  <li>Foldable\n frame</li>\n  <li>LED display</li>\n</ul>");
    assert_eq!(
        render_text(html.root_element()),
        "Foldable frame\nLED display"
    );
}
