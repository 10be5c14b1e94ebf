use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("STORESYNC_WOO_URL", "https://shop.example.ir");
    m.insert("STORESYNC_WOO_CONSUMER_KEY", "ck_test");
    m.insert("STORESYNC_WOO_CONSUMER_SECRET", "cs_test");
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "STORESYNC_ENV"));
}

#[test]
fn build_app_config_fails_without_woo_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "STORESYNC_WOO_URL"),
        "expected MissingEnvVar(STORESYNC_WOO_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_without_consumer_secret() {
    let mut map = full_env();
    map.remove("STORESYNC_WOO_CONSUMER_SECRET");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "STORESYNC_WOO_CONSUMER_SECRET"),
        "expected MissingEnvVar(STORESYNC_WOO_CONSUMER_SECRET), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_required_var_as_missing() {
    let mut map = full_env();
    map.insert("STORESYNC_WOO_CONSUMER_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "STORESYNC_WOO_CONSUMER_KEY"),
        "expected MissingEnvVar(STORESYNC_WOO_CONSUMER_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_http_woo_url() {
    let mut map = full_env();
    map.insert("STORESYNC_WOO_URL", "shop.example.ir");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STORESYNC_WOO_URL"),
        "expected InvalidEnvVar(STORESYNC_WOO_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.woo_base_url, "https://shop.example.ir");
    assert_eq!(cfg.woo_request_timeout_secs, 30);
    assert_eq!(cfg.scraper_request_timeout_secs, 30);
    assert_eq!(cfg.scraper_user_agent, "storesync/0.1 (product-import)");
    assert_eq!(cfg.scraper_max_retries, 3);
    assert_eq!(cfg.scraper_retry_backoff_base_secs, 2);
    assert_eq!(cfg.summary_feature_limit, 5);
    assert!(cfg.default_category.is_none());
    assert!(cfg.verify_images);
    assert!(!cfg.rehost_images);
}

#[test]
fn rehost_images_is_opt_in() {
    let mut map = full_env();
    map.insert("STORESYNC_REHOST_IMAGES", "yes");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.rehost_images);
}

#[test]
fn summary_feature_limit_override() {
    let mut map = full_env();
    map.insert("STORESYNC_SUMMARY_FEATURE_LIMIT", "3");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.summary_feature_limit, 3);
}

#[test]
fn summary_feature_limit_invalid() {
    let mut map = full_env();
    map.insert("STORESYNC_SUMMARY_FEATURE_LIMIT", "five");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STORESYNC_SUMMARY_FEATURE_LIMIT"),
        "expected InvalidEnvVar(STORESYNC_SUMMARY_FEATURE_LIMIT), got: {result:?}"
    );
}

#[test]
fn scraper_max_retries_invalid() {
    let mut map = full_env();
    map.insert("STORESYNC_SCRAPER_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STORESYNC_SCRAPER_MAX_RETRIES"),
        "expected InvalidEnvVar(STORESYNC_SCRAPER_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn default_category_trimmed_and_blank_ignored() {
    let mut map = full_env();
    map.insert("STORESYNC_DEFAULT_CATEGORY", "  اسکوتر  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.default_category.as_deref(), Some("اسکوتر"));

    map.insert("STORESYNC_DEFAULT_CATEGORY", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.default_category.is_none());
}

#[test]
fn verify_images_accepts_false_spellings() {
    for raw in ["false", "0", "no", "OFF"] {
        let mut map = full_env();
        map.insert("STORESYNC_VERIFY_IMAGES", raw);
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(!cfg.verify_images, "expected {raw} to disable verification");
    }
}

#[test]
fn verify_images_rejects_garbage() {
    let mut map = full_env();
    map.insert("STORESYNC_VERIFY_IMAGES", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STORESYNC_VERIFY_IMAGES"),
        "expected InvalidEnvVar(STORESYNC_VERIFY_IMAGES), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_credentials() {
    let cfg = build_app_config(lookup_from_map(&full_env())).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("ck_test"));
    assert!(!rendered.contains("cs_test"));
    assert!(rendered.contains("[redacted]"));
}
