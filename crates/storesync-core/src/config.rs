use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str = "storesync/0.1 (product-import)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation live here, decoupled from the process environment,
/// so tests can drive it with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let woo_base_url = require("STORESYNC_WOO_URL")?;
    if !(woo_base_url.starts_with("http://") || woo_base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "STORESYNC_WOO_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{woo_base_url}\""),
        });
    }
    let woo_consumer_key = require("STORESYNC_WOO_CONSUMER_KEY")?;
    let woo_consumer_secret = require("STORESYNC_WOO_CONSUMER_SECRET")?;

    let env = parse_environment(&or_default("STORESYNC_ENV", "development"))?;
    let log_level = or_default("STORESYNC_LOG_LEVEL", "info");

    let woo_request_timeout_secs = parse_u64("STORESYNC_WOO_REQUEST_TIMEOUT_SECS", "30")?;
    let scraper_request_timeout_secs = parse_u64("STORESYNC_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    let scraper_user_agent = or_default("STORESYNC_SCRAPER_USER_AGENT", DEFAULT_USER_AGENT);
    let scraper_max_retries = parse_u32("STORESYNC_SCRAPER_MAX_RETRIES", "3")?;
    let scraper_retry_backoff_base_secs =
        parse_u64("STORESYNC_SCRAPER_RETRY_BACKOFF_BASE_SECS", "2")?;

    let summary_feature_limit = parse_usize("STORESYNC_SUMMARY_FEATURE_LIMIT", "5")?;
    let default_category = lookup("STORESYNC_DEFAULT_CATEGORY")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let verify_images = parse_bool(
        "STORESYNC_VERIFY_IMAGES",
        &or_default("STORESYNC_VERIFY_IMAGES", "true"),
    )?;
    let rehost_images = parse_bool(
        "STORESYNC_REHOST_IMAGES",
        &or_default("STORESYNC_REHOST_IMAGES", "false"),
    )?;

    Ok(AppConfig {
        env,
        log_level,
        woo_base_url,
        woo_consumer_key,
        woo_consumer_secret,
        woo_request_timeout_secs,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_max_retries,
        scraper_retry_backoff_base_secs,
        summary_feature_limit,
        default_category,
        verify_images,
        rehost_images,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STORESYNC_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
