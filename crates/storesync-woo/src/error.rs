use thiserror::Error;

/// Errors returned by the WooCommerce client and the product mapper.
#[derive(Debug, Error)]
pub enum WooError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The store answered with a non-2xx status. `code` is the WooCommerce
    /// error code (e.g. `product_invalid_sku`) when the body carried one.
    #[error("WooCommerce API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("invalid store URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The mapper was handed a payload without a required field. This is an
    /// upstream extractor bug, not missing data.
    #[error("product payload is missing required field \"{field}\"")]
    MappingPrecondition { field: &'static str },
}

impl WooError {
    /// Returns `true` when the store rejected the product because of its SKU
    /// (duplicate or invalid).
    #[must_use]
    pub fn is_sku_conflict(&self) -> bool {
        match self {
            Self::Api {
                status,
                code,
                message,
            } => {
                *status == 400
                    && (code == "product_invalid_sku"
                        || code.contains("sku")
                        || message.to_lowercase().contains("sku"))
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, code: &str, message: &str) -> WooError {
        WooError::Api {
            status,
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn invalid_sku_code_is_a_conflict() {
        assert!(api(400, "product_invalid_sku", "Invalid or duplicated SKU.").is_sku_conflict());
    }

    #[test]
    fn message_mentioning_sku_is_a_conflict() {
        assert!(api(400, "woocommerce_rest_error", "The SKU is already in use").is_sku_conflict());
    }

    #[test]
    fn other_errors_are_not_conflicts() {
        assert!(!api(400, "rest_invalid_param", "Invalid parameter(s): price").is_sku_conflict());
        assert!(!api(500, "product_invalid_sku", "sku").is_sku_conflict());
        assert!(!WooError::MappingPrecondition { field: "name" }.is_sku_conflict());
    }
}
