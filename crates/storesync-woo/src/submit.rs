//! Product submission with a single SKU-conflict retry.
//!
//! WooCommerce rejects a create when the SKU is already taken or malformed.
//! The product is still worth importing, so on such a rejection the payload
//! is resubmitted once without its SKU. Every state the submission passes
//! through is recorded in the outcome's trail.

use std::fmt;
use std::future::Future;

use serde::Serialize;

use crate::error::WooError;
use crate::types::{PlatformProduct, ProductRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitState {
    Built,
    Submitted,
    ConflictDetected,
    Resubmitted,
    Accepted,
    Failed,
}

impl SubmitState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Built => "built",
            Self::Submitted => "submitted",
            Self::ConflictDetected => "conflict_detected",
            Self::Resubmitted => "resubmitted",
            Self::Accepted => "accepted",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SubmitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`submit_with_sku_retry`].
#[derive(Debug)]
pub struct SubmitOutcome {
    /// States visited, starting with `Built` and ending in `Accepted` or
    /// `Failed`.
    pub trail: Vec<SubmitState>,
    /// The created product, or the error of the first attempt.
    pub result: Result<ProductRecord, WooError>,
    /// Error of the SKU-less resubmission, when that also failed.
    pub resubmission_error: Option<WooError>,
}

impl SubmitOutcome {
    #[must_use]
    pub fn final_state(&self) -> SubmitState {
        self.trail.last().copied().unwrap_or(SubmitState::Built)
    }

    /// `true` when the product was created only after dropping its SKU.
    #[must_use]
    pub fn dropped_sku(&self) -> bool {
        self.result.is_ok() && self.trail.contains(&SubmitState::Resubmitted)
    }

    /// Renders the trail as `built -> submitted -> ...` for logs.
    #[must_use]
    pub fn trail_string(&self) -> String {
        self.trail
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// Discards the trail.
    ///
    /// # Errors
    ///
    /// Returns the first attempt's error when the submission failed.
    pub fn into_result(self) -> Result<ProductRecord, WooError> {
        self.result
    }
}

/// Posts `product` through `post`, resubmitting once without the SKU when
/// the first attempt is rejected as a SKU conflict.
///
/// Any other error fails immediately. If the resubmission fails too, the
/// outcome carries the first error as its result and the second in
/// [`SubmitOutcome::resubmission_error`].
pub async fn submit_with_sku_retry<F, Fut>(product: &PlatformProduct, mut post: F) -> SubmitOutcome
where
    F: FnMut(PlatformProduct) -> Fut,
    Fut: Future<Output = Result<ProductRecord, WooError>>,
{
    let mut trail = vec![SubmitState::Built, SubmitState::Submitted];

    let first_err = match post(product.clone()).await {
        Ok(record) => {
            trail.push(SubmitState::Accepted);
            return SubmitOutcome {
                trail,
                result: Ok(record),
                resubmission_error: None,
            };
        }
        Err(err) => err,
    };

    if !first_err.is_sku_conflict() {
        trail.push(SubmitState::Failed);
        return SubmitOutcome {
            trail,
            result: Err(first_err),
            resubmission_error: None,
        };
    }

    trail.push(SubmitState::ConflictDetected);
    tracing::warn!(
        product = %product.name,
        sku = product.sku.as_deref().unwrap_or(""),
        error = %first_err,
        "store rejected SKU, resubmitting without it"
    );

    trail.push(SubmitState::Resubmitted);
    match post(product.without_sku()).await {
        Ok(record) => {
            trail.push(SubmitState::Accepted);
            SubmitOutcome {
                trail,
                result: Ok(record),
                resubmission_error: None,
            }
        }
        Err(retry_err) => {
            tracing::error!(
                product = %product.name,
                error = %retry_err,
                "resubmission without SKU failed"
            );
            trail.push(SubmitState::Failed);
            SubmitOutcome {
                trail,
                result: Err(first_err),
                resubmission_error: Some(retry_err),
            }
        }
    }
}
