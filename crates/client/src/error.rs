//! API error taxonomy.
//!
//! Local validation failures never reach this layer; everything here is a
//! request that actually went out (or failed to).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One segment of a backend error location path (`["body", "price"]`,
/// `["body", "items", 0, "sku"]`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocSegment {
    Key(String),
    Index(i64),
}

/// A single backend validation issue: `{loc, msg, type}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub loc: Vec<LocSegment>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Structured validation error returned by the backend despite local
/// validation passing (e.g. a race on uniqueness). Passed through unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendValidationError {
    pub detail: Vec<ValidationIssue>,
}

impl core::fmt::Display for BackendValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for issue in &self.detail {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}", issue.msg)?;
            first = false;
        }
        Ok(())
    }
}

/// Failure of a single request attempt. No retries at this layer: any failure
/// is terminal for the attempt and surfaces as an error state to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network/connection failure before a response arrived.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The backend reported the target resource does not exist.
    #[error("not found")]
    NotFound,

    /// The backend rejected the payload with a structured validation error.
    #[error("backend validation failed: {0}")]
    BackendValidation(BackendValidationError),

    /// Any other non-success status.
    #[error("unexpected status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
