//! # Response Decoder
//!
//! Single place where status codes are interpreted. Every operation declares
//! an [`Expectation`] (its success statuses, and whether `404` means
//! "not found") and hands the raw response here.
//!
//! ## Classification
//!
//! - status in the success set ⇒ `Ok`, the caller interprets the body
//! - `404` on a name-based fetch ⇒ `IndexError::NotFound`
//! - anything else ⇒ `IndexError::BadResponse`, after logging status and body
//!
//! Transport failures never reach this module; they propagate unchanged.

use crate::transport::Response;
use crate::types::{IndexError, Result};
use serde::de::DeserializeOwned;

pub const OK: u16 = 200;
pub const CREATED: u16 = 201;
pub const NO_CONTENT: u16 = 204;
pub const NOT_FOUND: u16 = 404;

/// What an operation accepts as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expectation {
    operation: &'static str,
    success: &'static [u16],
    not_found: bool,
}

impl Expectation {
    /// Declare the success statuses for `operation`.
    #[must_use]
    pub const fn new(operation: &'static str, success: &'static [u16]) -> Self {
        Self {
            operation,
            success,
            not_found: false,
        }
    }

    /// Treat `404` as `IndexError::NotFound` instead of a bad response.
    #[must_use]
    pub const fn not_found_on_404(mut self) -> Self {
        self.not_found = true;
        self
    }

    #[must_use]
    pub const fn operation(&self) -> &'static str {
        self.operation
    }

    fn accepts(&self, status: u16) -> bool {
        self.success.contains(&status)
    }
}

/// Classify a response against an expectation.
pub fn classify(expect: &Expectation, response: &Response) -> Result<()> {
    if expect.accepts(response.status) {
        return Ok(());
    }
    if expect.not_found && response.status == NOT_FOUND {
        tracing::debug!(operation = expect.operation, "resource not found");
        return Err(IndexError::NotFound);
    }
    tracing::warn!(
        operation = expect.operation,
        status = response.status,
        body = %response.body,
        "unexpected response status"
    );
    Err(IndexError::BadResponse {
        status: response.status,
    })
}

/// Classify, then deserialize the body of a successful response.
///
/// A body that does not decode is reported as `IndexError::BadResponse`.
pub fn decode<T: DeserializeOwned>(expect: &Expectation, response: &Response) -> Result<T> {
    classify(expect, response)?;
    serde_json::from_str(&response.body).map_err(|e| {
        tracing::warn!(
            operation = expect.operation,
            status = response.status,
            error = %e,
            body = %response.body,
            "malformed response body"
        );
        IndexError::BadResponse {
            status: response.status,
        }
    })
}

// =============================================================================
// TESTS
// =============================================================================
