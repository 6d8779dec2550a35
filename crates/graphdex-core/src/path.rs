//! # Path Composer
//!
//! Builds request URIs from a base and a list of path segments.
//!
//! Empty segments are dropped, so an optional `key` or `value` can be passed
//! through as `""` without producing a doubled separator. Every other segment
//! is percent-encoded as exactly one path segment. The dot segments `.` and
//! `..` cannot be represented and are rejected.

use crate::types::{IndexError, Result};
use url::Url;

/// Name of the query parameter carrying a free-form index query.
pub const QUERY_PARAM: &str = "query";

/// Compose `base/segment/segment/...` from a raw base string.
///
/// Returns `IndexError::InvalidPath` if `base` is not an absolute,
/// hierarchical URL.
pub fn compose(base: &str, segments: &[&str]) -> Result<Url> {
    let url = Url::parse(base).map_err(|e| IndexError::InvalidPath(format!("'{base}': {e}")))?;
    extend(&url, segments)
}

/// Append segments to an already parsed base.
///
/// With no non-empty segments the base is returned unchanged.
pub fn extend(base: &Url, segments: &[&str]) -> Result<Url> {
    if base.cannot_be_a_base() {
        return Err(IndexError::InvalidPath(format!(
            "'{base}' cannot take path segments"
        )));
    }
    let present: Vec<&str> = segments.iter().copied().filter(|s| !s.is_empty()).collect();
    // `url` skips dot segments on push, which would silently shorten the path.
    if let Some(dots) = present.iter().find(|s| matches!(**s, "." | "..")) {
        return Err(IndexError::InvalidPath(format!(
            "'{dots}' is not a valid path segment"
        )));
    }
    let mut url = base.clone();
    if !present.is_empty() {
        url.path_segments_mut()
            .map_err(|()| IndexError::InvalidPath(format!("'{base}' cannot take path segments")))?
            .pop_if_empty()
            .extend(present);
    }
    Ok(url)
}

/// Attach `?query=<text>` to a base, form-encoding the text verbatim.
#[must_use]
pub fn with_query(base: &Url, query: &str) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut().clear().append_pair(QUERY_PARAM, query);
    url
}

// =============================================================================
// TESTS
// =============================================================================
