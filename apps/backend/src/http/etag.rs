//! ETag helpers for optimistic concurrency control.
//!
//! A room's ETag encodes its lock version, so clients can use
//! `If-None-Match` for cheap polling and `If-Match` to guard a play.

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Generate an ETag for a room resource.
///
/// Format: `"room-{code}-v{version}"` (quoted, as HTTP entity tags are)
///
/// # Example
/// ```
/// # use cassino::http::etag::room_etag;
/// assert_eq!(room_etag("AB12CD", 5), r#""room-AB12CD-v5""#);
/// ```
pub fn room_etag(code: &str, version: u64) -> String {
    format!(r#""room-{code}-v{version}""#)
}

/// Parse the lock version from a room ETag value.
///
/// # Errors
/// `AppError::bad_request` with `ErrorCode::InvalidHeader` when the version
/// marker is missing or not an integer.
pub fn parse_room_version_from_etag(s: &str) -> Result<u64, AppError> {
    let s = s.trim().trim_matches('"');

    let version_start = s
        .rfind("-v")
        .ok_or_else(|| {
            AppError::bad_request(
                ErrorCode::InvalidHeader,
                format!("Invalid ETag format: expected \"room-{{code}}-v{{version}}\", got: \"{s}\""),
            )
        })?
        + 2;

    let version_str = &s[version_start..];
    version_str.parse::<u64>().map_err(|_| {
        AppError::bad_request(
            ErrorCode::InvalidHeader,
            format!("Invalid ETag format: version must be a valid integer, got: \"{version_str}\""),
        )
    })
}

/// Whether an `If-None-Match` header value matches `etag` (wildcard included).
pub fn if_none_match_hits(header: &str, etag: &str) -> bool {
    header.trim() == "*" || header.split(',').map(str::trim).any(|candidate| candidate == etag)
}
