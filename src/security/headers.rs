//! Response header allowlist.
//!
//! Only these upstream headers ever reach the client:
//! `Content-Type`, `Access-Control-Allow-Origin`, `Cache-Control`,
//! `Last-Modified`, `Strict-Transport-Security`.

use axum::http::{header, HeaderMap, HeaderName};

/// Upstream headers copied to transformed responses.
pub const ALLOWED_HEADERS: [HeaderName; 5] = [
    header::CONTENT_TYPE,
    header::ACCESS_CONTROL_ALLOW_ORIGIN,
    header::CACHE_CONTROL,
    header::LAST_MODIFIED,
    header::STRICT_TRANSPORT_SECURITY,
];

/// Copy the allowlisted headers present in `upstream`, values verbatim.
pub fn copy_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for name in ALLOWED_HEADERS {
        for value in upstream.get_all(&name) {
            headers.append(name.clone(), value.clone());
        }
    }
    headers
}
