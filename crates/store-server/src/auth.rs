//! RFC 7617 basic-auth header decoding.

use base64::Engine;
use store_git::Credentials;

use crate::error::ApiErr;

/// Decode an `Authorization` header value into store credentials.
///
/// An absent or empty header means anonymous access. A header that is
/// present but not well-formed basic auth is a client-input error, never
/// forwarded to the remote as an auth failure.
pub fn credentials_from_header(header: Option<&str>) -> Result<Credentials, ApiErr> {
    let Some(header) = header.filter(|h| !h.is_empty()) else {
        return Ok(Credentials::Anonymous);
    };
    let Some(encoded) = header.strip_prefix("Basic ") else {
        return Err(ApiErr::bad_request("invalid Authorization header"));
    };
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| ApiErr::bad_request(format!("failed to decode credentials: {e}")))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| ApiErr::bad_request("credentials are not valid UTF-8"))?;
    let Some((username, password)) = decoded.split_once(':') else {
        return Err(ApiErr::bad_request("invalid credential format"));
    };
    Ok(Credentials::basic(username, password))
}
