use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;

use crate::error::TokenError;

/// Encodes a header or payload value as canonical JSON text, then base64url
/// without padding.
pub fn encode_segment(value: &Value) -> Result<String, TokenError> {
    let canonical =
        canonical_json::to_string(value).map_err(|err| TokenError::Canonical(err.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(canonical.as_bytes()))
}

/// Encodes raw signature bytes as base64url without padding.
pub fn encode_signature(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decodes a base64url segment back to its JSON value.
pub fn decode_segment(segment: &str) -> Result<Value, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|err| TokenError::SegmentDecode(err.to_string()))?;
    let text =
        String::from_utf8(bytes).map_err(|err| TokenError::SegmentDecode(err.to_string()))?;
    serde_json::from_str(&text).map_err(|err| TokenError::SegmentDecode(err.to_string()))
}
