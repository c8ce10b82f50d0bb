use thiserror::Error;

/// Errors raised while assembling tokens or handling identifiers.
///
/// Every variant is fatal for the batch being generated; there is no retry
/// path at this layer.
#[derive(Error, Debug)]
pub enum TokenError {
    /// Canonical JSON encoding of a segment failed.
    #[error("canonical encoding failed: {0}")]
    Canonical(String),
    /// A segment did not decode as base64url, UTF-8, or JSON.
    #[error("segment decoding failed: {0}")]
    SegmentDecode(String),
    /// A typed field value could not be converted to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
    /// A did:key identifier was malformed.
    #[error("invalid did:key identifier '{0}'")]
    InvalidDidKey(String),
    /// An attenuation field failed pattern validation.
    #[error("attenuation {field} ('{value}') is not allowed")]
    InvalidAttenuation {
        /// Attenuation field that failed (`with` or `can`).
        field: &'static str,
        /// Offending value.
        value: String,
    },
}
