use serde_json::{Map, Value};

use crate::clock;
use crate::error::TokenError;
use crate::fields::{HeaderOverrides, PayloadOverrides};
use crate::keys::Keypair;
use crate::segment::{encode_segment, encode_signature};

/// Signature algorithm declared in the default header.
pub const SIGNATURE_ALGORITHM: &str = "EdDSA";
/// Token type declared in the default header.
pub const TOKEN_TYPE: &str = "JWT";
/// UCAN version declared in the default header.
pub const UCAN_VERSION: &str = "0.8.1";
/// Default validity horizon for outer tokens, in years.
pub const DEFAULT_HORIZON_YEARS: i64 = 100;

/// Token segment that can be deliberately left out of the wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPart {
    /// The base64url header segment.
    Header,
    /// The base64url payload segment.
    Payload,
    /// The base64url signature segment.
    Signature,
}

/// Everything needed to assemble one token.
#[derive(Debug, Clone, Default)]
pub struct TokenBlueprint {
    /// Audience DID; the `aud` key is absent when `None` and not overridden.
    pub audience: Option<String>,
    /// Header field overrides.
    pub header: HeaderOverrides,
    /// Payload field overrides.
    pub payload: PayloadOverrides,
    /// Segment to omit from the wire form.
    pub omit: Option<TokenPart>,
}

/// A fully assembled three-segment token plus its decoded parts.
#[derive(Debug, Clone)]
pub struct AssembledToken {
    /// base64url header segment.
    pub header_segment: String,
    /// base64url payload segment.
    pub payload_segment: String,
    /// base64url signature segment.
    pub signature_segment: String,
    /// Header exactly as encoded.
    pub header: Value,
    /// Payload exactly as encoded.
    pub payload: Value,
}

impl AssembledToken {
    /// Joins all three segments into the wire form.
    pub fn token(&self) -> String {
        format!(
            "{}.{}.{}",
            self.header_segment, self.payload_segment, self.signature_segment
        )
    }
}

/// Assembly result with any requested omission applied.
///
/// An omitted segment's decoded part is reported as `None` (not merely
/// empty) so consumers do not expect to recover it from the token string.
#[derive(Debug, Clone)]
pub struct BuiltToken {
    /// Wire-format token string; two segments when one was omitted.
    pub token: String,
    /// Decoded header, absent when the header segment was omitted.
    pub header: Option<Value>,
    /// Decoded payload, absent when the payload segment was omitted.
    pub payload: Option<Value>,
}

/// Merges defaults with overrides, canonically encodes, signs, and joins
/// token segments.
#[derive(Debug, Clone)]
pub struct TokenAssembler {
    version: String,
    horizon_years: i64,
}

impl Default for TokenAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenAssembler {
    /// Creates an assembler with the standard version and expiry horizon.
    pub fn new() -> Self {
        Self::with_horizon(DEFAULT_HORIZON_YEARS)
    }

    /// Creates an assembler whose default expiry sits `years` years out.
    pub fn with_horizon(years: i64) -> Self {
        Self {
            version: UCAN_VERSION.to_string(),
            horizon_years: years,
        }
    }

    /// Assembles all three segments, ignoring any omission request.
    ///
    /// The signature covers the ASCII bytes of
    /// `"<headerSegment>.<payloadSegment>"`.
    pub fn assemble(
        &self,
        issuer: &Keypair,
        blueprint: &TokenBlueprint,
    ) -> Result<AssembledToken, TokenError> {
        let header = self.header_value(&blueprint.header)?;
        let payload = self.payload_value(issuer, blueprint)?;

        let header_segment = encode_segment(&header)?;
        let payload_segment = encode_segment(&payload)?;
        let signing_input = format!("{header_segment}.{payload_segment}");
        let signature = issuer.sign(signing_input.as_bytes());
        let signature_segment = encode_signature(&signature.to_bytes());

        Ok(AssembledToken {
            header_segment,
            payload_segment,
            signature_segment,
            header,
            payload,
        })
    }

    /// Builds the wire token, applying the blueprint's omission request.
    pub fn build(
        &self,
        issuer: &Keypair,
        blueprint: &TokenBlueprint,
    ) -> Result<BuiltToken, TokenError> {
        let assembled = self.assemble(issuer, blueprint)?;
        Ok(match blueprint.omit {
            None => BuiltToken {
                token: assembled.token(),
                header: Some(assembled.header),
                payload: Some(assembled.payload),
            },
            Some(TokenPart::Header) => BuiltToken {
                token: format!(
                    "{}.{}",
                    assembled.payload_segment, assembled.signature_segment
                ),
                header: None,
                payload: Some(assembled.payload),
            },
            Some(TokenPart::Payload) => BuiltToken {
                token: format!(
                    "{}.{}",
                    assembled.header_segment, assembled.signature_segment
                ),
                header: Some(assembled.header),
                payload: None,
            },
            Some(TokenPart::Signature) => BuiltToken {
                token: format!("{}.{}", assembled.header_segment, assembled.payload_segment),
                header: Some(assembled.header),
                payload: Some(assembled.payload),
            },
        })
    }

    fn header_value(&self, overrides: &HeaderOverrides) -> Result<Value, TokenError> {
        let mut map = Map::new();
        insert(
            &mut map,
            "alg",
            overrides.alg.resolve(Some(Value::from(SIGNATURE_ALGORITHM)))?,
        );
        insert(
            &mut map,
            "typ",
            overrides.typ.resolve(Some(Value::from(TOKEN_TYPE)))?,
        );
        insert(
            &mut map,
            "ucv",
            overrides.ucv.resolve(Some(Value::from(self.version.as_str())))?,
        );
        Ok(Value::Object(map))
    }

    fn payload_value(
        &self,
        issuer: &Keypair,
        blueprint: &TokenBlueprint,
    ) -> Result<Value, TokenError> {
        let overrides = &blueprint.payload;
        let mut map = Map::new();
        insert(
            &mut map,
            "iss",
            overrides.iss.resolve(Some(Value::from(issuer.did())))?,
        );
        insert(
            &mut map,
            "aud",
            overrides
                .aud
                .resolve(blueprint.audience.clone().map(Value::from))?,
        );
        insert(&mut map, "nbf", overrides.nbf.resolve(None)?);
        insert(
            &mut map,
            "exp",
            overrides
                .exp
                .resolve(Some(Value::from(clock::years_from_now(self.horizon_years))))?,
        );
        insert(&mut map, "nnc", overrides.nnc.resolve(None)?);
        insert(&mut map, "fct", overrides.fct.resolve(None)?);
        insert(&mut map, "att", overrides.att.resolve(Some(Value::Array(vec![])))?);
        insert(&mut map, "prf", overrides.prf.resolve(Some(Value::Array(vec![])))?);
        Ok(Value::Object(map))
    }
}

fn insert(map: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value);
    }
}
