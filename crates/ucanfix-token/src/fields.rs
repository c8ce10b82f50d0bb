use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TokenError;

/// Per-field override applied over an assembler default.
///
/// `Raw` and `Remove` exist to inject malformed test data: `Raw` bypasses
/// the field's nominal type and `Remove` drops the key from the encoded map
/// entirely, so the rest of the system stays typed while fixtures can still
/// carry deliberately corrupt fields.
#[derive(Debug, Clone, Default)]
pub enum Override<T> {
    /// Use the assembler default.
    #[default]
    Keep,
    /// Replace the default with a well-typed value.
    Set(T),
    /// Inject an arbitrary JSON value.
    Raw(Value),
    /// Remove the key entirely.
    Remove,
}

impl<T: Serialize> Override<T> {
    /// Resolves the override against a default, yielding the value to encode
    /// (`None` when the key must be absent).
    pub fn resolve(&self, default: Option<Value>) -> Result<Option<Value>, TokenError> {
        match self {
            Override::Keep => Ok(default),
            Override::Set(value) => serde_json::to_value(value)
                .map(Some)
                .map_err(|err| TokenError::Serialization(err.to_string())),
            Override::Raw(value) => Ok(Some(value.clone())),
            Override::Remove => Ok(None),
        }
    }
}

/// Overrides for the three header fields.
#[derive(Debug, Clone, Default)]
pub struct HeaderOverrides {
    /// Signature algorithm (`alg`).
    pub alg: Override<String>,
    /// Token type (`typ`).
    pub typ: Override<String>,
    /// UCAN version (`ucv`).
    pub ucv: Override<String>,
}

/// Overrides for the payload fields.
#[derive(Debug, Clone, Default)]
pub struct PayloadOverrides {
    /// Issuer DID (`iss`).
    pub iss: Override<String>,
    /// Audience DID (`aud`).
    pub aud: Override<String>,
    /// Not-before Unix time (`nbf`).
    pub nbf: Override<i64>,
    /// Expiry Unix time (`exp`).
    pub exp: Override<i64>,
    /// Nonce (`nnc`).
    pub nnc: Override<String>,
    /// Fact list (`fct`).
    pub fct: Override<Vec<Value>>,
    /// Attenuation list (`att`).
    pub att: Override<Vec<Attenuation>>,
    /// Proof token list (`prf`).
    pub prf: Override<Vec<String>>,
}

const RESOURCE_PATTERN: &str = r"^[a-z][a-z0-9+.-]*://\S+$";
const ABILITY_PATTERN: &str = r"^[a-z][a-z0-9_-]*/[A-Za-z0-9_-]+$";

/// A single `(resource, ability)` capability grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attenuation {
    /// Resource identifier the grant applies to.
    pub with: String,
    /// Namespaced ability string (e.g. `wnfs/APPEND`).
    pub can: String,
}

impl Attenuation {
    /// Creates an attenuation without validation; callers are responsible
    /// for conformity. Used to inject semantically invalid grants.
    pub fn new(with: impl Into<String>, can: impl Into<String>) -> Self {
        Self {
            with: with.into(),
            can: can.into(),
        }
    }

    /// Creates a pattern-validated attenuation: the resource must be
    /// URI-shaped and the ability namespaced.
    pub fn parse(with: impl Into<String>, can: impl Into<String>) -> Result<Self, TokenError> {
        let with = with.into();
        let can = can.into();
        if !Regex::new(RESOURCE_PATTERN)
            .expect("invalid regex")
            .is_match(&with)
        {
            return Err(TokenError::InvalidAttenuation {
                field: "with",
                value: with,
            });
        }
        if !Regex::new(ABILITY_PATTERN)
            .expect("invalid regex")
            .is_match(&can)
        {
            return Err(TokenError::InvalidAttenuation {
                field: "can",
                value: can,
            });
        }
        Ok(Self { with, can })
    }

    /// References an embedded proof by index (`prf/N`), paired with the
    /// redelegation ability.
    pub fn proof_reference(index: usize) -> Self {
        Self {
            with: format!("prf/{index}"),
            can: "ucan/DELEGATE".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keep_uses_the_default() {
        let field: Override<String> = Override::Keep;
        let resolved = field.resolve(Some(json!("EdDSA"))).unwrap();
        assert_eq!(resolved, Some(json!("EdDSA")));
    }

    #[test]
    fn raw_passes_arbitrary_json_through() {
        let field: Override<String> = Override::Raw(json!(1));
        let resolved = field.resolve(Some(json!("JWT"))).unwrap();
        assert_eq!(resolved, Some(json!(1)));
    }

    #[test]
    fn remove_drops_the_key() {
        let field: Override<i64> = Override::Remove;
        assert_eq!(field.resolve(Some(json!(42))).unwrap(), None);
    }

    #[test]
    fn set_encodes_the_typed_value() {
        let field = Override::Set(vec![Attenuation::new("db://x/users", "db/READ")]);
        let resolved = field.resolve(None).unwrap();
        assert_eq!(resolved, Some(json!([{"with": "db://x/users", "can": "db/READ"}])));
    }

    #[test]
    fn parse_accepts_uri_resources_and_namespaced_abilities() {
        assert!(Attenuation::parse("wnfs://tamedun.fission.app/public/photos/", "wnfs/APPEND").is_ok());
        assert!(Attenuation::parse("db://tamedun.fission.app/users", "db/WRITE").is_ok());
    }

    #[test]
    fn parse_rejects_bare_hosts_and_bare_abilities() {
        assert!(Attenuation::parse("tamedun.fission.app/public/photos/", "wnfs/APPEND").is_err());
        assert!(Attenuation::parse("wnfs://tamedun.fission.app/public/photos/", "APPEND").is_err());
    }

    #[test]
    fn proof_reference_is_indexed_and_delegating() {
        let att = Attenuation::proof_reference(2);
        assert_eq!(att.with, "prf/2");
        assert_eq!(att.can, "ucan/DELEGATE");
    }
}
