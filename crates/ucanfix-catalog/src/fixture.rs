use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Expected type-level failure: a field present with the wrong JSON type,
/// or absent when required. Serialized as `<field><Reason>` in camelCase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeErrorTag {
    /// `alg` present with a non-string value.
    AlgWrongType,
    /// `typ` present with a non-string value.
    TypWrongType,
    /// `ucv` present with a non-string value.
    UcvWrongType,
    /// `iss` present with a non-string value.
    IssWrongType,
    /// `aud` present with a non-string value.
    AudWrongType,
    /// `nbf` present with a non-numeric value.
    NbfWrongType,
    /// `exp` present with a non-numeric value.
    ExpWrongType,
    /// `nnc` present with a non-string value.
    NncWrongType,
    /// `fct` present but not an array of JSON objects.
    FctWrongType,
    /// `att` present but not an array.
    AttWrongType,
    /// `prf` present but not an array of strings.
    PrfWrongType,
    /// Required `alg` field absent.
    AlgMissing,
    /// Required `typ` field absent.
    TypMissing,
    /// Required `ucv` field absent.
    UcvMissing,
    /// Required `iss` field absent.
    IssMissing,
    /// Required `aud` field absent.
    AudMissing,
    /// Required `exp` field absent.
    ExpMissing,
    /// Required `att` field absent.
    AttMissing,
    /// Required `prf` field absent.
    PrfMissing,
}

/// Expected protocol-level failure for structurally decodable but invalid
/// content. Serialized in camelCase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationErrorTag {
    /// A segment contains characters outside the base64url alphabet.
    Base64Invalid,
    /// The header segment is missing or undecodable.
    HeaderMissingOrInvalid,
    /// The payload segment is missing or undecodable.
    PayloadMissingOrInvalid,
    /// The signature segment is missing or does not verify.
    SignatureMissingOrInvalid,
    /// `alg` names an unsupported algorithm.
    AlgInvalidAlgorithm,
    /// `typ` names an unsupported token type.
    TypInvalidType,
    /// `ucv` is not a supported version string.
    UcvInvalidVersion,
    /// `iss` is not a valid did:key.
    IssInvalidDidKey,
    /// `aud` is not a valid did:key.
    AudInvalidDidKey,
    /// `exp` lies in the past.
    ExpExpired,
    /// `nbf` lies in the future.
    NbfNotReady,
    /// A witness's validity window does not cover the delegate's window.
    ExpWitnessTimeBoundExceeded,
    /// An attenuation resource is not a URI.
    AttInvalidResource,
    /// An attenuation ability is not namespaced.
    AttInvalidAbility,
    /// A witness's audience does not equal the delegate issuer's DID.
    PrfWitnessNotAligned,
    /// A witness's version differs from the delegate's version.
    PrfWitnessVersionMismatch,
    /// A claimed proof index has no corresponding witness.
    PrfWitnessDoesNotExist,
}

/// Declarative expectations an external validator must reproduce.
///
/// `header`/`payload` are present only for the segments not deliberately
/// omitted from the token. For invalid fixtures exactly one of the two
/// error lists is non-empty; valid fixtures carry neither.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Assertions {
    /// Expected decoded header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Value>,
    /// Expected decoded payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// Expected protocol-level error tags.
    #[serde(rename = "validationErrors", skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<Vec<ValidationErrorTag>>,
    /// Expected type-level error tags.
    #[serde(rename = "typeErrors", skip_serializing_if = "Option::is_none")]
    pub type_errors: Option<Vec<TypeErrorTag>>,
}

/// One conformance fixture: a token and what a validator must conclude
/// about it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    /// Human-readable description of the scenario.
    pub comment: String,
    /// Wire-format token string.
    pub token: String,
    /// Expectations to check against.
    pub assertions: Assertions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tags_serialize_in_camel_case() {
        assert_eq!(
            serde_json::to_value(TypeErrorTag::AlgWrongType).unwrap(),
            json!("algWrongType")
        );
        assert_eq!(
            serde_json::to_value(TypeErrorTag::UcvMissing).unwrap(),
            json!("ucvMissing")
        );
        assert_eq!(
            serde_json::to_value(ValidationErrorTag::Base64Invalid).unwrap(),
            json!("base64Invalid")
        );
        assert_eq!(
            serde_json::to_value(ValidationErrorTag::ExpWitnessTimeBoundExceeded).unwrap(),
            json!("expWitnessTimeBoundExceeded")
        );
        assert_eq!(
            serde_json::to_value(ValidationErrorTag::PrfWitnessDoesNotExist).unwrap(),
            json!("prfWitnessDoesNotExist")
        );
    }

    #[test]
    fn empty_assertion_fields_are_omitted() {
        let fixture = Fixture {
            comment: "UCAN is valid".to_string(),
            token: "a.b.c".to_string(),
            assertions: Assertions {
                header: Some(json!({"alg": "EdDSA"})),
                payload: None,
                validation_errors: None,
                type_errors: None,
            },
        };
        let serialized = serde_json::to_value(&fixture).unwrap();
        assert_eq!(
            serialized,
            json!({
                "comment": "UCAN is valid",
                "token": "a.b.c",
                "assertions": {"header": {"alg": "EdDSA"}}
            })
        );
    }
}
