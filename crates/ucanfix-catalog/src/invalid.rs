use std::io::Write;

use serde_json::json;
use ucanfix_token::{
    clock, Attenuation, HeaderOverrides, Keypair, Override, PayloadOverrides, TokenAssembler,
    TokenBlueprint, TokenPart, WitnessRequest,
};

use crate::context::BatchContext;
use crate::emitter::Emitter;
use crate::error::CatalogError;
use crate::fixture::{Assertions, Fixture, TypeErrorTag, ValidationErrorTag};
use crate::generate::{emit_fixture, FixtureRequest};

/// A token whose leading segment carries characters outside the base64url
/// alphabet. No header/payload assertions: nothing decodes.
pub fn base64<W: Write>(
    ctx: &BatchContext,
    emitter: &mut Emitter<W>,
) -> Result<(), CatalogError> {
    let assembled = TokenAssembler::new().assemble(
        &ctx.issuer,
        &TokenBlueprint {
            audience: Some(ctx.audience.clone()),
            ..TokenBlueprint::default()
        },
    )?;
    let mut token = assembled.token();
    token.replace_range(0..2, "@@");

    let fixture = Fixture {
        comment: "UCAN sections contain invalid base64 characters".to_string(),
        token,
        assertions: Assertions {
            validation_errors: Some(vec![ValidationErrorTag::Base64Invalid]),
            ..Assertions::default()
        },
    };
    emitter.emit(&fixture)
}

/// Tokens with one of the three segments genuinely absent.
pub fn missing_parts<W: Write>(
    ctx: &BatchContext,
    emitter: &mut Emitter<W>,
) -> Result<(), CatalogError> {
    let cases = [
        (
            "UCAN header section is missing",
            TokenPart::Header,
            ValidationErrorTag::HeaderMissingOrInvalid,
        ),
        (
            "UCAN payload section is missing",
            TokenPart::Payload,
            ValidationErrorTag::PayloadMissingOrInvalid,
        ),
        (
            "UCAN signature is missing",
            TokenPart::Signature,
            ValidationErrorTag::SignatureMissingOrInvalid,
        ),
    ];
    for (comment, part, tag) in cases {
        emit_fixture(
            ctx,
            emitter,
            FixtureRequest {
                validation_errors: vec![tag],
                omit: Some(part),
                ..FixtureRequest::commented(comment)
            },
        )?;
    }
    Ok(())
}

/// Expired, not-yet-ready, and witness-window violations.
pub fn time_bounds<W: Write>(
    ctx: &BatchContext,
    emitter: &mut Emitter<W>,
) -> Result<(), CatalogError> {
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                exp: Override::Set(clock::days_ago(5)),
                ..PayloadOverrides::default()
            },
            validation_errors: vec![ValidationErrorTag::ExpExpired],
            ..FixtureRequest::commented("UCAN has expired")
        },
    )?;

    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                nbf: Override::Set(clock::years_from_now(100)),
                exp: Override::Set(clock::years_from_now(101)),
                ..PayloadOverrides::default()
            },
            validation_errors: vec![ValidationErrorTag::NbfNotReady],
            ..FixtureRequest::commented("UCAN is not ready to be used")
        },
    )?;

    // Witness expires at its default horizon while the delegate claims a
    // longer window.
    {
        let witness = WitnessRequest::for_audience(ctx.issuer.did()).resolve()?;
        emit_fixture(
            ctx,
            emitter,
            FixtureRequest {
                payload: PayloadOverrides {
                    exp: Override::Set(clock::years_from_now(200)),
                    prf: Override::Set(vec![witness.token]),
                    ..PayloadOverrides::default()
                },
                validation_errors: vec![ValidationErrorTag::ExpWitnessTimeBoundExceeded],
                ..FixtureRequest::commented("Witnesses expire before the delegated UCAN")
            },
        )?;
    }

    // Witness only becomes ready far in the future while the delegate is
    // ready now.
    {
        let exp = clock::years_from_now(120);
        let witness = WitnessRequest {
            payload: PayloadOverrides {
                nbf: Override::Set(clock::years_from_now(100)),
                exp: Override::Set(exp),
                ..PayloadOverrides::default()
            },
            ..WitnessRequest::for_audience(ctx.issuer.did())
        }
        .resolve()?;
        emit_fixture(
            ctx,
            emitter,
            FixtureRequest {
                payload: PayloadOverrides {
                    nbf: Override::Set(clock::unix_now()),
                    exp: Override::Set(exp),
                    prf: Override::Set(vec![witness.token]),
                    ..PayloadOverrides::default()
                },
                validation_errors: vec![ValidationErrorTag::ExpWitnessTimeBoundExceeded],
                ..FixtureRequest::commented(
                    "Witnesses are not ready to be used before the delegated UCAN",
                )
            },
        )?;
    }

    Ok(())
}

/// Witnesses whose audience or version does not line up with the delegate.
pub fn alignment<W: Write>(
    ctx: &BatchContext,
    emitter: &mut Emitter<W>,
) -> Result<(), CatalogError> {
    {
        let exp = clock::years_from_now(100);
        // Audience is some unrelated identity, not the delegate issuer.
        let witness = WitnessRequest {
            payload: PayloadOverrides {
                exp: Override::Set(exp),
                ..PayloadOverrides::default()
            },
            ..WitnessRequest::for_audience(Keypair::generate().did())
        }
        .resolve()?;
        emit_fixture(
            ctx,
            emitter,
            FixtureRequest {
                payload: PayloadOverrides {
                    exp: Override::Set(exp),
                    prf: Override::Set(vec![witness.token]),
                    ..PayloadOverrides::default()
                },
                validation_errors: vec![ValidationErrorTag::PrfWitnessNotAligned],
                ..FixtureRequest::commented(
                    "Witness issuer audience DID does not align with delegated issuer DID",
                )
            },
        )?;
    }

    {
        let exp = clock::years_from_now(100);
        let witness = WitnessRequest {
            header: HeaderOverrides {
                ucv: Override::Set("0.7".to_string()),
                ..HeaderOverrides::default()
            },
            payload: PayloadOverrides {
                exp: Override::Set(exp),
                ..PayloadOverrides::default()
            },
            ..WitnessRequest::for_audience(ctx.issuer.did())
        }
        .resolve()?;
        emit_fixture(
            ctx,
            emitter,
            FixtureRequest {
                payload: PayloadOverrides {
                    exp: Override::Set(exp),
                    prf: Override::Set(vec![witness.token]),
                    ..PayloadOverrides::default()
                },
                validation_errors: vec![ValidationErrorTag::PrfWitnessVersionMismatch],
                ..FixtureRequest::commented(
                    "Witness UCAN version does not match delegated UCAN version",
                )
            },
        )?;
    }

    Ok(())
}

/// A delegate claiming a proof index with no corresponding witness.
pub fn redelegation<W: Write>(
    ctx: &BatchContext,
    emitter: &mut Emitter<W>,
) -> Result<(), CatalogError> {
    let exp = clock::years_from_now(100);
    let witness = WitnessRequest {
        payload: PayloadOverrides {
            exp: Override::Set(exp),
            ..PayloadOverrides::default()
        },
        ..WitnessRequest::for_audience(ctx.issuer.did())
    }
    .resolve()?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                exp: Override::Set(exp),
                prf: Override::Set(vec![witness.token]),
                att: Override::Set(vec![Attenuation::proof_reference(2)]),
                ..PayloadOverrides::default()
            },
            validation_errors: vec![ValidationErrorTag::PrfWitnessDoesNotExist],
            ..FixtureRequest::commented("Witness referenced in prf scheme does not exist")
        },
    )?;
    Ok(())
}

/// Per-field corruption: wrong JSON types, removed required fields, and
/// well-typed but semantically invalid values.
pub fn field_shapes<W: Write>(
    ctx: &BatchContext,
    emitter: &mut Emitter<W>,
) -> Result<(), CatalogError> {
    // Header fields.
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            header: HeaderOverrides {
                alg: Override::Raw(json!(1)),
                ..HeaderOverrides::default()
            },
            type_errors: vec![TypeErrorTag::AlgWrongType],
            ..FixtureRequest::commented("Header `alg` field should be a string")
        },
    )?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            header: HeaderOverrides {
                alg: Override::Remove,
                ..HeaderOverrides::default()
            },
            type_errors: vec![TypeErrorTag::AlgMissing],
            ..FixtureRequest::commented("Header is missing an `alg` field")
        },
    )?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            header: HeaderOverrides {
                alg: Override::Set(String::new()),
                ..HeaderOverrides::default()
            },
            validation_errors: vec![ValidationErrorTag::AlgInvalidAlgorithm],
            ..FixtureRequest::commented("UCAN algorithm is not valid")
        },
    )?;

    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            header: HeaderOverrides {
                typ: Override::Raw(json!(1)),
                ..HeaderOverrides::default()
            },
            type_errors: vec![TypeErrorTag::TypWrongType],
            ..FixtureRequest::commented("Header `typ` field should be a string")
        },
    )?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            header: HeaderOverrides {
                typ: Override::Remove,
                ..HeaderOverrides::default()
            },
            type_errors: vec![TypeErrorTag::TypMissing],
            ..FixtureRequest::commented("Header is missing a `typ` field")
        },
    )?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            header: HeaderOverrides {
                typ: Override::Set(String::new()),
                ..HeaderOverrides::default()
            },
            validation_errors: vec![ValidationErrorTag::TypInvalidType],
            ..FixtureRequest::commented("UCAN type is not valid")
        },
    )?;

    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            header: HeaderOverrides {
                ucv: Override::Raw(json!(1)),
                ..HeaderOverrides::default()
            },
            type_errors: vec![TypeErrorTag::UcvWrongType],
            ..FixtureRequest::commented("Header `ucv` field should be a string")
        },
    )?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            header: HeaderOverrides {
                ucv: Override::Remove,
                ..HeaderOverrides::default()
            },
            type_errors: vec![TypeErrorTag::UcvMissing],
            ..FixtureRequest::commented("Header is missing a `ucv` field")
        },
    )?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            header: HeaderOverrides {
                ucv: Override::Set("0.7".to_string()),
                ..HeaderOverrides::default()
            },
            validation_errors: vec![ValidationErrorTag::UcvInvalidVersion],
            ..FixtureRequest::commented("UCAN version is not valid")
        },
    )?;

    // Issuer.
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                iss: Override::Raw(json!(1)),
                ..PayloadOverrides::default()
            },
            type_errors: vec![TypeErrorTag::IssWrongType],
            ..FixtureRequest::commented("Payload `iss` field should be a did:key string")
        },
    )?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                iss: Override::Remove,
                ..PayloadOverrides::default()
            },
            type_errors: vec![TypeErrorTag::IssMissing],
            ..FixtureRequest::commented("Payload is missing an `iss` field")
        },
    )?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                iss: Override::Set(String::new()),
                ..PayloadOverrides::default()
            },
            validation_errors: vec![ValidationErrorTag::IssInvalidDidKey],
            ..FixtureRequest::commented("UCAN issuer did:key is not valid")
        },
    )?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                // '+' sits outside the base58btc alphabet.
                iss: Override::Set(
                    "did:key:zM++m8DxWSwQhhZYbgPjkCNjmLvva3D7qBsGPvwz2gynSiaJ".to_string(),
                ),
                ..PayloadOverrides::default()
            },
            validation_errors: vec![ValidationErrorTag::IssInvalidDidKey],
            ..FixtureRequest::commented("UCAN issuer did:key is not valid")
        },
    )?;

    // Audience.
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                aud: Override::Raw(json!(1)),
                ..PayloadOverrides::default()
            },
            type_errors: vec![TypeErrorTag::AudWrongType],
            ..FixtureRequest::commented("Payload `aud` field should be a did:key string")
        },
    )?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                aud: Override::Remove,
                ..PayloadOverrides::default()
            },
            type_errors: vec![TypeErrorTag::AudMissing],
            ..FixtureRequest::commented("Payload is missing an `aud` field")
        },
    )?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                aud: Override::Set(
                    "did:key:zM++m8DxWSwQhhZYbgPjkCNjmLvva3D7qBsGPvwz2gynSiaJ".to_string(),
                ),
                ..PayloadOverrides::default()
            },
            validation_errors: vec![ValidationErrorTag::AudInvalidDidKey],
            ..FixtureRequest::commented("UCAN audience did:key is not valid")
        },
    )?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                aud: Override::Set(String::new()),
                ..PayloadOverrides::default()
            },
            validation_errors: vec![ValidationErrorTag::AudInvalidDidKey],
            ..FixtureRequest::commented("UCAN audience did:key is not valid")
        },
    )?;

    // Time bounds and nonce.
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                nbf: Override::Raw(json!("string")),
                ..PayloadOverrides::default()
            },
            type_errors: vec![TypeErrorTag::NbfWrongType],
            ..FixtureRequest::commented("Payload `nbf` field should be a number")
        },
    )?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                exp: Override::Raw(json!("string")),
                ..PayloadOverrides::default()
            },
            type_errors: vec![TypeErrorTag::ExpWrongType],
            ..FixtureRequest::commented("Payload `exp` field should be a number")
        },
    )?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                exp: Override::Remove,
                ..PayloadOverrides::default()
            },
            type_errors: vec![TypeErrorTag::ExpMissing],
            ..FixtureRequest::commented("Payload is missing an `exp` field")
        },
    )?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                nnc: Override::Raw(json!(1)),
                ..PayloadOverrides::default()
            },
            type_errors: vec![TypeErrorTag::NncWrongType],
            ..FixtureRequest::commented("Payload `nnc` field should be a string")
        },
    )?;

    // Facts and proofs.
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                fct: Override::Raw(json!(1)),
                ..PayloadOverrides::default()
            },
            type_errors: vec![TypeErrorTag::FctWrongType],
            ..FixtureRequest::commented("Payload `fct` field should be an array of json")
        },
    )?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                prf: Override::Raw(json!(1)),
                ..PayloadOverrides::default()
            },
            type_errors: vec![TypeErrorTag::PrfWrongType],
            ..FixtureRequest::commented("Payload `prf` field should be an array of strings")
        },
    )?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                prf: Override::Raw(json!([1])),
                ..PayloadOverrides::default()
            },
            type_errors: vec![TypeErrorTag::PrfWrongType],
            ..FixtureRequest::commented("Payload `prf` field should be an array of strings")
        },
    )?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                prf: Override::Remove,
                ..PayloadOverrides::default()
            },
            type_errors: vec![TypeErrorTag::PrfMissing],
            ..FixtureRequest::commented("Payload is missing a `prf` field")
        },
    )?;

    // Attenuations.
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                att: Override::Raw(json!(1)),
                ..PayloadOverrides::default()
            },
            type_errors: vec![TypeErrorTag::AttWrongType],
            ..FixtureRequest::commented("Payload `att` field should be an array of json")
        },
    )?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                att: Override::Remove,
                ..PayloadOverrides::default()
            },
            type_errors: vec![TypeErrorTag::AttMissing],
            ..FixtureRequest::commented("Payload is missing an `att` field")
        },
    )?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                att: Override::Set(vec![Attenuation::new(
                    "tamedun.fission.app/public/photos/",
                    "wnfs/APPEND",
                )]),
                ..PayloadOverrides::default()
            },
            validation_errors: vec![ValidationErrorTag::AttInvalidResource],
            ..FixtureRequest::commented("Attenuation resource is not a URI")
        },
    )?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                att: Override::Set(vec![Attenuation::new(
                    "wnfs://tamedun.fission.app/public/photos/",
                    "APPEND",
                )]),
                ..PayloadOverrides::default()
            },
            validation_errors: vec![ValidationErrorTag::AttInvalidAbility],
            ..FixtureRequest::commented("Attenuation ability is not namespaced")
        },
    )?;

    Ok(())
}
