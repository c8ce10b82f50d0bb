use std::io::Write;

use serde_json::json;
use ucanfix_token::{clock, Attenuation, Override, PayloadOverrides, WitnessRequest};

use crate::context::BatchContext;
use crate::emitter::Emitter;
use crate::error::CatalogError;
use crate::generate::{emit_fixture, FixtureRequest};

fn witness_with_window(
    audience: String,
    nbf: Option<i64>,
    exp: i64,
    att: Option<Vec<Attenuation>>,
) -> WitnessRequest {
    let mut payload = PayloadOverrides {
        exp: Override::Set(exp),
        ..PayloadOverrides::default()
    };
    if let Some(nbf) = nbf {
        payload.nbf = Override::Set(nbf);
    }
    if let Some(att) = att {
        payload.att = Override::Set(att);
    }
    WitnessRequest {
        payload,
        ..WitnessRequest::for_audience(audience)
    }
}

/// A delegate combining capabilities drawn from independent witnesses.
pub fn rights_amplification<W: Write>(
    ctx: &BatchContext,
    emitter: &mut Emitter<W>,
) -> Result<(), CatalogError> {
    let exp = clock::years_from_now(100);
    let resource = "db://tamedun.fission.app/users";
    let read = witness_with_window(
        ctx.issuer.did(),
        None,
        exp,
        Some(vec![Attenuation::parse(resource, "db/READ")?]),
    )
    .resolve()?;
    let write = witness_with_window(
        ctx.issuer.did(),
        None,
        exp,
        Some(vec![Attenuation::parse(resource, "db/WRITE")?]),
    )
    .resolve()?;

    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                exp: Override::Set(exp),
                prf: Override::Set(vec![read.token, write.token]),
                att: Override::Set(vec![
                    Attenuation::parse(resource, "db/WRITE")?,
                    Attenuation::parse(resource, "db/READ")?,
                ]),
                ..PayloadOverrides::default()
            },
            ..FixtureRequest::commented(
                "Delegated UCAN has rights amplification from combining witness capabilities",
            )
        },
    )?;
    Ok(())
}

/// Witnesses whose audience and version line up with the delegate.
pub fn alignment<W: Write>(
    ctx: &BatchContext,
    emitter: &mut Emitter<W>,
) -> Result<(), CatalogError> {
    let cases = [
        "Witness issuer audience DID aligns with delegated issuer DID",
        "Witness UCAN version matches delegated UCAN version",
    ];
    for comment in cases {
        let exp = clock::years_from_now(100);
        let witness = witness_with_window(ctx.issuer.did(), None, exp, None).resolve()?;
        emit_fixture(
            ctx,
            emitter,
            FixtureRequest {
                payload: PayloadOverrides {
                    exp: Override::Set(exp),
                    prf: Override::Set(vec![witness.token]),
                    ..PayloadOverrides::default()
                },
                ..FixtureRequest::commented(comment)
            },
        )?;
    }
    Ok(())
}

/// In-window tokens, including the inclusive boundary cases: a witness
/// window exactly covering the delegate's window is valid, and `nbf == now`
/// is ready.
pub fn time_bounds<W: Write>(
    ctx: &BatchContext,
    emitter: &mut Emitter<W>,
) -> Result<(), CatalogError> {
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest::commented("UCAN has not expired"),
    )?;

    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                nbf: Override::Set(clock::days_ago(1)),
                exp: Override::Set(clock::years_from_now(101)),
                ..PayloadOverrides::default()
            },
            ..FixtureRequest::commented("UCAN is ready to be used")
        },
    )?;

    {
        let witness =
            witness_with_window(ctx.issuer.did(), None, clock::years_from_now(120), None)
                .resolve()?;
        emit_fixture(
            ctx,
            emitter,
            FixtureRequest {
                payload: PayloadOverrides {
                    exp: Override::Set(clock::years_from_now(100)),
                    prf: Override::Set(vec![witness.token]),
                    ..PayloadOverrides::default()
                },
                ..FixtureRequest::commented("Witnesses expire after the delegated UCAN")
            },
        )?;
    }

    // Inclusive upper bound: identical expiry is valid.
    {
        let exp = clock::years_from_now(100);
        let witness = witness_with_window(ctx.issuer.did(), None, exp, None).resolve()?;
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
                ..FixtureRequest::commented(
                    "Witnesses expire at the same time as the delegated UCAN",
                )
            },
        )?;
    }

    {
        let exp = clock::years_from_now(120);
        let witness =
            witness_with_window(ctx.issuer.did(), Some(clock::years_from_now(100)), exp, None)
                .resolve()?;
        emit_fixture(
            ctx,
            emitter,
            FixtureRequest {
                payload: PayloadOverrides {
                    nbf: Override::Set(clock::years_from_now(101)),
                    exp: Override::Set(exp),
                    prf: Override::Set(vec![witness.token]),
                    ..PayloadOverrides::default()
                },
                ..FixtureRequest::commented(
                    "Witnesses are ready to be used before the delegated UCAN",
                )
            },
        )?;
    }

    // Inclusive lower bound: identical readiness is valid.
    {
        let nbf = clock::years_from_now(100);
        let exp = clock::years_from_now(120);
        let witness = witness_with_window(ctx.issuer.did(), Some(nbf), exp, None).resolve()?;
        emit_fixture(
            ctx,
            emitter,
            FixtureRequest {
                payload: PayloadOverrides {
                    nbf: Override::Set(nbf),
                    exp: Override::Set(exp),
                    prf: Override::Set(vec![witness.token]),
                    ..PayloadOverrides::default()
                },
                ..FixtureRequest::commented(
                    "Witness is ready to be used at the same time as the delegated UCAN",
                )
            },
        )?;
    }

    Ok(())
}

/// A delegate referencing an existing witness by proof index.
pub fn redelegation<W: Write>(
    ctx: &BatchContext,
    emitter: &mut Emitter<W>,
) -> Result<(), CatalogError> {
    let exp = clock::years_from_now(100);
    let witness = witness_with_window(ctx.issuer.did(), None, exp, None).resolve()?;
    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                exp: Override::Set(exp),
                prf: Override::Set(vec![witness.token]),
                att: Override::Set(vec![Attenuation::proof_reference(0)]),
                ..PayloadOverrides::default()
            },
            ..FixtureRequest::commented("Delegated UCAN can delegate")
        },
    )?;
    Ok(())
}

/// Plain valid tokens: defaults, facts, proof-backed delegation, and
/// attenuation syntax.
pub fn main<W: Write>(ctx: &BatchContext, emitter: &mut Emitter<W>) -> Result<(), CatalogError> {
    emit_fixture(ctx, emitter, FixtureRequest::commented("UCAN is valid"))?;

    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                fct: Override::Set(vec![json!({
                    "challenge": "abcdef",
                    "from": "example.com"
                })]),
                ..PayloadOverrides::default()
            },
            ..FixtureRequest::commented("Payload `fct` is valid")
        },
    )?;

    {
        let exp = clock::years_from_now(100);
        let resource = "db://tamedun.fission.app/users";
        let read = witness_with_window(
            ctx.issuer.did(),
            None,
            exp,
            Some(vec![Attenuation::parse(resource, "db/READ")?]),
        )
        .resolve()?;
        let write = witness_with_window(
            ctx.issuer.did(),
            None,
            exp,
            Some(vec![Attenuation::parse(resource, "db/WRITE")?]),
        )
        .resolve()?;
        emit_fixture(
            ctx,
            emitter,
            FixtureRequest {
                payload: PayloadOverrides {
                    exp: Override::Set(exp),
                    prf: Override::Set(vec![read.token, write.token]),
                    att: Override::Set(vec![
                        Attenuation::parse(resource, "db/WRITE")?,
                        Attenuation::parse(resource, "db/READ")?,
                    ]),
                    ..PayloadOverrides::default()
                },
                ..FixtureRequest::commented("Delegated UCAN is valid with multiple valid proofs")
            },
        )?;
    }

    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                att: Override::Set(vec![Attenuation::parse(
                    "wnfs://tamedun.fission.app/public/photos/",
                    "wnfs/APPEND",
                )?]),
                ..PayloadOverrides::default()
            },
            ..FixtureRequest::commented("UCAN attenuation has valid syntax")
        },
    )?;

    emit_fixture(
        ctx,
        emitter,
        FixtureRequest {
            payload: PayloadOverrides {
                att: Override::Set(vec![
                    Attenuation::parse("db://tamedun.fission.app/users", "db/WRITE")?,
                    Attenuation::parse("db://tamedun.fission.app/users", "db/READ")?,
                ]),
                ..PayloadOverrides::default()
            },
            ..FixtureRequest::commented("UCAN attenuation is valid with multiple capabilities")
        },
    )?;

    Ok(())
}
