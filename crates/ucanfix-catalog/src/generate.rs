use std::io::Write;

use ucanfix_token::{
    HeaderOverrides, PayloadOverrides, TokenAssembler, TokenBlueprint, TokenPart,
};

use crate::context::BatchContext;
use crate::emitter::Emitter;
use crate::error::CatalogError;
use crate::fixture::{Assertions, Fixture, TypeErrorTag, ValidationErrorTag};

/// Options for one fixture. Every field has a neutral default: no
/// overrides, no expected errors, no omitted segment, the context audience,
/// and immediate emission.
#[derive(Debug, Clone, Default)]
pub struct FixtureRequest {
    /// Human-readable description carried into the fixture record.
    pub comment: String,
    /// Audience DID; the context audience when `None`.
    pub audience: Option<String>,
    /// Header field overrides.
    pub header: HeaderOverrides,
    /// Payload field overrides.
    pub payload: PayloadOverrides,
    /// Expected type-error tags.
    pub type_errors: Vec<TypeErrorTag>,
    /// Expected validation-error tags.
    pub validation_errors: Vec<ValidationErrorTag>,
    /// Segment to omit from the token.
    pub omit: Option<TokenPart>,
    /// Build and return the fixture without emitting it.
    pub suppress_output: bool,
}

impl FixtureRequest {
    /// Request with only the comment set.
    pub fn commented(comment: &str) -> Self {
        Self {
            comment: comment.to_string(),
            ..Self::default()
        }
    }
}

/// Builds one fixture against the batch context and streams it to the
/// emitter unless suppressed. The omitted segment's assertion is left
/// absent; empty error lists are dropped from the record.
pub fn emit_fixture<W: Write>(
    ctx: &BatchContext,
    emitter: &mut Emitter<W>,
    request: FixtureRequest,
) -> Result<Fixture, CatalogError> {
    let assembler = TokenAssembler::new();
    let audience = request.audience.or_else(|| Some(ctx.audience.clone()));
    let blueprint = TokenBlueprint {
        audience,
        header: request.header,
        payload: request.payload,
        omit: request.omit,
    };
    let built = assembler.build(&ctx.issuer, &blueprint)?;

    let fixture = Fixture {
        comment: request.comment,
        token: built.token,
        assertions: Assertions {
            header: built.header,
            payload: built.payload,
            validation_errors: none_if_empty(request.validation_errors),
            type_errors: none_if_empty(request.type_errors),
        },
    };
    if !request.suppress_output {
        emitter.emit(&fixture)?;
    }
    Ok(fixture)
}

fn none_if_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
