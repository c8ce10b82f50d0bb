use serde_json::Value;

use crate::assembler::{TokenAssembler, TokenBlueprint};
use crate::error::TokenError;
use crate::fields::{HeaderOverrides, Override, PayloadOverrides};
use crate::keys::Keypair;

/// Validity horizon for witnesses, in years. Longer than the outer-token
/// default so a witness covers any delegate it backs.
pub const WITNESS_HORIZON_YEARS: i64 = 120;

/// A fully formed proof token plus the materials used to build it.
///
/// Keeping the keypair and decoded parts lets a consumer construct aligned
/// or misaligned audiences from the issuer identity and mismatched versions
/// from the header.
pub struct Witness {
    /// Keypair that issued the witness.
    pub keypair: Keypair,
    /// Wire-format token string.
    pub token: String,
    /// Header exactly as encoded.
    pub header: Value,
    /// Payload exactly as encoded.
    pub payload: Value,
}

/// Declarative request for one witness, including nested proofs.
///
/// Delegation depth is a data concern: a chain of any depth is a tree of
/// requests, resolved depth-first.
#[derive(Debug, Clone, Default)]
pub struct WitnessRequest {
    /// Audience DID; usually the delegate issuer's DID.
    pub audience: Option<String>,
    /// Header overrides (e.g. a mismatched version).
    pub header: HeaderOverrides,
    /// Payload overrides (e.g. a custom validity window).
    pub payload: PayloadOverrides,
    /// Nested witness requests whose tokens join this witness's `prf` list.
    pub proofs: Vec<WitnessRequest>,
}

impl WitnessRequest {
    /// Request with the given audience and all defaults.
    pub fn for_audience(audience: impl Into<String>) -> Self {
        Self {
            audience: Some(audience.into()),
            ..Self::default()
        }
    }

    /// Resolves this request (and nested proofs, depth-first) into a
    /// witness issued by a brand-new keypair.
    pub fn resolve(&self) -> Result<Witness, TokenError> {
        let keypair = Keypair::generate();
        let mut payload = self.payload.clone();

        if !self.proofs.is_empty() {
            let mut tokens = match &payload.prf {
                Override::Set(existing) => existing.clone(),
                _ => Vec::new(),
            };
            for proof in &self.proofs {
                tokens.push(proof.resolve()?.token);
            }
            payload.prf = Override::Set(tokens);
        }

        let assembler = TokenAssembler::with_horizon(WITNESS_HORIZON_YEARS);
        let blueprint = TokenBlueprint {
            audience: self.audience.clone(),
            header: self.header.clone(),
            payload,
            omit: None,
        };
        let assembled = assembler.assemble(&keypair, &blueprint)?;
        Ok(Witness {
            token: assembled.token(),
            header: assembled.header,
            payload: assembled.payload,
            keypair,
        })
    }
}
