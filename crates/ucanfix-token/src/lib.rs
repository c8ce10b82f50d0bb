//! UCAN token model and assembly for conformance fixtures.
//!
//! This crate builds compact, signed, `.`-joined capability tokens
//! (UCAN 0.8.1 dialect) with deliberately controllable corruption: any
//! header or payload field can be replaced with an arbitrary JSON value or
//! removed outright, and any of the three segments can be omitted from the
//! wire form. Witness tokens (proofs embedded in a delegate's `prf` list)
//! are built through the same assembler from their own fresh keypairs.
//!
//! The crate never validates tokens; it only produces them.
//!
#![deny(missing_docs)]

/// Token assembly: defaults, canonical encoding, signing, segment omission.
pub mod assembler;
/// Unix-time helpers for validity windows.
pub mod clock;
/// Error types for token operations.
pub mod error;
/// Field override variants and capability attenuations.
pub mod fields;
/// Ed25519 keypairs and did:key identifiers.
pub mod keys;
/// Canonical JSON segment encoding.
pub mod segment;
/// Witness construction and delegation chains.
pub mod witness;

pub use assembler::{
    AssembledToken, BuiltToken, TokenAssembler, TokenBlueprint, TokenPart,
    DEFAULT_HORIZON_YEARS, SIGNATURE_ALGORITHM, TOKEN_TYPE, UCAN_VERSION,
};
pub use error::TokenError;
pub use fields::{Attenuation, HeaderOverrides, Override, PayloadOverrides};
pub use keys::{decode_did_key, Keypair};
pub use segment::{decode_segment, encode_segment, encode_signature};
pub use witness::{Witness, WitnessRequest, WITNESS_HORIZON_YEARS};
