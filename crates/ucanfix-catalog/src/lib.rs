//! Conformance fixture catalog for UCAN validators.
//!
//! Generates a deterministic-order corpus of fixtures: each record pairs a
//! token string with the expectations (decoded fields, expected error tags)
//! an independent validator must reproduce. Categories run in a fixed
//! declared order and stream each fixture to the emitter as soon as it is
//! built, so an aborted run leaves a valid partial corpus behind.
//!
#![deny(missing_docs)]

/// Batch selection and category ordering.
pub mod batch;
/// Batch-scoped key material shared by every category routine.
pub mod context;
/// Fixture emission to an output sink.
pub mod emitter;
/// Error types for batch generation.
pub mod error;
/// Fixture records and expected-error tags.
pub mod fixture;
/// Shared fixture-generation plumbing for category routines.
pub mod generate;
/// Categories whose fixtures a validator must reject.
pub mod invalid;
/// Categories whose fixtures a validator must accept.
pub mod valid;

pub use batch::{run_batch, BatchKind};
pub use context::BatchContext;
pub use emitter::Emitter;
pub use error::CatalogError;
pub use fixture::{Assertions, Fixture, TypeErrorTag, ValidationErrorTag};
pub use generate::{emit_fixture, FixtureRequest};
