use std::io::Write;

use crate::context::BatchContext;
use crate::emitter::Emitter;
use crate::error::CatalogError;
use crate::{invalid, valid};

/// Which fixture corpus to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    /// Fixtures a validator must accept.
    Valid,
    /// Fixtures a validator must reject.
    Invalid,
}

/// Runs one full batch, streaming fixtures to `out`.
///
/// Categories execute in a fixed declared order so the corpus is
/// diff-stable across runs. The first unrecoverable error aborts the batch;
/// fixtures already written remain a valid partial corpus.
pub fn run_batch<W: Write>(kind: BatchKind, out: W) -> Result<(), CatalogError> {
    let ctx = BatchContext::new();
    let mut emitter = Emitter::new(out);
    match kind {
        BatchKind::Invalid => {
            invalid::base64(&ctx, &mut emitter)?;
            invalid::missing_parts(&ctx, &mut emitter)?;
            invalid::time_bounds(&ctx, &mut emitter)?;
            invalid::alignment(&ctx, &mut emitter)?;
            invalid::redelegation(&ctx, &mut emitter)?;
            invalid::field_shapes(&ctx, &mut emitter)?;
        }
        BatchKind::Valid => {
            valid::rights_amplification(&ctx, &mut emitter)?;
            valid::alignment(&ctx, &mut emitter)?;
            valid::time_bounds(&ctx, &mut emitter)?;
            valid::redelegation(&ctx, &mut emitter)?;
            valid::main(&ctx, &mut emitter)?;
        }
    }
    Ok(())
}
