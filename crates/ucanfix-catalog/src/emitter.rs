use std::io::Write;

use crate::error::CatalogError;
use crate::fixture::Fixture;

/// Serializes fixtures to an output sink, one pretty-printed JSON object
/// per call with no enclosing array. Consumers parse the output as a
/// concatenated stream of top-level JSON values. The emitter never
/// inspects fixture content.
pub struct Emitter<W: Write> {
    out: W,
}

impl<W: Write> Emitter<W> {
    /// Wraps an output sink.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Serializes and writes a single fixture.
    pub fn emit(&mut self, fixture: &Fixture) -> Result<(), CatalogError> {
        let text = serde_json::to_string_pretty(fixture)?;
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{Assertions, Fixture};
    use serde_json::Value;

    #[test]
    fn emits_a_parseable_json_stream() {
        let fixture = Fixture {
            comment: "UCAN is valid".to_string(),
            token: "a.b.c".to_string(),
            assertions: Assertions::default(),
        };

        let mut emitter = Emitter::new(Vec::new());
        emitter.emit(&fixture).unwrap();
        emitter.emit(&fixture).unwrap();
        let text = String::from_utf8(emitter.into_inner()).unwrap();

        let parsed: Vec<Value> = serde_json::Deserializer::from_str(&text)
            .into_iter::<Value>()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["token"], "a.b.c");
    }
}
