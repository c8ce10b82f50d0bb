use ucanfix_token::Keypair;

/// Batch-scoped key material: one issuer keypair and one audience identity,
/// created once per run and never mutated afterwards. Passing the context
/// by reference into every category routine replaces hidden shared state;
/// only explicit witness chaining links fixtures to each other.
pub struct BatchContext {
    /// Issuer keypair for every outer token in the batch.
    pub issuer: Keypair,
    /// Audience DID shared by every outer token in the batch.
    pub audience: String,
}

impl BatchContext {
    /// Creates the issuer keypair and a distinct audience identity.
    pub fn new() -> Self {
        Self {
            issuer: Keypair::generate(),
            audience: Keypair::generate().did(),
        }
    }
}

impl Default for BatchContext {
    fn default() -> Self {
        Self::new()
    }
}
