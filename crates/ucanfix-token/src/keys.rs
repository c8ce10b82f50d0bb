use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use regex::Regex;

use crate::error::TokenError;

/// Multicodec prefix for an Ed25519 public key (`0xed`, varint-encoded).
const ED25519_MULTICODEC: [u8; 2] = [0xed, 0x01];

/// `did:key` prefix including the base58btc multibase marker.
const DID_KEY_PREFIX: &str = "did:key:z";

/// Ed25519 keypair identified by a `did:key` string.
#[derive(Clone)]
pub struct Keypair {
    signing: SigningKey,
}

impl Keypair {
    /// Generates a fresh keypair from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing: SigningKey::generate(&mut OsRng),
        }
    }

    /// Returns the `did:key` identifier for the public key.
    pub fn did(&self) -> String {
        let mut bytes = ED25519_MULTICODEC.to_vec();
        bytes.extend_from_slice(self.signing.verifying_key().as_bytes());
        format!("{DID_KEY_PREFIX}{}", bs58::encode(bytes).into_string())
    }

    /// Produces a detached signature over `message`.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing.sign(message)
    }

    /// Returns the public verifying key.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing.verifying_key()
    }
}

/// Decodes a `did:key` identifier back to its Ed25519 verifying key.
pub fn decode_did_key(did: &str) -> Result<VerifyingKey, TokenError> {
    let pattern = Regex::new(r"^did:key:z[1-9A-HJ-NP-Za-km-z]+$").expect("invalid regex");
    if !pattern.is_match(did) {
        return Err(TokenError::InvalidDidKey(did.to_string()));
    }
    let body = &did[DID_KEY_PREFIX.len()..];
    let bytes = bs58::decode(body)
        .into_vec()
        .map_err(|_| TokenError::InvalidDidKey(did.to_string()))?;
    let Some(key_bytes) = bytes.strip_prefix(&ED25519_MULTICODEC[..]) else {
        return Err(TokenError::InvalidDidKey(did.to_string()));
    };
    let key_bytes: [u8; 32] = key_bytes
        .try_into()
        .map_err(|_| TokenError::InvalidDidKey(did.to_string()))?;
    VerifyingKey::from_bytes(&key_bytes).map_err(|_| TokenError::InvalidDidKey(did.to_string()))
}
