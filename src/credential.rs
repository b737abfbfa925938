use std::fmt;

use sha2::{Digest, Sha256};

/// A possessed secret, kept only as its SHA-256 digest.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    hash: [u8; 32],
}

impl Credential {
    pub fn new(secret: &str) -> Self {
        Credential { hash: Self::digest_of(secret) }
    }

    fn digest_of(secret: &str) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        hasher.finalize().into()
    }

    /// True iff `candidate` hashes to the stored digest. Never fails.
    pub fn verify(&self, candidate: &str) -> bool {
        Self::digest_of(candidate) == self.hash
    }

    pub fn digest(&self) -> &[u8; 32] {
        &self.hash
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.hash)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.to_hex()).finish()
    }
}
