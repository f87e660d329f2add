//! Deterministic salted SHA-512 password hashing.
//!
//! The salt is fixed at service initialization, derived from a configured
//! secret. Digest equality is the sole password-verification primitive, so
//! two hashers built from the same secret must always agree.

use sha2::{Digest, Sha256, Sha512};

/// Length in bytes of the derived salt.
const SALT_LEN: usize = 16;

/// Hashes character strings with SHA-512 over a fixed salt.
#[derive(Clone)]
pub struct Sha512Hasher {
    salt: [u8; SALT_LEN],
}

impl Sha512Hasher {
    /// Build a hasher whose salt is derived from `secret`.
    ///
    /// The salt is the first 16 bytes of `SHA-256(secret)`, so any
    /// non-empty secret yields a full-length salt.
    pub fn new(secret: &str) -> Self {
        let digest = Sha256::digest(secret.as_bytes());
        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&digest[..SALT_LEN]);
        Self { salt }
    }

    /// Hash a character string, returning the hex-encoded digest.
    pub fn hash(&self, word: &str) -> String {
        let mut hasher = Sha512::new();
        hasher.update(self.salt);
        hasher.update(word.as_bytes());
        let digest = hasher.finalize();
        format!("{digest:x}")
    }

    /// Digest-equality password verification.
    pub fn verify(&self, word: &str, digest: &str) -> bool {
        self.hash(word) == digest
    }
}

impl std::fmt::Debug for Sha512Hasher {
    // Never print the salt.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sha512Hasher").finish_non_exhaustive()
    }
}
