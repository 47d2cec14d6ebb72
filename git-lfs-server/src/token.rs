//! Authenticity tokens handed out in verify links.
//!
//! A token is the hex HMAC-SHA256 of `"{oid}.{size}"` under a process-wide secret.
//! It carries no randomness, so the same object always yields the same token.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::InvalidSecret;

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct TokenSigner {
    mac: HmacSha256,
}

impl TokenSigner {
    pub fn new(secret: &[u8]) -> Result<Self, InvalidSecret> {
        if secret.is_empty() {
            return Err(InvalidSecret);
        }
        let mac = HmacSha256::new_from_slice(secret).map_err(|_| InvalidSecret)?;
        Ok(Self { mac })
    }

    fn keyed(&self, oid: &str, size: u64) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(format!("{}.{}", oid, size).as_bytes());
        mac
    }

    pub fn sign(&self, oid: &str, size: u64) -> String {
        hex::encode(self.keyed(oid, size).finalize().into_bytes())
    }

    /// Checks a presented token in constant time.
    pub fn verify(&self, oid: &str, size: u64, presented: &str) -> bool {
        match hex::decode(presented) {
            Ok(tag) => self.keyed(oid, size).verify_slice(&tag).is_ok(),
            Err(_) => false,
        }
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner").finish_non_exhaustive()
    }
}
