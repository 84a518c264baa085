//! Symmetric HMAC-SHA-256 key material.
//! Used by: token::sign, token::verify, token::codec, config.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

const GENERATED_KEY_LEN: usize = 32;

/// Secret shared by issuer and verifier. Immutable once built.
#[derive(Clone)]
pub struct SigningKey {
    bytes: Box<[u8]>,
    mac: HmacSha256,
}

impl SigningKey {
    /// Decodes a standard (padded) base64 secret.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| Error::config(format!("secret is not valid base64: {e}")))?;
        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(Error::config("secret decodes to zero bytes"));
        }
        let mac = <HmacSha256 as Mac>::new_from_slice(&bytes)
            .map_err(|e| Error::config(e.to_string()))?;
        Ok(Self {
            bytes: bytes.into_boxed_slice(),
            mac,
        })
    }

    pub fn generate() -> Self {
        let bytes: [u8; GENERATED_KEY_LEN] = rand::random();
        let mac = <HmacSha256 as Mac>::new_from_slice(&bytes)
            .unwrap_or_else(|_| unreachable!("hmac accepts keys of any length"));
        Self {
            bytes: Box::new(bytes),
            mac,
        }
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(message);
        mac.finalize().into_bytes().to_vec()
    }

    /// Constant-time comparison of `signature` against the MAC of `message`.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<()> {
        let mut mac = self.mac.clone();
        mac.update(message);
        mac.verify_slice(signature)
            .map_err(|_| Error::InvalidSignature)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKey([redacted; {} bytes])", self.bytes.len())
    }
}
