//! TokenCodec: issues and verifies time-bounded session tokens.
//! Used by: cli, library callers.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::SubsecRound;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::CodecConfig;
use crate::error::{Error, Result};
use crate::token::claims::Claims;
use crate::token::clock::{Clock, SystemClock};
use crate::token::key::SigningKey;
use crate::token::sign::sign_token;
use crate::token::verify::{decode_unverified, verify_token};

/// Owns the signing key and default TTL. Cheap to clone, safe to share.
#[derive(Clone)]
pub struct TokenCodec {
    key: SigningKey,
    default_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    pub fn new(config: &CodecConfig) -> Result<Self> {
        let key = SigningKey::from_base64(&config.secret)?;
        Self::from_key(key, config.ttl()?)
    }

    pub fn from_key(key: SigningKey, default_ttl: Duration) -> Result<Self> {
        if default_ttl.as_millis() == 0 {
            return Err(Error::config("default ttl must be at least 1ms"));
        }
        Ok(Self {
            key,
            default_ttl,
            clock: Arc::new(SystemClock),
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Issues a token that expires after the configured default TTL.
    pub fn issue<C: Serialize + ?Sized>(&self, claims: &C) -> Result<String> {
        self.issue_with_ttl(claims, self.default_ttl)
    }

    /// Issues a token expiring exactly `ttl` (millisecond granularity) from now.
    ///
    /// `iat` and `exp` are written by the codec and replace any caller values.
    pub fn issue_with_ttl<C: Serialize + ?Sized>(&self, claims: &C, ttl: Duration) -> Result<String> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| Error::InvalidTtl(e.to_string()))?;
        let ttl = chrono::Duration::milliseconds(ttl.num_milliseconds());
        if ttl.num_milliseconds() < 1 {
            return Err(Error::InvalidTtl("ttl must be at least 1ms".into()));
        }

        let mut claims = Claims::from_serialize(claims)?;
        let now = self.clock.now().trunc_subsecs(3);
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| Error::InvalidTtl("expiry is out of range".into()))?;
        claims.stamp(now, expires_at);

        let token = sign_token(&claims, &self.key)?;
        tracing::debug!(exp = %expires_at, claims = claims.len(), "token issued");
        Ok(token)
    }

    /// Full verification: structure, expiry, then signature.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let result = verify_token(token, &self.key, self.clock.now());
        if let Err(err) = &result {
            match err {
                Error::InvalidSignature => {
                    tracing::warn!(kind = err.kind(), "token rejected: signature mismatch")
                }
                Error::TokenExpired => tracing::info!(kind = err.kind(), "token rejected: expired"),
                _ => tracing::debug!(kind = err.kind(), error = %err, "token rejected"),
            }
        }
        result
    }

    /// Yes/no adapter over [`TokenCodec::verify`] for callers that drop the cause.
    pub fn is_valid(&self, token: &str) -> bool {
        self.verify(token).is_ok()
    }

    /// Reads the payload as `T` with NO signature or expiry check.
    ///
    /// The result is attacker-controlled until [`TokenCodec::verify`] has
    /// accepted the same token. Call `verify` first.
    pub fn decode_unverified<T: DeserializeOwned>(&self, token: &str) -> Result<T> {
        decode_unverified(token)
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("key", &self.key)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}
