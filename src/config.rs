//! Codec configuration: TTL and base64 secret, read once at startup.
//! Used by: token::codec, cli.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

pub const SECRET_VAR: &str = "SESSIONMINT_JWT_SECRET";
pub const TTL_VAR: &str = "SESSIONMINT_JWT_TTL_MS";
pub const CONFIG_PATH_VAR: &str = "SESSIONMINT_CONFIG";

pub const DEFAULT_TTL_MS: u64 = 30 * 60 * 1000;

#[derive(Clone, Deserialize)]
pub struct CodecConfig {
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,
    /// Standard base64 of the raw HMAC key.
    pub secret: String,
}

fn default_ttl_ms() -> u64 {
    DEFAULT_TTL_MS
}

impl CodecConfig {
    /// File named by `SESSIONMINT_CONFIG` if set, the environment otherwise.
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) if !path.is_empty() => Self::from_file(path),
            _ => Self::from_env(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| Error::config(format!("{}: {e}", path.display())))?;
        tracing::info!(path = %path.display(), ttl_ms = config.ttl_ms, "codec config loaded");
        Ok(config)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let secret = lookup(SECRET_VAR)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| Error::config(format!("{SECRET_VAR} is not set")))?;
        let ttl_ms = match lookup(TTL_VAR) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| Error::config(format!("{TTL_VAR} must be milliseconds, got {raw:?}")))?,
            None => DEFAULT_TTL_MS,
        };
        Ok(Self { ttl_ms, secret })
    }

    pub fn ttl(&self) -> Result<Duration> {
        if self.ttl_ms == 0 {
            return Err(Error::config("ttl_ms must be positive"));
        }
        Ok(Duration::from_millis(self.ttl_ms))
    }
}

impl fmt::Debug for CodecConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecConfig")
            .field("ttl_ms", &self.ttl_ms)
            .field("secret", &"<redacted>")
            .finish()
    }
}
