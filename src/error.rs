//! Unified error types for sessionmint.
//! Used by: config, token, cli.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("claims could not be encoded: {0}")]
    Encoding(String),

    #[error("malformed token: {0}")]
    MalformedToken(String),

    #[error("token expired")]
    TokenExpired,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid ttl: {0}")]
    InvalidTtl(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable label used in structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Encoding(_) => "encoding",
            Error::MalformedToken(_) => "malformed",
            Error::TokenExpired => "expired",
            Error::InvalidSignature => "invalid_signature",
            Error::Configuration(_) => "configuration",
            Error::InvalidTtl(_) => "invalid_ttl",
            Error::Io(_) => "io",
        }
    }

    /// True when a presented token must be treated as "not authenticated".
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Error::MalformedToken(_) | Error::TokenExpired | Error::InvalidSignature
        )
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedToken(reason.into())
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Error::Configuration(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
