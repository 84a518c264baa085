//! HS256 token signing.
//! Used by: token::codec.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::token::claims::Claims;
use crate::token::key::SigningKey;

pub const ALGORITHM: &str = "HS256";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Header {
    pub alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

impl Header {
    pub fn hs256() -> Self {
        Self {
            alg: ALGORITHM.into(),
            typ: Some("JWT".into()),
        }
    }
}

pub fn sign_token(claims: &Claims, key: &SigningKey) -> Result<String> {
    let header = serde_json::to_vec(&Header::hs256()).map_err(|e| Error::Encoding(e.to_string()))?;
    let payload = serde_json::to_vec(claims).map_err(|e| Error::Encoding(e.to_string()))?;
    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header),
        URL_SAFE_NO_PAD.encode(payload)
    );
    let signature = key.sign(signing_input.as_bytes());
    Ok(format!("{}.{}", signing_input, URL_SAFE_NO_PAD.encode(signature)))
}
