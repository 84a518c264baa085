//! HS256 token verification and the non-trusting payload decode.
//! Used by: token::codec.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::token::claims::{Claims, EXPIRES_AT};
use crate::token::key::SigningKey;
use crate::token::sign::{Header, ALGORITHM};

/// A token split into its decoded segments. Each segment is decoded once.
struct Segments<'a> {
    signing_input: &'a str,
    header: Vec<u8>,
    payload: Vec<u8>,
    signature: Vec<u8>,
}

impl<'a> Segments<'a> {
    fn split(token: &'a str) -> Result<Self> {
        let parts: Vec<&str> = token.split('.').collect();
        let [header, payload, signature] = parts.as_slice() else {
            return Err(Error::malformed(format!(
                "expected 3 segments, found {}",
                parts.len()
            )));
        };
        let signing_input = &token[..header.len() + 1 + payload.len()];
        Ok(Self {
            signing_input,
            header: decode_segment("header", header)?,
            payload: decode_segment("payload", payload)?,
            signature: decode_segment("signature", signature)?,
        })
    }
}

fn decode_segment(name: &str, segment: &str) -> Result<Vec<u8>> {
    if segment.is_empty() {
        return Err(Error::malformed(format!("{name} segment is empty")));
    }
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| Error::malformed(format!("{name} is not base64url: {e}")))
}

/// Checks structure, expiry (`now >= exp` fails), then signature.
///
/// Returns every claim, `iat` and `exp` included.
pub fn verify_token(token: &str, key: &SigningKey, now: DateTime<Utc>) -> Result<Claims> {
    let segments = Segments::split(token)?;

    let header: Header = serde_json::from_slice(&segments.header)
        .map_err(|e| Error::malformed(format!("header is not valid JSON: {e}")))?;
    if header.alg != ALGORITHM {
        return Err(Error::malformed(format!("unsupported algorithm: {}", header.alg)));
    }

    let payload: Map<String, Value> = serde_json::from_slice(&segments.payload)
        .map_err(|e| Error::malformed(format!("payload is not a JSON object: {e}")))?;
    let claims = Claims::from(payload);

    let expires_at = match claims.get(EXPIRES_AT) {
        None => return Err(Error::malformed("missing exp claim")),
        Some(_) => claims
            .expires_at()
            .ok_or_else(|| Error::malformed("exp is not a NumericDate"))?,
    };
    if now >= expires_at {
        return Err(Error::TokenExpired);
    }

    key.verify(segments.signing_input.as_bytes(), &segments.signature)?;
    Ok(claims)
}

/// Decodes the payload into `T` WITHOUT checking signature or expiry.
///
/// Anyone can forge a payload that decodes. Never trust the result unless
/// the same token has already passed [`verify_token`]; this exists for
/// inspecting tokens, e.g. reading `exp` off a rejected one.
pub fn decode_unverified<T: DeserializeOwned>(token: &str) -> Result<T> {
    let segments = Segments::split(token)?;
    serde_json::from_slice(&segments.payload)
        .map_err(|e| Error::malformed(format!("payload does not match requested shape: {e}")))
}
