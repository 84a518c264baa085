//! sessionmint: compact HMAC-SHA-256 session tokens with strict expiry.
//!
//! [`TokenCodec`] issues a signed, time-bounded token from any JSON-object
//! claim set and verifies presented tokens (structure, then expiry, then
//! signature) before handing the claims back. Failures stay distinct in
//! [`Error`] so callers can log tampering louder than plain expiry.
//!
//! The [`notify`] module carries the mail-side collaborators (templating,
//! address checks, a `Notifier` seam). Nothing in [`token`] depends on it.

pub mod config;
pub mod console;
pub mod error;
pub mod notify;
pub mod token;

pub use config::CodecConfig;
pub use error::{Error, Result};
pub use token::{Claims, Clock, ManualClock, SigningKey, SystemClock, TokenCodec};
