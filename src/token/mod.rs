//! Token issuance, signing, and verification.
//! Used by: lib, cli.

pub mod claims;
pub mod clock;
pub mod codec;
pub mod key;
pub mod sign;
pub mod verify;

pub use claims::Claims;
pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::TokenCodec;
pub use key::SigningKey;
