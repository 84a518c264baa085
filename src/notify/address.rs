//! Email address syntax check.
//! Used by: notify::send_templated.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_+&*-]+(?:\.[a-zA-Z0-9_+&*-]+)*@(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,7}$")
        .unwrap_or_else(|e| unreachable!("email pattern is a valid literal: {e}"))
});

/// Accepts `local@label.….tld` where local parts are dot-separated runs of
/// `[A-Za-z0-9_+&*-]`, labels are `[A-Za-z0-9-]+`, and the TLD is 2-7 letters.
pub fn is_valid_email(address: &str) -> bool {
    EMAIL_PATTERN.is_match(address)
}
