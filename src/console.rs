//! Pretty terminal output with colors and badges.
//! Used by: cli.

use colored::Colorize;

use crate::error::Error;
use crate::notify::{Notifier, TransportError};
use crate::token::Claims;

// === Startup ===

pub fn print_banner() {
    println!();
    println!("{}", "╔═══════════════════════════════════════════════╗".cyan());
    println!("║   {}                 ║", "🔐 sessionmint v0.1.0".bold().white());
    println!("║   {}   ║", "HMAC-signed, time-bounded session tokens".dimmed());
    println!("{}", "╚═══════════════════════════════════════════════╝".cyan());
    println!();
}

pub fn print_usage() {
    println!("{}", "Commands:".white().bold());
    println!("  {} {}", "keygen".yellow(), "Generate a base64 signing secret".dimmed());
    println!("  {} {}", "issue <claims-json> [ttl-ms]".yellow(), "Issue a signed token".dimmed());
    println!("  {} {}", "verify <token>".yellow(), "Verify signature and expiry".dimmed());
    println!("  {} {}", "inspect <token>".yellow(), "Decode payload WITHOUT verifying".dimmed());
    println!("  {} {}", "demo".yellow(), "Issue, verify, wait out the ttl, verify again".dimmed());
    println!();
}

// === Badges ===

fn badge(text: &str, fg: colored::Color, bg: colored::Color) -> colored::ColoredString {
    format!(" {} ", text).color(fg).on_color(bg).bold()
}

fn short_token(token: &str) -> String {
    match token.rsplit_once('.') {
        Some((_, sig)) if sig.len() > 8 => match sig.get(sig.len() - 8..) {
            Some(tail) => format!("…{}", tail),
            None => token.to_owned(),
        },
        _ => token.to_owned(),
    }
}

fn claims_json(claims: &Claims) -> String {
    serde_json::to_string(claims).unwrap_or_else(|_| "<unprintable>".into())
}

// === Core Events ===

pub fn log_issue(token: &str, ttl_ms: u128) {
    println!(
        "{} {} {}",
        badge("ISSUE", colored::Color::Black, colored::Color::Green),
        format!("sig:{}", short_token(token)).dimmed(),
        format!("ttl:{}ms", ttl_ms).cyan()
    );
    println!("{}", token);
}

pub fn log_verify(claims: &Claims) {
    println!(
        "{} {} {}",
        badge("OK", colored::Color::Black, colored::Color::Blue),
        claims_json(claims).white(),
        "✓".green().bold()
    );
}

pub fn log_reject(err: &Error) {
    let tag = match err {
        Error::TokenExpired => badge("EXPIRED", colored::Color::Black, colored::Color::Yellow),
        _ => badge("DENY", colored::Color::White, colored::Color::Red),
    };
    println!("{} {} {}", tag, err.kind().dimmed(), err.to_string().red());
}

pub fn log_inspect(claims: &Claims) {
    println!(
        "{} {} {}",
        badge("UNVERIFIED", colored::Color::Black, colored::Color::Yellow),
        claims_json(claims).white(),
        "signature and expiry NOT checked".yellow()
    );
}

pub fn log_secret(secret: &str) {
    println!("{} {}", badge("SECRET", colored::Color::Black, colored::Color::Cyan), secret);
}

pub fn log_error(message: &str) {
    eprintln!("{} {}", badge("ERROR", colored::Color::White, colored::Color::Red), message.red());
}

// === Notifications ===

/// Prints notifications instead of delivering them.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn send(&self, recipient: &str, body_html: &str, subject: &str) -> Result<(), TransportError> {
        println!(
            "{} {} {} {} {}",
            badge("MAIL", colored::Color::Black, colored::Color::Green),
            "to:".dimmed(),
            recipient.white(),
            "subject:".dimmed(),
            subject.cyan()
        );
        println!("  {}", body_html.dimmed());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_token_keeps_signature_tail() {
        assert_eq!(short_token("aaa.bbb.0123456789abcdef"), "…89abcdef");
        assert_eq!(short_token("no-dots"), "no-dots");
    }

    #[test]
    fn console_notifier_always_delivers() {
        assert!(ConsoleNotifier.send("user@example.com", "<p>hi</p>", "hello").is_ok());
    }
}
