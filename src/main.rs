//! sessionmint CLI: issue, verify, and inspect session tokens.
//! Used by: binary entrypoint.

use std::process::ExitCode;
use std::time::Duration;

use serde_json::{json, Value};

use sessionmint::console::{self, ConsoleNotifier};
use sessionmint::notify::{send_templated, PositionalRenderer};
use sessionmint::{Claims, CodecConfig, Error, Result, SigningKey, TokenCodec};

const DEMO_TTL: Duration = Duration::from_millis(2000);
const DEMO_WAIT: Duration = Duration::from_millis(2100);
const DEMO_RECIPIENT: &str = "user@example.com";
const SESSION_TEMPLATE: &str = "<p>Hello {0}, your session expires at {1}.</p>";

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("demo");
    let rest = args.get(1..).unwrap_or(&[]);

    match command {
        "keygen" => {
            console::log_secret(&SigningKey::generate().to_base64());
            return ExitCode::SUCCESS;
        }
        "help" | "-h" | "--help" => {
            console::print_banner();
            console::print_usage();
            return ExitCode::SUCCESS;
        }
        _ => {}
    }

    let codec = match CodecConfig::load().and_then(|config| TokenCodec::new(&config)) {
        Ok(codec) => codec,
        Err(err) => {
            tracing::error!(kind = err.kind(), "refusing to start");
            console::log_error(&err.to_string());
            return ExitCode::from(2);
        }
    };
    let default_ttl_ms = u64::try_from(codec.default_ttl().as_millis()).unwrap_or(u64::MAX);
    tracing::info!(default_ttl_ms, "codec ready");

    let result = match (command, rest) {
        ("issue", [claims]) => issue(&codec, claims, None),
        ("issue", [claims, ttl_ms]) => issue(&codec, claims, Some(ttl_ms)),
        ("verify", [token]) => verify(&codec, token),
        ("inspect", [token]) => inspect(&codec, token),
        ("demo", []) => demo(&codec),
        _ => {
            console::print_usage();
            return ExitCode::from(64);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_auth_failure() => {
            console::log_reject(&err);
            ExitCode::FAILURE
        }
        Err(err) => {
            console::log_error(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

fn issue(codec: &TokenCodec, claims: &str, ttl_ms: Option<&String>) -> Result<()> {
    let claims: Value =
        serde_json::from_str(claims).map_err(|e| Error::Encoding(format!("claims argument: {e}")))?;
    let ttl = match ttl_ms {
        Some(raw) => raw
            .parse()
            .map(Duration::from_millis)
            .map_err(|_| Error::InvalidTtl(format!("{raw:?} is not a number of milliseconds")))?,
        None => codec.default_ttl(),
    };
    let token = codec.issue_with_ttl(&claims, ttl)?;
    console::log_issue(&token, ttl.as_millis());
    Ok(())
}

fn verify(codec: &TokenCodec, token: &str) -> Result<()> {
    let claims = codec.verify(token)?;
    console::log_verify(&claims);
    Ok(())
}

fn inspect(codec: &TokenCodec, token: &str) -> Result<()> {
    let claims: Claims = codec.decode_unverified(token)?;
    console::log_inspect(&claims);
    Ok(())
}

fn demo(codec: &TokenCodec) -> Result<()> {
    console::print_banner();

    let token = codec.issue_with_ttl(&json!({"id": "46456", "role": 1}), DEMO_TTL)?;
    console::log_issue(&token, DEMO_TTL.as_millis());

    let claims = codec.verify(&token)?;
    console::log_verify(&claims);

    let expires = claims
        .expires_at()
        .map(|t| t.to_rfc3339())
        .unwrap_or_default();
    if let Err(err) = send_templated(
        &ConsoleNotifier,
        &PositionalRenderer,
        DEMO_RECIPIENT,
        "Your session",
        SESSION_TEMPLATE,
        &["46456", expires.as_str()],
    ) {
        console::log_error(&err.to_string());
    }

    std::thread::sleep(DEMO_WAIT);
    match codec.verify(&token) {
        Ok(claims) => console::log_verify(&claims),
        Err(err) => console::log_reject(&err),
    }

    let stale: Claims = codec.decode_unverified(&token)?;
    console::log_inspect(&stale);
    Ok(())
}
