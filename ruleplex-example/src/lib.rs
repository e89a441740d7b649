//! Shared helpers for the demonstration lexers.

use ruleplex::Token;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs a `tracing` subscriber when `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Formats a token as `name "lexeme" @file:line:column`.
pub fn describe(name: &str, token: &Token<'_>) -> String {
    format!(
        "{name:<8} {:?} @{}:{}:{}",
        String::from_utf8_lossy(token.lexeme),
        token.filename,
        token.line,
        token.column
    )
}
