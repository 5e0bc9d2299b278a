//! A landing page with an email waitlist that forwards signups to a Mailjet contact list.

pub mod app;
pub mod config;
mod error;
pub mod mailjet_client;
pub mod templ_manager;
pub mod utils;
pub mod web;

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

// re-exports
pub use app::{App, AppState};
pub use error::{Error, Result};
pub use mailjet_client::MailjetClient;
pub use web::serve;

/// Compact, human readable console output for local development.
/// `RUST_LOG` overrides the default filter.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .without_time()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("waitlister=debug,tower_http=debug")),
        )
        .compact()
        .init();
}

pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
