//! Tracing subscriber setup.
//!
//! `RUST_LOG`, when set, wins over the configured level. Otherwise the
//! configured directive is used with chatty transport crates held at `warn`.

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use super::server::ServerConfig;

/// Library targets kept at `warn` unless `RUST_LOG` says otherwise.
pub const NOISY_MODULES: &[&str] = &["hyper", "hyper_util", "reqwest", "h2", "rustls"];

fn build_filter(log_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    EnvFilter::new(filter_directives(log_level))
}

fn filter_directives(log_level: &str) -> String {
    let mut directives = String::from(log_level);
    for module in NOISY_MODULES {
        directives.push_str(&format!(",{}=warn", module));
    }
    directives
}

/// Installs the global subscriber: JSON in production, human-readable elsewhere.
///
/// Calling it twice is harmless; the second call is ignored.
pub fn init_logging(server: &ServerConfig) {
    let subscriber = tracing_subscriber::registry().with(build_filter(&server.log_level));

    if server.is_production() {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true);
        let _ = subscriber.with(fmt_layer).try_init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
        let _ = subscriber.with(fmt_layer).try_init();
    }

    tracing::info!(
        log_level = %server.log_level,
        environment = ?server.environment,
        "Logging initialized"
    );
}
