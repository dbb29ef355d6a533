pub mod build_info;

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "worklog_core=info";

/// Installs the global tracing subscriber. `RUST_LOG` replaces the default
/// `worklog_core=info` directive when set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = build_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok());

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Filter from the raw `RUST_LOG` value; blank or unparsable input falls back
/// to the default directive.
fn build_filter(from_env: Option<String>) -> EnvFilter {
    from_env
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}
