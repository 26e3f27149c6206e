//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "auto_service_api=info,api_server=info,seed_db=info,tower_http=info";

/// Installs a global `fmt` subscriber filtered by `RUST_LOG` (or a sensible default).
///
/// Calling it twice is harmless; the second install is ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
