//! Structured logging helpers.
//!
//! stylekit logs through `tracing`. Libraries only emit events; installing a
//! subscriber is the host's job. With the `tracing-json` feature enabled,
//! [`init_json_logging`] installs a JSON subscriber filtered by `RUST_LOG`.

pub use tracing::{debug, debug_span, error, info, trace, trace_span, warn};

/// Install a global JSON subscriber honoring `RUST_LOG`.
///
/// Returns `false` when a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .try_init()
        .is_ok()
}

#[cfg(all(test, feature = "tracing-json"))]
mod tests {
    use super::*;

    #[test]
    fn second_install_reports_existing_subscriber() {
        let _ = init_json_logging();
        assert!(!init_json_logging());
    }
}
