//! Structured logging setup
//!
//! Logs go to stderr so they never interleave with the chat on stdout.
//! `RUST_LOG` overrides the default filter.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "warn,coding_agent=debug"
    } else {
        "warn"
    }
}

/// Initialize the global tracing subscriber
///
/// # Arguments
/// * `debug` - Raise this crate's log level to `debug`
pub fn init_logging(debug: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    let crate_debug = debug;
    tracing::debug!(crate_debug, "Logging initialized");
    Ok(())
}
