use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize logging to stderr.
///
/// `log_level` overrides the filter; otherwise `RUST_LOG` is honored and the
/// default is "info". Stdout is left untouched so machine-readable command
/// output stays clean.
pub fn init_logging(no_color: bool, log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(!no_color)
                .with_target(false),
        )
        .with(filter)
        .init();
}
