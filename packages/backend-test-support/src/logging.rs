use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: OnceCell<()> = OnceCell::new();

/// Initialize test logging once per process.
///
/// Controlled by `RUST_LOG`; defaults to warn so test output stays readable.
pub fn init() {
    INIT.get_or_init(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,sqlx=warn"));

        let fmt_layer = fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(false)
            .compact();

        // Another harness may already have installed a subscriber; that's fine.
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();
    });
}
