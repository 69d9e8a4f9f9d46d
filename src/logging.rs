//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "MONTECARLO_PI_LOG";
const DEFAULT_FILTER: &str = "montecarlo_pi=warn";

static INIT: Once = Once::new();

/// Install a stderr subscriber filtered by `MONTECARLO_PI_LOG`,
/// e.g. `MONTECARLO_PI_LOG=montecarlo_pi=debug`.
///
/// Falls back to `montecarlo_pi=warn` when the variable is unset or invalid.
/// Calling it again is a no-op, as is calling it after another global
/// subscriber was installed.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .try_init();
    });
}
