//! Tracing subscriber setup shared by the bench binary and tests.

use crate::error::{IndexError, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber with the given filter directive.
pub fn init_logging(level: &str) -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_new(level)
                .map_err(|e| IndexError::InvalidArgument(format!("Invalid log level: {e}")))?,
        )
        .with_target(true)
        .try_init()
        .map_err(|_| IndexError::InvalidArgument("Logging already initialized".into()))
}
