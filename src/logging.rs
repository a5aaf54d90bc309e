//! Log to a file.  The terminal shows the editor, so log output can't
//! go there.

use std::fs::File;
use std::io::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Build a subscriber writing to `log_file`, filtered by `RUST_LOG`
/// (default `info`)
pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_ansi(false).with_writer(Arc::new(log_file));
    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}

/// Create (or truncate) the log file and make it the global log
/// destination
pub fn init(path: &Path) -> Result<()> {
    let log_file = File::create(path)?;
    // Fails only if a subscriber is already installed, which is fine
    let _ = build_subscriber(log_file).try_init();
    Ok(())
}
