//! Logging setup.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global `tracing` subscriber.
///
/// The level comes from `RUST_LOG` and defaults to `warn`, since anything
/// printed to the terminal lands on top of the grid. Pass a file to keep a
/// full log out of the way instead:
///
/// ```bash
/// RUST_LOG=debug beatgrid --log-file beatgrid.log
/// ```
pub fn init(log_file: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(false)
        .compact();

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}
