//! Diagnostic logging setup.
//!
//! The terminal is owned by the game screen, so log records never go to stdout or stderr. They are
//! written to the file given with `--log-file`, filtered by `RUST_LOG` (default `info`).

use std::{fs::File, path::Path, sync::Mutex};

use color_eyre::eyre::{Result, WrapErr as _};
use tracing_subscriber::EnvFilter;

/// Default filter directive when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "info";

/// Installs the global log subscriber writing to `log_file`.
///
/// Does nothing when no file is given.
///
/// # Errors
///
/// Returns an error if the log file cannot be created or a global subscriber is already set.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file `{}`", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| color_eyre::eyre::eyre!(err))?;

    tracing::info!(path = %path.display(), "logging initialised");

    Ok(())
}

/// Builds the record filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_err| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_without_file_is_a_no_op() {
        assert!(init(None).is_ok());
    }

    #[test]
    fn test_init_reports_unwritable_path() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("no_such_directory")
            .join("maze.log");

        assert!(init(Some(&path)).is_err());
    }
}
