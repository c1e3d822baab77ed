//! Log setup. The terminal belongs to the clock, so events go to a file.

use std::{
    fs::{self, OpenOptions},
    io,
    path::Path,
    sync::Mutex,
};

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `tmr=debug`.
pub const LOG_ENV: &str = "TMR_LOG";
const DEFAULT_FILTER: &str = "tmr=info";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Append log events to `path`, creating its directory as needed.
///
/// A second call (or any other global subscriber) leaves the first in place.
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_creates_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state").join("tmr.log");
        init(&path).unwrap();
        assert!(path.exists());
    }
}
