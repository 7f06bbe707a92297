use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::EnvFilter;

/// Local wall-clock timestamps, `2024-05-01 18:03:12,417`.
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S,%3f"))
    }
}

/// Sends tracing output to `path`, appending to whatever is already there.
///
/// Only `info` and above is recorded. Fails if a global subscriber is already set.
pub fn init(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("info"))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_timer(LocalTime)
        .try_init()
        .map_err(io::Error::other)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn second_install_is_reported() {
        let tmp = TempDir::new().unwrap();

        init(&tmp.path().join("first.log")).unwrap();
        let err = init(&tmp.path().join("second.log")).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::Other);
        // the file is still opened before the install fails
        assert!(tmp.path().join("second.log").exists());
    }
}
