//! File logging and diagnostic reporting.
//!
//! The TUI owns the terminal, so logs never go to stdout: everything is
//! written as JSON lines to a daily rolling file in `<data_dir>/logs`.
//! `log` macros used throughout the crate are bridged into `tracing` by the
//! subscriber. Rotated files from earlier days are gzip-compressed in the
//! background.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "migration-showcase.log";

/// Initialize logging for TUI mode.
///
/// Returns a `WorkerGuard` which must be kept alive for the duration of the
/// application so buffered logs are flushed on shutdown.
pub fn init(data_dir: &Path) -> WorkerGuard {
    let log_dir = data_dir.join("logs");

    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter);

    // No stdout layer, the TUI owns the terminal
    if let Err(e) = tracing_subscriber::registry().with(file_layer).try_init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    init_miette();

    let log_dir_clone = log_dir.clone();
    std::thread::spawn(move || {
        compress_old_logs(&log_dir_clone);
    });

    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_PREFIX)
    );

    guard
}

/// Whether `name` is a rotated log from a day other than `today` (YYYY-MM-DD).
fn is_stale_log(name: &str, today: &str) -> bool {
    name.strip_prefix(LOG_FILE_PREFIX)
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|suffix| suffix != today && !suffix.ends_with(".gz"))
}

/// Compress old log files in the background.
fn compress_old_logs(log_dir: &Path) {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !is_stale_log(name, &today) {
            continue;
        }
        match compress_file(&path) {
            Ok(()) => log::info!("Compressed old log: {:?}", path),
            Err(e) => log::warn!("Failed to compress old log {:?}: {}", path, e),
        }
    }
}

fn compress_file(path: &Path) -> io::Result<()> {
    let file = fs::File::open(path)?;
    let mut reader = io::BufReader::new(file);

    let mut gz_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?
        .to_os_string();
    gz_name.push(".gz");
    let gz_path: PathBuf = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?
        .join(gz_name);

    // Skip if already exists
    if gz_path.exists() {
        return Ok(());
    }

    let output = fs::File::create(&gz_path)?;
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)?;
    Ok(())
}

/// Install the fancy miette handler used for start-up errors.
fn init_miette() {
    let result = miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .build(),
        )
    }));
    if result.is_err() {
        log::debug!("miette hook already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_stale_log_detection() {
        let today = "2026-10-18";
        assert!(is_stale_log("migration-showcase.log.2026-10-17", today));
        assert!(!is_stale_log("migration-showcase.log.2026-10-18", today));
        assert!(!is_stale_log("migration-showcase.log.2026-10-17.gz", today));
        assert!(!is_stale_log("migration-showcase.log", today));
        assert!(!is_stale_log("other.log.2026-10-17", today));
    }

    #[test]
    fn test_compress_file_replaces_original() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("migration-showcase.log.2026-01-01");
        fs::write(&path, "{\"msg\":\"hello\"}\n").unwrap();

        compress_file(&path).unwrap();

        assert!(!path.exists());
        let gz = dir.path().join("migration-showcase.log.2026-01-01.gz");
        let mut decoded = String::new();
        flate2::read::GzDecoder::new(fs::File::open(gz).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, "{\"msg\":\"hello\"}\n");
    }

    #[test]
    fn test_compress_old_logs_keeps_today() {
        let dir = tempfile::tempdir().unwrap();
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        let current = dir.path().join(format!("{LOG_FILE_PREFIX}.{today}"));
        let old = dir.path().join(format!("{LOG_FILE_PREFIX}.2000-01-01"));
        fs::write(&current, "now").unwrap();
        fs::write(&old, "then").unwrap();

        compress_old_logs(dir.path());

        assert!(current.exists());
        assert!(!old.exists());
        assert!(dir
            .path()
            .join(format!("{LOG_FILE_PREFIX}.2000-01-01.gz"))
            .exists());
    }
}
