//! Logging system initialization
//!
//! Sets up the tracing subscriber from configuration: console or file
//! output, optional daily rotation, text or JSON formatting. Call once at
//! startup, after configuration is loaded, and keep the returned guard alive
//! for the life of the process.

use std::io::Write;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

use crate::config::LoggingConfig;

fn rotating_writer(log_file: &str, max_backups: u32) -> Box<dyn Write + Send + Sync> {
    let path = Path::new(log_file);
    let dir = path.parent().unwrap_or(Path::new("."));
    let prefix = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("imsakia.log")
        .trim_end_matches(".log");

    let appender = rolling::Builder::new()
        .rotation(rolling::Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .max_log_files(max_backups as usize)
        .build(dir)
        .expect("Failed to create rolling log appender");
    Box::new(appender)
}

fn plain_file_writer(log_file: &str) -> Box<dyn Write + Send + Sync> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .expect("Failed to open log file");
    Box::new(file)
}

pub fn init_logging(config: &LoggingConfig) -> WorkerGuard {
    let log_file = config.file.as_deref().filter(|f| !f.is_empty());

    let writer: Box<dyn Write + Send + Sync> = match log_file {
        Some(f) if config.enable_rotation => rotating_writer(f, config.max_backups),
        Some(f) => plain_file_writer(f),
        None => Box::new(std::io::stdout()),
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);

    let subscriber = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(tracing_subscriber::EnvFilter::new(config.level.clone()))
        .with_level(true)
        // ANSI colors only make sense on a terminal, not in a log file.
        .with_ansi(log_file.is_none());

    if config.format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    guard
}
