#![deny(missing_docs)]
//! Shared logging utilities for the streamcheck workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase,
//! logger initialization for the server and tests, and URL redaction for log
//! lines.

use std::borrow::Cow;
use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use url::Url;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Where and how verbosely the process logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Maximum level written by every logger.
    pub level: LevelFilter,
    /// Optional file that receives a copy of the terminal output.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            file: None,
        }
    }
}

/// Installs the global logger: terminal always, plus a file when configured.
///
/// A file that cannot be created is reported on stderr and skipped. Calling
/// this twice keeps the first logger.
pub fn initialize(settings: &LogSettings) {
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        settings.level,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = &settings.file {
        match File::create(path) {
            Ok(file) => loggers.push(WriteLogger::new(settings.level, config, file)),
            Err(err) => eprintln!("Warning: Could not create log file at {:?}: {}", path, err),
        }
    }

    let _ = CombinedLogger::init(loggers);
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

/// Returns `raw` without user info, query string or fragment.
///
/// Stream URLs routinely carry account credentials or session tokens; log
/// lines only ever see the redacted form. Unparseable input is returned up to
/// its first `?`.
pub fn redact_url(raw: &str) -> Cow<'_, str> {
    let Ok(mut url) = Url::parse(raw) else {
        return match raw.split_once('?') {
            Some((head, _)) => Cow::Owned(format!("{head}?…")),
            None => Cow::Borrowed(raw),
        };
    };

    let had_secrets = !url.username().is_empty()
        || url.password().is_some()
        || url.query().is_some()
        || url.fragment().is_some();
    if !had_secrets {
        return Cow::Borrowed(raw);
    }

    let query_dropped = url.query().is_some();
    let _ = url.set_username("");
    let _ = url.set_password(None);
    url.set_query(None);
    url.set_fragment(None);

    let mut redacted = String::from(url);
    if query_dropped {
        redacted.push_str("?…");
    }
    Cow::Owned(redacted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_urls_are_borrowed_unchanged() {
        let raw = "http://cdn.test/live/index.m3u8";
        assert!(matches!(redact_url(raw), Cow::Borrowed(s) if s == raw));
    }

    #[test]
    fn credentials_and_tokens_are_stripped() {
        assert_eq!(
            redact_url("http://user:pw@cdn.test/live.ts?token=abc#t=1"),
            "http://cdn.test/live.ts?…"
        );
        assert_eq!(
            redact_url("http://user:pw@cdn.test/live.ts"),
            "http://cdn.test/live.ts"
        );
    }

    #[test]
    fn unparseable_input_loses_its_query() {
        assert_eq!(redact_url("not a url?secret=1"), "not a url?…");
        assert_eq!(redact_url("not a url"), "not a url");
    }
}
