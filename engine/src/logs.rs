//! Progress logging with optional live subscribers.
//!
//! Entries are printed to stderr (stdout carries the command output) and
//! broadcast to any subscriber, e.g. a UI layer showing progress.

use once_cell::sync::{Lazy, OnceCell};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::config::LogFormat;

/// Severity of a progress message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    fn marker(self) -> &'static str {
        match self {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        }
    }
}

/// One progress message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Nesting depth, e.g. 1 for the steps of a plan
    #[serde(default)]
    pub indent: u8,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            indent: 0,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }

    pub fn with_indent(self, indent: u8) -> Self {
        Self { indent, ..self }
    }

    /// Render as a text line.
    pub fn to_line(&self) -> String {
        format!(
            "{}{} {}",
            "   ".repeat(usize::from(self.indent)),
            self.level.marker(),
            self.message
        )
    }
}

/// How entries are echoed to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions {
    pub format: LogFormat,
    pub quiet: bool,
}

static LOG_OPTIONS: OnceCell<LogOptions> = OnceCell::new();

/// Set the echo options once, at startup. Later calls are ignored.
pub fn init(options: LogOptions) {
    let _ = LOG_OPTIONS.set(options);
}

/// Global log broadcaster
pub static LOG_BROADCASTER: Lazy<LogBroadcaster> = Lazy::new(LogBroadcaster::new);

/// Broadcasts log entries to all subscribers
pub struct LogBroadcaster {
    sender: broadcast::Sender<LogEntry>,
}

const CHANNEL_CAPACITY: usize = 100;

impl LogBroadcaster {
    pub fn new() -> Self {
        Self {
            sender: broadcast::channel(CHANNEL_CAPACITY).0,
        }
    }

    /// Echo an entry to stderr, then hand it to subscribers.
    pub fn log(&self, entry: LogEntry) {
        echo(&entry, LOG_OPTIONS.get().copied().unwrap_or_default());
        // Err only means nobody is listening
        let _ = self.sender.send(entry);
    }

    /// Get a receiver for live entries
    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.sender.subscribe()
    }
}

fn echo(entry: &LogEntry, options: LogOptions) {
    if options.quiet {
        return;
    }
    match options.format {
        LogFormat::Text => eprintln!("{}", entry.to_line()),
        LogFormat::Json => match serde_json::to_string(entry) {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprintln!("{}", entry.to_line()),
        },
    }
}

impl Default for LogBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

pub fn log_info(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::warning(msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::error(msg));
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    LOG_BROADCASTER.log(LogEntry::info(msg).with_indent(indent));
}
