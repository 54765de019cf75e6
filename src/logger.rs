//! Logging setup for cxbundle
//!
//! Plain `env_logger` output by default; a JSON-lines logger when the level
//! string carries a `json` prefix (e.g. `json:debug`).

use chrono::{Local, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record};
use serde_json::json;
use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Mutex;

/// Environment variable holding the log level (`debug`, `json:trace`, ...)
pub const LOG_LEVEL_ENV: &str = "CXBUNDLE_LOG_LEVEL";

/// Environment variable naming a file that JSON log lines are appended to
pub const LOG_PATH_ENV: &str = "CXBUNDLE_LOG_PATH";

/// JSON logger implementation
#[derive(Debug)]
pub struct JsonLogger {
    level: Level,
    target_file: Mutex<Option<std::fs::File>>,
}

/// Split a level string into (json mode, bare level)
fn parse_level_spec(level_str: &str) -> (bool, &str) {
    if let Some(stripped) = level_str.strip_prefix("json:") {
        (true, stripped)
    } else if level_str == "json" {
        (true, "info")
    } else {
        (false, level_str)
    }
}

fn parse_level_filter(level: &str) -> LevelFilter {
    match level {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

impl JsonLogger {
    /// Create a new JSON logger
    pub fn new(level: Level, log_path: Option<String>) -> Self {
        let target_file = log_path
            .and_then(|path| OpenOptions::new().create(true).append(true).open(path).ok());

        JsonLogger {
            level,
            target_file: Mutex::new(target_file),
        }
    }

    /// Initialize logging with the given level string; returns the bare level used
    pub fn init_with_level(level_str: &str) -> String {
        let (use_json, actual_level) = parse_level_spec(level_str);
        let filter = parse_level_filter(actual_level);

        if !use_json {
            let _ = env_logger::Builder::new()
                .filter_level(filter)
                .format(|buf, record| {
                    writeln!(
                        buf,
                        "[{} {} {}] {}",
                        Local::now().format("%Y-%m-%dT%H:%M:%S"),
                        record.level(),
                        record.target(),
                        record.args()
                    )
                })
                .try_init();
            return actual_level.to_string();
        }

        let level = filter.to_level().unwrap_or(Level::Info);
        let logger = Box::new(JsonLogger::new(level, env::var(LOG_PATH_ENV).ok()));

        if let Err(e) = log::set_boxed_logger(logger) {
            eprintln!("Failed to initialize JSON logger: {e}");
            return actual_level.to_string();
        }

        log::set_max_level(filter);
        actual_level.to_string()
    }

    /// Initialize logging from `CXBUNDLE_LOG_LEVEL`, defaulting to `warn`
    pub fn init() -> String {
        let log_level = env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "warn".to_string());
        Self::init_with_level(&log_level)
    }
}

impl Log for JsonLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let log_entry = json!({
            "@timestamp": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
            "@level": record.level().to_string().to_lowercase(),
            "@message": record.args().to_string(),
            "@module": record.target(),
            "@pid": std::process::id(),
        });

        let json_string = format!(
            "{}\n",
            serde_json::to_string(&log_entry).unwrap_or_default()
        );

        match self.target_file.lock() {
            Ok(mut guard) => match guard.as_mut() {
                Some(file) => {
                    let _ = file.write_all(json_string.as_bytes());
                    let _ = file.flush();
                }
                None => {
                    let _ = io::stderr().write_all(json_string.as_bytes());
                }
            },
            Err(_) => {
                let _ = io::stderr().write_all(json_string.as_bytes());
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.target_file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = file.flush();
            }
        }
        let _ = io::stderr().flush();
    }
}
