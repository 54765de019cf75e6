//! Utility functions for cxbundle

use std::env;

/// Check if an environment variable is set to a truthy value
/// Accepts: "1", "true", "on", "yes", "t" (case insensitive)
pub fn is_env_true(key: &str) -> bool {
    match env::var(key) {
        Ok(val) => {
            let val_lower = val.to_lowercase();
            matches!(val_lower.as_str(), "1" | "true" | "on" | "yes" | "t")
        }
        Err(_) => false,
    }
}

/// Human-readable byte count with one decimal, 1024 based (`"1.5 KB"`)
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{value:.1} {}", UNITS[unit])
}
