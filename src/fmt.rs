//! Shared formatting utilities for size display and console output

use console::Emoji;

/// Rocket emoji for launch/start operations
pub const ROCKET: Emoji = Emoji("🚀", ">");

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Crossmark emoji for failure
pub const CROSSMARK: Emoji = Emoji("❌", "[FAIL]");

/// Sparkles emoji for completion/success
pub const SPARKLES: Emoji = Emoji("✨", "*");

/// Info emoji for informational messages
pub const INFO: Emoji = Emoji("ℹ️", "i");

/// Chart emoji for metrics/statistics
pub const CHART: Emoji = Emoji("📊", "~");

/// Microscope emoji for analysis/inspection
pub const MICROSCOPE: Emoji = Emoji("🔍", ">>");

/// Warning emoji for caution/alerts
pub const WARNING: Emoji = Emoji("⚠️", "!");

/// Format bytes as a human-readable file size string
///
/// Uses 1024-based units and trims trailing zeros from the fraction,
/// so `1024` renders as `1 KB` and `1536` as `1.5 KB`.
///
/// # Examples
///
/// ```
/// use jar_guardian::fmt::format_file_size;
///
/// assert_eq!(format_file_size(0), "0 Bytes");
/// assert_eq!(format_file_size(512), "512 Bytes");
/// assert_eq!(format_file_size(1024), "1 KB");
/// assert_eq!(format_file_size(1_572_864), "1.5 MB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);

    let rendered = format!("{:.2}", value);
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');

    format!("{} {}", rendered, UNITS[exponent])
}

/// Current wall-clock time as unix seconds, rendered as a string
///
/// Used for report headers and store records. Falls back to "0" if the
/// system clock is before the epoch.
pub fn unix_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}
