//! Human-readable byte counts.

const UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Format a byte count in the largest base-1024 unit not above the value, with at most two
/// decimals. With `disable_bytes` the smallest unit shown is KB. Zero is shown as `0 MB`.
pub fn format_bytes(bytes: u64, disable_bytes: bool) -> String {
    if bytes == 0 {
        return "0 MB".to_string();
    }

    let mut unit = 0;
    let mut scaled = bytes;
    while scaled >= 1024 && unit < UNITS.len() - 1 {
        scaled /= 1024;
        unit += 1;
    }
    if disable_bytes && unit == 0 {
        unit = 1;
    }

    let value = bytes as f64 / 1024f64.powi(unit as i32);
    format!("{} {}", trim_decimals(&format!("{:.2}", value)), UNITS[unit])
}

fn trim_decimals(fixed: &str) -> &str {
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed
    }
}
