//! Time parsing and formatting utilities

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3600.0;
const MILLIS_PER_MINUTE: u64 = 60_000;
const MILLIS_PER_HOUR: u64 = 3_600_000;
const BYTES_PER_KB: u64 = 1024;
const BYTES_PER_MB: u64 = 1024 * 1024;
const BYTES_PER_GB: u64 = 1024 * 1024 * 1024;

/// Format seconds as `HH:MM:SS.mmm`
pub fn format_timestamp(seconds: f64) -> String {
    // Round first so a carry reaches the minutes and hours
    let millis = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = millis / MILLIS_PER_HOUR;
    let minutes = (millis % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;
    let secs = (millis % MILLIS_PER_MINUTE) / 1000;
    let frac = millis % 1000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, frac)
}

/// Format a duration for humans: `12.34s`, `2m 5.0s` or `1h 2m 3s`
pub fn format_duration(seconds: f64) -> String {
    if seconds < SECONDS_PER_MINUTE {
        format!("{:.2}s", seconds)
    } else if seconds < SECONDS_PER_HOUR {
        let minutes = (seconds / SECONDS_PER_MINUTE) as u64;
        let secs = seconds % SECONDS_PER_MINUTE;
        format!("{}m {:.1}s", minutes, secs)
    } else {
        let hours = (seconds / SECONDS_PER_HOUR) as u64;
        let minutes = ((seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE) as u64;
        let secs = (seconds % SECONDS_PER_MINUTE) as u64;
        format!("{}h {}m {}s", hours, minutes, secs)
    }
}

/// Format file size for display
pub fn format_filesize(bytes: u64) -> String {
    if bytes < BYTES_PER_KB {
        format!("{} B", bytes)
    } else if bytes < BYTES_PER_MB {
        format!("{:.1} KB", bytes as f64 / BYTES_PER_KB as f64)
    } else if bytes < BYTES_PER_GB {
        format!("{:.1} MB", bytes as f64 / BYTES_PER_MB as f64)
    } else {
        format!("{:.1} GB", bytes as f64 / BYTES_PER_GB as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00:00.000");
        assert_eq!(format_timestamp(45.2), "00:00:45.200");
        assert_eq!(format_timestamp(3723.456), "01:02:03.456");
        assert_eq!(format_timestamp(-3.0), "00:00:00.000");
    }

    #[test]
    fn test_format_timestamp_carries_rounding() {
        assert_eq!(format_timestamp(59.9996), "00:01:00.000");
        assert_eq!(format_timestamp(3599.9999), "01:00:00.000");
        assert_eq!(format_timestamp(59.9994), "00:00:59.999");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(12.346), "12.35s");
        assert_eq!(format_duration(125.0), "2m 5.0s");
        assert_eq!(format_duration(3723.0), "1h 2m 3s");
    }

    #[test]
    fn test_format_filesize() {
        assert_eq!(format_filesize(512), "512 B");
        assert_eq!(format_filesize(1536), "1.5 KB");
        assert_eq!(format_filesize(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_filesize(3 * 1024 * 1024 * 1024), "3.0 GB");
    }
}
