//! Human-readable byte counts.

const UNITS: [&str; 5] = ["KB", "MB", "GB", "TB", "PB"];

/// Format a byte count with binary (1024) steps.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Format a raw upstream size string. Non-numeric input is returned as-is.
#[must_use]
pub fn format_raw_size(raw: &str) -> String {
    match raw.trim().parse::<u64>() {
        Ok(bytes) => format_size(bytes),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(52_428_800), "50.0 MB");
        assert_eq!(format_size(1024 * 1024 * 1024), "1.0 GB");
        assert_eq!(format_size(3 * 1024_u64.pow(4)), "3.0 TB");
    }

    #[test]
    fn test_format_raw_size() {
        assert_eq!(format_raw_size("38014223"), "36.3 MB");
        assert_eq!(format_raw_size(""), "");
        assert_eq!(format_raw_size("about 3MB"), "about 3MB");
    }
}
