const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human readable size, two decimals, trailing zeros trimmed (`1.5 MB`)
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rendered = format!("{:.2}", value);
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", rendered, UNITS[unit])
}

/// Size limit expressed in megabytes for error messages (`2`, `0.5`).
/// Values under 0.01 keep two significant digits instead of rounding to zero.
pub fn megabytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0".to_string();
    }

    let mb = bytes as f64 / 1024.0 / 1024.0;
    let decimals = if mb >= 0.01 {
        2
    } else {
        (-mb.log10()).ceil() as usize + 1
    };
    let rendered = format!("{:.*}", decimals, mb);
    rendered.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(2 * 1024 * 1024), "2 MB");
    }

    #[test]
    fn test_megabytes() {
        assert_eq!(megabytes(2 * 1024 * 1024), "2");
        assert_eq!(megabytes(100 * 1024 * 1024), "100");
        assert_eq!(megabytes(512 * 1024), "0.5");
    }

    #[test]
    fn test_megabytes_small_limits_not_zero() {
        assert_eq!(megabytes(0), "0");
        assert_eq!(megabytes(1024), "0.00098");
        assert_eq!(megabytes(4 * 1024), "0.0039");
        assert_ne!(megabytes(1), "0");
    }
}
