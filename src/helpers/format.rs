pub fn format_number(value: u64) -> String {
    let raw = value.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (index, ch) in raw.chars().rev().enumerate() {
        if index > 0 && index % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

pub fn format_bytes(value: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if value == 0 {
        return "0 B".to_string();
    }

    let mut size = value as f64;
    let mut unit = 0usize;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    let formatted = if unit == 0 {
        format_number(value)
    } else if size < 10.0 {
        format!("{size:.1}")
    } else {
        format!("{size:.0}")
    };

    format!("{formatted} {}", UNITS[unit])
}

/// Render an uptime in milliseconds as `12d 3h 45m`.
pub fn format_uptime(millis: u64) -> String {
    let total_minutes = millis / 1000 / 60;
    let days = total_minutes / (24 * 60);
    let hours = total_minutes % (24 * 60) / 60;
    let minutes = total_minutes % 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_groups_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_bytes_units() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_bytes(50 * 1024 * 1024), "50 MB");
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(59_000), "0m");
        assert_eq!(format_uptime(3 * 60 * 60 * 1000 + 5 * 60 * 1000), "3h 5m");
        assert_eq!(format_uptime(2 * 24 * 60 * 60 * 1000), "2d 0h 0m");
    }
}
