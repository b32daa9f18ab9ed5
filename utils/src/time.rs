//! Time formatting helpers.

/// Format a duration in milliseconds to a human-readable string.
pub fn format_duration(millis: u64) -> String {
    let secs = millis / 1_000;
    if secs < 60 {
        if millis < 1_000 {
            format!("{}ms", millis)
        } else {
            format!("{}s", secs)
        }
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_scale() {
        assert_eq!(format_duration(250), "250ms");
        assert_eq!(format_duration(5_000), "5s");
        assert_eq!(format_duration(125_000), "2m 5s");
        assert_eq!(format_duration(2 * 3_600_000 + 60_000), "2h 1m");
        assert_eq!(format_duration(7 * 86_400_000), "7d 0h");
    }
}
