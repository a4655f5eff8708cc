/// Render a countdown as `HH:MM:SS` from one hour up, `MM:SS` below.
pub fn format_remaining(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// `(total - remaining) / total`, 0.0 for an empty total.
pub fn progress_ratio(total_secs: u64, remaining_secs: u64) -> f64 {
    if total_secs == 0 {
        return 0.0;
    }
    total_secs.saturating_sub(remaining_secs) as f64 / total_secs as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_under_an_hour() {
        assert_eq!(format_remaining(0), "00:00");
        assert_eq!(format_remaining(59), "00:59");
        assert_eq!(format_remaining(25 * 60), "25:00");
        assert_eq!(format_remaining(3599), "59:59");
    }

    #[test]
    fn formats_hours() {
        assert_eq!(format_remaining(3600), "01:00:00");
        assert_eq!(format_remaining(14400), "04:00:00");
        assert_eq!(format_remaining(3 * 3600 + 5 * 60 + 9), "03:05:09");
    }

    #[test]
    fn progress_ratio_bounds() {
        assert_eq!(progress_ratio(0, 0), 0.0);
        assert_eq!(progress_ratio(300, 300), 0.0);
        assert_eq!(progress_ratio(300, 0), 1.0);
        assert_eq!(progress_ratio(300, 150), 0.5);
        assert_eq!(progress_ratio(300, 900), 0.0);
    }
}
