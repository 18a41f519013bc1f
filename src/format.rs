//! Display formatting helpers.

use chrono::{DateTime, Utc};

/// Format a unix timestamp (seconds) for display under a message bubble.
///
/// Out-of-range timestamps render as an empty string.
#[must_use]
pub fn format_sent_at(sent_at: i64) -> String {
    DateTime::<Utc>::from_timestamp(sent_at, 0)
        .map(|dt| dt.format("%b %-d, %Y, %-I:%M %p").to_string())
        .unwrap_or_default()
}

/// Class for the configured message text size.
#[must_use]
pub fn text_size_class(text_size: Option<u32>) -> String {
    match text_size {
        Some(px) if px > 0 => format!("allm-text-[{px}px]"),
        _ => "allm-text-sm".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_sent_at() {
        assert_eq!(format_sent_at(0), "Jan 1, 1970, 12:00 AM");
        assert_eq!(format_sent_at(1_700_000_000), "Nov 14, 2023, 10:13 PM");
        assert_eq!(format_sent_at(i64::MAX), "");
    }

    #[test]
    fn test_text_size_class() {
        assert_eq!(text_size_class(None), "allm-text-sm");
        assert_eq!(text_size_class(Some(0)), "allm-text-sm");
        assert_eq!(text_size_class(Some(18)), "allm-text-[18px]");
    }
}
