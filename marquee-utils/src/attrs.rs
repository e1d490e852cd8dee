// Data-attribute parsing
//
// Page authors tag elements with free-form attribute strings; a typo must
// never take the engine down. Every parser here falls back to a caller
// supplied default instead of returning an error.

use std::time::Duration;

/// Parse an integer attribute, falling back to `default` when the attribute
/// is absent or malformed.
pub fn parse_int(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

/// Parse a non-negative index attribute used for stagger ordering.
///
/// Negative or malformed values fall back to `default` so a bad index
/// degrades to the element's natural position rather than panicking.
pub fn parse_index(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

/// Parse a millisecond duration attribute. Zero and malformed values fall
/// back to `default`.
pub fn parse_duration_ms(raw: Option<&str>, default: Duration) -> Duration {
    match raw.and_then(|s| s.trim().parse::<u64>().ok()) {
        Some(ms) if ms > 0 => Duration::from_millis(ms),
        _ => default,
    }
}

/// Parse a percentage attribute, clamped to 0..=100.
pub fn parse_percent(raw: Option<&str>, default: f32) -> f32 {
    raw.and_then(|s| s.trim().parse::<f32>().ok())
        .map(|p| p.clamp(0.0, 100.0))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_fallbacks() {
        assert_eq!(parse_int(Some("1500"), 0), 1500);
        assert_eq!(parse_int(Some(" 42 "), 0), 42);
        assert_eq!(parse_int(Some("not a number"), 7), 7);
        assert_eq!(parse_int(Some(""), 7), 7);
        assert_eq!(parse_int(None, 7), 7);
    }

    #[test]
    fn test_parse_index_rejects_negative() {
        assert_eq!(parse_index(Some("3"), 0), 3);
        assert_eq!(parse_index(Some("-1"), 5), 5);
        assert_eq!(parse_index(None, 5), 5);
    }

    #[test]
    fn test_parse_duration_ms() {
        let default = Duration::from_millis(2000);
        assert_eq!(
            parse_duration_ms(Some("500"), default),
            Duration::from_millis(500)
        );
        assert_eq!(parse_duration_ms(Some("0"), default), default);
        assert_eq!(parse_duration_ms(Some("fast"), default), default);
        assert_eq!(parse_duration_ms(None, default), default);
    }

    #[test]
    fn test_parse_percent_clamps() {
        assert_eq!(parse_percent(Some("75"), 0.0), 75.0);
        assert_eq!(parse_percent(Some("150"), 0.0), 100.0);
        assert_eq!(parse_percent(Some("-20"), 0.0), 0.0);
        assert_eq!(parse_percent(Some("oops"), 0.0), 0.0);
    }
}
