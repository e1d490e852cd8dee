// Marquee status messages
//
// User-visible feedback envelopes for form submissions and other page-level
// alerts (subscription confirmed, network failure, validation warnings).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual message style determining color and icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageStyle {
    /// Error message (red, ✗ icon)
    Error,
    /// Success message (green, ✓ icon)
    Success,
    /// Warning message (yellow, ⚠ icon)
    Warning,
}

impl MessageStyle {
    /// Get the marker class external stylesheets key off
    pub fn css_class(&self) -> &'static str {
        match self {
            MessageStyle::Error => "alert-error",
            MessageStyle::Success => "alert-success",
            MessageStyle::Warning => "alert-warning",
        }
    }

    /// Get icon character for this style
    pub fn icon(&self) -> &'static str {
        match self {
            MessageStyle::Error => "✗",
            MessageStyle::Success => "✓",
            MessageStyle::Warning => "⚠",
        }
    }

    /// Parse from a string attribute
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(MessageStyle::Error),
            "success" => Some(MessageStyle::Success),
            "warning" => Some(MessageStyle::Warning),
            _ => None,
        }
    }
}

impl fmt::Display for MessageStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageStyle::Error => write!(f, "error"),
            MessageStyle::Success => write!(f, "success"),
            MessageStyle::Warning => write!(f, "warning"),
        }
    }
}

/// A styled message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub style: MessageStyle,
    pub text: String,
}

impl StatusMessage {
    pub fn new(style: MessageStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    /// Create an error message
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(MessageStyle::Error, text)
    }

    /// Create a success message
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(MessageStyle::Success, text)
    }

    /// Create a warning message
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(MessageStyle::Warning, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_style_from_str() {
        assert_eq!(MessageStyle::from_str("error"), Some(MessageStyle::Error));
        assert_eq!(MessageStyle::from_str("ERROR"), Some(MessageStyle::Error));
        assert_eq!(
            MessageStyle::from_str("success"),
            Some(MessageStyle::Success)
        );
        assert_eq!(
            MessageStyle::from_str("warning"),
            Some(MessageStyle::Warning)
        );
        assert_eq!(MessageStyle::from_str("invalid"), None);
    }

    #[test]
    fn test_message_creation() {
        let msg = StatusMessage::error("Subscription failed");
        assert_eq!(msg.style, MessageStyle::Error);
        assert_eq!(msg.text, "Subscription failed");
    }

    #[test]
    fn test_message_style_display() {
        assert_eq!(MessageStyle::Error.to_string(), "error");
        assert_eq!(MessageStyle::Success.to_string(), "success");
        assert_eq!(MessageStyle::Warning.to_string(), "warning");
    }

    #[test]
    fn test_css_classes() {
        assert_eq!(MessageStyle::Success.css_class(), "alert-success");
        assert_eq!(MessageStyle::Error.css_class(), "alert-error");
    }
}
