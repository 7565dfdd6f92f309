//! Utilities for sanitizing error messages.
//!
//! Removes control characters from error messages before storing them on a
//! result, and truncates unbounded messages so sidecar files stay readable.

use crate::config::MAX_ERROR_MESSAGE_LENGTH;

/// Sanitizes an error message by removing control characters.
///
/// Control characters (0x00-0x1F, except newline/tab/carriage return) can
/// garble logs and sidecar files; this strips them while preserving
/// readability.
pub fn sanitize_error_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| {
            let code = *c as u32;
            code >= 0x20 // printable ASCII starts at space
                || code == 0x09 // tab
                || code == 0x0A // newline
                || code == 0x0D // carriage return
                || code > 0x7F // non-ASCII (UTF-8)
        })
        .collect()
}

/// Sanitizes and truncates an error message to a bounded length.
pub fn sanitize_and_truncate_error_message(message: &str) -> String {
    let sanitized = sanitize_error_message(message);

    if sanitized.len() > MAX_ERROR_MESSAGE_LENGTH {
        let truncate_len = MAX_ERROR_MESSAGE_LENGTH.saturating_sub(50);
        let mut truncate_len = truncate_len.min(sanitized.len());
        // back off to a char boundary so slicing cannot panic
        while !sanitized.is_char_boundary(truncate_len) {
            truncate_len -= 1;
        }
        format!(
            "{}... (truncated, original length: {} chars)",
            &sanitized[..truncate_len],
            sanitized.len()
        )
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_removes_control_chars() {
        let input = "error\x00message\x01with\x02control\x03chars";
        assert_eq!(sanitize_error_message(input), "errormessagewithcontrolchars");
    }

    #[test]
    fn test_sanitize_preserves_whitespace_and_unicode() {
        let input = "line one\nline two\ttabbed ünïcode";
        assert_eq!(sanitize_error_message(input), input);
    }

    #[test]
    fn test_truncate_long_message() {
        let input = "x".repeat(MAX_ERROR_MESSAGE_LENGTH + 500);
        let output = sanitize_and_truncate_error_message(&input);
        assert!(output.len() < input.len());
        assert!(output.contains("truncated"));
    }

    #[test]
    fn test_short_message_unchanged() {
        let input = "connection refused";
        assert_eq!(sanitize_and_truncate_error_message(input), input);
    }
}
