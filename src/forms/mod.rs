pub mod categories;
pub mod products;
pub mod tags;
pub mod variations;

/// Collapse whitespace runs into single spaces, drop control characters and trim.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitize an optional inline field, mapping blank input to `None`.
pub(crate) fn sanitize_optional_text(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_inline_text)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_inline_text_collapses_whitespace_and_controls() {
        assert_eq!(sanitize_inline_text("  Fresh \t\n Produce\u{7} "), "Fresh Produce");
    }

    #[test]
    fn sanitize_optional_text_drops_blank_values() {
        assert_eq!(sanitize_optional_text(Some("   ")), None);
        assert_eq!(sanitize_optional_text(None), None);
        assert_eq!(
            sanitize_optional_text(Some(" SKU-1 ")),
            Some("SKU-1".to_string())
        );
    }
}
