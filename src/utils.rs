use std::str::FromStr;

/// Prepend `https://` unless the input already starts with an http(s) scheme
pub fn ensure_scheme(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Parse a user answer, falling back to `default` when it is empty or invalid
pub fn parse_or_default<T: FromStr>(input: &str, default: T) -> T {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return default;
    }
    trimmed.parse().unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_scheme() {
        assert_eq!(ensure_scheme("example.com"), "https://example.com");
        assert_eq!(ensure_scheme("  example.com/a "), "https://example.com/a");
        assert_eq!(ensure_scheme("http://example.com"), "http://example.com");
        assert_eq!(ensure_scheme("https://example.com"), "https://example.com");
    }

    #[test]
    fn test_parse_or_default() {
        assert_eq!(parse_or_default("", 50usize), 50);
        assert_eq!(parse_or_default("12", 50usize), 12);
        assert_eq!(parse_or_default(" 7 ", 5u64), 7);
        assert_eq!(parse_or_default("lots", 50usize), 50);
        assert_eq!(parse_or_default("-3", 5u64), 5);
    }
}
