//! Utility functions and helpers

/// Group the digits of an integer string with `separator` every three places.
///
/// A leading sign is kept in front of the grouped digits. An empty separator
/// returns the input unchanged.
pub fn format_number(digits: &str, separator: &str) -> String {
    if separator.is_empty() {
        return digits.to_string();
    }
    let (sign, body) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut result = String::new();
    let mut count = 0;
    for c in body.chars().rev() {
        if count == 3 {
            result.push_str(&separator.chars().rev().collect::<String>());
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    result.push_str(sign);
    result.chars().rev().collect()
}

/// True when the value has no non-whitespace characters
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Split a delimited list into trimmed, non-empty entries
pub fn split_list(value: &str, delimiter: char) -> Vec<&str> {
    value
        .split(delimiter)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number("1234567", ","), "1,234,567");
        assert_eq!(format_number("123", ","), "123");
        assert_eq!(format_number("-1000", ","), "-1,000");
        assert_eq!(format_number("1000", ""), "1000");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("  \t"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("a@x.com, b@x.com,,", ','), vec!["a@x.com", "b@x.com"]);
        assert!(split_list("   ", ',').is_empty());
    }
}
