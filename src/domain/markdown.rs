//! MarkdownV2 Formatting
//!
//! Number rendering and escaping for Telegram's MarkdownV2 dialect.
//!
//! Escaping is not idempotent: running `escape_markdown` over text that was
//! already escaped doubles the backslashes. Every value must go through
//! exactly one escape pass before it is placed in a message.

/// Thousands separator used by `format_grouped`
pub const GROUP_SEPARATOR: char = ' ';

/// Characters that must be backslash-escaped in MarkdownV2 text
pub const RESERVED_CHARS: &[char] = &[
    '\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.',
    '!', '$',
];

/// Escape every reserved character with a backslash
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() * 2);
    for ch in text.chars() {
        if RESERVED_CHARS.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Render a number with space-grouped thousands and two decimals.
///
/// `8084496.13` renders as `8 084 496.13`. Non-finite values are rendered
/// as-is.
pub fn format_grouped(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }

    let fixed = format!("{:.2}", n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if n < 0.0 {
        out.push('-');
    }
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out.push('.');
    out.push_str(frac_part);
    out
}

/// `format_grouped` followed by a single escape pass
pub fn format_grouped_escaped(n: f64) -> String {
    escape_markdown(&format_grouped(n))
}

/// Build an inline link.
///
/// The label is escaped as text. In the URL only the parentheses are
/// replaced (percent-encoded), since they would terminate the link target.
pub fn markdown_link(label: &str, url: &str) -> String {
    let url = url.replace('(', "%28").replace(')', "%29");
    format!("[{}]({})", escape_markdown(label), url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_grouped_reference_value() {
        assert_eq!(format_grouped(8084496.13), "8 084 496.13");
    }

    #[test]
    fn test_format_grouped_small_values() {
        assert_eq!(format_grouped(0.0), "0.00");
        assert_eq!(format_grouped(7.0), "7.00");
        assert_eq!(format_grouped(999.999), "1 000.00");
        assert_eq!(format_grouped(123.4), "123.40");
    }

    #[test]
    fn test_format_grouped_boundaries() {
        assert_eq!(format_grouped(1000.0), "1 000.00");
        assert_eq!(format_grouped(100000.0), "100 000.00");
        assert_eq!(format_grouped(1234567890.5), "1 234 567 890.50");
    }

    #[test]
    fn test_format_grouped_negative() {
        assert_eq!(format_grouped(-1234.5), "-1 234.50");
    }

    #[test]
    fn test_escape_reserved_characters() {
        assert_eq!(escape_markdown("1.5"), "1\\.5");
        assert_eq!(escape_markdown("a_b*c"), "a\\_b\\*c");
        assert_eq!(escape_markdown("(x)"), "\\(x\\)");
        assert_eq!(escape_markdown("$5!"), "\\$5\\!");
        assert_eq!(escape_markdown("plain text 123"), "plain text 123");
    }

    #[test]
    fn test_escape_is_not_idempotent() {
        let once = escape_markdown("price 1.5");
        let twice = escape_markdown(&once);
        assert_ne!(once, twice);
        assert_eq!(twice, "price 1\\\\\\.5");
    }

    #[test]
    fn test_format_grouped_escaped_keeps_digits() {
        assert_eq!(format_grouped_escaped(8084496.13), "8 084 496\\.13");
        assert_eq!(format_grouped_escaped(-2.0), "\\-2\\.00");
    }

    #[test]
    fn test_markdown_link_escapes_label_and_url_parens() {
        let link = markdown_link("Pool (main).v2", "https://tonviewer.com/EQ(a)_b");
        assert_eq!(
            link,
            "[Pool \\(main\\)\\.v2](https://tonviewer.com/EQ%28a%29_b)"
        );
    }
}
