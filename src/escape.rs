//! Character escaping for `strings.xml` values.
//!
//! Android requires apostrophes and double quotes to be backslash-escaped and
//! `&` / `<` to be written as XML entities. Only the entities this crate
//! emits (`&lt;` and `&amp;`) are decoded again; anything else, such as
//! `&quot;`, `&gt;` or numeric character references, is left as-is.

use crate::placeholder::{to_canonical, to_platform};

/// Removes Android escaping from raw element text.
///
/// Literal newlines are dropped; Android collapses them anyway and the
/// canonical form keeps values on one line.
pub fn unescape(value: &str) -> String {
    value
        .replace("\\'", "'")
        .replace("\\\"", "\"")
        .replace('\n', "")
        .replace("&lt;", "<")
        .replace("&amp;", "&")
}

/// Applies Android escaping to canonical text.
///
/// Quotes are escaped before entities, and `&` before `<`, so that no
/// produced sequence is escaped twice.
pub fn escape(value: &str) -> String {
    value
        .replace('\'', "\\'")
        .replace('"', "\\\"")
        .replace('&', "&amp;")
        .replace('<', "&lt;")
}

/// Turns raw `strings.xml` element text into canonical text.
pub fn decode(value: &str) -> String {
    to_canonical(&unescape(value))
}

/// Turns canonical text into text ready to be placed inside a `<string>` element.
pub fn encode(value: &str) -> String {
    to_platform(&escape(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_quotes_and_entities() {
        assert_eq!(
            escape(r#"Don't say "a < b & c""#),
            r#"Don\'t say \"a &lt; b &amp; c\""#
        );
    }

    #[test]
    fn test_unescape_quotes_and_entities() {
        assert_eq!(
            unescape(r#"Don\'t say \"a &lt; b &amp; c\""#),
            r#"Don't say "a < b & c""#
        );
    }

    #[test]
    fn test_unescape_removes_newlines() {
        assert_eq!(unescape("first line\nsecond line"), "first linesecond line");
    }

    #[test]
    fn test_unescape_leaves_other_entities() {
        assert_eq!(unescape("&quot;a&gt;b&#39;"), "&quot;a&gt;b&#39;");
    }

    #[test]
    fn test_escaped_entity_is_not_decoded_twice() {
        assert_eq!(escape("&lt;"), "&amp;lt;");
        assert_eq!(unescape("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_encode_applies_placeholder_rules() {
        assert_eq!(
            encode("Hello %@, you have %d messages"),
            "Hello %1$s, you have %2$d messages"
        );
        assert_eq!(encode("It's %@"), "It\\'s %s");
    }

    #[test]
    fn test_decode_applies_placeholder_rules() {
        assert_eq!(decode("%1$s likes %2$s"), "%@ likes %@");
        assert_eq!(decode("%1$s isn\\'t &lt; %2$d"), "%@ isn't < %d");
    }
}
