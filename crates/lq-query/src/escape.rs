//! Token escaping.
//!
//! Every caller-supplied token (term values and field names) passes through [`escape`]
//! before it is concatenated into a query string.

/// Characters with special meaning in Lucene query syntax.
pub const RESERVED_CHARS: &[char] = &[
    '+', '-', '&', '|', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '\\',
];

/// Returns true if `c` must be backslash-escaped inside a token.
pub fn is_reserved(c: char) -> bool {
    RESERVED_CHARS.contains(&c)
}

/// Escapes reserved characters in `token` and quotes it when needed.
///
/// Each reserved character is prefixed with a backslash. The result is wrapped in double
/// quotes when `force` is set, when it contains a space, or when anything was escaped.
///
/// ```
/// use lq_query::escape;
///
/// assert_eq!(escape("rust", false), "rust");
/// assert_eq!(escape("hello world", false), "\"hello world\"");
/// assert_eq!(escape("c++", false), "\"c\\+\\+\"");
/// assert_eq!(escape("", true), "\"\"");
/// ```
pub fn escape(token: &str, force: bool) -> String {
    let mut escaped = String::with_capacity(token.len() + 2);
    for c in token.chars() {
        if is_reserved(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    if force || escaped.contains(' ') || escaped.len() != token.len() {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}

/// Escapes `token` without forcing quotes.
pub fn escape_token(token: &str) -> String {
    escape(token, false)
}
