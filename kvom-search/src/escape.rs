//! Escaping for values embedded in query strings.

/// Characters the store's query parser treats as syntax.
const SPECIAL: &[char] = &[
    ',', '.', '<', '>', '{', '}', '[', ']', '"', '\'', ':', ';', '!', '@', '#', '$', '%', '^',
    '&', '*', '(', ')', '-', '+', '=', '~', '|', '/', '?', '\\', ' ',
];

/// Backslash-escapes query syntax in a tag or text value.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
