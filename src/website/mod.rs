pub mod entry;
pub mod files;
pub mod index_sync;
pub mod page;
pub mod parser;
pub mod planner;
pub mod splicer;

/// Escapes text for embedding in JSX attribute and element positions.
/// Backslashes first so escaped quotes are not double-escaped.
pub fn escape_jsx(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::escape_jsx;

    #[test]
    fn escapes_quotes_and_backslashes() {
        assert_eq!(escape_jsx(r#"a "b" c"#), r#"a \"b\" c"#);
        assert_eq!(escape_jsx("it's"), r"it\'s");
        assert_eq!(escape_jsx(r"back\slash"), r"back\\slash");
    }

    #[test]
    fn backslash_escaped_before_quotes() {
        assert_eq!(escape_jsx(r#"\""#), r#"\\\""#);
    }
}
