//! File-extension matching.

use regex::Regex;

/// Case-insensitive, token-exact matcher over a comma-separated extension
/// list (e.g. `"markdown,mkdn,md"`).
///
/// Tokens are matched whole: with the pattern above, `MARKDOWN` matches
/// but `md5` and `markdownx` do not. An empty pattern matches nothing.
#[derive(Debug)]
pub struct ExtensionMatcher {
    regex: Option<Regex>,
}

impl ExtensionMatcher {
    /// Compile a matcher from a comma-separated token list.
    ///
    /// Tokens are trimmed and escaped, so any input produces a usable
    /// matcher; no normalization of leading dots is applied.
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        let tokens: Vec<String> = pattern
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(regex::escape)
            .collect();
        if tokens.is_empty() {
            return Self { regex: None };
        }
        // Escaped tokens always form a valid pattern.
        let regex = Regex::new(&format!("(?i)^(?:{})$", tokens.join("|"))).ok();
        Self { regex }
    }

    /// Test whether `ext` is one of the configured tokens.
    #[must_use]
    pub fn matches(&self, ext: &str) -> bool {
        self.regex.as_ref().is_some_and(|regex| regex.is_match(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_case_insensitive() {
        let matcher = ExtensionMatcher::new("markdown,mkdn");
        assert!(matcher.matches("markdown"));
        assert!(matcher.matches("MARKDOWN"));
        assert!(matcher.matches("MkDn"));
    }

    #[test]
    fn test_matches_token_exact() {
        let matcher = ExtensionMatcher::new("markdown,mkdn");
        assert!(!matcher.matches("md"));
        assert!(!matcher.matches("markdownx"));
        assert!(!matcher.matches("xmarkdown"));
        assert!(!matcher.matches(""));
    }

    #[test]
    fn test_single_token() {
        let matcher = ExtensionMatcher::new("md");
        assert!(matcher.matches("md"));
        assert!(!matcher.matches("mkd"));
    }

    #[test]
    fn test_empty_pattern_matches_nothing() {
        let matcher = ExtensionMatcher::new("");
        assert!(!matcher.matches("md"));
        assert!(!matcher.matches(""));
    }

    #[test]
    fn test_tokens_are_trimmed() {
        let matcher = ExtensionMatcher::new("markdown, md ,,mkdn");
        assert!(matcher.matches("md"));
        assert!(matcher.matches("mkdn"));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let matcher = ExtensionMatcher::new("md.x");
        assert!(matcher.matches("md.x"));
        assert!(!matcher.matches("mdax"));
    }
}
