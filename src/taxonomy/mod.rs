use std::collections::HashSet;
use std::path::Path;

use crate::error::Result;

/// Terms whose presence in a PR title or body marks it as security related.
pub const SECURITY_KEYWORDS: &[&str] = &[
    "race",
    "racy",
    "buffer",
    "overflow",
    "stack",
    "integer",
    "signedness",
    "underflow",
    "improper",
    "unauthenticated",
    "gain access",
    "permission",
    "cross site",
    "css",
    "xss",
    "denial service",
    "dos",
    "crash",
    "deadlock",
    "injection",
    "request forgery",
    "csrf",
    "xsrf",
    "forged",
    "security",
    "vulnerability",
    "vulnerable",
    "exploit",
    "attack",
    "bypass",
    "backdoor",
    "threat",
    "expose",
    "breach",
    "violate",
    "fatal",
    "blacklist",
    "overrun",
    "insecure",
];

/// Ordered keyword vocabulary for the security classifier.
///
/// Keywords are stored lower-cased and trimmed, without duplicates. A keyword
/// containing a space is a phrase; anything else is a single word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .filter(|k| seen.insert(k.clone()))
            .collect();

        Self { keywords }
    }

    /// One keyword per line; blank lines and `#` comments are skipped.
    pub fn parse(contents: &str) -> Self {
        Self::new(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let set = Self::parse(&contents);
        tracing::info!(
            "Loaded {} keywords from {}",
            set.len(),
            path.as_ref().display()
        );
        Ok(set)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|k| is_phrase(k))
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|k| !is_phrase(k))
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::new(SECURITY_KEYWORDS)
    }
}

fn is_phrase(keyword: &str) -> bool {
    keyword.contains(' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary() {
        let set = KeywordSet::default();
        assert_eq!(set.len(), SECURITY_KEYWORDS.len());
        assert_eq!(set.iter().next(), Some("race"));
        assert_eq!(
            set.phrases().collect::<Vec<_>>(),
            vec!["gain access", "cross site", "denial service", "request forgery"]
        );
        assert!(set.words().any(|w| w == "xss"));
    }

    #[test]
    fn test_normalizes_and_dedupes() {
        let set = KeywordSet::new(["  Race ", "race", "", "SQL Injection"]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["race", "sql injection"]);
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let set = KeywordSet::parse("# vocabulary\nleak\n\n  taint  \n# done\n");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["leak", "taint"]);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keywords.txt");
        std::fs::write(&path, "overflow\nuse after free\n").unwrap();

        let set = KeywordSet::from_file(&path).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.phrases().collect::<Vec<_>>(), vec!["use after free"]);
    }

    #[test]
    fn test_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(KeywordSet::from_file(dir.path().join("nope.txt")).is_err());
    }
}
