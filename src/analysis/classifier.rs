use regex::Regex;

use crate::error::Result;
use crate::taxonomy::KeywordSet;

/// Heuristic security detector over free text.
///
/// Phrases (keywords containing a space) match anywhere in the lower-cased
/// text. Single words only match as whole tokens, so "css" does not fire on
/// "cssify". All single words are compiled into one alternation.
#[derive(Debug, Clone)]
pub struct SecurityClassifier {
    phrases: Vec<String>,
    words: Option<Regex>,
}

impl SecurityClassifier {
    pub fn new(keywords: &KeywordSet) -> Result<Self> {
        let phrases = keywords.phrases().map(str::to_string).collect();

        let alternation = keywords
            .words()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");

        // An empty alternation would match every input.
        let words = if alternation.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(r"\b(?:{})\b", alternation))?)
        };

        Ok(Self { phrases, words })
    }

    pub fn matches(&self, text: &str) -> bool {
        let lower = text.to_lowercase();

        self.phrases.iter().any(|p| lower.contains(p.as_str()))
            || self.words.as_ref().is_some_and(|re| re.is_match(&lower))
    }

    /// 1 if `text` mentions any keyword, 0 otherwise or when absent.
    pub fn classify(&self, text: Option<&str>) -> u8 {
        text.map_or(0, |t| u8::from(self.matches(t)))
    }

    /// Flag for a record: fields are evaluated independently and OR-ed.
    pub fn classify_fields(&self, title: Option<&str>, body: Option<&str>) -> u8 {
        self.classify(title).max(self.classify(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_classifier() -> SecurityClassifier {
        SecurityClassifier::new(&KeywordSet::default()).unwrap()
    }

    #[test]
    fn test_word_match_is_case_insensitive() {
        let c = default_classifier();
        assert_eq!(c.classify(Some("this has a RACE condition")), 1);
        assert_eq!(c.classify(Some("Fix XSS vulnerability")), 1);
    }

    #[test]
    fn test_word_inside_larger_token_does_not_match() {
        let c = default_classifier();
        assert_eq!(c.classify(Some("terraced")), 0);
        assert_eq!(c.classify(Some("cssify the landing page")), 0);
        assert_eq!(c.classify(Some("update the docs")), 0);
    }

    #[test]
    fn test_word_bounded_by_punctuation_matches() {
        let c = default_classifier();
        assert_eq!(c.classify(Some("fix(dos): limit payload size")), 1);
        assert_eq!(c.classify(Some("stack-allocated buffer")), 1);
    }

    #[test]
    fn test_phrase_uses_substring_match() {
        let c = default_classifier();
        assert_eq!(c.classify(Some("cross site scripting")), 1);
        assert_eq!(c.classify(Some("prevent cross sites")), 1);
        assert_eq!(c.classify(Some("Cross-site scripting")), 0);
    }

    #[test]
    fn test_absent_text_is_zero() {
        let c = default_classifier();
        assert_eq!(c.classify(None), 0);
        assert_eq!(c.classify(Some("")), 0);
    }

    #[test]
    fn test_fields_are_or_combined() {
        let c = default_classifier();
        assert_eq!(c.classify_fields(Some("Add login page"), Some("fixes a csrf hole")), 1);
        assert_eq!(c.classify_fields(Some("Possible deadlock"), None), 1);
        assert_eq!(c.classify_fields(Some("Add login page"), Some("styling only")), 0);
        assert_eq!(c.classify_fields(None, None), 0);
    }

    #[test]
    fn test_substituted_vocabulary() {
        let c = SecurityClassifier::new(&KeywordSet::new(["leak", "use after free"])).unwrap();
        assert_eq!(c.classify(Some("memory LEAK in parser")), 1);
        assert_eq!(c.classify(Some("a use after free bug")), 1);
        assert_eq!(c.classify(Some("leaky abstraction")), 0);
        assert_eq!(c.classify(Some("race condition")), 0);
    }

    #[test]
    fn test_empty_vocabulary_never_matches() {
        let c = SecurityClassifier::new(&KeywordSet::new(Vec::<String>::new())).unwrap();
        assert_eq!(c.classify(Some("security vulnerability")), 0);
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let c = SecurityClassifier::new(&KeywordSet::new(["c++", "a.b"])).unwrap();
        assert_eq!(c.classify(Some("axb")), 0);
        assert_eq!(c.classify(Some("see a.b here")), 1);
    }
}
