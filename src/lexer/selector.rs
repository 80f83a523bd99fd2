//! Language selection: explicit glob associations first, detection second.

use super::{SyntaxBackend, Tokenizer};
use crate::error::{Error, Result};
use globset::{Glob, GlobMatcher};

/// Associations always appended after the user-supplied ones.
pub const DEFAULT_ASSOCIATIONS: &[(&str, &str)] = &[("*.xml", "svg")];

/// A glob pattern bound to a language name.
#[derive(Debug, Clone)]
pub struct Association {
    /// Glob pattern as given
    pub pattern: String,

    /// Language name passed to the backend
    pub language: String,

    matcher: GlobMatcher,
}

impl Association {
    /// Compile an association.
    pub fn new(pattern: &str, language: &str) -> Result<Self> {
        let matcher = Glob::new(pattern)?.compile_matcher();
        Ok(Self {
            pattern: pattern.to_string(),
            language: language.to_string(),
            matcher,
        })
    }

    /// Check whether a path matches the pattern.
    ///
    /// `*` also matches `/`, so `*.xml` matches files in subdirectories.
    pub fn matches(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }
}

/// Picks a tokenizer for each file.
#[derive(Debug, Clone)]
pub struct LexerSelector {
    associations: Vec<Association>,
}

impl LexerSelector {
    /// Build a selector from user associations, in priority order.
    pub fn new<S: AsRef<str>>(associations: &[(S, S)]) -> Result<Self> {
        let user = associations
            .iter()
            .map(|(p, l)| (p.as_ref(), l.as_ref()));
        let associations = user
            .chain(DEFAULT_ASSOCIATIONS.iter().copied())
            .map(|(pattern, language)| Association::new(pattern, language))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { associations })
    }

    /// Associations in match order (defaults last).
    pub fn associations(&self) -> &[Association] {
        &self.associations
    }

    /// Select the tokenizer for a file.
    ///
    /// The first association whose pattern matches `path` decides the
    /// language. Without a match the backend's detection is used. Fails
    /// with [`Error::UnknownLanguage`] when neither yields a language.
    pub fn select<'a>(
        &self,
        backend: &'a dyn SyntaxBackend,
        path: &str,
        content: &str,
    ) -> Result<Tokenizer<'a>> {
        if let Some(assoc) = self.associations.iter().find(|a| a.matches(path)) {
            return match backend.find_by_name(&assoc.language) {
                Some(language) => Ok(Tokenizer::new(backend, language)),
                None => {
                    log::warn!(
                        "{}: associated language '{}' ({}) is unknown",
                        path,
                        assoc.language,
                        assoc.pattern
                    );
                    Err(Error::UnknownLanguage(path.to_string()))
                }
            };
        }

        backend
            .detect(path, content)
            .map(|language| Tokenizer::new(backend, language))
            .ok_or_else(|| Error::UnknownLanguage(path.to_string()))
    }
}

impl Default for LexerSelector {
    fn default() -> Self {
        let associations = DEFAULT_ASSOCIATIONS
            .iter()
            .filter_map(|(p, l)| Association::new(p, l).ok())
            .collect();
        Self { associations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Language, Token};

    /// Knows "python", "svg" and "ini"; detects by extension only.
    struct MockBackend;

    impl SyntaxBackend for MockBackend {
        fn find_by_name(&self, name: &str) -> Option<Language> {
            ["python", "svg", "ini"]
                .contains(&name)
                .then(|| Language::new(name))
        }

        fn detect(&self, path: &str, _content: &str) -> Option<Language> {
            if path.ends_with(".py") {
                Some(Language::new("python"))
            } else {
                None
            }
        }

        fn tokenize(&self, _language: &Language, _content: &str) -> Result<Vec<Token>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_default_association_is_last() {
        let selector = LexerSelector::new(&[("*.cfg", "ini")]).unwrap();
        let patterns: Vec<&str> = selector
            .associations()
            .iter()
            .map(|a| a.pattern.as_str())
            .collect();
        assert_eq!(patterns, vec!["*.cfg", "*.xml"]);
    }

    #[test]
    fn test_association_wins_over_detection() {
        let selector = LexerSelector::new(&[("*.py", "ini")]).unwrap();
        let tokenizer = selector.select(&MockBackend, "tools/run.py", "").unwrap();
        assert_eq!(tokenizer.language().name, "ini");
    }

    #[test]
    fn test_user_association_precedes_default() {
        let selector = LexerSelector::new(&[("*.xml", "python")]).unwrap();
        let tokenizer = selector.select(&MockBackend, "pom.xml", "").unwrap();
        assert_eq!(tokenizer.language().name, "python");

        let selector = LexerSelector::new::<&str>(&[]).unwrap();
        let tokenizer = selector.select(&MockBackend, "res/icon.xml", "").unwrap();
        assert_eq!(tokenizer.language().name, "svg");
    }

    #[test]
    fn test_detection_fallback() {
        let selector = LexerSelector::default();
        let tokenizer = selector.select(&MockBackend, "main.py", "print(1)").unwrap();
        assert_eq!(tokenizer.language().name, "python");
    }

    #[test]
    fn test_unknown_language() {
        let selector = LexerSelector::default();
        let err = selector.select(&MockBackend, "data.bin", "").unwrap_err();
        assert!(matches!(err, Error::UnknownLanguage(ref p) if p == "data.bin"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_association_with_unknown_language_does_not_detect() {
        let selector = LexerSelector::new(&[("*.py", "cobol")]).unwrap();
        let err = selector.select(&MockBackend, "main.py", "").unwrap_err();
        assert!(matches!(err, Error::UnknownLanguage(_)));
    }

    #[test]
    fn test_patterns_match_the_caption_path() {
        let nested = Association::new("lib/src/*.h", "C++").unwrap();
        let short = Association::new("src/*.h", "C++").unwrap();
        let any = Association::new("*.h", "C++").unwrap();

        assert!(nested.matches("lib/src/a.h"));
        assert!(!short.matches("lib/src/a.h"));
        assert!(any.matches("lib/src/a.h"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = LexerSelector::new(&[("src/[", "rust")]).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }
}
