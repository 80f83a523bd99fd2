//! Tokenization: language selection and token streams.
//!
//! Highlighting itself is delegated to a [`SyntaxBackend`]; the default
//! backend wraps syntect's bundled syntax definitions. The
//! [`LexerSelector`] decides which language a file is tokenized as.

mod highlight;
mod selector;

pub use highlight::SyntectBackend;
pub use selector::{Association, LexerSelector, DEFAULT_ASSOCIATIONS};

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Coarse token classes used for character styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCategory {
    /// Spaces, tabs and line breaks
    Whitespace,
    /// Brackets, separators
    Punctuation,
    /// Text the grammar flagged as invalid
    Error,
    /// Comments
    Comment,
    /// String literals
    String,
    /// Number literals
    Number,
    /// Identifiers
    Name,
    /// Keywords
    Keyword,
    /// Operators
    Operator,
    /// Anything else
    Other,
}

/// A piece of source text with its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Category
    pub category: TokenCategory,

    /// Source text
    pub text: String,
}

impl Token {
    /// Create a token.
    pub fn new(category: TokenCategory, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }

    /// Check if the token carries no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Handle to a language known by a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Backend-specific language name, e.g. "Rust"
    pub name: String,
}

impl Language {
    /// Create a language handle.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A syntax highlighting engine.
pub trait SyntaxBackend {
    /// Resolve a user-supplied language name.
    fn find_by_name(&self, name: &str) -> Option<Language>;

    /// Guess a language from the file name and content.
    fn detect(&self, path: &str, content: &str) -> Option<Language>;

    /// Tokenize content as `language`.
    ///
    /// Concatenating the token texts must reproduce `content`. Content the
    /// grammar cannot handle is reported as [`crate::Error::Tokenize`].
    fn tokenize(&self, language: &Language, content: &str) -> Result<Vec<Token>>;
}

/// A language bound to a backend, ready to tokenize one file.
pub struct Tokenizer<'a> {
    backend: &'a dyn SyntaxBackend,
    language: Language,
}

impl<'a> Tokenizer<'a> {
    /// Bind a language to a backend.
    pub fn new(backend: &'a dyn SyntaxBackend, language: Language) -> Self {
        Self { backend, language }
    }

    /// The selected language.
    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Tokenize the file content.
    pub fn tokenize(&self, content: &str) -> Result<Vec<Token>> {
        self.backend.tokenize(&self.language, content)
    }
}

impl std::fmt::Debug for Tokenizer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("language", &self.language)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl SyntaxBackend for Echo {
        fn find_by_name(&self, name: &str) -> Option<Language> {
            Some(Language::new(name))
        }

        fn detect(&self, _path: &str, _content: &str) -> Option<Language> {
            None
        }

        fn tokenize(&self, _language: &Language, content: &str) -> Result<Vec<Token>> {
            Ok(vec![Token::new(TokenCategory::Other, content)])
        }
    }

    #[test]
    fn test_tokenizer_delegates_to_backend() {
        let backend = Echo;
        let tokenizer = Tokenizer::new(&backend, Language::new("Plain"));
        assert_eq!(tokenizer.language().name, "Plain");
        let tokens = tokenizer.tokenize("abc").unwrap();
        assert_eq!(tokens, vec![Token::new(TokenCategory::Other, "abc")]);
    }

    #[test]
    fn test_token_is_empty() {
        assert!(Token::new(TokenCategory::Whitespace, "").is_empty());
        assert!(!Token::new(TokenCategory::Whitespace, "\n").is_empty());
    }
}
