//! syntect-backed tokenization.

use super::{Language, SyntaxBackend, Token, TokenCategory};
use crate::error::{Error, Result};
use syntect::easy::ScopeRangeIterator;
use syntect::parsing::{ParseState, Scope, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Syntax backend using syntect's bundled grammars.
pub struct SyntectBackend {
    syntaxes: SyntaxSet,
}

impl SyntectBackend {
    /// Load the default syntax set.
    pub fn new() -> Self {
        Self::with_syntaxes(SyntaxSet::load_defaults_newlines())
    }

    /// Use a custom syntax set (must be built for lines with newlines).
    pub fn with_syntaxes(syntaxes: SyntaxSet) -> Self {
        Self { syntaxes }
    }

    fn syntax(&self, language: &Language) -> Option<&SyntaxReference> {
        self.syntaxes.find_syntax_by_name(&language.name)
    }
}

impl Default for SyntectBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SyntectBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntectBackend")
            .field("syntaxes", &self.syntaxes.syntaxes().len())
            .finish()
    }
}

impl SyntaxBackend for SyntectBackend {
    fn find_by_name(&self, name: &str) -> Option<Language> {
        self.syntaxes
            .find_syntax_by_name(name)
            .or_else(|| self.syntaxes.find_syntax_by_token(name))
            .map(|s| Language::new(s.name.clone()))
    }

    fn detect(&self, path: &str, content: &str) -> Option<Language> {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        let by_extension = file_name
            .rsplit_once('.')
            .filter(|(stem, _)| !stem.is_empty())
            .and_then(|(_, ext)| self.syntaxes.find_syntax_by_extension(ext));

        by_extension
            .or_else(|| self.syntaxes.find_syntax_by_extension(file_name))
            .or_else(|| {
                let first_line = content.lines().next().unwrap_or("");
                self.syntaxes.find_syntax_by_first_line(first_line)
            })
            .map(|s| Language::new(s.name.clone()))
    }

    fn tokenize(&self, language: &Language, content: &str) -> Result<Vec<Token>> {
        let syntax = self
            .syntax(language)
            .ok_or_else(|| Error::UnknownLanguage(language.name.clone()))?;

        let mut state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();
        let mut tokens = Vec::new();

        for line in LinesWithEndings::from(content) {
            let ops = state
                .parse_line(line, &self.syntaxes)
                .map_err(|e| Error::Tokenize(e.to_string()))?;
            for (range, op) in ScopeRangeIterator::new(&ops, line) {
                stack
                    .apply(op)
                    .map_err(|e| Error::Tokenize(format!("{:?}", e)))?;
                if range.is_empty() {
                    continue;
                }
                let text = &line[range];
                let category = classify(stack.as_slice(), text);
                push_token(&mut tokens, category, text);
            }
        }

        Ok(tokens)
    }
}

/// Merge adjacent pieces of the same category.
fn push_token(tokens: &mut Vec<Token>, category: TokenCategory, text: &str) {
    match tokens.last_mut() {
        Some(last) if last.category == category && category != TokenCategory::Whitespace => {
            last.text.push_str(text);
        }
        _ => tokens.push(Token::new(category, text)),
    }
}

/// Map a scope stack to a token category.
///
/// Comments and strings claim everything nested inside them; other scopes
/// are checked innermost first.
fn classify(scopes: &[Scope], text: &str) -> TokenCategory {
    let names: Vec<String> = scopes.iter().map(|s| s.build_string()).collect();

    if names.iter().any(|n| n.starts_with("comment")) {
        return TokenCategory::Comment;
    }
    if names.iter().any(|n| n.starts_with("string")) {
        return TokenCategory::String;
    }
    if text.trim().is_empty() {
        return TokenCategory::Whitespace;
    }

    for name in names.iter().rev() {
        let category = if name.starts_with("constant.numeric") {
            TokenCategory::Number
        } else if name.starts_with("keyword.operator") {
            TokenCategory::Operator
        } else if name.starts_with("keyword") || name.starts_with("storage") {
            TokenCategory::Keyword
        } else if name.starts_with("variable")
            || name.starts_with("entity.name")
            || name.starts_with("support")
        {
            TokenCategory::Name
        } else if name.starts_with("punctuation") {
            TokenCategory::Punctuation
        } else if name.starts_with("invalid") {
            TokenCategory::Error
        } else {
            continue;
        };
        return category;
    }

    TokenCategory::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scopes(names: &[&str]) -> Vec<Scope> {
        names.iter().map(|n| Scope::new(n).unwrap()).collect()
    }

    #[test]
    fn test_classify_comment_beats_punctuation() {
        let stack = scopes(&[
            "source.rust",
            "comment.line.double-slash.rust",
            "punctuation.definition.comment.rust",
        ]);
        assert_eq!(classify(&stack, "//"), TokenCategory::Comment);
    }

    #[test]
    fn test_classify_innermost_first() {
        let stack = scopes(&["source.rust", "meta.function.rust", "keyword.operator.rust"]);
        assert_eq!(classify(&stack, "=="), TokenCategory::Operator);

        let stack = scopes(&["source.rust", "storage.type.rust"]);
        assert_eq!(classify(&stack, "let"), TokenCategory::Keyword);

        let stack = scopes(&["source.rust", "constant.numeric.integer.rust"]);
        assert_eq!(classify(&stack, "42"), TokenCategory::Number);

        let stack = scopes(&["source.rust", "entity.name.function.rust"]);
        assert_eq!(classify(&stack, "main"), TokenCategory::Name);
    }

    #[test]
    fn test_classify_whitespace_and_other() {
        let stack = scopes(&["source.rust"]);
        assert_eq!(classify(&stack, "  \n"), TokenCategory::Whitespace);
        assert_eq!(classify(&stack, "x"), TokenCategory::Other);

        let stack = scopes(&["source.rust", "string.quoted.double.rust"]);
        assert_eq!(classify(&stack, " "), TokenCategory::String);
    }

    #[test]
    fn test_detect_by_extension() {
        let backend = SyntectBackend::new();
        let lang = backend.detect("src/main.rs", "fn main() {}\n").unwrap();
        assert_eq!(lang.name, "Rust");
        assert!(backend.detect("notes.unknownext", "x\ny\n").is_none());
    }

    #[test]
    fn test_detect_by_first_line() {
        let backend = SyntectBackend::new();
        let lang = backend.detect("bin/tool", "#!/bin/bash\necho hi\n").unwrap();
        assert!(lang.name.to_lowercase().contains("bash"), "got {}", lang.name);
    }

    #[test]
    fn test_find_by_name() {
        let backend = SyntectBackend::new();
        assert_eq!(backend.find_by_name("Rust").unwrap().name, "Rust");
        assert_eq!(backend.find_by_name("rs").unwrap().name, "Rust");
        assert!(backend.find_by_name("no-such-language").is_none());
    }

    #[test]
    fn test_tokenize_is_lossless() {
        let backend = SyntectBackend::new();
        let content = "// greet\nfn main() {\n    let x = 42;\n}\n";
        let tokens = backend.tokenize(&Language::new("Rust"), content).unwrap();
        let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, content);

        assert!(tokens
            .iter()
            .any(|t| t.category == TokenCategory::Comment && t.text.contains("greet")));
        assert!(tokens
            .iter()
            .any(|t| t.category == TokenCategory::Keyword && t.text == "fn"));
        assert!(tokens
            .iter()
            .any(|t| t.category == TokenCategory::Number && t.text == "42"));
    }

    #[test]
    fn test_tokenize_unknown_language() {
        let backend = SyntectBackend::new();
        let err = backend
            .tokenize(&Language::new("no-such-language"), "x")
            .unwrap_err();
        assert!(matches!(err, Error::UnknownLanguage(_)));
    }
}
