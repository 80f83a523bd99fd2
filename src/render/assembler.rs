//! Token stream to per-line paragraphs.
//!
//! The [`Assembler`] is a small state machine: it always holds an open
//! paragraph (the current source line) and counts line breaks it has seen
//! but not yet acted on. A break only opens the next paragraph once text
//! follows it, so a final newline never produces a trailing empty line.

use super::numbering::{allocate, ListRequest};
use crate::lexer::{Token, TokenCategory};
use crate::model::{CodeStyle, NumberingPool, Paragraph, LINE_MARKER};

/// Character style for a token category, if any.
pub fn code_style_for(category: TokenCategory) -> Option<CodeStyle> {
    match category {
        TokenCategory::Comment => Some(CodeStyle::Comment),
        TokenCategory::String => Some(CodeStyle::String),
        TokenCategory::Number => Some(CodeStyle::Number),
        TokenCategory::Name => Some(CodeStyle::Variable),
        TokenCategory::Keyword => Some(CodeStyle::Keyword),
        TokenCategory::Operator => Some(CodeStyle::Operator),
        TokenCategory::Whitespace
        | TokenCategory::Punctuation
        | TokenCategory::Error
        | TokenCategory::Other => None,
    }
}

/// Builds the numbered line paragraphs of one file.
#[derive(Debug)]
pub struct Assembler<'a> {
    pool: &'a mut NumberingPool,
    request: ListRequest<'a>,
    paragraphs: Vec<Paragraph>,
    pending_breaks: usize,
}

impl<'a> Assembler<'a> {
    /// Open the first line paragraph in a new restart group.
    pub fn new(pool: &'a mut NumberingPool, request: ListRequest<'a>) -> Self {
        let mut assembler = Self {
            pool,
            request,
            paragraphs: Vec::new(),
            pending_breaks: 0,
        };
        assembler.open_line();
        assembler
    }

    /// Append one token.
    pub fn push_token(&mut self, token: &Token) {
        if token.is_empty() {
            return;
        }
        let style = code_style_for(token.category).map(|s| s.name());
        self.push_text(&token.text, style);
    }

    /// Append text, splitting it at line breaks.
    ///
    /// Every piece keeps `style_id`.
    pub fn push_text(&mut self, text: &str, style_id: Option<&str>) {
        let mut pieces = text.split('\n');
        if let Some(first) = pieces.next() {
            self.append(first, style_id);
        }
        for piece in pieces {
            self.pending_breaks += 1;
            self.append(piece, style_id);
        }
    }

    /// Number of paragraphs opened so far.
    pub fn line_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Close the stream and return the paragraphs.
    ///
    /// The last pending break closes the final line instead of opening a
    /// new one.
    pub fn finish(mut self) -> Vec<Paragraph> {
        self.flush_breaks(self.pending_breaks.saturating_sub(1));
        self.paragraphs
    }

    fn append(&mut self, text: &str, style_id: Option<&str>) {
        if text.is_empty() {
            return;
        }
        self.flush_breaks(self.pending_breaks);
        if let Some(current) = self.paragraphs.last_mut() {
            current.add_run(text, style_id);
        }
    }

    fn flush_breaks(&mut self, count: usize) {
        for _ in 0..count {
            self.open_line();
        }
        self.pending_breaks -= count;
    }

    fn open_line(&mut self) {
        let binding = allocate(self.pool, &self.request, self.paragraphs.last());
        let mut paragraph = Paragraph::with_style(self.request.style_id);
        paragraph.set_numbering(binding);
        paragraph.add_text(LINE_MARKER);
        self.paragraphs.push(paragraph);
    }
}

/// Assemble a token stream into line paragraphs.
pub fn assemble_tokens(
    pool: &mut NumberingPool,
    request: ListRequest<'_>,
    tokens: &[Token],
) -> Vec<Paragraph> {
    let mut assembler = Assembler::new(pool, request);
    for token in tokens {
        assembler.push_token(token);
    }
    assembler.finish()
}

/// Assemble unhighlighted content, one paragraph per line with trailing
/// whitespace removed.
pub fn assemble_plain(
    pool: &mut NumberingPool,
    request: ListRequest<'_>,
    content: &str,
) -> Vec<Paragraph> {
    let mut assembler = Assembler::new(pool, request);
    for (index, line) in content.lines().enumerate() {
        if index > 0 {
            // blank lines still get their own paragraph
            assembler.pending_breaks += 1;
            assembler.flush_breaks(assembler.pending_breaks);
        }
        assembler.append(line.trim_end(), None);
    }
    assembler.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(paragraphs: &[Paragraph]) -> Vec<String> {
        paragraphs.iter().map(|p| p.visible_text()).collect()
    }

    fn tokens(spec: &[(TokenCategory, &str)]) -> Vec<Token> {
        spec.iter().map(|(c, t)| Token::new(*c, *t)).collect()
    }

    #[test]
    fn test_whitespace_token_with_breaks() {
        let mut pool = NumberingPool::base();
        let stream = tokens(&[(TokenCategory::Whitespace, "\na\nb")]);
        let paragraphs = assemble_tokens(&mut pool, ListRequest::ordered("ListNumber"), &stream);

        assert_eq!(texts(&paragraphs), vec!["", "a", "b"]);
        let num_id = paragraphs[0].numbering.unwrap().num_id;
        for p in &paragraphs {
            assert_eq!(p.numbering.unwrap().num_id, num_id);
            assert!(p.plain_text().starts_with(LINE_MARKER));
            assert!(p.runs().all(|r| r.style_id.is_none()));
        }
    }

    #[test]
    fn test_trailing_newline_is_not_a_line() {
        let mut pool = NumberingPool::base();
        let stream = tokens(&[
            (TokenCategory::Keyword, "fn"),
            (TokenCategory::Whitespace, " "),
            (TokenCategory::Name, "main"),
            (TokenCategory::Whitespace, "\n"),
        ]);
        let paragraphs = assemble_tokens(&mut pool, ListRequest::ordered("ListNumber"), &stream);
        assert_eq!(texts(&paragraphs), vec!["fn main"]);

        let stream = tokens(&[
            (TokenCategory::Other, "x"),
            (TokenCategory::Whitespace, "\n\n"),
        ]);
        let paragraphs = assemble_tokens(&mut pool, ListRequest::ordered("ListNumber"), &stream);
        assert_eq!(texts(&paragraphs), vec!["x", ""]);
    }

    #[test]
    fn test_empty_stream_yields_one_paragraph() {
        let mut pool = NumberingPool::base();
        let paragraphs = assemble_tokens(&mut pool, ListRequest::ordered("ListNumber"), &[]);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].plain_text(), LINE_MARKER);
        assert!(paragraphs[0].is_list_item());
    }

    #[test]
    fn test_styles_follow_categories() {
        let mut pool = NumberingPool::base();
        let stream = tokens(&[
            (TokenCategory::Keyword, "let"),
            (TokenCategory::Whitespace, " "),
            (TokenCategory::Name, "x"),
            (TokenCategory::Operator, "="),
            (TokenCategory::Number, "1"),
            (TokenCategory::Punctuation, ";"),
            (TokenCategory::Comment, "// one"),
        ]);
        let paragraphs = assemble_tokens(&mut pool, ListRequest::ordered("ListNumber"), &stream);
        let styles: Vec<Option<&str>> = paragraphs[0]
            .runs()
            .skip(1)
            .map(|r| r.style_id.as_deref())
            .collect();
        assert_eq!(
            styles,
            vec![
                Some("Keyword"),
                None,
                Some("Variable"),
                Some("Operator"),
                Some("Number"),
                None,
                Some("Comment"),
            ]
        );
    }

    #[test]
    fn test_only_keywords_map_to_keyword_style() {
        let all = [
            TokenCategory::Whitespace,
            TokenCategory::Punctuation,
            TokenCategory::Error,
            TokenCategory::Comment,
            TokenCategory::String,
            TokenCategory::Number,
            TokenCategory::Name,
            TokenCategory::Keyword,
            TokenCategory::Operator,
            TokenCategory::Other,
        ];
        for category in all {
            let is_keyword = code_style_for(category) == Some(CodeStyle::Keyword);
            assert_eq!(is_keyword, category == TokenCategory::Keyword);
        }
    }

    #[test]
    fn test_multiline_token_keeps_style() {
        let mut pool = NumberingPool::base();
        let stream = tokens(&[(TokenCategory::Comment, "/* a\n   b */")]);
        let paragraphs = assemble_tokens(&mut pool, ListRequest::ordered("ListNumber"), &stream);
        assert_eq!(texts(&paragraphs), vec!["/* a", "   b */"]);
        for p in &paragraphs {
            let run = p.runs().nth(1).unwrap();
            assert_eq!(run.style_id.as_deref(), Some("Comment"));
        }
    }

    #[test]
    fn test_plain_lines() {
        let mut pool = NumberingPool::base();
        let paragraphs = assemble_plain(&mut pool, ListRequest::ordered("ListNumber"), "x\ny  \nz\n");
        assert_eq!(texts(&paragraphs), vec!["x", "y", "z"]);
        assert!(paragraphs
            .iter()
            .all(|p| p.runs().all(|r| r.style_id.is_none())));
        let num_id = paragraphs[0].numbering.unwrap().num_id;
        assert!(paragraphs
            .iter()
            .all(|p| p.numbering.unwrap().num_id == num_id));
    }

    #[test]
    fn test_plain_blank_lines_kept() {
        let mut pool = NumberingPool::base();
        let paragraphs = assemble_plain(&mut pool, ListRequest::ordered("ListNumber"), "\n\na\n");
        assert_eq!(texts(&paragraphs), vec!["", "", "a"]);

        let paragraphs = assemble_plain(&mut pool, ListRequest::ordered("ListNumber"), "");
        assert_eq!(paragraphs.len(), 1);
    }

    #[test]
    fn test_one_list_per_file() {
        let mut pool = NumberingPool::base();
        let before = pool.instance_count();
        let first = assemble_plain(&mut pool, ListRequest::ordered("ListNumber"), "a\nb\nc");
        let second = assemble_plain(&mut pool, ListRequest::ordered("ListNumber"), "d\ne");

        assert_eq!(pool.instance_count(), before + 2);
        assert_ne!(
            first[0].numbering.unwrap().num_id,
            second[0].numbering.unwrap().num_id
        );
        for num_id in [first[0].numbering.unwrap().num_id, second[0].numbering.unwrap().num_id] {
            let instance = pool.instance(num_id).unwrap();
            assert_eq!(instance.overrides[0].start_override, 1);
        }
    }
}
