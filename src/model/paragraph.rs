//! Paragraph and run-level types.

use serde::{Deserialize, Serialize};

/// Zero-width space placed at the start of every numbered code line so
/// empty lines still render as list items.
pub const LINE_MARKER: &str = "\u{200B}";

/// A paragraph of inline content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph style id (`None` = document default)
    pub style_id: Option<String>,

    /// List instance the paragraph belongs to
    pub numbering: Option<ListBinding>,

    /// Inline content in document order
    pub content: Vec<Inline>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty paragraph with a style.
    pub fn with_style(style_id: impl Into<String>) -> Self {
        Self {
            style_id: Some(style_id.into()),
            ..Self::default()
        }
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Add an unstyled run.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.content.push(Inline::Run(TextRun::new(text)));
    }

    /// Add a run with an optional character style.
    pub fn add_run(&mut self, text: impl Into<String>, style_id: Option<&str>) {
        self.content.push(Inline::Run(TextRun {
            text: text.into(),
            style_id: style_id.map(str::to_string),
        }));
    }

    /// Add an arbitrary inline element.
    pub fn push(&mut self, inline: Inline) {
        self.content.push(inline);
    }

    /// Bind the paragraph to a list instance.
    pub fn set_numbering(&mut self, binding: ListBinding) {
        self.numbering = Some(binding);
    }

    /// Concatenated text of all runs, including field results.
    pub fn plain_text(&self) -> String {
        self.runs().map(|run| run.text.as_str()).collect()
    }

    /// Run text without line markers.
    pub fn visible_text(&self) -> String {
        self.plain_text().replace(LINE_MARKER, "")
    }

    /// Iterate over the text runs.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.content.iter().filter_map(|c| match c {
            Inline::Run(run) => Some(run),
            _ => None,
        })
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.visible_text().is_empty()
    }

    /// Check if this is a list item.
    pub fn is_list_item(&self) -> bool {
        self.numbering.is_some()
    }
}

/// Binding of a paragraph to a concrete list instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBinding {
    /// List instance id (`w:numId`)
    pub num_id: u32,

    /// Indentation level (`w:ilvl`)
    pub level: u8,
}

/// Inline content within a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    /// A text run
    Run(TextRun),

    /// Start of a named bookmark range
    BookmarkStart {
        /// Bookmark identity
        id: u32,
        /// Addressable name
        name: String,
    },

    /// End of a bookmark range
    BookmarkEnd {
        /// Bookmark identity
        id: u32,
    },

    /// Complex field delimiter
    FieldChar {
        /// Which delimiter
        kind: FieldCharKind,
    },

    /// Field instruction text (e.g. ` SEQ File \* ARABIC `)
    Instruction {
        /// Instruction code
        code: String,
    },
}

/// Complex field delimiter kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldCharKind {
    /// Field start
    Begin,
    /// Separates the instruction from the cached result
    Separate,
    /// Field end
    End,
}

impl FieldCharKind {
    /// OOXML attribute value.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldCharKind::Begin => "begin",
            FieldCharKind::Separate => "separate",
            FieldCharKind::End => "end",
        }
    }
}

/// A run of text with one character style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Character style id (`None` = default run formatting)
    pub style_id: Option<String>,
}

impl TextRun {
    /// Create a new run with default formatting.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style_id: None,
        }
    }

    /// Create a run with a character style.
    pub fn styled(text: impl Into<String>, style_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style_id: Some(style_id.into()),
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_plain_text() {
        let mut p = Paragraph::new();
        p.add_text("let ");
        p.add_run("x", Some("Variable"));
        p.push(Inline::BookmarkEnd { id: 1 });
        p.add_text(";");

        assert_eq!(p.plain_text(), "let x;");
        assert_eq!(p.runs().count(), 3);
    }

    #[test]
    fn test_visible_text_strips_marker() {
        let mut p = Paragraph::with_style("ListNumber");
        p.add_text(LINE_MARKER);
        assert!(p.is_empty());
        p.add_text("fn");
        assert_eq!(p.visible_text(), "fn");
        assert_eq!(p.style_id.as_deref(), Some("ListNumber"));
    }

    #[test]
    fn test_list_binding() {
        let mut p = Paragraph::new();
        assert!(!p.is_list_item());
        p.set_numbering(ListBinding { num_id: 3, level: 0 });
        assert!(p.is_list_item());
        assert_eq!(p.numbering.unwrap().num_id, 3);
    }

    #[test]
    fn test_field_char_names() {
        assert_eq!(FieldCharKind::Begin.as_str(), "begin");
        assert_eq!(FieldCharKind::Separate.as_str(), "separate");
        assert_eq!(FieldCharKind::End.as_str(), "end");
    }
}
