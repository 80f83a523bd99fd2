//! Style catalog: the named paragraph, character and table styles of a document.

use super::ListBinding;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Paragraph style used for numbered code lines.
pub const LIST_NUMBER_STYLE: &str = "ListNumber";

/// Paragraph style bound to the bullet list definition.
pub const LIST_BULLET_STYLE: &str = "ListBullet";

/// Paragraph style for file captions.
pub const CAPTION_STYLE: &str = "Caption";

/// Character style for the caption prefix.
pub const STRONG_STYLE: &str = "Strong";

/// Table style wrapping each code listing.
pub const CODE_FILE_STYLE: &str = "CodeFile";

/// Kind of style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    /// Paragraph style
    Paragraph,
    /// Character (run) style
    Character,
    /// Table style
    Table,
    /// Numbering style
    Numbering,
}

impl StyleKind {
    /// OOXML `w:type` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleKind::Paragraph => "paragraph",
            StyleKind::Character => "character",
            StyleKind::Table => "table",
            StyleKind::Numbering => "numbering",
        }
    }
}

/// Run formatting carried by a style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunProperties {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Text colour as six hex digits, e.g. "A31515"
    pub color: Option<String>,

    /// Font family
    pub font: Option<String>,

    /// Size in half-points
    pub size: Option<u32>,
}

/// A named style definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Style id referenced from content
    pub id: String,

    /// Display name
    pub name: String,

    /// Style kind
    pub kind: StyleKind,

    /// Default style of its kind
    pub is_default: bool,

    /// Parent style id
    pub based_on: Option<String>,

    /// Hidden from the style gallery UI
    pub hidden: bool,

    /// Shown in the quick style gallery
    pub quick_style: bool,

    /// Locked against use
    pub locked: bool,

    /// Numbering applied by a paragraph style
    pub numbering: Option<ListBinding>,

    /// Run formatting
    pub run: RunProperties,

    /// Table styles only: draw single borders around and inside cells
    pub borders: bool,

    /// Paragraph styles only: space after in twentieths of a point
    pub space_after: Option<u32>,
}

impl Style {
    /// Create a style; the id is derived from the name as Word does.
    pub fn new(name: impl Into<String>, kind: StyleKind) -> Self {
        let name = name.into();
        Self {
            id: style_id_from_name(&name),
            name,
            kind,
            is_default: false,
            based_on: None,
            hidden: false,
            quick_style: false,
            locked: false,
            numbering: None,
            run: RunProperties::default(),
            borders: false,
            space_after: None,
        }
    }

    fn default_of(mut self) -> Self {
        self.is_default = true;
        self
    }

    fn based_on(mut self, parent: &str) -> Self {
        self.based_on = Some(parent.to_string());
        self
    }

    fn quick(mut self) -> Self {
        self.quick_style = true;
        self
    }
}

/// Derive a style id from a display name (spaces removed).
pub fn style_id_from_name(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Character styles applied to highlighted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeStyle {
    /// String literals
    String,
    /// Number literals
    Number,
    /// Comments
    Comment,
    /// Names
    Variable,
    /// Keywords
    Keyword,
    /// Operators
    Operator,
}

impl CodeStyle {
    /// All code character styles, in registration order.
    pub const ALL: [CodeStyle; 6] = [
        CodeStyle::String,
        CodeStyle::Number,
        CodeStyle::Comment,
        CodeStyle::Variable,
        CodeStyle::Keyword,
        CodeStyle::Operator,
    ];

    /// Style name (also its id).
    pub fn name(&self) -> &'static str {
        match self {
            CodeStyle::String => "String",
            CodeStyle::Number => "Number",
            CodeStyle::Comment => "Comment",
            CodeStyle::Variable => "Variable",
            CodeStyle::Keyword => "Keyword",
            CodeStyle::Operator => "Operator",
        }
    }

    fn run_properties(&self) -> RunProperties {
        let (color, bold, italic) = match self {
            CodeStyle::String => ("A31515", false, false),
            CodeStyle::Number => ("098658", false, false),
            CodeStyle::Comment => ("008000", false, true),
            CodeStyle::Variable => ("001080", false, false),
            CodeStyle::Keyword => ("0000FF", true, false),
            CodeStyle::Operator => ("5F5F5F", false, false),
        };
        RunProperties {
            bold,
            italic,
            color: Some(color.to_string()),
            ..Default::default()
        }
    }
}

/// Ordered collection of styles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleCatalog {
    /// Styles in declaration order
    pub styles: Vec<Style>,
}

impl StyleCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of a blank document.
    ///
    /// `ListBullet` and `ListNumber` point at list instances 1 and 2 of the
    /// base numbering pool.
    pub fn base() -> Self {
        let mut normal = Style::new("Normal", StyleKind::Paragraph).default_of().quick();
        normal.space_after = Some(120);

        let default_font =
            Style::new("Default Paragraph Font", StyleKind::Character).default_of();
        let mut table_normal = Style::new("Normal Table", StyleKind::Table).default_of();
        table_normal.id = "TableNormal".to_string();
        let no_list = Style::new("No List", StyleKind::Numbering).default_of();

        let mut strong = Style::new("Strong", StyleKind::Character)
            .based_on("DefaultParagraphFont")
            .quick();
        strong.run.bold = true;

        let mut caption = Style::new("Caption", StyleKind::Paragraph)
            .based_on("Normal")
            .quick();
        caption.run.italic = true;
        caption.run.color = Some("44546A".to_string());
        caption.run.size = Some(18);

        let mut bullet = Style::new("List Bullet", StyleKind::Paragraph).based_on("Normal");
        bullet.numbering = Some(ListBinding { num_id: 1, level: 0 });

        let mut number = Style::new("List Number", StyleKind::Paragraph).based_on("Normal");
        number.numbering = Some(ListBinding { num_id: 2, level: 0 });
        number.space_after = Some(0);

        Self {
            styles: vec![
                normal,
                default_font,
                table_normal,
                no_list,
                strong,
                caption,
                bullet,
                number,
            ],
        }
    }

    /// Add a new style.
    ///
    /// Fails with [`Error::DuplicateStyle`] if the derived id is taken.
    pub fn add_style(&mut self, name: &str, kind: StyleKind) -> Result<&mut Style> {
        let style = Style::new(name, kind);
        if self.contains(&style.id) {
            return Err(Error::DuplicateStyle(style.id));
        }
        self.styles.push(style);
        let last = self.styles.len() - 1;
        Ok(&mut self.styles[last])
    }

    /// Register the "Code File" table style and the six code character styles.
    pub fn register_code_styles(&mut self) -> Result<()> {
        let table = self.add_style("Code File", StyleKind::Table)?;
        table.based_on = Some("TableNormal".to_string());
        table.borders = true;
        table.run.font = Some("Consolas".to_string());
        table.run.size = Some(18);
        make_visible(table);

        for code_style in CodeStyle::ALL {
            let style = self.add_style(code_style.name(), StyleKind::Character)?;
            style.based_on = Some("DefaultParagraphFont".to_string());
            style.run = code_style.run_properties();
            make_visible(style);
        }
        Ok(())
    }

    /// Get a style by id.
    pub fn get(&self, id: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.id == id)
    }

    /// Check whether a style id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

fn make_visible(style: &mut Style) {
    style.hidden = false;
    style.quick_style = true;
    style.locked = false;
}
