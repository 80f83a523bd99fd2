//! Rendering options and configuration.

use crate::model::{NumberingKind, CAPTION_STYLE, CODE_FILE_STYLE, LIST_NUMBER_STYLE};
use crate::source::DEFAULT_IMAGE_EXTENSIONS;
use chrono::{DateTime, Utc};

/// EMU per inch.
pub const EMU_PER_INCH: u64 = 914_400;

/// Options for assembling the document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Glob pattern → language name associations, highest priority first
    pub associations: Vec<(String, String)>,

    /// SEQ field label; each label counts independently
    pub caption_label: String,

    /// Text shown before the caption number
    pub caption_prefix: String,

    /// Paragraph style of captions
    pub caption_style: Option<String>,

    /// Paragraph style of numbered code lines
    pub code_style: String,

    /// Table style wrapping each listing
    pub code_table_style: String,

    /// Numbering kind used when searching definitions by format
    pub numbering_kind: NumberingKind,

    /// Lowercase extensions embedded as pictures
    pub image_extensions: Vec<String>,

    /// Pictures wider than this are scaled down (EMU)
    pub max_picture_width: u64,

    /// Document title
    pub title: Option<String>,

    /// Document creator
    pub creator: Option<String>,

    /// Creation timestamp written to the package properties
    pub created: Option<DateTime<Utc>>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a glob → language association.
    pub fn with_association(
        mut self,
        pattern: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        self.associations.push((pattern.into(), language.into()));
        self
    }

    /// Replace all associations.
    pub fn with_associations(mut self, associations: Vec<(String, String)>) -> Self {
        self.associations = associations;
        self
    }

    /// Set the caption SEQ label.
    pub fn with_caption_label(mut self, label: impl Into<String>) -> Self {
        self.caption_label = label.into();
        self
    }

    /// Set the caption prefix text.
    pub fn with_caption_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.caption_prefix = prefix.into();
        self
    }

    /// Set the caption paragraph style (`None` = Normal).
    pub fn with_caption_style(mut self, style: Option<String>) -> Self {
        self.caption_style = style;
        self
    }

    /// Set the code line paragraph style.
    pub fn with_code_style(mut self, style: impl Into<String>) -> Self {
        self.code_style = style.into();
        self
    }

    /// Set the numbering kind.
    pub fn with_numbering_kind(mut self, kind: NumberingKind) -> Self {
        self.numbering_kind = kind;
        self
    }

    /// Set the picture extensions.
    pub fn with_image_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.image_extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    /// Set the maximum picture width in inches.
    pub fn with_max_picture_width_inches(mut self, inches: f64) -> Self {
        self.max_picture_width = (inches.max(0.1) * EMU_PER_INCH as f64) as u64;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the document creator.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Set the creation timestamp.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            associations: Vec::new(),
            caption_label: "File".to_string(),
            caption_prefix: "File".to_string(),
            caption_style: Some(CAPTION_STYLE.to_string()),
            code_style: LIST_NUMBER_STYLE.to_string(),
            code_table_style: CODE_FILE_STYLE.to_string(),
            numbering_kind: NumberingKind::Ordered,
            image_extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_picture_width: 6 * EMU_PER_INCH,
            title: None,
            creator: None,
            created: None,
        }
    }
}
