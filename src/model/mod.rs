//! Document model types for the generated word-processing document.
//!
//! This module defines the in-memory representation that the render
//! pipeline builds and the package writer serializes: body blocks, the
//! style catalog and the shared numbering-definition pool.

mod document;
mod numbering;
mod paragraph;
mod resource;
mod styles;
mod table;

pub use document::{Block, Document, Metadata, Picture};
pub use numbering::{
    AbstractNum, DefinitionKey, LevelDef, LevelOverride, NumInstance, NumberFormat, NumberingKind,
    NumberingPool,
};
pub use paragraph::{FieldCharKind, Inline, ListBinding, Paragraph, TextRun, LINE_MARKER};
pub use resource::{extension_for_mime, Resource};
pub use styles::{
    style_id_from_name, CodeStyle, RunProperties, Style, StyleCatalog, StyleKind, CAPTION_STYLE,
    CODE_FILE_STYLE, LIST_BULLET_STYLE, LIST_NUMBER_STYLE, STRONG_STYLE,
};
pub use table::{Table, TableCell, TableRow};
