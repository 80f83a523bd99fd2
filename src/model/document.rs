//! Document-level types.

use super::{NumberingPool, Paragraph, Resource, StyleCatalog, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A word-processing document under construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, creator, etc.)
    pub metadata: Metadata,

    /// Style catalog
    pub styles: StyleCatalog,

    /// Shared numbering definitions
    pub numbering: NumberingPool,

    /// Body content in order
    pub body: Vec<Block>,

    /// Embedded media keyed by resource id
    pub resources: BTreeMap<String, Resource>,
}

impl Document {
    /// Create a blank document with the base style and numbering catalog.
    pub fn new() -> Self {
        Self {
            metadata: Metadata::default(),
            styles: StyleCatalog::base(),
            numbering: NumberingPool::base(),
            body: Vec::new(),
            resources: BTreeMap::new(),
        }
    }

    /// Append a block to the body.
    pub fn add_block(&mut self, block: Block) {
        self.body.push(block);
    }

    /// Append a paragraph to the body.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.body.push(Block::Paragraph(paragraph));
    }

    /// Store a media resource and return its id (`image1`, `image2`, ...).
    pub fn add_resource(&mut self, resource: Resource) -> String {
        let id = format!("image{}", self.resources.len() + 1);
        self.resources.insert(id.clone(), resource);
        id
    }

    /// Get a resource by ID.
    pub fn get_resource(&self, id: &str) -> Option<&Resource> {
        self.resources.get(id)
    }

    /// Check if the body is empty.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Top-level paragraphs (captions and picture holders).
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Tables in body order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.body.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    /// Get plain text content of the body.
    pub fn plain_text(&self) -> String {
        self.body
            .iter()
            .map(|block| block.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// A body-level element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph
    Paragraph(Paragraph),

    /// A table
    Table(Table),

    /// An inline picture in its own paragraph
    Picture(Picture),
}

impl Block {
    /// Plain text of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Paragraph(p) => p.visible_text(),
            Block::Table(t) => t
                .paragraphs()
                .map(|p| p.visible_text())
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Picture(pic) => format!("[{}]", pic.name),
        }
    }
}

/// A picture referencing a stored resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picture {
    /// Resource id in [`Document::resources`]
    pub resource_id: String,

    /// Drawing object id, unique per document
    pub drawing_id: u32,

    /// Display name (source file name)
    pub name: String,

    /// Width in EMU
    pub width_emu: u64,

    /// Height in EMU
    pub height_emu: u64,
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Creator (author) name
    pub creator: Option<String>,

    /// Description
    pub description: Option<String>,

    /// Creation timestamp; omitted from the package when unset
    pub created: Option<DateTime<Utc>>,

    /// Number of files rendered
    pub file_count: u32,
}
