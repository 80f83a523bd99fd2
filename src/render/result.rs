//! Rendering result with statistics.

use crate::model::Document;
use serde::{Deserialize, Serialize};

/// Result of a render run: the assembled document and what went into it.
#[derive(Debug, Clone)]
pub struct RenderResult {
    /// The assembled document
    pub document: Document,

    /// Run statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(document: Document, stats: RenderStats) -> Self {
        Self { document, stats }
    }
}

/// Statistics collected during a render run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Files processed
    pub file_count: u32,

    /// Files rendered from a token stream
    pub highlighted_count: u32,

    /// Files rendered without highlighting
    pub fallback_count: u32,

    /// Files embedded as pictures
    pub image_count: u32,

    /// Code line paragraphs emitted
    pub line_count: u32,

    /// List instances created
    pub list_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a highlighted file.
    pub fn add_highlighted(&mut self, lines: usize) {
        self.file_count += 1;
        self.highlighted_count += 1;
        self.line_count += lines as u32;
    }

    /// Record a file rendered without highlighting.
    pub fn add_fallback(&mut self, lines: usize) {
        self.file_count += 1;
        self.fallback_count += 1;
        self.line_count += lines as u32;
    }

    /// Record a picture.
    pub fn add_image(&mut self) {
        self.file_count += 1;
        self.image_count += 1;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.file_count += other.file_count;
        self.highlighted_count += other.highlighted_count;
        self.fallback_count += other.fallback_count;
        self.image_count += other.image_count;
        self.line_count += other.line_count;
        self.list_count += other.list_count;
    }
}
