//! # dir2docx
//!
//! Render a tree of source files into a single DOCX document.
//!
//! Every file becomes a captioned section. The caption carries an
//! auto-incrementing `SEQ` field inside a bookmark named after the file,
//! so it can be cross-referenced. Text files are syntax highlighted and
//! written as one numbered paragraph per line inside a one-cell table; line
//! numbers restart at 1 for each file while all files share the document's
//! numbering definitions. Image files are embedded as pictures.
//!
//! ## Quick Start
//!
//! ```no_run
//! use dir2docx::{render_to_docx, FileEntry, RenderOptions};
//!
//! fn main() -> dir2docx::Result<()> {
//!     let files = vec![
//!         FileEntry::new("src/main.rs", std::fs::read("src/main.rs")?),
//!         FileEntry::new("README.md", std::fs::read("README.md")?),
//!     ];
//!     let options = RenderOptions::new().with_association("*.h", "C++");
//!     let stats = render_to_docx(&files, &options, "sources.docx")?;
//!     println!("{} files", stats.file_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Language selection**: glob associations first, then detection by
//!   file name and content
//! - **Per-file line numbering** on a bounded pool of list definitions
//! - **Live captions** with bookmarks for cross-references
//! - **Graceful fallback** to plain numbered lines for unknown content
//! - **Deterministic output**: identical input gives identical bytes

pub mod error;
pub mod lexer;
pub mod model;
pub mod package;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use error::{Error, Result};
pub use lexer::{LexerSelector, SyntaxBackend, SyntectBackend, Token, TokenCategory};
pub use model::{Block, Document, Metadata, NumberingKind, Paragraph, Table, TextRun};
pub use render::{
    DocxRenderer, FileOutcome, JsonFormat, RenderObserver, RenderOptions, RenderResult,
    RenderStats,
};
pub use source::{CrossRef, FileEntry};

use chrono::{DateTime, Utc};
use std::path::Path;

/// Render files into a document model.
///
/// # Example
///
/// ```no_run
/// use dir2docx::{render_files, FileEntry, RenderOptions};
///
/// let files = vec![FileEntry::new("lib.rs", "pub fn f() {}\n")];
/// let result = render_files(&files, &RenderOptions::default()).unwrap();
/// assert_eq!(result.stats.file_count, 1);
/// ```
pub fn render_files(entries: &[FileEntry], options: &RenderOptions) -> Result<RenderResult> {
    DocxRenderer::new(options.clone())?.render(entries)
}

/// Render files and save the DOCX package to `path`.
pub fn render_to_docx<P: AsRef<Path>>(
    entries: &[FileEntry],
    options: &RenderOptions,
    path: P,
) -> Result<RenderStats> {
    let result = render_files(entries, options)?;
    package::save_docx(&result.document, path)?;
    Ok(result.stats)
}

/// Builder for rendering files into a DOCX package.
///
/// # Example
///
/// ```no_run
/// use dir2docx::{Dir2Docx, FileEntry};
///
/// let files = vec![FileEntry::new("build.sh", "#!/bin/sh\necho hi\n")];
/// Dir2Docx::new()
///     .with_title("Build scripts")
///     .with_association("*.sh", "Bourne Again Shell (bash)")
///     .render(&files)?
///     .save("scripts.docx")?;
/// # Ok::<(), dir2docx::Error>(())
/// ```
pub struct Dir2Docx {
    options: RenderOptions,
    backend: Option<Box<dyn SyntaxBackend>>,
}

impl Dir2Docx {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: RenderOptions::default(),
            backend: None,
        }
    }

    /// Start from existing options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Add a glob → language association.
    pub fn with_association(
        mut self,
        pattern: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        self.options = self.options.with_association(pattern, language);
        self
    }

    /// Set the caption label (and prefix).
    pub fn with_caption_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.options = self
            .options
            .with_caption_prefix(label.clone())
            .with_caption_label(label);
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options = self.options.with_title(title);
        self
    }

    /// Set the document creator.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.options = self.options.with_creator(creator);
        self
    }

    /// Set the creation timestamp.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.options = self.options.with_created(created);
        self
    }

    /// Use a custom syntax backend.
    pub fn with_backend(mut self, backend: Box<dyn SyntaxBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Render the files.
    pub fn render(self, entries: &[FileEntry]) -> Result<Dir2DocxResult> {
        self.render_with_observer(entries, &mut render::NoopObserver)
    }

    /// Render the files, reporting progress to `observer`.
    pub fn render_with_observer(
        self,
        entries: &[FileEntry],
        observer: &mut dyn RenderObserver,
    ) -> Result<Dir2DocxResult> {
        let mut renderer = DocxRenderer::new(self.options)?;
        if let Some(backend) = self.backend {
            renderer = renderer.with_backend(backend);
        }
        let RenderResult { document, stats } = renderer.render_with_observer(entries, observer)?;
        Ok(Dir2DocxResult { document, stats })
    }
}

impl Default for Dir2Docx {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a [`Dir2Docx`] run.
pub struct Dir2DocxResult {
    /// The assembled document
    pub document: Document,
    /// Run statistics
    pub stats: RenderStats,
}

impl Dir2DocxResult {
    /// Package as DOCX bytes.
    pub fn to_docx_bytes(&self) -> Result<Vec<u8>> {
        package::to_docx_bytes(&self.document)
    }

    /// Save as a DOCX file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        package::save_docx(&self.document, path)
    }

    /// Dump the document model as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Get the statistics.
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }
}
