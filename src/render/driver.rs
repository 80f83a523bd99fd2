//! Document driver: one caption and one body section per file.

use super::assembler::{assemble_plain, assemble_tokens};
use super::fields::build_caption;
use super::numbering::ListRequest;
use super::{FileOutcome, NoopObserver, RenderContext, RenderObserver, RenderOptions, RenderResult};
use crate::error::{Error, Result};
use crate::lexer::{LexerSelector, SyntaxBackend, SyntectBackend};
use crate::model::{Block, Document, Paragraph, Picture, Resource, Table};
use crate::source::{is_image_path, FileEntry};
use image::{ImageFormat, ImageReader};
use std::borrow::Cow;
use std::io::Cursor;

/// EMU per pixel at 96 dpi.
pub const EMU_PER_PIXEL: u64 = 9_525;

/// Renders an ordered file list into a [`Document`].
///
/// Files are processed sequentially in input order. Text files become a
/// caption followed by a one-cell table of numbered lines; image files
/// become a caption followed by a picture. Highlighting problems only
/// affect the file at hand; anything else aborts the run.
pub struct DocxRenderer {
    options: RenderOptions,
    selector: LexerSelector,
    backend: Box<dyn SyntaxBackend>,
}

impl DocxRenderer {
    /// Create a renderer using the syntect backend.
    ///
    /// Fails if an association pattern is not a valid glob.
    pub fn new(options: RenderOptions) -> Result<Self> {
        let selector = LexerSelector::new(&options.associations)?;
        Ok(Self {
            options,
            selector,
            backend: Box::new(SyntectBackend::new()),
        })
    }

    /// Replace the syntax backend.
    pub fn with_backend(mut self, backend: Box<dyn SyntaxBackend>) -> Self {
        self.backend = backend;
        self
    }

    /// Render options in use.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render all entries.
    pub fn render(&self, entries: &[FileEntry]) -> Result<RenderResult> {
        self.render_with_observer(entries, &mut NoopObserver)
    }

    /// Render all entries, reporting progress to `observer`.
    pub fn render_with_observer(
        &self,
        entries: &[FileEntry],
        observer: &mut dyn RenderObserver,
    ) -> Result<RenderResult> {
        let mut document = Document::new();
        document.styles.register_code_styles()?;
        document.metadata.title = self.options.title.clone();
        document.metadata.creator = self.options.creator.clone();
        document.metadata.created = self.options.created;

        // cross-references are fixed before the first caption is written
        let mut ctx = RenderContext::new(entries);
        let total = entries.len();

        for (index, entry) in entries.iter().enumerate() {
            observer.file_started(index, total, &entry.path);
            let lists_before = document.numbering.instance_count();

            self.add_caption(&mut document, &mut ctx, index, entry);
            let outcome = if is_image_path(&entry.path, &self.options.image_extensions) {
                self.add_picture(&mut document, &mut ctx, entry)?
            } else {
                self.add_listing(&mut document, entry)?
            };

            let stats = ctx.stats_mut();
            match &outcome {
                FileOutcome::Highlighted { lines, .. } => stats.add_highlighted(*lines),
                FileOutcome::Plain { lines, .. } => stats.add_fallback(*lines),
                FileOutcome::Picture { .. } => stats.add_image(),
            }
            stats.list_count += (document.numbering.instance_count() - lists_before) as u32;

            observer.file_finished(index, &outcome);
        }

        document.metadata.file_count = total as u32;
        let stats = ctx.into_stats();
        log::info!(
            "rendered {} files ({} highlighted, {} plain, {} pictures, {} lines)",
            stats.file_count,
            stats.highlighted_count,
            stats.fallback_count,
            stats.image_count,
            stats.line_count
        );

        Ok(RenderResult::new(document, stats))
    }

    fn add_caption(
        &self,
        document: &mut Document,
        ctx: &mut RenderContext,
        index: usize,
        entry: &FileEntry,
    ) {
        let mut caption = match &self.options.caption_style {
            Some(style) => Paragraph::with_style(style.clone()),
            None => Paragraph::new(),
        };
        let refs: Vec<_> = ctx.cross_ref(index).cloned().into_iter().collect();
        build_caption(
            &mut caption,
            &self.options.caption_label,
            &self.options.caption_prefix,
            &refs,
            ctx,
        );
        caption.add_text(entry.path.clone());
        document.add_paragraph(caption);
    }

    fn add_listing(&self, document: &mut Document, entry: &FileEntry) -> Result<FileOutcome> {
        let text = std::str::from_utf8(&entry.content)
            .map_err(|e| Error::Encoding(format!("{}: {}", entry.path, e)))?;
        let content = normalize_line_endings(text);

        let request = ListRequest {
            style_id: &self.options.code_style,
            level: Some(0),
            kind: self.options.numbering_kind,
        };

        let highlighted = self
            .selector
            .select(self.backend.as_ref(), &entry.path, &content)
            .and_then(|tokenizer| {
                let tokens = tokenizer.tokenize(&content)?;
                Ok((tokenizer.language().name.clone(), tokens))
            });

        let (paragraphs, outcome) = match highlighted {
            Ok((language, tokens)) => {
                let paragraphs = assemble_tokens(&mut document.numbering, request, &tokens);
                log::debug!(
                    "{}: {} ({} tokens, {} lines)",
                    entry.path,
                    language,
                    tokens.len(),
                    paragraphs.len()
                );
                let lines = paragraphs.len();
                (paragraphs, FileOutcome::Highlighted { language, lines })
            }
            Err(e) if e.is_recoverable() => {
                log::warn!("{}: rendering without highlighting ({})", entry.path, e);
                let paragraphs = assemble_plain(&mut document.numbering, request, &content);
                let lines = paragraphs.len();
                (
                    paragraphs,
                    FileOutcome::Plain {
                        reason: e.to_string(),
                        lines,
                    },
                )
            }
            Err(e) => return Err(e),
        };

        document.add_block(Block::Table(Table::single_cell(
            Some(self.options.code_table_style.clone()),
            paragraphs,
        )));
        Ok(outcome)
    }

    fn add_picture(
        &self,
        document: &mut Document,
        ctx: &mut RenderContext,
        entry: &FileEntry,
    ) -> Result<FileOutcome> {
        let reader =
            ImageReader::new(Cursor::new(entry.content.as_slice())).with_guessed_format()?;
        let format = reader
            .format()
            .or_else(|| entry.extension().and_then(ImageFormat::from_extension));
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| Error::Image(format!("{}: {}", entry.path, e)))?;
        if width == 0 || height == 0 {
            return Err(Error::Image(format!("{}: empty image", entry.path)));
        }

        let mime_type = format
            .map(|f| f.to_mime_type())
            .unwrap_or("application/octet-stream");

        let (width_emu, height_emu) =
            picture_extent(width, height, self.options.max_picture_width);
        let resource = Resource::image(entry.content.clone(), mime_type, width, height)
            .with_source_path(entry.path.clone());
        let resource_id = document.add_resource(resource);

        log::debug!("{}: picture {}x{} as {}", entry.path, width, height, resource_id);
        document.add_block(Block::Picture(Picture {
            resource_id,
            drawing_id: ctx.next_drawing_id(),
            name: entry.file_name().to_string(),
            width_emu,
            height_emu,
        }));

        Ok(FileOutcome::Picture { width, height })
    }
}

impl std::fmt::Debug for DocxRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocxRenderer")
            .field("options", &self.options)
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}

/// Picture size in EMU, scaled down proportionally to `max_width`.
pub fn picture_extent(width: u32, height: u32, max_width: u64) -> (u64, u64) {
    let width_emu = u64::from(width) * EMU_PER_PIXEL;
    let height_emu = u64::from(height) * EMU_PER_PIXEL;
    if max_width == 0 || width_emu <= max_width {
        return (width_emu, height_emu);
    }
    (max_width, height_emu * max_width / width_emu)
}

/// Turn CRLF and lone CR line breaks into LF.
fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}
