//! Document assembly: from file entries to a [`crate::model::Document`].
//!
//! The [`DocxRenderer`] drives the run. Per text file it selects a
//! tokenizer, turns the tokens into numbered line paragraphs with the
//! [`Assembler`] and the list allocator, and writes a caption built by
//! [`build_caption`]. Image files bypass all of that and become pictures.

mod assembler;
mod context;
mod driver;
mod fields;
mod json;
mod numbering;
mod observer;
mod options;
mod result;

pub use assembler::{assemble_plain, assemble_tokens, code_style_for, Assembler};
pub use context::RenderContext;
pub use driver::{picture_extent, DocxRenderer, EMU_PER_PIXEL};
pub use fields::{
    build_caption, build_reference, ref_instruction, seq_instruction, CAPTION_SEPARATOR,
};
pub use json::{to_json, JsonFormat};
pub use numbering::{allocate, resolve_abstract, ListRequest, FALLBACK_ABSTRACT_ID};
pub use observer::{CompositeObserver, FileOutcome, NoopObserver, RenderObserver};
pub use options::{RenderOptions, EMU_PER_INCH};
pub use result::{RenderResult, RenderStats};
