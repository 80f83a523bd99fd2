//! DOCX packaging: serializes a [`Document`] into an OOXML zip container.
//!
//! Every entry carries the same fixed timestamp, so rendering identical
//! input twice yields byte-identical packages.

mod parts;
mod xml;

pub use parts::media_rel_id;
pub use xml::{escape_attr, escape_text, strip_invalid, XmlWriter};

use crate::error::Result;
use crate::model::Document;
use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Package part names in write order (media parts follow).
pub const PART_NAMES: &[&str] = &[
    "[Content_Types].xml",
    "_rels/.rels",
    "docProps/core.xml",
    "docProps/app.xml",
    "word/document.xml",
    "word/styles.xml",
    "word/numbering.xml",
    "word/settings.xml",
    "word/_rels/document.xml.rels",
];

fn text_parts(doc: &Document) -> [String; 9] {
    [
        parts::content_types(doc),
        parts::package_rels(),
        parts::core_props(&doc.metadata),
        parts::app_props(),
        parts::document(doc),
        parts::styles(&doc.styles),
        parts::numbering(&doc.numbering),
        parts::settings(),
        parts::document_rels(doc),
    ]
}

/// Write the package to a seekable writer and return the writer.
pub fn write_docx<W: Write + Seek>(doc: &Document, writer: W) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let xml_options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());
    // media is already compressed
    let media_options = xml_options.compression_method(CompressionMethod::Stored);

    for (name, content) in PART_NAMES.iter().zip(text_parts(doc)) {
        zip.start_file(*name, xml_options)?;
        zip.write_all(content.as_bytes())?;
    }

    for (id, resource) in &doc.resources {
        zip.start_file(format!("word/media/{}", resource.part_name(id)), media_options)?;
        zip.write_all(&resource.data)?;
    }

    log::debug!(
        "packaged {} parts and {} media files",
        PART_NAMES.len(),
        doc.resources.len()
    );
    Ok(zip.finish()?)
}

/// Package the document into memory.
pub fn to_docx_bytes(doc: &Document) -> Result<Vec<u8>> {
    let cursor = write_docx(doc, Cursor::new(Vec::new()))?;
    Ok(cursor.into_inner())
}

/// Package the document into a file, replacing it if it exists.
pub fn save_docx<P: AsRef<Path>>(doc: &Document, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = write_docx(doc, BufWriter::new(file))?;
    writer.flush()?;
    log::info!("wrote {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Paragraph;
    use std::io::Read;

    #[test]
    fn test_package_contains_all_parts() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("hello"));
        let bytes = to_docx_bytes(&doc).unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<String> = archive.file_names().map(str::to_string).collect();
        for part in PART_NAMES {
            assert!(names.iter().any(|n| n == part), "missing {}", part);
        }

        let mut body = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut body)
            .unwrap();
        assert!(body.contains(">hello</w:t>"));
    }

    #[test]
    fn test_package_is_deterministic() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("same"));
        assert_eq!(to_docx_bytes(&doc).unwrap(), to_docx_bytes(&doc).unwrap());
    }
}
