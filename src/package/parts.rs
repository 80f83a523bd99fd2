//! WordprocessingML parts of a document package.

use super::xml::XmlWriter;
use crate::model::{
    AbstractNum, Block, Document, Inline, LevelDef, Metadata, NumInstance, NumberingPool,
    Paragraph, Picture, RunProperties, Style, StyleCatalog, StyleKind, Table, TextRun,
};
use chrono::SecondsFormat;
use std::collections::BTreeSet;

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
const NS_PACKAGE_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_NUMBERING: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
const REL_SETTINGS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings";
const REL_IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// Usable text width of a letter page with one-inch margins, in twips.
const TEXT_WIDTH_TWIPS: usize = 9360;

/// Relationship id of an embedded media resource.
pub fn media_rel_id(resource_id: &str) -> String {
    format!("rId-{}", resource_id)
}

/// `[Content_Types].xml`
pub fn content_types(doc: &Document) -> String {
    let mut xml = XmlWriter::new();
    xml.open(
        "Types",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/package/2006/content-types",
        )],
    );
    xml.empty(
        "Default",
        &[
            ("Extension", "rels"),
            (
                "ContentType",
                "application/vnd.openxmlformats-package.relationships+xml",
            ),
        ],
    );
    xml.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    );

    let media: BTreeSet<(&str, &str)> = doc
        .resources
        .values()
        .map(|r| (r.extension(), r.mime_type.as_str()))
        .collect();
    let mut seen = BTreeSet::new();
    for (extension, mime_type) in media {
        if seen.insert(extension) {
            xml.empty(
                "Default",
                &[("Extension", extension), ("ContentType", mime_type)],
            );
        }
    }

    let overrides = [
        (
            "/word/document.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        ),
        (
            "/word/styles.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
        ),
        (
            "/word/numbering.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml",
        ),
        (
            "/word/settings.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml",
        ),
        (
            "/docProps/core.xml",
            "application/vnd.openxmlformats-package.core-properties+xml",
        ),
        (
            "/docProps/app.xml",
            "application/vnd.openxmlformats-officedocument.extended-properties+xml",
        ),
    ];
    for (part, content_type) in overrides {
        xml.empty(
            "Override",
            &[("PartName", part), ("ContentType", content_type)],
        );
    }
    xml.close("Types");
    xml.finish()
}

/// `_rels/.rels`
pub fn package_rels() -> String {
    relationships(&[
        ("rId1", REL_OFFICE_DOCUMENT, "word/document.xml".to_string()),
        ("rId2", REL_CORE, "docProps/core.xml".to_string()),
        ("rId3", REL_EXTENDED, "docProps/app.xml".to_string()),
    ])
}

/// `word/_rels/document.xml.rels`
pub fn document_rels(doc: &Document) -> String {
    let media: Vec<(String, String)> = doc
        .resources
        .iter()
        .map(|(id, r)| (media_rel_id(id), format!("media/{}", r.part_name(id))))
        .collect();

    let mut rels = vec![
        ("rId1", REL_STYLES, "styles.xml".to_string()),
        ("rId2", REL_NUMBERING, "numbering.xml".to_string()),
        ("rId3", REL_SETTINGS, "settings.xml".to_string()),
    ];
    for (id, target) in &media {
        rels.push((id.as_str(), REL_IMAGE, target.clone()));
    }
    relationships(&rels)
}

fn relationships(rels: &[(&str, &str, String)]) -> String {
    let mut xml = XmlWriter::new();
    xml.open("Relationships", &[("xmlns", NS_PACKAGE_RELS)]);
    for (id, kind, target) in rels {
        xml.empty(
            "Relationship",
            &[("Id", id), ("Type", kind), ("Target", target)],
        );
    }
    xml.close("Relationships");
    xml.finish()
}

/// `docProps/core.xml`
pub fn core_props(metadata: &Metadata) -> String {
    let mut xml = XmlWriter::new();
    xml.open(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    );
    if let Some(title) = &metadata.title {
        xml.leaf("dc:title", &[], title);
    }
    if let Some(creator) = &metadata.creator {
        xml.leaf("dc:creator", &[], creator);
    }
    if let Some(description) = &metadata.description {
        xml.leaf("dc:description", &[], description);
    }
    if let Some(created) = &metadata.created {
        xml.leaf(
            "dcterms:created",
            &[("xsi:type", "dcterms:W3CDTF")],
            &created.to_rfc3339_opts(SecondsFormat::Secs, true),
        );
    }
    xml.close("cp:coreProperties");
    xml.finish()
}

/// `docProps/app.xml`
pub fn app_props() -> String {
    let mut xml = XmlWriter::new();
    xml.open(
        "Properties",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
        )],
    );
    xml.leaf("Application", &[], env!("CARGO_PKG_NAME"));
    xml.close("Properties");
    xml.finish()
}

/// `word/settings.xml`
pub fn settings() -> String {
    let mut xml = XmlWriter::new();
    xml.open("w:settings", &[("xmlns:w", NS_W)]);
    xml.empty("w:defaultTabStop", &[("w:val", "720")]);
    xml.open("w:compat", &[]);
    xml.empty(
        "w:compatSetting",
        &[
            ("w:name", "compatibilityMode"),
            ("w:uri", "http://schemas.microsoft.com/office/word"),
            ("w:val", "15"),
        ],
    );
    xml.close("w:compat");
    xml.close("w:settings");
    xml.finish()
}

/// `word/styles.xml`
pub fn styles(catalog: &StyleCatalog) -> String {
    let mut xml = XmlWriter::new();
    xml.open("w:styles", &[("xmlns:w", NS_W)]);
    xml.raw(concat!(
        "<w:docDefaults><w:rPrDefault><w:rPr>",
        "<w:rFonts w:ascii=\"Calibri\" w:hAnsi=\"Calibri\" w:eastAsia=\"Calibri\" w:cs=\"Calibri\"/>",
        "<w:sz w:val=\"22\"/><w:szCs w:val=\"22\"/>",
        "</w:rPr></w:rPrDefault><w:pPrDefault/></w:docDefaults>"
    ));
    for style in &catalog.styles {
        write_style(&mut xml, style);
    }
    xml.close("w:styles");
    xml.finish()
}

fn write_style(xml: &mut XmlWriter, style: &Style) {
    let mut attrs = vec![("w:type", style.kind.as_str())];
    if style.is_default {
        attrs.push(("w:default", "1"));
    }
    attrs.push(("w:styleId", style.id.as_str()));
    xml.open("w:style", &attrs);
    xml.empty("w:name", &[("w:val", &style.name)]);
    if let Some(parent) = &style.based_on {
        xml.empty("w:basedOn", &[("w:val", parent)]);
    }
    if style.hidden {
        xml.empty("w:hidden", &[]);
    }
    if style.quick_style {
        xml.empty("w:qFormat", &[]);
    }
    if style.locked {
        xml.empty("w:locked", &[]);
    }

    if style.kind == StyleKind::Paragraph
        && (style.numbering.is_some() || style.space_after.is_some())
    {
        xml.open("w:pPr", &[]);
        if let Some(binding) = style.numbering {
            write_num_pr(xml, binding.level, binding.num_id);
        }
        if let Some(after) = style.space_after {
            xml.empty("w:spacing", &[("w:after", &after.to_string())]);
        }
        xml.close("w:pPr");
    }

    write_run_properties(xml, &style.run);

    if style.kind == StyleKind::Table {
        xml.open("w:tblPr", &[]);
        if style.borders {
            xml.open("w:tblBorders", &[]);
            for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
                xml.empty(
                    &format!("w:{}", edge),
                    &[
                        ("w:val", "single"),
                        ("w:sz", "4"),
                        ("w:space", "0"),
                        ("w:color", "auto"),
                    ],
                );
            }
            xml.close("w:tblBorders");
        }
        xml.close("w:tblPr");
    }
    xml.close("w:style");
}

fn write_run_properties(xml: &mut XmlWriter, run: &RunProperties) {
    if *run == RunProperties::default() {
        return;
    }
    xml.open("w:rPr", &[]);
    if let Some(font) = &run.font {
        xml.empty(
            "w:rFonts",
            &[
                ("w:ascii", font),
                ("w:hAnsi", font),
                ("w:eastAsia", font),
                ("w:cs", font),
            ],
        );
    }
    if run.bold {
        xml.empty("w:b", &[]);
    }
    if run.italic {
        xml.empty("w:i", &[]);
    }
    if let Some(color) = &run.color {
        xml.empty("w:color", &[("w:val", color)]);
    }
    if let Some(size) = run.size {
        let size = size.to_string();
        xml.empty("w:sz", &[("w:val", &size)]);
        xml.empty("w:szCs", &[("w:val", &size)]);
    }
    xml.close("w:rPr");
}

/// `word/numbering.xml`
///
/// All abstract definitions precede all list instances.
pub fn numbering(pool: &NumberingPool) -> String {
    let mut xml = XmlWriter::new();
    xml.open("w:numbering", &[("xmlns:w", NS_W)]);
    for def in pool.abstracts() {
        write_abstract(&mut xml, def);
    }
    for instance in pool.instances() {
        write_instance(&mut xml, instance);
    }
    xml.close("w:numbering");
    xml.finish()
}

fn write_abstract(xml: &mut XmlWriter, def: &AbstractNum) {
    xml.open("w:abstractNum", &[("w:abstractNumId", &def.id.to_string())]);
    let kind = if def.is_single_level() {
        "singleLevel"
    } else {
        "multilevel"
    };
    xml.empty("w:multiLevelType", &[("w:val", kind)]);
    for level in &def.levels {
        write_level(xml, level);
    }
    xml.close("w:abstractNum");
}

fn write_level(xml: &mut XmlWriter, level: &LevelDef) {
    xml.open("w:lvl", &[("w:ilvl", &level.level.to_string())]);
    xml.empty("w:start", &[("w:val", &level.start.to_string())]);
    xml.empty("w:numFmt", &[("w:val", level.format.as_str())]);
    if let Some(style) = &level.paragraph_style {
        xml.empty("w:pStyle", &[("w:val", style)]);
    }
    xml.empty("w:lvlText", &[("w:val", &level.text)]);
    xml.empty("w:lvlJc", &[("w:val", "left")]);
    xml.open("w:pPr", &[]);
    xml.empty(
        "w:ind",
        &[
            ("w:left", &level.indent.to_string()),
            ("w:hanging", &level.hanging.to_string()),
        ],
    );
    xml.close("w:pPr");
    xml.close("w:lvl");
}

fn write_instance(xml: &mut XmlWriter, instance: &NumInstance) {
    xml.open("w:num", &[("w:numId", &instance.num_id.to_string())]);
    xml.empty(
        "w:abstractNumId",
        &[("w:val", &instance.abstract_id.to_string())],
    );
    for o in &instance.overrides {
        xml.open("w:lvlOverride", &[("w:ilvl", &o.level.to_string())]);
        xml.empty("w:startOverride", &[("w:val", &o.start_override.to_string())]);
        xml.close("w:lvlOverride");
    }
    xml.close("w:num");
}

/// `word/document.xml`
pub fn document(doc: &Document) -> String {
    let mut xml = XmlWriter::new();
    xml.open(
        "w:document",
        &[
            ("xmlns:w", NS_W),
            ("xmlns:r", NS_R),
            ("xmlns:wp", NS_WP),
            ("xmlns:a", NS_A),
            ("xmlns:pic", NS_PIC),
        ],
    );
    xml.open("w:body", &[]);
    for block in &doc.body {
        match block {
            Block::Paragraph(p) => write_paragraph(&mut xml, p),
            Block::Table(t) => write_table(&mut xml, t),
            Block::Picture(pic) => write_picture(&mut xml, pic),
        }
    }
    xml.raw(concat!(
        "<w:sectPr><w:pgSz w:w=\"12240\" w:h=\"15840\"/>",
        "<w:pgMar w:top=\"1440\" w:right=\"1440\" w:bottom=\"1440\" w:left=\"1440\" ",
        "w:header=\"720\" w:footer=\"720\" w:gutter=\"0\"/></w:sectPr>"
    ));
    xml.close("w:body");
    xml.close("w:document");
    xml.finish()
}

fn write_num_pr(xml: &mut XmlWriter, level: u8, num_id: u32) {
    xml.open("w:numPr", &[]);
    xml.empty("w:ilvl", &[("w:val", &level.to_string())]);
    xml.empty("w:numId", &[("w:val", &num_id.to_string())]);
    xml.close("w:numPr");
}

fn write_paragraph(xml: &mut XmlWriter, paragraph: &Paragraph) {
    xml.open("w:p", &[]);
    if paragraph.style_id.is_some() || paragraph.numbering.is_some() {
        xml.open("w:pPr", &[]);
        if let Some(style) = &paragraph.style_id {
            xml.empty("w:pStyle", &[("w:val", style)]);
        }
        if let Some(binding) = paragraph.numbering {
            write_num_pr(xml, binding.level, binding.num_id);
        }
        xml.close("w:pPr");
    }
    for inline in &paragraph.content {
        write_inline(xml, inline);
    }
    xml.close("w:p");
}

fn write_inline(xml: &mut XmlWriter, inline: &Inline) {
    match inline {
        Inline::Run(run) => write_run(xml, run),
        Inline::BookmarkStart { id, name } => {
            xml.empty(
                "w:bookmarkStart",
                &[("w:id", &id.to_string()), ("w:name", name)],
            );
        }
        Inline::BookmarkEnd { id } => {
            xml.empty("w:bookmarkEnd", &[("w:id", &id.to_string())]);
        }
        Inline::FieldChar { kind } => {
            xml.open("w:r", &[]);
            xml.empty("w:fldChar", &[("w:fldCharType", kind.as_str())]);
            xml.close("w:r");
        }
        Inline::Instruction { code } => {
            xml.open("w:r", &[]);
            xml.leaf("w:instrText", &[("xml:space", "preserve")], code);
            xml.close("w:r");
        }
    }
}

fn write_run(xml: &mut XmlWriter, run: &TextRun) {
    if run.is_empty() {
        return;
    }
    xml.open("w:r", &[]);
    if let Some(style) = &run.style_id {
        xml.open("w:rPr", &[]);
        xml.empty("w:rStyle", &[("w:val", style)]);
        xml.close("w:rPr");
    }
    let mut pieces = run.text.split('\t');
    if let Some(first) = pieces.next() {
        write_text(xml, first);
    }
    for piece in pieces {
        xml.empty("w:tab", &[]);
        write_text(xml, piece);
    }
    xml.close("w:r");
}

fn write_text(xml: &mut XmlWriter, text: &str) {
    if !text.is_empty() {
        xml.leaf("w:t", &[("xml:space", "preserve")], text);
    }
}

fn write_table(xml: &mut XmlWriter, table: &Table) {
    let columns = table.column_count().max(1);
    let column_width = (TEXT_WIDTH_TWIPS / columns).to_string();

    xml.open("w:tbl", &[]);
    xml.open("w:tblPr", &[]);
    if let Some(style) = &table.style_id {
        xml.empty("w:tblStyle", &[("w:val", style)]);
    }
    xml.empty("w:tblW", &[("w:w", "5000"), ("w:type", "pct")]);
    xml.empty("w:tblLook", &[("w:val", "04A0")]);
    xml.close("w:tblPr");

    xml.open("w:tblGrid", &[]);
    for _ in 0..columns {
        xml.empty("w:gridCol", &[("w:w", &column_width)]);
    }
    xml.close("w:tblGrid");

    for row in &table.rows {
        xml.open("w:tr", &[]);
        for cell in &row.cells {
            xml.open("w:tc", &[]);
            xml.open("w:tcPr", &[]);
            xml.empty("w:tcW", &[("w:w", &column_width), ("w:type", "dxa")]);
            xml.close("w:tcPr");
            if cell.paragraphs.is_empty() {
                xml.empty("w:p", &[]);
            }
            for paragraph in &cell.paragraphs {
                write_paragraph(xml, paragraph);
            }
            xml.close("w:tc");
        }
        xml.close("w:tr");
    }
    xml.close("w:tbl");
}

fn write_picture(xml: &mut XmlWriter, picture: &Picture) {
    let cx = picture.width_emu.to_string();
    let cy = picture.height_emu.to_string();
    let drawing_id = picture.drawing_id.to_string();
    let rel_id = media_rel_id(&picture.resource_id);

    xml.open("w:p", &[]);
    xml.open("w:r", &[]);
    xml.open("w:drawing", &[]);
    xml.open(
        "wp:inline",
        &[("distT", "0"), ("distB", "0"), ("distL", "0"), ("distR", "0")],
    );
    xml.empty("wp:extent", &[("cx", &cx), ("cy", &cy)]);
    xml.empty("wp:docPr", &[("id", &drawing_id), ("name", &picture.name)]);
    xml.open("wp:cNvGraphicFramePr", &[]);
    xml.empty("a:graphicFrameLocks", &[("noChangeAspect", "1")]);
    xml.close("wp:cNvGraphicFramePr");
    xml.open("a:graphic", &[]);
    xml.open("a:graphicData", &[("uri", NS_PIC)]);
    xml.open("pic:pic", &[]);
    xml.open("pic:nvPicPr", &[]);
    xml.empty("pic:cNvPr", &[("id", "0"), ("name", &picture.name)]);
    xml.empty("pic:cNvPicPr", &[]);
    xml.close("pic:nvPicPr");
    xml.open("pic:blipFill", &[]);
    xml.empty("a:blip", &[("r:embed", &rel_id)]);
    xml.raw("<a:stretch><a:fillRect/></a:stretch>");
    xml.close("pic:blipFill");
    xml.open("pic:spPr", &[]);
    xml.open("a:xfrm", &[]);
    xml.empty("a:off", &[("x", "0"), ("y", "0")]);
    xml.empty("a:ext", &[("cx", &cx), ("cy", &cy)]);
    xml.close("a:xfrm");
    xml.raw("<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom>");
    xml.close("pic:spPr");
    xml.close("pic:pic");
    xml.close("a:graphicData");
    xml.close("a:graphic");
    xml.close("wp:inline");
    xml.close("w:drawing");
    xml.close("w:r");
    xml.close("w:p");
}
