//! JSON dump of the assembled document model.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
///
/// Media bytes are left out; resources keep their type and size.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ListBinding, Paragraph, Resource};

    #[test]
    fn test_to_json_pretty() {
        let mut doc = Document::new();
        doc.metadata.title = Some("Test".to_string());
        let mut line = Paragraph::with_style("ListNumber");
        line.set_numbering(ListBinding { num_id: 3, level: 0 });
        line.add_run("fn", Some("Keyword"));
        doc.add_paragraph(line);

        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("Keyword"));
        assert!(json.contains("\"num_id\": 3"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("x"));

        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_media_bytes_not_dumped() {
        let mut doc = Document::new();
        doc.add_resource(Resource::image(vec![7; 64], "image/png", 8, 8));

        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(json.contains("image/png"));
        assert!(!json.contains("\"data\""));
    }

    #[test]
    fn test_json_round_trip_rebuilds_numbering_index() {
        let doc = Document::new();
        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(
            back.numbering
                .find_abstract(&crate::model::DefinitionKey::Style("ListNumber".into()), 0),
            Some(2)
        );
    }
}
