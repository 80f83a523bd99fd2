//! Caption and cross-reference fields.

use super::RenderContext;
use crate::model::{FieldCharKind, Inline, Paragraph, TextRun, STRONG_STYLE};
use crate::source::CrossRef;

/// Separator written between the caption number and the caption text.
pub const CAPTION_SEPARATOR: &str = ": ";

/// Instruction of an auto-incrementing caption field.
pub fn seq_instruction(label: &str) -> String {
    format!(" SEQ {} \\* ARABIC ", label)
}

/// Instruction of a field showing a bookmark's current text.
pub fn ref_instruction(target: &str) -> String {
    format!(" REF {} \\h ", target)
}

/// Append a caption head to `paragraph` and return the caption number.
///
/// Emits `"<prefix> "` in the strong style, then one bookmark start per
/// cross-reference, the SEQ field for `label` with the counter value from
/// `ctx` as its cached result, the separator and the bookmark ends. The
/// caller appends the caption text afterwards, outside the bookmarks.
///
/// Bookmark ids must be unique in the document; [`CrossRef`] ids from one
/// [`crate::source::CrossRefTable`] are.
pub fn build_caption(
    paragraph: &mut Paragraph,
    label: &str,
    prefix: &str,
    refs: &[CrossRef],
    ctx: &mut RenderContext,
) -> u32 {
    let value = ctx.next_sequence(label);

    if !prefix.is_empty() {
        paragraph.push(Inline::Run(TextRun::styled(
            format!("{} ", prefix),
            STRONG_STYLE,
        )));
    }

    for cross_ref in refs {
        paragraph.push(Inline::BookmarkStart {
            id: cross_ref.id,
            name: cross_ref.name.clone(),
        });
    }

    paragraph.push(Inline::FieldChar {
        kind: FieldCharKind::Begin,
    });
    paragraph.push(Inline::Instruction {
        code: seq_instruction(label),
    });
    paragraph.push(Inline::FieldChar {
        kind: FieldCharKind::Separate,
    });
    paragraph.add_text(value.to_string());
    paragraph.push(Inline::FieldChar {
        kind: FieldCharKind::End,
    });
    paragraph.add_text(CAPTION_SEPARATOR);

    for cross_ref in refs {
        paragraph.push(Inline::BookmarkEnd { id: cross_ref.id });
    }

    value
}

/// Inline elements of a field resolving to the text of bookmark `target`.
///
/// No cached result is written; viewers fill it in on field update.
pub fn build_reference(target: &str) -> Vec<Inline> {
    vec![
        Inline::FieldChar {
            kind: FieldCharKind::Begin,
        },
        Inline::Instruction {
            code: ref_instruction(target),
        },
        Inline::FieldChar {
            kind: FieldCharKind::End,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cross_ref(id: u32, name: &str) -> CrossRef {
        CrossRef {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_caption_layout() {
        let mut ctx = RenderContext::default();
        let mut p = Paragraph::with_style("Caption");
        let value = build_caption(&mut p, "File", "File", &[cross_ref(4, "src/a.rs")], &mut ctx);
        p.add_text("src/a.rs");

        assert_eq!(value, 1);
        assert_eq!(p.plain_text(), "File 1: src/a.rs");
        assert_eq!(
            p.content[0],
            Inline::Run(TextRun::styled("File ", STRONG_STYLE))
        );
        assert_eq!(
            p.content[1],
            Inline::BookmarkStart {
                id: 4,
                name: "src/a.rs".to_string()
            }
        );
        assert_eq!(
            p.content[3],
            Inline::Instruction {
                code: " SEQ File \\* ARABIC ".to_string()
            }
        );

        // number and separator sit inside the bookmark, the path after it
        let end = p
            .content
            .iter()
            .position(|i| matches!(i, Inline::BookmarkEnd { id: 4 }))
            .unwrap();
        assert_eq!(p.content[end - 1], Inline::Run(TextRun::new(": ")));
        assert_eq!(p.content[end + 1], Inline::Run(TextRun::new("src/a.rs")));
    }

    #[test]
    fn test_caption_counters_per_label() {
        let mut ctx = RenderContext::default();
        let mut values = Vec::new();
        for label in ["File", "File", "Figure", "File"] {
            let mut p = Paragraph::new();
            values.push(build_caption(&mut p, label, label, &[], &mut ctx));
        }
        assert_eq!(values, vec![1, 2, 1, 3]);
    }

    #[test]
    fn test_caption_multiple_refs() {
        let mut ctx = RenderContext::default();
        let mut p = Paragraph::new();
        build_caption(
            &mut p,
            "File",
            "",
            &[cross_ref(1, "a"), cross_ref(2, "b")],
            &mut ctx,
        );

        let starts = p
            .content
            .iter()
            .filter(|i| matches!(i, Inline::BookmarkStart { .. }))
            .count();
        let ends = p
            .content
            .iter()
            .filter(|i| matches!(i, Inline::BookmarkEnd { .. }))
            .count();
        assert_eq!((starts, ends), (2, 2));
        // empty prefix emits no strong run
        assert_eq!(p.plain_text(), "1: ");
    }

    #[test]
    fn test_reference_field() {
        let inlines = build_reference("src/a.rs");
        assert_eq!(inlines.len(), 3);
        assert_eq!(
            inlines[1],
            Inline::Instruction {
                code: " REF src/a.rs \\h ".to_string()
            }
        );
        assert!(!inlines.iter().any(|i| matches!(i, Inline::Run(_))));
    }
}
