//! List instance allocation over the shared numbering pool.
//!
//! Every restart group gets its own list instance whose first level
//! restarts at 1, but instances share abstract definitions: the pool only
//! grows by one instance per group, never by one definition per file.

use crate::model::{DefinitionKey, ListBinding, NumberingKind, NumberingPool, Paragraph};

/// Abstract definition used when nothing matches; present in every base pool.
pub const FALLBACK_ABSTRACT_ID: u32 = 0;

/// What kind of list a paragraph wants.
#[derive(Debug, Clone, Copy)]
pub struct ListRequest<'a> {
    /// Paragraph style of the paragraph
    pub style_id: &'a str,

    /// Requested level (`None` = 0 for new groups)
    pub level: Option<u8>,

    /// Ordered or bulleted
    pub kind: NumberingKind,
}

impl<'a> ListRequest<'a> {
    /// Ordered list request for a style at level 0.
    pub fn ordered(style_id: &'a str) -> Self {
        Self {
            style_id,
            level: Some(0),
            kind: NumberingKind::Ordered,
        }
    }
}

/// Bind a paragraph to a list instance.
///
/// With `continue_prev` bound to a list, its instance and level are reused
/// and the pool is left untouched. Otherwise a new restart group starts: an
/// abstract definition is resolved (by style, then by kind, then the
/// fallback) and a new instance with a start override of 1 is created.
pub fn allocate(
    pool: &mut NumberingPool,
    request: &ListRequest<'_>,
    continue_prev: Option<&Paragraph>,
) -> ListBinding {
    if let Some(binding) = continue_prev.and_then(|p| p.numbering) {
        return binding;
    }

    let level = request.level.unwrap_or(0);
    let abstract_id = resolve_abstract(pool, request.style_id, request.kind, level);
    let num_id = pool.add_num(abstract_id);
    pool.add_start_override(num_id, level, 1);
    log::trace!(
        "list {} -> abstract {} (style {}, level {})",
        num_id,
        abstract_id,
        request.style_id,
        level
    );
    ListBinding { num_id, level }
}

/// Pick the abstract definition for a new restart group.
pub fn resolve_abstract(
    pool: &NumberingPool,
    style_id: &str,
    kind: NumberingKind,
    level: u8,
) -> u32 {
    pool.find_abstract(&DefinitionKey::Style(style_id.to_string()), level)
        .or_else(|| pool.find_abstract(&DefinitionKey::Format(kind.format()), level))
        .unwrap_or(FALLBACK_ABSTRACT_ID)
}
