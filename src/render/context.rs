//! Run-scoped rendering state.

use super::RenderStats;
use crate::source::{CrossRef, CrossRefTable, FileEntry};
use std::collections::BTreeMap;

/// State shared by all files of one run.
///
/// Holds the cross-reference table fixed by the pre-pass, the per-label
/// caption counters and the run statistics. A fresh context per run keeps
/// counters from leaking between runs.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    cross_refs: CrossRefTable,
    sequences: BTreeMap<String, u32>,
    drawing_ids: u32,
    stats: RenderStats,
}

impl RenderContext {
    /// Create a context with the cross-references for `entries`.
    pub fn new(entries: &[FileEntry]) -> Self {
        Self {
            cross_refs: CrossRefTable::from_entries(entries),
            ..Self::default()
        }
    }

    /// The cross-reference table.
    pub fn cross_refs(&self) -> &CrossRefTable {
        &self.cross_refs
    }

    /// Cross-reference of the entry at `index`.
    pub fn cross_ref(&self, index: usize) -> Option<&CrossRef> {
        self.cross_refs.get(index)
    }

    /// Advance the counter of `label` and return its new value.
    pub fn next_sequence(&mut self, label: &str) -> u32 {
        let value = self.sequences.entry(label.to_string()).or_insert(0);
        *value += 1;
        *value
    }

    /// Current value of a label's counter.
    pub fn sequence(&self, label: &str) -> u32 {
        self.sequences.get(label).copied().unwrap_or(0)
    }

    /// Next drawing object id.
    pub fn next_drawing_id(&mut self) -> u32 {
        self.drawing_ids += 1;
        self.drawing_ids
    }

    /// Run statistics so far.
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// Mutable run statistics.
    pub fn stats_mut(&mut self) -> &mut RenderStats {
        &mut self.stats
    }

    /// Consume the context, keeping the statistics.
    pub fn into_stats(self) -> RenderStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequences_are_per_label() {
        let mut ctx = RenderContext::default();
        assert_eq!(ctx.next_sequence("File"), 1);
        assert_eq!(ctx.next_sequence("File"), 2);
        assert_eq!(ctx.next_sequence("Figure"), 1);
        assert_eq!(ctx.sequence("File"), 2);
        assert_eq!(ctx.sequence("Table"), 0);
    }

    #[test]
    fn test_cross_refs_from_entries() {
        let entries = vec![FileEntry::new("a.rs", ""), FileEntry::new("b.rs", "")];
        let ctx = RenderContext::new(&entries);
        assert_eq!(ctx.cross_refs().len(), 2);
        assert_eq!(ctx.cross_ref(1).unwrap().id, 2);
        assert!(ctx.cross_ref(2).is_none());
    }

    #[test]
    fn test_contexts_do_not_share_counters() {
        let mut first = RenderContext::default();
        first.next_sequence("File");
        let second = RenderContext::default();
        assert_eq!(second.sequence("File"), 0);
    }
}
