//! Numbering definitions: abstract list templates and the list instances bound to them.
//!
//! The pool keeps an index from `(style or format, level)` to the abstract
//! definitions declaring that level, split into single-level and any-level
//! candidates. Lookups never scan the definitions themselves.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Number format of one list level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberFormat {
    /// 1, 2, 3, ...
    Decimal,
    /// Bullet glyph
    Bullet,
}

impl NumberFormat {
    /// OOXML `w:numFmt` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberFormat::Decimal => "decimal",
            NumberFormat::Bullet => "bullet",
        }
    }
}

/// Ordered or bulleted list request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberingKind {
    /// Counted list
    #[default]
    Ordered,
    /// Bulleted list
    Bulleted,
}

impl NumberingKind {
    /// Level format used when searching definitions by kind.
    pub fn format(&self) -> NumberFormat {
        match self {
            NumberingKind::Ordered => NumberFormat::Decimal,
            NumberingKind::Bulleted => NumberFormat::Bullet,
        }
    }
}

/// One level of an abstract definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDef {
    /// Level index (`w:ilvl`)
    pub level: u8,

    /// Number format
    pub format: NumberFormat,

    /// Level text, e.g. "%1." or a bullet glyph
    pub text: String,

    /// Start value
    pub start: u32,

    /// Paragraph style bound to this level
    pub paragraph_style: Option<String>,

    /// Left indent in twips
    pub indent: u32,

    /// Hanging indent in twips
    pub hanging: u32,
}

impl LevelDef {
    /// Create a level with conventional text and indentation.
    pub fn new(level: u8, format: NumberFormat) -> Self {
        let text = match format {
            NumberFormat::Bullet => "\u{2022}".to_string(),
            NumberFormat::Decimal => format!("%{}.", level + 1),
        };
        Self {
            level,
            format,
            text,
            start: 1,
            paragraph_style: None,
            indent: 360 * (u32::from(level) + 1),
            hanging: 360,
        }
    }

    /// Bind a paragraph style to this level.
    pub fn with_style(mut self, style_id: impl Into<String>) -> Self {
        self.paragraph_style = Some(style_id.into());
        self
    }
}

/// A document-global list template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbstractNum {
    /// Abstract id (`w:abstractNumId`)
    pub id: u32,

    /// Levels in ascending order
    pub levels: Vec<LevelDef>,
}

impl AbstractNum {
    /// Definition with a single level 0 bound to a paragraph style.
    pub fn single_level(id: u32, format: NumberFormat, style_id: Option<&str>) -> Self {
        let mut level = LevelDef::new(0, format);
        level.paragraph_style = style_id.map(str::to_string);
        Self {
            id,
            levels: vec![level],
        }
    }

    /// Definition with `count` levels of one format and no style bindings.
    pub fn multi_level(id: u32, format: NumberFormat, count: u8) -> Self {
        Self {
            id,
            levels: (0..count).map(|l| LevelDef::new(l, format)).collect(),
        }
    }

    /// Check if exactly one level is defined.
    pub fn is_single_level(&self) -> bool {
        self.levels.len() == 1
    }

    /// Get a level definition.
    pub fn level(&self, level: u8) -> Option<&LevelDef> {
        self.levels.iter().find(|l| l.level == level)
    }
}

/// Per-instance override of one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelOverride {
    /// Level index
    pub level: u8,

    /// Value the sequence restarts at
    pub start_override: u32,
}

/// A concrete list bound to an abstract definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumInstance {
    /// List id (`w:numId`)
    pub num_id: u32,

    /// Bound abstract definition
    pub abstract_id: u32,

    /// Level overrides
    pub overrides: Vec<LevelOverride>,
}

/// What a definition lookup is keyed on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DefinitionKey {
    /// A paragraph style bound to the level
    Style(String),
    /// The level's number format
    Format(NumberFormat),
}

#[derive(Debug, Clone, Default)]
struct Candidates {
    single: BTreeSet<u32>,
    any: BTreeSet<u32>,
}

#[derive(Debug, Clone, Default)]
struct DefinitionIndex {
    entries: BTreeMap<(DefinitionKey, u8), Candidates>,
}

impl DefinitionIndex {
    fn insert(&mut self, def: &AbstractNum) {
        let single = def.is_single_level();
        for level in &def.levels {
            let mut keys = vec![DefinitionKey::Format(level.format)];
            if let Some(ref style) = level.paragraph_style {
                keys.push(DefinitionKey::Style(style.clone()));
            }
            for key in keys {
                let candidates = self.entries.entry((key, level.level)).or_default();
                candidates.any.insert(def.id);
                if single {
                    candidates.single.insert(def.id);
                }
            }
        }
    }

    fn lookup(&self, key: &DefinitionKey, level: u8) -> Option<u32> {
        let candidates = self.entries.get(&(key.clone(), level))?;
        candidates
            .single
            .first()
            .or_else(|| candidates.any.first())
            .copied()
    }
}

#[derive(Deserialize)]
struct NumberingParts {
    abstracts: BTreeMap<u32, AbstractNum>,
    instances: Vec<NumInstance>,
}

/// The shared pool of abstract definitions and list instances.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "NumberingParts")]
pub struct NumberingPool {
    abstracts: BTreeMap<u32, AbstractNum>,
    instances: Vec<NumInstance>,
    #[serde(skip)]
    index: DefinitionIndex,
}

impl From<NumberingParts> for NumberingPool {
    fn from(parts: NumberingParts) -> Self {
        let mut pool = Self {
            abstracts: parts.abstracts,
            instances: parts.instances,
            index: DefinitionIndex::default(),
        };
        pool.reindex();
        pool
    }
}

impl NumberingPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pool of a blank document.
    ///
    /// Abstract 0 is the nine-level decimal fallback; 1 and 2 are the
    /// single-level bullet and decimal definitions of the list styles.
    pub fn base() -> Self {
        use super::styles::{LIST_BULLET_STYLE, LIST_NUMBER_STYLE};

        let mut pool = Self::new();
        pool.add_abstract(AbstractNum::multi_level(0, NumberFormat::Decimal, 9));
        pool.add_abstract(AbstractNum::single_level(
            1,
            NumberFormat::Bullet,
            Some(LIST_BULLET_STYLE),
        ));
        pool.add_abstract(AbstractNum::single_level(
            2,
            NumberFormat::Decimal,
            Some(LIST_NUMBER_STYLE),
        ));
        pool.add_num(1);
        pool.add_num(2);
        pool
    }

    /// Add or replace an abstract definition.
    pub fn add_abstract(&mut self, def: AbstractNum) -> u32 {
        let id = def.id;
        let replaced = self.abstracts.insert(id, def).is_some();
        if replaced {
            self.reindex();
        } else {
            self.index.insert(&self.abstracts[&id]);
        }
        id
    }

    /// Smallest unused abstract id.
    pub fn next_abstract_id(&self) -> u32 {
        self.abstracts.keys().next_back().map(|id| id + 1).unwrap_or(0)
    }

    /// Find the abstract definition declaring `level` for `key`.
    ///
    /// Single-level definitions win over multi-level ones; ties go to the
    /// smallest id.
    pub fn find_abstract(&self, key: &DefinitionKey, level: u8) -> Option<u32> {
        self.index.lookup(key, level)
    }

    /// Create a list instance bound to an abstract definition.
    pub fn add_num(&mut self, abstract_id: u32) -> u32 {
        let num_id = self
            .instances
            .iter()
            .map(|n| n.num_id)
            .max()
            .unwrap_or(0)
            + 1;
        self.instances.push(NumInstance {
            num_id,
            abstract_id,
            overrides: Vec::new(),
        });
        num_id
    }

    /// Attach a start override to one level of a list instance.
    ///
    /// Returns `false` if the instance does not exist.
    pub fn add_start_override(&mut self, num_id: u32, level: u8, start: u32) -> bool {
        match self.instances.iter_mut().find(|n| n.num_id == num_id) {
            Some(instance) => {
                instance.overrides.retain(|o| o.level != level);
                instance.overrides.push(LevelOverride {
                    level,
                    start_override: start,
                });
                true
            }
            None => false,
        }
    }

    /// Get a list instance.
    pub fn instance(&self, num_id: u32) -> Option<&NumInstance> {
        self.instances.iter().find(|n| n.num_id == num_id)
    }

    /// Abstract definitions in id order.
    pub fn abstracts(&self) -> impl Iterator<Item = &AbstractNum> {
        self.abstracts.values()
    }

    /// List instances in creation order.
    pub fn instances(&self) -> &[NumInstance] {
        &self.instances
    }

    /// Number of abstract definitions.
    pub fn abstract_count(&self) -> usize {
        self.abstracts.len()
    }

    /// Number of list instances.
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    fn reindex(&mut self) {
        self.index = DefinitionIndex::default();
        for def in self.abstracts.values() {
            self.index.insert(def);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_pool() {
        let pool = NumberingPool::base();
        assert_eq!(pool.abstract_count(), 3);
        assert_eq!(pool.instance_count(), 2);
        assert_eq!(pool.instance(2).unwrap().abstract_id, 2);
        assert_eq!(pool.next_abstract_id(), 3);
    }

    #[test]
    fn test_find_prefers_single_level() {
        let pool = NumberingPool::base();
        let decimal = DefinitionKey::Format(NumberFormat::Decimal);
        // abstract 0 is multi-level, abstract 2 single-level
        assert_eq!(pool.find_abstract(&decimal, 0), Some(2));
        // only the multi-level definition declares level 3
        assert_eq!(pool.find_abstract(&decimal, 3), Some(0));
    }

    #[test]
    fn test_find_by_style() {
        let pool = NumberingPool::base();
        let key = DefinitionKey::Style("ListBullet".to_string());
        assert_eq!(pool.find_abstract(&key, 0), Some(1));
        assert_eq!(pool.find_abstract(&key, 1), None);
        let missing = DefinitionKey::Style("Heading1".to_string());
        assert_eq!(pool.find_abstract(&missing, 0), None);
    }

    #[test]
    fn test_tie_break_smallest_id() {
        let mut pool = NumberingPool::new();
        pool.add_abstract(AbstractNum::single_level(7, NumberFormat::Bullet, Some("A")));
        pool.add_abstract(AbstractNum::single_level(4, NumberFormat::Bullet, Some("A")));
        let key = DefinitionKey::Style("A".to_string());
        assert_eq!(pool.find_abstract(&key, 0), Some(4));
    }

    #[test]
    fn test_replacing_abstract_reindexes() {
        let mut pool = NumberingPool::new();
        pool.add_abstract(AbstractNum::single_level(1, NumberFormat::Bullet, Some("A")));
        pool.add_abstract(AbstractNum::single_level(1, NumberFormat::Decimal, Some("B")));
        assert_eq!(
            pool.find_abstract(&DefinitionKey::Style("A".to_string()), 0),
            None
        );
        assert_eq!(
            pool.find_abstract(&DefinitionKey::Style("B".to_string()), 0),
            Some(1)
        );
    }

    #[test]
    fn test_add_num_and_override() {
        let mut pool = NumberingPool::base();
        let id = pool.add_num(2);
        assert_eq!(id, 3);
        assert!(pool.add_start_override(id, 0, 1));
        assert!(pool.add_start_override(id, 0, 5));
        let instance = pool.instance(id).unwrap();
        assert_eq!(instance.overrides.len(), 1);
        assert_eq!(instance.overrides[0].start_override, 5);
        assert!(!pool.add_start_override(99, 0, 1));
    }

    #[test]
    fn test_level_text() {
        assert_eq!(LevelDef::new(0, NumberFormat::Decimal).text, "%1.");
        assert_eq!(LevelDef::new(2, NumberFormat::Decimal).text, "%3.");
        assert_eq!(LevelDef::new(0, NumberFormat::Bullet).text, "\u{2022}");
    }

    #[test]
    fn test_json_roundtrip_rebuilds_index() {
        let pool = NumberingPool::base();
        let json = serde_json::to_string(&pool).unwrap();
        let restored: NumberingPool = serde_json::from_str(&json).unwrap();
        let key = DefinitionKey::Style("ListNumber".to_string());
        assert_eq!(restored.find_abstract(&key, 0), Some(2));
        assert_eq!(restored.instance_count(), 2);
    }
}
