//! Input files and the cross-reference table built from them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Image extensions embedded as pictures instead of code listings.
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// A single input file, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Repository-relative path using forward slashes
    pub path: String,

    /// Raw file content
    pub content: Vec<u8>,
}

impl FileEntry {
    /// Create a new entry, normalizing the path separators.
    pub fn new(path: impl AsRef<str>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: normalize_path(path.as_ref()),
            content: content.into(),
        }
    }

    /// Lowercase extension of the path, if any.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.path)
    }

    /// Last path component.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Bookmark identity for one file caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossRef {
    /// 1-based identity, in file order
    pub id: u32,

    /// Addressable bookmark name (the file path)
    pub name: String,
}

/// All cross-references of a run, created before rendering starts.
#[derive(Debug, Clone, Default)]
pub struct CrossRefTable {
    refs: Vec<CrossRef>,
    by_name: HashMap<String, usize>,
}

impl CrossRefTable {
    /// Assign one cross-reference per entry, numbered from 1 in input order.
    pub fn from_entries(entries: &[FileEntry]) -> Self {
        let mut table = Self::default();
        for entry in entries {
            let id = table.refs.len() as u32 + 1;
            table.by_name.entry(entry.path.clone()).or_insert(table.refs.len());
            table.refs.push(CrossRef {
                id,
                name: entry.path.clone(),
            });
        }
        table
    }

    /// Cross-reference for the entry at `index` (0-based input position).
    pub fn get(&self, index: usize) -> Option<&CrossRef> {
        self.refs.get(index)
    }

    /// Look up a cross-reference by bookmark name.
    pub fn find(&self, name: &str) -> Option<&CrossRef> {
        self.by_name.get(name).map(|&i| &self.refs[i])
    }

    /// Number of cross-references.
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Iterate in file order.
    pub fn iter(&self) -> impl Iterator<Item = &CrossRef> {
        self.refs.iter()
    }
}

/// Replace backslashes with forward slashes and drop a leading `./`.
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    match path.strip_prefix("./") {
        Some(rest) => rest.to_string(),
        None => path,
    }
}

/// Lowercase extension of a slash-separated path.
pub fn extension_of(path: &str) -> Option<String> {
    let name = path.rsplit('/').next().unwrap_or(path);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Check whether a path has one of the given image extensions.
pub fn is_image_path(path: &str, extensions: &[String]) -> bool {
    match extension_of(path) {
        Some(ext) => extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)),
        None => false,
    }
}
