//! Progress hooks for a render run.
//!
//! Observers see each file as it is rendered. They cannot alter the
//! document or the control flow; a progress bar is the typical use.
//!
//! # Example
//!
//! ```
//! use dir2docx::render::{FileOutcome, RenderObserver};
//!
//! struct Fallbacks(Vec<String>);
//!
//! impl RenderObserver for Fallbacks {
//!     fn file_started(&mut self, _index: usize, _total: usize, path: &str) {
//!         self.0.push(path.to_string());
//!     }
//!
//!     fn file_finished(&mut self, _index: usize, outcome: &FileOutcome) {
//!         if !matches!(outcome, FileOutcome::Plain { .. }) {
//!             self.0.pop();
//!         }
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// How a file ended up in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Rendered from a token stream
    Highlighted {
        /// Language the file was tokenized as
        language: String,
        /// Line paragraphs emitted
        lines: usize,
    },

    /// Rendered line by line without styling
    Plain {
        /// Why highlighting was skipped
        reason: String,
        /// Line paragraphs emitted
        lines: usize,
    },

    /// Embedded as a picture
    Picture {
        /// Pixel width
        width: u32,
        /// Pixel height
        height: u32,
    },
}

impl FileOutcome {
    /// Line paragraphs emitted for the file (0 for pictures).
    pub fn lines(&self) -> usize {
        match self {
            FileOutcome::Highlighted { lines, .. } | FileOutcome::Plain { lines, .. } => *lines,
            FileOutcome::Picture { .. } => 0,
        }
    }
}

/// Receives per-file progress during rendering.
///
/// All methods do nothing by default.
pub trait RenderObserver {
    /// Called before file `index` (0-based) of `total` is rendered.
    fn file_started(&mut self, index: usize, total: usize, path: &str) {
        let _ = (index, total, path);
    }

    /// Called once file `index` has been appended to the document.
    fn file_finished(&mut self, index: usize, outcome: &FileOutcome) {
        let _ = (index, outcome);
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Default)]
pub struct NoopObserver;

impl RenderObserver for NoopObserver {}

/// Forwards every event to a list of observers, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Box<dyn RenderObserver>>,
}

impl CompositeObserver {
    /// Create an empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer to the chain.
    pub fn with_observer<O: RenderObserver + 'static>(mut self, observer: O) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Number of chained observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Check if no observer is chained.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl RenderObserver for CompositeObserver {
    fn file_started(&mut self, index: usize, total: usize, path: &str) {
        for observer in &mut self.observers {
            observer.file_started(index, total, path);
        }
    }

    fn file_finished(&mut self, index: usize, outcome: &FileOutcome) {
        for observer in &mut self.observers {
            observer.file_finished(index, outcome);
        }
    }
}
