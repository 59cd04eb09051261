//! Per-image edit history: a linear undo stack with redo lookahead.
//!
//! Every edit produces a new immutable [`Version`]. Appending while the
//! cursor is not at the end discards the versions after it, so the history
//! is always a single line, never a tree. Undo and redo only move the
//! cursor; no pixels are recomputed.
//!
//! ```text
//! versions: [Original, Resize, Rotate]      cursor = 2
//! undo      [Original, Resize, Rotate]      cursor = 1
//! append    [Original, Resize, Grayscale]   cursor = 2
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::raster::{ImageFormat, Raster};

/// Label of the first version in every history.
pub const ORIGINAL_LABEL: &str = "Original";

/// Snapshot of a version's visible properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionMetadata {
    pub width: u32,
    pub height: u32,
    pub byte_size: usize,
    pub format: ImageFormat,
    /// Name of the file the project was imported from.
    pub original_name: String,
}

impl VersionMetadata {
    pub fn describe(raster: &Raster, original_name: &str) -> Self {
        Self {
            width: raster.width(),
            height: raster.height(),
            byte_size: raster.byte_size(),
            format: raster.format(),
            original_name: original_name.to_string(),
        }
    }
}

/// One immutable entry in an [`EditHistory`].
#[derive(Debug, Clone)]
pub struct Version {
    raster: Arc<Raster>,
    metadata: VersionMetadata,
    action_label: String,
}

impl Version {
    pub fn new(raster: Arc<Raster>, original_name: &str, action_label: impl Into<String>) -> Self {
        let metadata = VersionMetadata::describe(&raster, original_name);
        Self {
            raster,
            metadata,
            action_label: action_label.into(),
        }
    }

    /// The seed version created on import.
    pub fn original(raster: Arc<Raster>, original_name: &str) -> Self {
        Self::new(raster, original_name, ORIGINAL_LABEL)
    }

    pub fn raster(&self) -> &Arc<Raster> {
        &self.raster
    }

    pub fn metadata(&self) -> &VersionMetadata {
        &self.metadata
    }

    pub fn action_label(&self) -> &str {
        &self.action_label
    }
}

/// Ordered versions plus a cursor. Never empty.
#[derive(Debug, Clone)]
pub struct EditHistory {
    versions: Vec<Version>,
    cursor: usize,
}

// A history always holds at least its original version
#[allow(clippy::len_without_is_empty)]
impl EditHistory {
    /// Start a history at `original` (cursor 0).
    pub fn new(original: Version) -> Self {
        Self {
            versions: vec![original],
            cursor: 0,
        }
    }

    /// Drop everything after the cursor, push `version`, and move the cursor
    /// onto it.
    pub fn append(&mut self, version: Version) -> &Version {
        self.versions.truncate(self.cursor + 1);
        self.versions.push(version);
        self.cursor = self.versions.len() - 1;
        self.current()
    }

    /// Step back one version. No-op at the original.
    pub fn undo(&mut self) -> &Version {
        self.cursor = self.cursor.saturating_sub(1);
        self.current()
    }

    /// Step forward one version. No-op at the newest.
    pub fn redo(&mut self) -> &Version {
        if self.can_redo() {
            self.cursor += 1;
        }
        self.current()
    }

    pub fn current(&self) -> &Version {
        &self.versions[self.cursor]
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.versions.len()
    }

    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    /// Labels of the last `n` versions up to and including the cursor,
    /// oldest first.
    pub fn recent_labels(&self, n: usize) -> Vec<&str> {
        let end = self.cursor + 1;
        let start = end.saturating_sub(n);
        self.versions[start..end]
            .iter()
            .map(Version::action_label)
            .collect()
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Append,
        Undo,
        Redo,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::Append), Just(Op::Undo), Just(Op::Redo)]
    }

    fn seed() -> EditHistory {
        let raster = Arc::new(Raster::filled(1, 1, [0, 0, 0, 255]).unwrap());
        EditHistory::new(Version::original(raster, "seed.png"))
    }

    proptest! {
        /// Property: The cursor always points at a version, and the history is never empty.
        #[test]
        fn prop_cursor_in_bounds(ops in prop::collection::vec(op_strategy(), 0..60)) {
            let mut h = seed();
            let raster = Arc::new(Raster::filled(1, 1, [1, 1, 1, 255]).unwrap());
            for op in ops {
                match op {
                    Op::Append => { h.append(Version::new(Arc::clone(&raster), "seed.png", "edit")); }
                    Op::Undo => { h.undo(); }
                    Op::Redo => { h.redo(); }
                }
                prop_assert!(h.len() >= 1);
                prop_assert!(h.cursor() < h.len());
                prop_assert_eq!(h.versions()[0].action_label(), ORIGINAL_LABEL);
            }
        }

        /// Property: Append always leaves the cursor on the last version.
        #[test]
        fn prop_append_lands_at_end(
            appends in 1usize..10,
            undos in 0usize..12,
        ) {
            let mut h = seed();
            let raster = Arc::new(Raster::filled(1, 1, [1, 1, 1, 255]).unwrap());
            for i in 0..appends {
                h.append(Version::new(Arc::clone(&raster), "seed.png", format!("e{i}")));
            }
            for _ in 0..undos {
                h.undo();
            }
            let cursor_before = h.cursor();
            h.append(Version::new(Arc::clone(&raster), "seed.png", "last"));

            prop_assert_eq!(h.len(), cursor_before + 2);
            prop_assert_eq!(h.cursor(), h.len() - 1);
            prop_assert!(!h.can_redo());
        }

        /// Property: k undos followed by k redos return to the same version.
        #[test]
        fn prop_undo_redo_roundtrip(appends in 0usize..10, k in 0usize..10) {
            let mut h = seed();
            let raster = Arc::new(Raster::filled(1, 1, [1, 1, 1, 255]).unwrap());
            for i in 0..appends {
                h.append(Version::new(Arc::clone(&raster), "seed.png", format!("e{i}")));
            }
            let k = k.min(h.cursor());
            let label = h.current().action_label().to_string();
            for _ in 0..k {
                h.undo();
            }
            for _ in 0..k {
                h.redo();
            }
            prop_assert_eq!(h.current().action_label(), label.as_str());
            prop_assert_eq!(h.len(), appends + 1);
        }
    }
}
