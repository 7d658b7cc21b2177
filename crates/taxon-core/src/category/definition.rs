//! Category Definition
//!
//! Flat input records for the hierarchy: an id plus the ids of its
//! declared base categories.

use serde::{Deserialize, Serialize};

/// A category as declared by a definition source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    /// Unique identifier
    pub id: String,
    /// Directly declared parent ids, in declaration order
    #[serde(
        rename = "baseIds",
        alias = "base_ids",
        alias = "base",
        alias = "baseCategories",
        default
    )]
    pub base_ids: Vec<String>,
}

impl CategoryDefinition {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            base_ids: Vec::new(),
        }
    }

    /// Builder-style helper for declaring base categories.
    pub fn with_bases<I, S>(mut self, bases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_ids.extend(bases.into_iter().map(Into::into));
        self
    }

    pub fn is_root(&self) -> bool {
        self.base_ids.is_empty()
    }

    /// Trim ids, then drop empty, self-referencing and repeated base ids.
    ///
    /// The first occurrence of a repeated base id wins.
    pub fn normalize(&mut self) {
        let trimmed = self.id.trim();
        if trimmed.len() != self.id.len() {
            self.id = trimmed.to_string();
        }

        let mut kept: Vec<String> = Vec::with_capacity(self.base_ids.len());
        for base in self.base_ids.drain(..) {
            let base = base.trim();
            if base.is_empty() || base == self.id || kept.iter().any(|k| k == base) {
                continue;
            }
            kept.push(base.to_string());
        }
        self.base_ids = kept;
    }

    /// Normalized copy.
    pub fn normalized(&self) -> Self {
        let mut copy = self.clone();
        copy.normalize();
        copy
    }
}
