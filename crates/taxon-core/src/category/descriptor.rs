//! Category Descriptors
//!
//! Reference-free snapshots of a category's closure. Descriptors are what
//! leaves the hierarchy: they are persisted, shipped to consumers, and
//! answer classification queries without the live node graph.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Flattened projection of one category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    pub id: String,
    /// Direct and transitive children, in definition order
    #[serde(default)]
    pub subcategory_ids: Vec<String>,
    /// Direct and transitive ancestors, in definition order
    #[serde(default)]
    pub supercategory_ids: Vec<String>,
}

impl Descriptor {
    /// True if `category` is this category or one of its ancestors.
    pub fn is_category_of(&self, category: &str) -> bool {
        self.id == category || self.supercategory_ids.iter().any(|c| c == category)
    }

    pub fn has_subcategory(&self, category: &str) -> bool {
        self.subcategory_ids.iter().any(|c| c == category)
    }

    /// No resolved ancestors. Unlike a root category, this also holds for
    /// a category whose declared bases all failed to resolve.
    pub fn has_no_ancestors(&self) -> bool {
        self.supercategory_ids.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.subcategory_ids.is_empty()
    }
}

/// Exported descriptor set with an id index
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptorCatalog {
    /// Hash of the definitions the catalog was built from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    pub descriptors: Vec<Descriptor>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl DescriptorCatalog {
    pub fn new(descriptors: Vec<Descriptor>) -> Self {
        let mut catalog = Self {
            fingerprint: None,
            generated_at: None,
            descriptors,
            index: HashMap::new(),
        };
        catalog.reindex();
        catalog
    }

    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }

    pub fn stamped(mut self) -> Self {
        self.generated_at = Some(Utc::now());
        self
    }

    fn reindex(&mut self) {
        self.index = self
            .descriptors
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id.clone(), i))
            .collect();
    }

    pub fn get(&self, id: &str) -> Option<&Descriptor> {
        self.index.get(id).map(|&i| &self.descriptors[i])
    }

    /// Classification query; unknown ids are never a category of anything.
    pub fn is_category_of(&self, id: &str, category: &str) -> bool {
        self.get(id).is_some_and(|d| d.is_category_of(category))
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Descriptor> {
        self.descriptors.iter()
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        if pretty {
            Ok(serde_json::to_string_pretty(self)?)
        } else {
            Ok(serde_json::to_string(self)?)
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let mut catalog: Self = serde_json::from_str(content)?;
        catalog.reindex();
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn save(&self, path: &Path, pretty: bool) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json(pretty)?)?;
        Ok(())
    }
}

impl PartialEq for DescriptorCatalog {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint
            && self.generated_at == other.generated_at
            && self.descriptors == other.descriptors
    }
}
