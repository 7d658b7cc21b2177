//! Definition Set
//!
//! File-backed source of category definitions. Reads TOML or JSON files
//! (or whole directories of them) and hands an ordered definition list to
//! the hierarchy.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use super::definition::CategoryDefinition;
use crate::error::{Result, TaxonError};

/// On-disk layout of a TOML definition file
///
/// ```toml
/// [[category]]
/// id = "Animal"
///
/// [[category]]
/// id = "Mammal"
/// baseIds = ["Animal"]
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
struct DefinitionFile {
    #[serde(rename = "category", default)]
    categories: Vec<CategoryDefinition>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDefinitions {
    List(Vec<CategoryDefinition>),
    File(DefinitionFile),
}

/// Supported definition file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Toml,
    Json,
}

impl DefinitionFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Some(Self::Toml),
            Some("json") => Some(Self::Json),
            _ => None,
        }
    }
}

/// Ordered collection of category definitions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionSet {
    definitions: Vec<CategoryDefinition>,
}

impl DefinitionSet {
    pub fn new(definitions: Vec<CategoryDefinition>) -> Self {
        Self { definitions }
    }

    /// Load a single TOML or JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let format =
            DefinitionFormat::from_path(path).ok_or_else(|| TaxonError::UnsupportedFormat {
                path: path.to_path_buf(),
            })?;
        let content = fs::read_to_string(path)?;
        Self::parse(&content, format).map_err(|message| TaxonError::DefinitionParse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Load every definition file under `dir`, in sorted path order
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut files: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(dir) {
            let entry = entry?;
            if entry.path().is_file() && DefinitionFormat::from_path(entry.path()).is_some() {
                files.push(entry.into_path());
            }
        }
        files.sort();

        let mut set = Self::default();
        for file in files {
            set.extend(Self::load(&file)?);
        }
        Ok(set)
    }

    /// Load from a mix of files and directories
    pub fn load_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut set = Self::default();
        for path in paths {
            let path = path.as_ref();
            if path.is_dir() {
                set.extend(Self::load_dir(path)?);
            } else {
                set.extend(Self::load(path)?);
            }
        }
        Ok(set)
    }

    fn parse(content: &str, format: DefinitionFormat) -> std::result::Result<Self, String> {
        let definitions = match format {
            DefinitionFormat::Toml => {
                toml::from_str::<DefinitionFile>(content)
                    .map_err(|e| e.to_string())?
                    .categories
            }
            DefinitionFormat::Json => {
                match serde_json::from_str::<JsonDefinitions>(content).map_err(|e| e.to_string())? {
                    JsonDefinitions::List(list) => list,
                    JsonDefinitions::File(file) => file.categories,
                }
            }
        };
        Ok(Self { definitions })
    }

    /// Save as pretty TOML (JSON when the path ends in `.json`)
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = match DefinitionFormat::from_path(path) {
            Some(DefinitionFormat::Json) => serde_json::to_string_pretty(&self.definitions)?,
            _ => self.to_toml()?,
        };
        fs::write(path, content)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        let file = DefinitionFile {
            categories: self.definitions.clone(),
        };
        Ok(toml::to_string_pretty(&file)?)
    }

    pub fn extend(&mut self, other: DefinitionSet) {
        self.definitions.extend(other.definitions);
    }

    pub fn push(&mut self, definition: CategoryDefinition) {
        self.definitions.push(definition);
    }

    /// Drop definitions without an id and normalize the rest.
    ///
    /// Returns the number of definitions removed.
    pub fn optimize(&mut self) -> usize {
        let before = self.definitions.len();
        for def in &mut self.definitions {
            def.normalize();
        }
        self.definitions.retain(|d| !d.id.is_empty());
        before - self.definitions.len()
    }

    /// Hex SHA-256 over the definitions exactly as held
    ///
    /// Run [`optimize`](Self::optimize) first to hash the normalized form.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for def in &self.definitions {
            hasher.update(def.id.as_bytes());
            for base in &def.base_ids {
                hasher.update([0x1f]);
                hasher.update(base.as_bytes());
            }
            hasher.update([b'\n']);
        }
        hex::encode(hasher.finalize())
    }

    pub fn definitions(&self) -> &[CategoryDefinition] {
        &self.definitions
    }

    pub fn into_definitions(self) -> Vec<CategoryDefinition> {
        self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl From<Vec<CategoryDefinition>> for DefinitionSet {
    fn from(definitions: Vec<CategoryDefinition>) -> Self {
        Self::new(definitions)
    }
}
