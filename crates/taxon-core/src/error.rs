use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaxonError {
    #[error("Duplicate category id: {id}")]
    DuplicateCategory { id: String },

    #[error("Category definition at position {index} has an empty id")]
    EmptyCategoryId { index: usize },

    #[error("Cyclic category definition: {}", cycle.join(" -> "))]
    CyclicDefinition { cycle: Vec<String> },

    #[error("Category '{category}' references unknown base category '{base}'")]
    UnresolvedReference { category: String, base: String },

    #[error("Category not found: {id}")]
    CategoryNotFound { id: String },

    #[error("Category hierarchy has not been initialized")]
    NotInitialized,

    #[error("No definition files given (pass a path or set definitions.paths)")]
    NoDefinitions,

    #[error("Failed to parse definitions in {path}: {message}")]
    DefinitionParse { path: PathBuf, message: String },

    #[error("Unsupported definition file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to parse config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Invalid config value for {key}: {value}")]
    InvalidConfigValue { key: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

pub type Result<T> = std::result::Result<T, TaxonError>;

impl TaxonError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CategoryNotFound { .. } => 2,
            Self::DuplicateCategory { .. } | Self::EmptyCategoryId { .. } => 3,
            Self::CyclicDefinition { .. } => 4,
            Self::UnresolvedReference { .. } => 5,
            Self::DefinitionParse { .. } | Self::UnsupportedFormat { .. } => 6,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_lists_path() {
        let err = TaxonError::CyclicDefinition {
            cycle: vec!["X".into(), "Y".into(), "X".into()],
        };
        assert_eq!(err.to_string(), "Cyclic category definition: X -> Y -> X");
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_exit_code_default() {
        let err = TaxonError::NotInitialized;
        assert_eq!(err.exit_code(), 1);
    }
}
