//! Recoverable issues found while building a hierarchy.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// A base id that matches no definition; the relation is skipped
    UnresolvedBase { category: String, base: String },
    /// A definition that lists itself as a base; the entry is ignored
    SelfReference { category: String },
    /// A base id declared more than once by the same definition
    DuplicateBase { category: String, base: String },
}

impl BuildWarning {
    pub fn category(&self) -> &str {
        match self {
            Self::UnresolvedBase { category, .. }
            | Self::SelfReference { category }
            | Self::DuplicateBase { category, .. } => category,
        }
    }
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedBase { category, base } => {
                write!(f, "'{category}' references unknown base category '{base}'")
            }
            Self::SelfReference { category } => {
                write!(f, "'{category}' lists itself as a base category")
            }
            Self::DuplicateBase { category, base } => {
                write!(f, "'{category}' lists base category '{base}' more than once")
            }
        }
    }
}
