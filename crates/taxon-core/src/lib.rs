pub mod category;
pub mod config;
pub mod error;

pub use config::Config;
pub use error::{Result, TaxonError};

// Category system
pub use category::{
    BuildOptions, BuildState, BuildWarning, Categorizable, CategoryDefinition, CategoryHierarchy,
    CategoryNode, DefinitionFormat, DefinitionSet, Descriptor, DescriptorCatalog, NodeId,
};
