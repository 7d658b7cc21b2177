//! # Category Module
//!
//! Multi-parent category hierarchies for classifying game data such as
//! items and entities.
//!
//! ## Module layout
//!
//! - `definition`: flat input records (`id` + `baseIds`)
//! - `definition_set`: TOML/JSON definition files
//! - `node`: arena-resident runtime nodes
//! - `hierarchy`: construction and queries
//! - `descriptor`: reference-free exports for runtime classification
//! - `categorizable`: trait for classified consumers
//!
//! ## Example
//!
//! ```rust
//! use taxon_core::category::{CategoryDefinition, CategoryHierarchy};
//!
//! let hierarchy = CategoryHierarchy::build(&[
//!     CategoryDefinition::new("Animal"),
//!     CategoryDefinition::new("Mammal").with_bases(["Animal"]),
//!     CategoryDefinition::new("Dog").with_bases(["Mammal"]),
//! ])
//! .unwrap();
//!
//! assert!(hierarchy.is_category_of("Dog", "Animal"));
//! assert_eq!(hierarchy.root_ids(), vec!["Animal"]);
//! assert_eq!(hierarchy.leaf_ids(), vec!["Dog"]);
//! ```

mod categorizable;
mod definition;
mod definition_set;
mod descriptor;
mod hierarchy;
mod node;
mod warning;

// Re-exports
pub use categorizable::Categorizable;
pub use definition::CategoryDefinition;
pub use definition_set::{DefinitionFormat, DefinitionSet};
pub use descriptor::{Descriptor, DescriptorCatalog};
pub use hierarchy::{BuildOptions, BuildState, CategoryHierarchy};
pub use node::{CategoryNode, NodeId};
pub use warning::BuildWarning;
