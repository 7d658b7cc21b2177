//! Category Node
//!
//! Runtime node owned by [`CategoryHierarchy`](super::CategoryHierarchy).
//! Relations to other nodes are [`NodeId`] handles into the hierarchy's
//! arena, never references.

use std::collections::BTreeSet;
use std::fmt;

use super::definition::CategoryDefinition;
use super::descriptor::Descriptor;

/// Handle to a node inside a hierarchy. Ordering follows definition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct CategoryNode {
    definition: CategoryDefinition,
    bases: Vec<NodeId>,
    children: Vec<NodeId>,
    subcategories: BTreeSet<NodeId>,
    supercategories: BTreeSet<NodeId>,
    descriptor: Descriptor,
}

impl CategoryNode {
    pub(crate) fn new(definition: CategoryDefinition) -> Self {
        Self {
            definition,
            bases: Vec::new(),
            children: Vec::new(),
            subcategories: BTreeSet::new(),
            supercategories: BTreeSet::new(),
            descriptor: Descriptor::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }

    pub fn definition(&self) -> &CategoryDefinition {
        &self.definition
    }

    /// Resolved direct parents, in declaration order
    pub fn bases(&self) -> &[NodeId] {
        &self.bases
    }

    /// Resolved direct children, in definition order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Direct and transitive children
    pub fn subcategories(&self) -> &BTreeSet<NodeId> {
        &self.subcategories
    }

    /// Direct and transitive ancestors
    pub fn supercategories(&self) -> &BTreeSet<NodeId> {
        &self.supercategories
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Record `node` as a descendant. Returns false if it already was one.
    pub(crate) fn add_subcategory(&mut self, node: NodeId) -> bool {
        self.subcategories.insert(node)
    }

    /// Record `node` as an ancestor. Returns false if it already was one.
    pub(crate) fn add_supercategory(&mut self, node: NodeId) -> bool {
        self.supercategories.insert(node)
    }

    pub(crate) fn link_base(&mut self, base: NodeId) {
        if !self.bases.contains(&base) {
            self.bases.push(base);
        }
    }

    pub(crate) fn link_child(&mut self, child: NodeId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    pub(crate) fn set_descriptor(&mut self, descriptor: Descriptor) {
        self.descriptor = descriptor;
    }

    /// True if `category` is this node's id or one of its exported ancestors.
    ///
    /// Answers from the descriptor written at export time.
    pub fn is_category_of(&self, category: &str) -> bool {
        self.id() == category || self.descriptor.is_category_of(category)
    }

    /// No declared base categories
    pub fn is_root(&self) -> bool {
        self.definition.base_ids.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.subcategories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_once() {
        let mut node = CategoryNode::new(CategoryDefinition::new("A"));
        assert!(node.add_subcategory(NodeId::new(2)));
        assert!(!node.add_subcategory(NodeId::new(2)));
        assert!(node.add_supercategory(NodeId::new(1)));
        assert!(!node.add_supercategory(NodeId::new(1)));
        assert_eq!(node.subcategories().len(), 1);
        assert_eq!(node.supercategories().len(), 1);
    }

    #[test]
    fn test_sets_iterate_in_definition_order() {
        let mut node = CategoryNode::new(CategoryDefinition::new("A"));
        node.add_subcategory(NodeId::new(5));
        node.add_subcategory(NodeId::new(1));
        node.add_subcategory(NodeId::new(3));
        let order: Vec<usize> = node.subcategories().iter().map(|n| n.index()).collect();
        assert_eq!(order, vec![1, 3, 5]);
    }

    #[test]
    fn test_is_category_of_reads_descriptor() {
        let mut node = CategoryNode::new(CategoryDefinition::new("Dog"));
        assert!(node.is_category_of("Dog"));
        assert!(!node.is_category_of("Animal"));

        node.set_descriptor(Descriptor {
            id: "Dog".into(),
            subcategory_ids: vec![],
            supercategory_ids: vec!["Animal".into()],
        });
        assert!(node.is_category_of("Animal"));
    }
}
