//! Category Hierarchy
//!
//! Builds a multi-parent category DAG from flat definitions in a single
//! pass and exports one [`Descriptor`] per category.
//!
//! ## Construction phases
//!
//! 1. **Materialize**: one node per definition, indexed by id. Definitions
//!    without base ids become roots.
//! 2. **Link**: direct base/child edges. Unknown base ids are skipped and
//!    reported as [`BuildWarning::UnresolvedBase`]. Cycles abort the build.
//! 3. **Leaves**: nodes without resolved children.
//! 4. **Closure**: every node records all reachable ancestors, and every
//!    ancestor records the node as a subcategory.
//!
//! Descriptors are written last, in definition order.

use std::collections::{BTreeSet, HashMap};

use glob::Pattern;
use tracing::{debug, info, warn};

use super::categorizable::Categorizable;
use super::definition::CategoryDefinition;
use super::descriptor::{Descriptor, DescriptorCatalog};
use super::node::{CategoryNode, NodeId};
use super::warning::BuildWarning;
use crate::error::{Result, TaxonError};

/// Lifecycle of a hierarchy. Construction is the only transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildState {
    #[default]
    Uninitialized,
    Built,
}

/// Knobs for hierarchy construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Fail on unknown base ids instead of skipping them
    pub strict_references: bool,
    /// Log skipped base ids at warn level (they are always collected)
    pub warn_unresolved: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            strict_references: false,
            warn_unresolved: true,
        }
    }
}

impl BuildOptions {
    pub fn strict() -> Self {
        Self {
            strict_references: true,
            ..Self::default()
        }
    }
}

/// Owner of every category node
#[derive(Debug, Clone, Default)]
pub struct CategoryHierarchy {
    state: BuildState,
    options: BuildOptions,
    nodes: Vec<CategoryNode>,
    index: HashMap<String, NodeId>,
    roots: Vec<NodeId>,
    leaves: Vec<NodeId>,
    warnings: Vec<BuildWarning>,
}

/// Working state of one construction attempt, committed only on success.
#[derive(Default)]
struct Construction {
    nodes: Vec<CategoryNode>,
    index: HashMap<String, NodeId>,
    roots: Vec<NodeId>,
    leaves: Vec<NodeId>,
    warnings: Vec<BuildWarning>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

impl CategoryHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BuildOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Build a hierarchy with default options.
    pub fn build(definitions: &[CategoryDefinition]) -> Result<Self> {
        Self::build_with(definitions, BuildOptions::default())
    }

    pub fn build_with(definitions: &[CategoryDefinition], options: BuildOptions) -> Result<Self> {
        let mut hierarchy = Self::with_options(options);
        hierarchy.initialize(definitions)?;
        Ok(hierarchy)
    }

    /// Run construction once.
    ///
    /// Returns `Ok(false)` without touching anything if the hierarchy is
    /// already built. On error the hierarchy stays uninitialized and empty.
    pub fn initialize(&mut self, definitions: &[CategoryDefinition]) -> Result<bool> {
        if self.state == BuildState::Built {
            debug!("category hierarchy already built, skipping initialization");
            return Ok(false);
        }

        let mut build = Construction::default();
        build.materialize(definitions)?;
        build.link(self.options)?;
        build.reject_cycles()?;
        build.classify_leaves();
        build.close();
        build.export();

        info!(
            categories = build.nodes.len(),
            roots = build.roots.len(),
            leaves = build.leaves.len(),
            warnings = build.warnings.len(),
            "category hierarchy built"
        );

        self.nodes = build.nodes;
        self.index = build.index;
        self.roots = build.roots;
        self.leaves = build.leaves;
        self.warnings = build.warnings;
        self.state = BuildState::Built;
        Ok(true)
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state == BuildState::Built
    }

    pub fn options(&self) -> BuildOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CategoryNode> {
        self.index.get(id).map(|n| &self.nodes[n.index()])
    }

    pub fn node(&self, id: NodeId) -> Option<&CategoryNode> {
        self.nodes.get(id.index())
    }

    pub fn node_id(&self, id: &str) -> Option<NodeId> {
        self.index.get(id).copied()
    }

    /// All nodes in definition order
    pub fn nodes(&self) -> &[CategoryNode] {
        &self.nodes
    }

    /// Categories without declared base ids, in definition order
    pub fn roots(&self) -> impl Iterator<Item = &CategoryNode> {
        self.roots.iter().map(|n| &self.nodes[n.index()])
    }

    /// Categories without subcategories, in definition order
    pub fn leaves(&self) -> impl Iterator<Item = &CategoryNode> {
        self.leaves.iter().map(|n| &self.nodes[n.index()])
    }

    pub fn root_ids(&self) -> Vec<&str> {
        self.roots().map(|n| n.id()).collect()
    }

    pub fn leaf_ids(&self) -> Vec<&str> {
        self.leaves().map(|n| n.id()).collect()
    }

    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }

    fn ids<'a>(&'a self, handles: impl IntoIterator<Item = &'a NodeId>) -> Vec<&'a str> {
        handles
            .into_iter()
            .map(|n| self.nodes[n.index()].id())
            .collect()
    }

    /// Direct and transitive children of `id`
    pub fn subcategories_of(&self, id: &str) -> Option<Vec<&str>> {
        self.get(id).map(|n| self.ids(n.subcategories()))
    }

    /// Direct and transitive ancestors of `id`
    pub fn supercategories_of(&self, id: &str) -> Option<Vec<&str>> {
        self.get(id).map(|n| self.ids(n.supercategories()))
    }

    /// Resolved declared bases of `id`
    pub fn bases_of(&self, id: &str) -> Option<Vec<&str>> {
        self.get(id).map(|n| self.ids(n.bases()))
    }

    /// Categories that declare `id` as a base
    pub fn children_of(&self, id: &str) -> Option<Vec<&str>> {
        self.get(id).map(|n| self.ids(n.children()))
    }

    /// Whether `id` is `category` or one of its subcategories.
    ///
    /// Unknown ids answer false.
    pub fn is_category_of(&self, id: &str, category: &str) -> bool {
        self.get(id).is_some_and(|n| n.is_category_of(category))
    }

    /// Ids matching a glob pattern, in definition order
    pub fn matching(&self, pattern: &str) -> Result<Vec<&str>> {
        let pattern = Pattern::new(pattern)?;
        Ok(self
            .nodes
            .iter()
            .map(|n| n.id())
            .filter(|id| pattern.matches(id))
            .collect())
    }

    /// Exported descriptors in definition order
    pub fn descriptors(&self) -> Vec<Descriptor> {
        self.nodes.iter().map(|n| n.descriptor().clone()).collect()
    }

    pub fn catalog(&self) -> Result<DescriptorCatalog> {
        if !self.is_initialized() {
            return Err(TaxonError::NotInitialized);
        }
        Ok(DescriptorCatalog::new(self.descriptors()))
    }

    /// Hand the descriptor of `id` to a consumer.
    pub fn categorize<T: Categorizable + ?Sized>(&self, item: &mut T, id: &str) -> Result<()> {
        let node = self
            .get(id)
            .ok_or_else(|| TaxonError::CategoryNotFound { id: id.to_string() })?;
        item.categorize(node.descriptor().clone());
        Ok(())
    }
}

impl Construction {
    fn materialize(&mut self, definitions: &[CategoryDefinition]) -> Result<()> {
        self.nodes.reserve(definitions.len());
        self.index.reserve(definitions.len());

        for (position, definition) in definitions.iter().enumerate() {
            if definition.id.trim().is_empty() {
                return Err(TaxonError::EmptyCategoryId { index: position });
            }
            if self.index.contains_key(&definition.id) {
                return Err(TaxonError::DuplicateCategory {
                    id: definition.id.clone(),
                });
            }

            let definition = self.sanitize(definition);
            let handle = NodeId::new(self.nodes.len());
            if definition.base_ids.is_empty() {
                self.roots.push(handle);
            }
            self.index.insert(definition.id.clone(), handle);
            self.nodes.push(CategoryNode::new(definition));
        }

        debug!(
            categories = self.nodes.len(),
            roots = self.roots.len(),
            "materialized categories"
        );
        Ok(())
    }

    /// Strip empty, self-referencing and repeated base ids.
    fn sanitize(&mut self, definition: &CategoryDefinition) -> CategoryDefinition {
        let mut clean = CategoryDefinition::new(definition.id.clone());
        let mut self_reported = false;

        for base in &definition.base_ids {
            if base.is_empty() {
                continue;
            }
            if *base == definition.id {
                if !self_reported {
                    self.warnings.push(BuildWarning::SelfReference {
                        category: definition.id.clone(),
                    });
                    self_reported = true;
                }
                continue;
            }
            if clean.base_ids.contains(base) {
                self.warnings.push(BuildWarning::DuplicateBase {
                    category: definition.id.clone(),
                    base: base.clone(),
                });
                continue;
            }
            clean.base_ids.push(base.clone());
        }

        clean
    }

    fn link(&mut self, options: BuildOptions) -> Result<()> {
        let mut edges = 0usize;

        for position in 0..self.nodes.len() {
            let child = NodeId::new(position);
            let bases = self.nodes[position].definition().base_ids.clone();

            for base in bases {
                match self.index.get(&base).copied() {
                    Some(parent) => {
                        self.nodes[position].link_base(parent);
                        self.nodes[parent.index()].link_child(child);
                        edges += 1;
                    }
                    None => {
                        let category = self.nodes[position].id().to_string();
                        if options.strict_references {
                            return Err(TaxonError::UnresolvedReference { category, base });
                        }
                        if options.warn_unresolved {
                            warn!(%category, %base, "skipping unknown base category");
                        }
                        self.warnings
                            .push(BuildWarning::UnresolvedBase { category, base });
                    }
                }
            }
        }

        debug!(edges, "linked direct base categories");
        Ok(())
    }

    /// Iterative three-colour DFS over base edges.
    fn reject_cycles(&self) -> Result<()> {
        let mut marks = vec![Mark::Unvisited; self.nodes.len()];

        for start in 0..self.nodes.len() {
            if marks[start] != Mark::Unvisited {
                continue;
            }

            marks[start] = Mark::InProgress;
            let mut stack: Vec<(usize, usize)> = vec![(start, 0)];

            while let Some(frame) = stack.last_mut() {
                let (current, cursor) = *frame;
                match self.nodes[current].bases().get(cursor) {
                    Some(next) => {
                        frame.1 += 1;
                        let next = next.index();
                        match marks[next] {
                            Mark::Unvisited => {
                                marks[next] = Mark::InProgress;
                                stack.push((next, 0));
                            }
                            Mark::InProgress => {
                                let from = stack
                                    .iter()
                                    .position(|&(n, _)| n == next)
                                    .unwrap_or(0);
                                let mut cycle: Vec<String> = stack[from..]
                                    .iter()
                                    .map(|&(n, _)| self.nodes[n].id().to_string())
                                    .collect();
                                cycle.push(self.nodes[next].id().to_string());
                                return Err(TaxonError::CyclicDefinition { cycle });
                            }
                            Mark::Done => {}
                        }
                    }
                    None => {
                        marks[current] = Mark::Done;
                        stack.pop();
                    }
                }
            }
        }

        Ok(())
    }

    fn classify_leaves(&mut self) {
        self.leaves = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.children().is_empty())
            .map(|(i, _)| NodeId::new(i))
            .collect();
        debug!(leaves = self.leaves.len(), "classified leaf categories");
    }

    fn ancestors(&self, start: usize) -> BTreeSet<NodeId> {
        let mut seen = BTreeSet::new();
        let mut pending: Vec<NodeId> = self.nodes[start].bases().to_vec();
        while let Some(next) = pending.pop() {
            if seen.insert(next) {
                pending.extend_from_slice(self.nodes[next.index()].bases());
            }
        }
        seen
    }

    fn close(&mut self) {
        for position in 0..self.nodes.len() {
            let node = NodeId::new(position);
            for ancestor in self.ancestors(position) {
                self.nodes[position].add_supercategory(ancestor);
                self.nodes[ancestor.index()].add_subcategory(node);
            }
        }
        debug!("propagated category closure");
    }

    fn export(&mut self) {
        let descriptors: Vec<Descriptor> = self
            .nodes
            .iter()
            .map(|n| Descriptor {
                id: n.id().to_string(),
                subcategory_ids: n
                    .subcategories()
                    .iter()
                    .map(|s| self.nodes[s.index()].id().to_string())
                    .collect(),
                supercategory_ids: n
                    .supercategories()
                    .iter()
                    .map(|s| self.nodes[s.index()].id().to_string())
                    .collect(),
            })
            .collect();

        for (node, descriptor) in self.nodes.iter_mut().zip(descriptors) {
            node.set_descriptor(descriptor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(id: &str, bases: &[&str]) -> CategoryDefinition {
        CategoryDefinition::new(id).with_bases(bases.iter().copied())
    }

    fn animals() -> Vec<CategoryDefinition> {
        vec![
            def("Animal", &[]),
            def("Mammal", &["Animal"]),
            def("Dog", &["Mammal"]),
        ]
    }

    fn diamond() -> Vec<CategoryDefinition> {
        vec![
            def("A", &[]),
            def("B", &["A"]),
            def("C", &["A"]),
            def("D", &["B", "C"]),
        ]
    }

    fn descriptor<'a>(descriptors: &'a [Descriptor], id: &str) -> &'a Descriptor {
        descriptors.iter().find(|d| d.id == id).unwrap()
    }

    fn sorted(mut ids: Vec<&str>) -> Vec<&str> {
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_chain_closure() {
        let hierarchy = CategoryHierarchy::build(&animals()).unwrap();
        let descriptors = hierarchy.descriptors();

        let dog = descriptor(&descriptors, "Dog");
        let supers = dog.supercategory_ids.iter().map(String::as_str).collect();
        assert_eq!(sorted(supers), vec!["Animal", "Mammal"]);

        let animal = descriptor(&descriptors, "Animal");
        let subs = animal.subcategory_ids.iter().map(String::as_str).collect();
        assert_eq!(sorted(subs), vec!["Dog", "Mammal"]);

        assert_eq!(hierarchy.root_ids(), vec!["Animal"]);
        assert_eq!(hierarchy.leaf_ids(), vec!["Dog"]);
    }

    #[test]
    fn test_descriptor_order_follows_definitions() {
        let hierarchy = CategoryHierarchy::build(&animals()).unwrap();
        let ids: Vec<_> = hierarchy.descriptors().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["Animal", "Mammal", "Dog"]);
        assert_eq!(
            hierarchy.get("Dog").unwrap().descriptor().supercategory_ids,
            vec!["Animal", "Mammal"]
        );
        assert_eq!(
            hierarchy.get("Animal").unwrap().descriptor().subcategory_ids,
            vec!["Mammal", "Dog"]
        );
    }

    #[test]
    fn test_closure_independent_of_input_order() {
        let reversed: Vec<_> = animals().into_iter().rev().collect();
        let hierarchy = CategoryHierarchy::build(&reversed).unwrap();

        assert_eq!(
            sorted(hierarchy.supercategories_of("Dog").unwrap()),
            vec!["Animal", "Mammal"]
        );
        assert_eq!(
            sorted(hierarchy.subcategories_of("Animal").unwrap()),
            vec!["Dog", "Mammal"]
        );
    }

    #[test]
    fn test_unresolved_base_is_skipped() {
        let defs = vec![def("Animal", &[]), def("Dog", &["Ghost", "Animal"])];
        let hierarchy = CategoryHierarchy::build(&defs).unwrap();

        let dog = hierarchy.get("Dog").unwrap();
        assert_eq!(dog.descriptor().supercategory_ids, vec!["Animal"]);
        assert!(!dog.is_category_of("Ghost"));
        assert!(hierarchy.get("Ghost").is_none());
        assert_eq!(
            hierarchy.warnings(),
            &[BuildWarning::UnresolvedBase {
                category: "Dog".into(),
                base: "Ghost".into(),
            }]
        );
    }

    #[test]
    fn test_only_unresolved_base_is_neither_root_nor_linked() {
        let hierarchy = CategoryHierarchy::build(&[def("Dog", &["Ghost"])]).unwrap();
        let dog = hierarchy.get("Dog").unwrap();
        assert!(dog.supercategories().is_empty());
        assert!(hierarchy.root_ids().is_empty());
        assert_eq!(hierarchy.leaf_ids(), vec!["Dog"]);
    }

    #[test]
    fn test_strict_rejects_unresolved() {
        let defs = vec![def("Dog", &["Ghost"])];
        let err = CategoryHierarchy::build_with(&defs, BuildOptions::strict()).unwrap_err();
        match err {
            TaxonError::UnresolvedReference { category, base } => {
                assert_eq!(category, "Dog");
                assert_eq!(base, "Ghost");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_diamond_has_no_duplicates() {
        let hierarchy = CategoryHierarchy::build(&diamond()).unwrap();
        let d = hierarchy.get("D").unwrap().descriptor();
        assert_eq!(d.supercategory_ids, vec!["A", "B", "C"]);

        let a = hierarchy.get("A").unwrap().descriptor();
        assert_eq!(a.subcategory_ids, vec!["B", "C", "D"]);
        assert_eq!(hierarchy.leaf_ids(), vec!["D"]);
        assert_eq!(hierarchy.bases_of("D").unwrap(), vec!["B", "C"]);
        assert_eq!(hierarchy.children_of("A").unwrap(), vec!["B", "C"]);
    }

    #[test]
    fn test_two_node_cycle_is_rejected() {
        let defs = vec![def("X", &["Y"]), def("Y", &["X"])];
        let err = CategoryHierarchy::build(&defs).unwrap_err();
        match err {
            TaxonError::CyclicDefinition { cycle } => assert_eq!(cycle, vec!["X", "Y", "X"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_long_cycle_behind_root_is_rejected() {
        let defs = vec![
            def("Root", &[]),
            def("A", &["Root", "C"]),
            def("B", &["A"]),
            def("C", &["B"]),
        ];
        let err = CategoryHierarchy::build(&defs).unwrap_err();
        match err {
            TaxonError::CyclicDefinition { cycle } => {
                assert_eq!(cycle.first(), cycle.last());
                assert_eq!(cycle.len(), 4);
                assert!(cycle.contains(&"B".to_string()));
                assert!(!cycle.contains(&"Root".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_failed_build_leaves_hierarchy_uninitialized() {
        let mut hierarchy = CategoryHierarchy::new();
        let defs = vec![def("X", &["Y"]), def("Y", &["X"])];
        assert!(hierarchy.initialize(&defs).is_err());
        assert_eq!(hierarchy.state(), BuildState::Uninitialized);
        assert!(hierarchy.is_empty());
        assert!(matches!(hierarchy.catalog(), Err(TaxonError::NotInitialized)));

        assert!(hierarchy.initialize(&animals()).unwrap());
        assert_eq!(hierarchy.len(), 3);
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let defs = vec![def("A", &[]), def("A", &[])];
        let err = CategoryHierarchy::build(&defs).unwrap_err();
        assert!(matches!(err, TaxonError::DuplicateCategory { id } if id == "A"));
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let defs = vec![def("A", &[]), def("  ", &["A"])];
        let err = CategoryHierarchy::build(&defs).unwrap_err();
        assert!(matches!(err, TaxonError::EmptyCategoryId { index: 1 }));
    }

    #[test]
    fn test_self_reference_is_stripped() {
        let defs = vec![def("A", &["A"]), def("B", &["A", "B", "A"])];
        let hierarchy = CategoryHierarchy::build(&defs).unwrap();

        assert_eq!(hierarchy.root_ids(), vec!["A"]);
        assert_eq!(hierarchy.supercategories_of("B").unwrap(), vec!["A"]);
        assert_eq!(
            hierarchy.warnings(),
            &[
                BuildWarning::SelfReference {
                    category: "A".into()
                },
                BuildWarning::SelfReference {
                    category: "B".into()
                },
                BuildWarning::DuplicateBase {
                    category: "B".into(),
                    base: "A".into()
                },
            ]
        );
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut hierarchy = CategoryHierarchy::new();
        assert!(hierarchy.initialize(&animals()).unwrap());
        let first = hierarchy.descriptors();

        assert!(!hierarchy.initialize(&diamond()).unwrap());
        assert_eq!(hierarchy.descriptors(), first);
        assert_eq!(hierarchy.state(), BuildState::Built);
    }

    #[test]
    fn test_is_category_of() {
        let hierarchy = CategoryHierarchy::build(&diamond()).unwrap();
        assert!(hierarchy.is_category_of("D", "D"));
        assert!(hierarchy.is_category_of("D", "B"));
        assert!(hierarchy.is_category_of("D", "A"));
        assert!(!hierarchy.is_category_of("B", "C"));
        assert!(!hierarchy.is_category_of("A", "D"));
        assert!(!hierarchy.is_category_of("Ghost", "A"));
    }

    #[test]
    fn test_matching() {
        let defs = vec![
            def("weapon", &[]),
            def("weapon.sword", &["weapon"]),
            def("weapon.bow", &["weapon"]),
            def("armor", &[]),
        ];
        let hierarchy = CategoryHierarchy::build(&defs).unwrap();
        assert_eq!(
            hierarchy.matching("weapon.*").unwrap(),
            vec!["weapon.sword", "weapon.bow"]
        );
        assert!(hierarchy.matching("[").is_err());
    }

    #[test]
    fn test_empty_input() {
        let hierarchy = CategoryHierarchy::build(&[]).unwrap();
        assert!(hierarchy.is_initialized());
        assert!(hierarchy.is_empty());
        assert!(hierarchy.catalog().unwrap().is_empty());
    }

    /// Pseudo-random DAGs checked against a brute-force reachability oracle.
    #[test]
    fn test_generated_dags_hold_closure_invariants() {
        let mut seed: u64 = 0x5eed_cafe;
        let mut next = move |bound: usize| {
            seed = seed
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((seed >> 33) as usize) % bound
        };

        for _ in 0..20 {
            let count = 2 + next(30);
            let mut defs = Vec::with_capacity(count);
            for i in 0..count {
                let mut bases = Vec::new();
                if i > 0 {
                    for _ in 0..next(4) {
                        bases.push(format!("n{}", next(i)));
                    }
                }
                defs.push(CategoryDefinition::new(format!("n{i}")).with_bases(bases));
            }
            // Shuffle definition order; edges only point to lower numbers so
            // the graph stays acyclic.
            for i in (1..defs.len()).rev() {
                let j = next(i + 1);
                defs.swap(i, j);
            }

            let hierarchy = CategoryHierarchy::build(&defs).unwrap();
            let by_id: HashMap<&str, &CategoryDefinition> =
                defs.iter().map(|d| (d.id.as_str(), d)).collect();

            for node in hierarchy.nodes() {
                let descriptor = node.descriptor();

                // Oracle: walk declared bases.
                let mut expected = BTreeSet::new();
                let mut pending: Vec<&str> =
                    by_id[node.id()].base_ids.iter().map(String::as_str).collect();
                while let Some(id) = pending.pop() {
                    if expected.insert(id) {
                        pending.extend(by_id[id].base_ids.iter().map(String::as_str));
                    }
                }
                let actual: BTreeSet<&str> =
                    descriptor.supercategory_ids.iter().map(String::as_str).collect();
                assert_eq!(actual, expected, "closure of {}", node.id());
                assert_eq!(actual.len(), descriptor.supercategory_ids.len());

                for sup in &descriptor.supercategory_ids {
                    let parent = hierarchy.get(sup).unwrap().descriptor();
                    assert!(parent.subcategory_ids.iter().any(|s| s == node.id()));
                }
                for sub in &descriptor.subcategory_ids {
                    let child = hierarchy.get(sub).unwrap().descriptor();
                    assert!(child.supercategory_ids.iter().any(|s| s == node.id()));
                }

                let is_root = by_id[node.id()].base_ids.is_empty();
                assert_eq!(hierarchy.root_ids().contains(&node.id()), is_root);
                assert_eq!(
                    hierarchy.leaf_ids().contains(&node.id()),
                    descriptor.subcategory_ids.is_empty()
                );
            }
        }
    }
}
