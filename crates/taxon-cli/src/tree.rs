//! Text rendering of a hierarchy. Categories with several bases appear
//! under each of them, but their subtree is only expanded the first time.

use std::collections::HashSet;

use taxon_core::{CategoryHierarchy, CategoryNode, NodeId};

const REPEAT_MARKER: &str = " (see above)";

pub fn render(hierarchy: &CategoryHierarchy) -> String {
    let mut out = String::new();
    let mut expanded = HashSet::new();

    // Roots first, then categories whose every base failed to resolve.
    for node in hierarchy.nodes().iter().filter(|n| n.bases().is_empty()) {
        out.push_str(node.id());
        if !node.is_root() {
            out.push_str(" (unresolved bases)");
        }
        out.push('\n');
        render_children(hierarchy, node, "", &mut expanded, &mut out);
    }

    out
}

fn render_children(
    hierarchy: &CategoryHierarchy,
    node: &CategoryNode,
    prefix: &str,
    expanded: &mut HashSet<NodeId>,
    out: &mut String,
) {
    let children = node.children();
    for (position, handle) in children.iter().enumerate() {
        let Some(child) = hierarchy.node(*handle) else {
            continue;
        };
        let last = position + 1 == children.len();

        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(child.id());

        if !expanded.insert(*handle) {
            if !child.children().is_empty() {
                out.push_str(REPEAT_MARKER);
            }
            out.push('\n');
            continue;
        }
        out.push('\n');

        let nested = format!("{}{}", prefix, if last { "    " } else { "│   " });
        render_children(hierarchy, child, &nested, expanded, out);
    }
}
