//! Recursive matching over a document tree.

use crate::document::node::NodeKind;
use crate::document::tree::{DataTree, NodeId};
use crate::lookup::Lookup;

/// Walks the tree in pre-order and returns every node whose position
/// matches the compiled lookup, at any depth, in encounter order.
pub fn find(tree: &DataTree<'_>, lookup: &Lookup) -> Vec<NodeId> {
    let mut matches = Vec::new();
    collect(tree, tree.root(), lookup, &mut matches);
    matches
}

fn collect(tree: &DataTree<'_>, id: NodeId, lookup: &Lookup, matches: &mut Vec<NodeId>) {
    let node = tree.node(id);
    let Some(children) = node.children() else {
        return;
    };

    for &child_id in children {
        let child = tree.node(child_id);
        match node.kind() {
            // Sequence elements carry no key of their own to test; only map
            // keys nested beneath them can match.
            NodeKind::Sequence => {
                if child.has_children() {
                    collect(tree, child_id, lookup, matches);
                }
            }
            NodeKind::Map => {
                if lookup.is_left_matched(child.label())
                    && lookup.is_right_matched(child.data())
                {
                    matches.push(child_id);
                }
                if child.has_children() {
                    collect(tree, child_id, lookup, matches);
                }
            }
            NodeKind::Scalar | NodeKind::Opaque => {}
        }
    }
}
