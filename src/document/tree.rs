//! Hierarchical view over a decoded document.
//!
//! [`DataTree`] wraps a borrowed [`Value`] in an arena of nodes addressed by
//! integer handles. Each node records the label it was reached by (the map
//! key, or a synthetic ordinal for sequence entries), its structural kind,
//! its children, and a non-owning back-reference to its parent. The arena is
//! built fresh for each query and dropped with it.
//!
//! # Example
//!
//! ```
//! use dataquill::document::parser::parse_json;
//! use dataquill::document::tree::DataTree;
//!
//! let data = parse_json(r#"{"host": {"name": "a"}}"#).unwrap();
//! let tree = DataTree::build(&data);
//!
//! let root = tree.node(tree.root());
//! let host = tree.node(root.children().unwrap()[0]);
//! assert_eq!(host.label(), "host");
//! assert_eq!(host.parent(), Some(tree.root()));
//! ```

use super::node::{NodeKind, Value};

/// Handle to a node inside a [`DataTree`] arena.
pub type NodeId = usize;

/// One wrapped position in the hierarchical view of the data.
#[derive(Debug)]
pub struct Node<'a> {
    data: &'a Value,
    label: String,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Option<Vec<NodeId>>,
}

impl<'a> Node<'a> {
    /// The raw underlying value.
    pub fn data(&self) -> &'a Value {
        self.data
    }

    /// The label this node was reached by from its parent: the original map
    /// key, a synthetic `position N` for sequence entries, or empty for the
    /// root.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Non-owning back-reference to the parent node.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child handles, in map insertion order or sequence order. `None` when
    /// the node is a leaf; never an empty vector.
    pub fn children(&self) -> Option<&[NodeId]> {
        self.children.as_deref()
    }

    pub fn has_children(&self) -> bool {
        self.children.is_some()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Arena of [`Node`]s built top-down over a borrowed [`Value`].
#[derive(Debug)]
pub struct DataTree<'a> {
    nodes: Vec<Node<'a>>,
}

impl<'a> DataTree<'a> {
    /// Builds the full node arena for `data`. The root gets an empty label.
    pub fn build(data: &'a Value) -> Self {
        let mut tree = DataTree { nodes: Vec::new() };
        tree.add_node(data, String::new(), None);
        tree
    }

    fn add_node(&mut self, data: &'a Value, label: String, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            data,
            label,
            kind: data.kind(),
            parent,
            children: None,
        });

        let children: Vec<NodeId> = match data {
            Value::Object(entries) => entries
                .iter()
                .map(|(key, value)| self.add_node(value, key.clone(), Some(id)))
                .collect(),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(position, item)| {
                    self.add_node(item, format!("position {}", position), Some(id))
                })
                .collect(),
            _ => Vec::new(),
        };

        if !children.is_empty() {
            self.nodes[id].children = Some(children);
        }
        id
    }

    /// Handle of the root node.
    pub fn root(&self) -> NodeId {
        0
    }

    pub fn node(&self, id: NodeId) -> &Node<'a> {
        &self.nodes[id]
    }

    /// Raw data of a node's parent, if it has one.
    pub fn parent_data(&self, id: NodeId) -> Option<&'a Value> {
        self.nodes[id].parent.map(|parent| self.nodes[parent].data)
    }

    /// Total number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
