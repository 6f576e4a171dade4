//! Projection of matched nodes through a select statement.

use crate::document::node::Value;
use crate::document::tree::{DataTree, NodeId};
use crate::select::SelectStatement;
use indexmap::IndexMap;

/// Applies a select statement to the finder's matches, in order.
///
/// With a filter, only matches whose parent record satisfies it survive.
/// Zero-select yields each match's own value, all-select the parent record,
/// and column-select a new record of exactly the requested columns; a
/// parent missing any requested column is dropped entirely.
pub fn project(tree: &DataTree<'_>, matches: &[NodeId], statement: &SelectStatement) -> Vec<Value> {
    let mut output = Vec::new();

    for &id in matches {
        let node = tree.node(id);
        let parent_data = tree.parent_data(id);

        if let Some(filter) = statement.filter() {
            let Some(record) = parent_data else { continue };
            if !filter.eval(record) {
                continue;
            }
        }

        if statement.is_zero_select() {
            output.push(node.data().clone());
        } else if statement.is_all_select() {
            let Some(record) = parent_data else { continue };
            output.push(record.clone());
        } else {
            let Some(Value::Object(entries)) = parent_data else {
                continue;
            };
            if !statement
                .columns()
                .iter()
                .all(|column| entries.contains_key(column))
            {
                continue;
            }
            let picked: IndexMap<String, Value> = statement
                .columns()
                .iter()
                .map(|column| {
                    (
                        column.clone(),
                        entries.get(column).cloned().unwrap_or(Value::Null),
                    )
                })
                .collect();
            output.push(Value::Object(picked));
        }
    }

    output
}
