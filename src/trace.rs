//! The labelled tree shared by the syntax pass and the evaluator.
//!
//! Both trees produced by a run use this one shape: a label and an ordered list of children. Nodes are only ever
//! appended to, never removed or reordered.
//!
//! Statement sequences nest one level per statement, so a long program gives a very deep tree. Every walk over a
//! tree, dropping included, uses an explicit stack or grows the native one.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub label: String,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(label: impl Into<String>) -> Node {
        Node { label: label.into(), children: vec![] }
    }

    pub fn with_children(label: impl Into<String>, children: Vec<Node>) -> Node {
        Node { label: label.into(), children }
    }

    /// A node with a single childless child, e.g. `IDENTIFIER` over the name `x`.
    pub fn leaf(label: impl Into<String>, value: impl Into<String>) -> Node {
        Node::with_children(label, vec![Node::new(value)])
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Appends an empty child and hands it back so the caller can fill it in.
    ///
    /// Slots are pushed before they are filled, so whatever was recorded before an error is still in the tree.
    pub fn slot(&mut self, label: impl Into<String>) -> &mut Node {
        self.children.push(Node::new(label));
        self.children.last_mut().expect("Just pushed")
    }

    /// Finds the first direct child with the given label.
    pub fn child(&self, label: &str) -> Option<&Node> {
        self.children.iter().find(|child| child.label == label)
    }

    /// Depth first search over the whole tree, including `self`.
    pub fn contains_label(&self, label: &str) -> bool {
        let mut pending = vec![self];

        while let Some(node) = pending.pop() {
            if node.label == label {
                return true;
            }
            pending.extend(&node.children);
        }

        false
    }

    /// Total number of nodes in the tree.
    pub fn size(&self) -> usize {
        let mut pending = vec![self];
        let mut count = 0;

        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(&node.children);
        }

        count
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        // Detach every descendant first, so each node is dropped with no children left.
        let mut pending = std::mem::take(&mut self.children);

        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// One line per node, indented two spaces per level.
impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut pending = vec![(self, 0)];

        while let Some((node, depth)) = pending.pop() {
            writeln!(f, "{:indent$}{}", "", node.label, indent = depth * 2)?;

            pending.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        }

        Ok(())
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Prevent stack overflow by allocating additional stack as required.
        stacker::maybe_grow(32 * 1024, 1024 * 1024, || {
            let mut node = serializer.serialize_struct("Node", 2)?;
            node.serialize_field("label", &self.label)?;
            node.serialize_field("children", &self.children)?;
            node.end()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A tree shaped like a long statement sequence: each level holds one statement and the rest.
    fn chain(depth: usize) -> Node {
        let mut node = Node::with_children("statement_full", vec![Node::leaf("INTEGER", "1")]);

        for _ in 0..depth {
            node = Node::with_children("program", vec![Node::new("statement_full"), node]);
        }

        node
    }

    #[test]
    fn deep_trees_are_walked_without_recursion() {
        let tree = chain(200_000);

        assert_eq!(tree.size(), 2 * 200_000 + 3);
        assert!(tree.contains_label("INTEGER"));
        assert!(!tree.contains_label("block"));

        drop(tree);
    }

    #[test]
    fn deep_trees_serialize() {
        let tree = chain(100_000);

        let json = serde_json::to_string(&tree).unwrap();

        assert!(json.starts_with(r#"{"label":"program","children":[{"label":"statement_full","children":[]},"#));
        assert!(json.contains(r#"{"label":"INTEGER","children":[{"label":"1","children":[]}]}"#));
    }

    #[test]
    fn display_indents_by_depth() {
        let tree = Node::with_children("main", vec![Node::with_children("program", vec![Node::new("a")]), Node::new("b")]);

        assert_eq!(tree.to_string(), "main\n  program\n    a\n  b\n");
    }
}
