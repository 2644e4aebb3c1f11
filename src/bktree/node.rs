// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0

//! a BK-tree node (§3): owns its value and a keyed mapping to children

use crate::metric::Weight;

/// exclusively owns a value and its children, keyed by distance from this
/// node to the child
///
/// children are stored as `Vec<(D, Node<V, D>)>` rather than a `HashMap`:
/// §4.6 makes the insertion order of child-distance keys a user-visible
/// iteration property, which a hash map cannot preserve.
pub struct Node<V, D> {
    pub(super) value: V,
    pub(super) children: Vec<(D, Node<V, D>)>,
}

impl<V, D: Weight> Node<V, D> {
    pub(super) fn leaf(value: V) -> Self {
        Self {
            value,
            children: Vec::new(),
        }
    }

    /// number of nodes in this subtree, including `self`
    pub(super) fn size(&self) -> usize {
        1 + self.children.iter().map(|(_, child)| child.size()).sum::<usize>()
    }

    /// consumes the subtree, appending every value (this node's and all
    /// descendants', in depth-first order) to `out`
    pub(super) fn drain_into(self, out: &mut Vec<V>) {
        out.push(self.value);
        for (_, child) in self.children {
            child.drain_into(out);
        }
    }

    /// the value this node holds
    pub fn value(&self) -> &V {
        &self.value
    }

    /// children in insertion order of their distance keys, as the tree's
    /// iteration order invariant (§4.6) requires
    pub fn children(&self) -> impl Iterator<Item = (&D, &Node<V, D>)> {
        self.children.iter().map(|(d, node)| (d, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_has_size_one() {
        let node = Node::<&str, usize>::leaf("a");
        assert_eq!(1, node.size());
    }

    #[test]
    fn size_counts_descendants() {
        let mut root = Node::<&str, usize>::leaf("a");
        root.children.push((1, Node::leaf("b")));
        root.children.push((2, Node::leaf("c")));
        assert_eq!(3, root.size());
    }

    #[test]
    fn drain_into_collects_depth_first() {
        let mut root = Node::<&str, usize>::leaf("a");
        let mut child = Node::leaf("b");
        child.children.push((1, Node::leaf("c")));
        root.children.push((1, child));
        let mut out = Vec::new();
        root.drain_into(&mut out);
        assert_eq!(vec!["a", "b", "c"], out);
    }
}
