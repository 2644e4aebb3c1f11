// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0

//! a Burkhard–Keller tree (C5): a metric-space index supporting insert,
//! remove, contains, nearest-match and bounded k-nearest search

mod node;

pub use node::Node;

use crate::metric::{DistanceMetric, Weight};

/// a metric-space index over values of type `V` under distance type `D`
///
/// carries a distance metric and an optional root node (§3); the tree
/// exclusively owns every node transitively reachable from the root.
pub struct BkTree<V, D, M> {
    metric: M,
    root: Option<Node<V, D>>,
}

impl<V, D: Weight, M: DistanceMetric<V, D>> BkTree<V, D, M> {
    /// an empty tree over the given metric
    pub fn new(metric: M) -> Self {
        Self { metric, root: None }
    }

    /// the total number of nodes reachable from the root
    pub fn size(&self) -> usize {
        self.root.as_ref().map_or(0, Node::size)
    }
    /// whether this tree holds no values
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
    /// the metric this tree was built with
    pub fn metric(&self) -> &M {
        &self.metric
    }
    /// the root node, if any
    pub fn root(&self) -> Option<&Node<V, D>> {
        self.root.as_ref()
    }

    /// inserts `value`; returns `false` if an equal-distance-zero value was
    /// already present (§4.6)
    pub fn insert(&mut self, value: V) -> bool {
        match &mut self.root {
            None => {
                self.root = Some(Node::leaf(value));
                true
            }
            Some(root) => Self::insert_into(root, value, &self.metric),
        }
    }

    fn insert_into(node: &mut Node<V, D>, value: V, metric: &M) -> bool {
        let d = metric.distance(&node.value, &value);
        if d == D::zero() {
            return false;
        }
        match node.children.iter().position(|(key, _)| *key == d) {
            Some(pos) => Self::insert_into(&mut node.children[pos].1, value, metric),
            None => {
                node.children.push((d, Node::leaf(value)));
                true
            }
        }
    }

    /// removes `value`; returns `false` if it was not present
    ///
    /// detaches every descendant of the removed node and re-inserts each
    /// one starting from the removed node's former parent, restoring the
    /// BK-tree invariants (§4.6). Removing the root re-grafts the whole
    /// tree: every other node is collected and reinserted into a fresh,
    /// empty tree, since every distance key in a BK-tree is relative to its
    /// parent and the root has no parent to stay relative to.
    pub fn remove(&mut self, value: &V) -> bool {
        let Some(root) = &self.root else {
            return false;
        };
        if self.metric.distance(&root.value, value) != D::zero() {
            return Self::remove_from(self.root.as_mut().expect("checked above"), value, &self.metric);
        }
        let old_root = self.root.take().expect("checked above");
        let mut survivors = Vec::new();
        for (_, child) in old_root.children {
            child.drain_into(&mut survivors);
        }
        log::trace!("removed root node, re-grafting {} descendants", survivors.len());
        for survivor in survivors {
            self.insert(survivor);
        }
        true
    }

    fn remove_from(node: &mut Node<V, D>, value: &V, metric: &M) -> bool {
        let d = metric.distance(&node.value, value);
        let Some(pos) = node.children.iter().position(|(key, _)| *key == d) else {
            return false;
        };
        if metric.distance(&node.children[pos].1.value, value) == D::zero() {
            let (_, removed) = node.children.remove(pos);
            let mut survivors = Vec::new();
            for (_, child) in removed.children {
                child.drain_into(&mut survivors);
            }
            log::trace!("removed node, re-grafting {} descendants onto its parent", survivors.len());
            for survivor in survivors {
                Self::insert_into(node, survivor, metric);
            }
            true
        } else {
            Self::remove_from(&mut node.children[pos].1, value, metric)
        }
    }

    /// `find(value, None) != None`
    pub fn contains(&self, value: &V) -> bool {
        self.find(value, None).is_some()
    }

    /// the single nearest value to `value`, within `max_distance` if given
    ///
    /// depth-first walk using an explicit stack, pruning children whose
    /// key cannot possibly hold a closer match than the current best, by
    /// the triangle inequality (§4.6). §4.6's wording updates the running
    /// best on `d ≤ best_distance`, not strict `<`, so among several
    /// equidistant nodes this returns the last one visited rather than the
    /// first.
    pub fn find(&self, value: &V, max_distance: Option<D>) -> Option<(&V, D)> {
        let root = self.root.as_ref()?;
        let mut stack = vec![root];
        let mut best: Option<(&V, D)> = None;
        let mut cap = max_distance;

        while let Some(node) = stack.pop() {
            let d = self.metric.distance(value, &node.value);
            let within_cap = cap.is_none_or(|c| d <= c);
            let improves = best.as_ref().is_none_or(|&(_, best_d)| d <= best_d);
            if within_cap && improves {
                best = Some((&node.value, d));
                cap = Some(d);
            }
            for (key, child) in &node.children {
                let prunable = cap.is_some_and(|c| key.abs_diff(d) > c);
                if !prunable {
                    stack.push(child);
                }
            }
        }
        best
    }

    /// up to `limit` nearest values within `max_distance`, ascending by
    /// distance
    ///
    /// §4.6 describes the accepted-match set as an ordered linked list so
    /// insertion stays O(k); a `Vec` kept sorted by insertion-position search
    /// gives the same O(k) insertion cost for the small result sizes this
    /// index is meant for, without a second collection type.
    pub fn find_all(&self, value: &V, max_distance: D, limit: Option<usize>) -> Vec<(&V, D)> {
        let Some(root) = self.root.as_ref() else {
            return Vec::new();
        };
        let mut stack = vec![root];
        let mut accepted: Vec<(&V, D)> = Vec::new();
        let mut cap = Some(max_distance);

        while let Some(node) = stack.pop() {
            let d = self.metric.distance(value, &node.value);
            if cap.is_none_or(|c| d <= c) {
                let pos = accepted.partition_point(|&(_, accepted_d)| accepted_d <= d);
                accepted.insert(pos, (&node.value, d));
                if let Some(limit) = limit {
                    if accepted.len() > limit {
                        accepted.truncate(limit);
                    }
                    if accepted.len() == limit {
                        cap = accepted.last().map(|&(_, d)| d);
                    }
                }
            }
            for (key, child) in &node.children {
                let prunable = cap.is_some_and(|c| key.abs_diff(d) > c);
                if !prunable {
                    stack.push(child);
                }
            }
        }
        accepted
    }
}
