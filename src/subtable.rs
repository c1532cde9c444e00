//! Per-variable subtable for BDD nodes.
//!
//! The manager keeps one subtable per variable. Every node in a subtable
//! tests the same variable, so the key is just the `(low, high)` pair:
//!
//! ```text
//! subtables[1] → Subtable for x1
//! subtables[2] → Subtable for x2
//! ...
//! ```
//!
//! Together with the node arena this is the unique table: a lookup here
//! before allocating guarantees that each `(variable, low, high)` triple
//! exists at most once.

use std::collections::HashMap;

use crate::reference::Ref;
use crate::types::Var;

/// A subtable storing BDD nodes for a single variable.
#[derive(Debug, Clone)]
pub struct Subtable {
    /// The variable for all nodes in this subtable.
    pub variable: Var,

    /// Map from (low, high) to node reference.
    nodes: HashMap<(Ref, Ref), Ref>,
}

impl Subtable {
    /// Create a new empty subtable for the given variable.
    pub fn new(variable: Var) -> Self {
        Self {
            variable,
            nodes: HashMap::new(),
        }
    }

    /// Look up a node by its children.
    pub fn find(&self, low: Ref, high: Ref) -> Option<Ref> {
        self.nodes.get(&(low, high)).copied()
    }

    /// Insert a node into the subtable.
    pub fn insert(&mut self, low: Ref, high: Ref, node: Ref) {
        self.nodes.insert((low, high), node);
    }

    /// Keep only the nodes accepted by the predicate.
    ///
    /// Returns the number of removed entries.
    pub fn retain(&mut self, mut keep: impl FnMut(Ref) -> bool) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|_, node| keep(*node));
        before - self.nodes.len()
    }

    /// Get the number of nodes in this subtable.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the subtable is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtable_basic() {
        let mut st = Subtable::new(Var::new(1));

        assert!(st.find(Ref::ZERO, Ref::ONE).is_none());

        st.insert(Ref::ZERO, Ref::ONE, Ref::new(2));
        assert_eq!(st.find(Ref::ZERO, Ref::ONE), Some(Ref::new(2)));
        assert_eq!(st.len(), 1);

        let removed = st.retain(|node| node != Ref::new(2));
        assert_eq!(removed, 1);
        assert!(st.find(Ref::ZERO, Ref::ONE).is_none());
        assert!(st.is_empty());
    }

    #[test]
    fn test_subtable_multiple_nodes() {
        let mut st = Subtable::new(Var::new(1));

        st.insert(Ref::ZERO, Ref::ONE, Ref::new(10));
        st.insert(Ref::ONE, Ref::ZERO, Ref::new(20));
        st.insert(Ref::ZERO, Ref::new(5), Ref::new(30));

        assert_eq!(st.len(), 3);
        assert_eq!(st.find(Ref::ZERO, Ref::ONE), Some(Ref::new(10)));
        assert_eq!(st.find(Ref::ONE, Ref::ZERO), Some(Ref::new(20)));
        assert_eq!(st.find(Ref::ZERO, Ref::new(5)), Some(Ref::new(30)));

        let removed = st.retain(|node| node.raw() >= 20);
        assert_eq!(removed, 1);
        assert_eq!(st.len(), 2);
    }
}
