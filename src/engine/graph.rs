//! The pointer graph (C1, spec §3-4.1).
use super::lattice::PointerStatus;
use super::node::{Node, NodeId};
use crate::error::GraphError;
use crate::ir::value::ValueId;
use std::collections::HashMap;
use std::fmt::Write as _;

/// Arena of pointer nodes for one function's analysis, plus the entry map
/// from program values to nodes and the offset-node cache. Never shared
/// across functions (spec §5).
#[derive(Debug, Default)]
pub struct PointerGraph {
    arena: Vec<Node>,
    entries: HashMap<ValueId, NodeId>,
    offsets: HashMap<(ValueId, i64), NodeId>,
}

impl PointerGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn insert_leaf(&mut self, status: PointerStatus) -> NodeId {
        self.push(Node::Leaf(status))
    }

    #[must_use]
    pub fn insert_ref(&mut self, target: NodeId) -> NodeId {
        self.push(Node::Ref(target))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.arena.len());
        self.arena.push(node);
        id
    }

    /// Binds `value` to `node`, replacing any prior binding unless the
    /// value is already `Leaf(UNDEFINED)` — that binding is sticky
    /// (spec invariant 3) and the bind is silently ignored.
    pub fn bind(&mut self, value: ValueId, node: NodeId) {
        if let Some(&existing) = self.entries.get(&value)
            && self.status(existing).is_undefined()
        {
            return;
        }
        self.entries.insert(value, node);
    }

    #[must_use]
    pub fn lookup(&self, value: ValueId) -> Option<NodeId> {
        self.entries.get(&value).copied()
    }

    /// Rebinds `addr` to point at `target` through a reference.
    ///
    /// If `addr` already has a node, that node is mutated in place to
    /// `Ref(target)` rather than replaced, so that anything aliasing the
    /// same node (an offset-cache entry, another value bound to the same
    /// node) observes the new reference too. This is what keeps
    /// offset-(-1) GEPs off one base sharing a single node even across an
    /// intervening store (spec invariant 4).
    pub fn store_through(&mut self, addr: ValueId, target: NodeId) {
        match self.lookup(addr) {
            // mutate in place, not a rebind: any offset-cache alias of
            // `existing` must see the new target too (invariant 4).
            Some(existing) => self.arena[existing.0] = Node::Ref(target),
            None => {
                let reference = self.insert_ref(target);
                self.entries.insert(addr, reference);
            }
        }
    }

    /// The canonical node for `(base_value, offset)`, creating it on first
    /// reference with the base's current status (or DONT_KNOW if the base
    /// is unbound).
    pub fn offset_node(&mut self, base_value: ValueId, offset: i64) -> NodeId {
        if let Some(&existing) = self.offsets.get(&(base_value, offset)) {
            return existing;
        }
        let status = self.lookup(base_value).map_or(PointerStatus::DontKnow, |n| self.status(n));
        let fresh = self.insert_leaf(status);
        self.offsets.insert((base_value, offset), fresh);
        fresh
    }

    /// Mutates a Leaf node in place to become a Ref to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::AlreadyReference`] if `node` is already a Ref.
    pub fn transform_leaf_to_ref(&mut self, node: NodeId, target: NodeId) -> Result<(), GraphError> {
        if self.arena[node.0].is_ref() {
            return Err(GraphError::AlreadyReference);
        }
        self.arena[node.0] = Node::Ref(target);
        Ok(())
    }

    #[must_use]
    pub fn status(&self, node: NodeId) -> PointerStatus {
        match self.arena[node.0] {
            Node::Leaf(status) => status,
            Node::Ref(_) => PointerStatus::NonNil,
        }
    }

    /// The target of `node` if it is a `Ref`, `None` if it is a `Leaf`.
    #[must_use]
    pub fn ref_target(&self, node: NodeId) -> Option<NodeId> {
        match self.arena[node.0] {
            Node::Ref(target) => Some(target),
            Node::Leaf(_) => None,
        }
    }

    #[must_use]
    pub fn deref_is_error(&self, node: NodeId) -> bool {
        matches!(self.arena[node.0], Node::Leaf(PointerStatus::Nil | PointerStatus::Undefined))
    }

    #[must_use]
    pub fn depth(&self, node: NodeId) -> usize {
        match self.arena[node.0] {
            Node::Leaf(_) => 0,
            Node::Ref(target) => 1 + self.depth(target),
        }
    }

    /// A textual dump of every node, entry-map binding, and derived offset
    /// node, in the style of the tool this graph reimplements.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "NODES IN GRAPH:");
        for (idx, node) in self.arena.iter().enumerate() {
            match node {
                Node::Leaf(status) => {
                    let marker = if self.deref_is_error(NodeId(idx)) { " (!)" } else { "" };
                    let _ = writeln!(out, " - <{idx}> LEAF/{status}{marker}");
                }
                Node::Ref(target) => {
                    let _ = writeln!(out, " - <{idx}> REF -> <{}> at depth {}", target.0, self.depth(NodeId(idx)));
                }
            }
        }

        let _ = writeln!(out, "\nENTRY POINTS INTO GRAPH:");
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by_key(|(_, node)| node.0);
        for (value, node) in entries {
            let _ = writeln!(out, " - {value} => <{}>", node.0);
        }

        let _ = writeln!(out, "\nDERIVED OFFSET NODES:");
        let mut offsets: Vec<_> = self.offsets.iter().collect();
        offsets.sort_by_key(|(_, node)| node.0);
        for ((base, offset), node) in offsets {
            let _ = writeln!(out, " - <{}> = ({base}, {offset})", node.0);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_is_sticky_once_undefined() {
        let mut graph = PointerGraph::new();
        let v = ValueId::new();
        let undef = graph.insert_leaf(PointerStatus::Undefined);
        graph.bind(v, undef);
        let nonnil = graph.insert_leaf(PointerStatus::NonNil);
        graph.bind(v, nonnil);
        assert_eq!(graph.lookup(v), Some(undef));
    }

    #[test]
    fn offset_node_is_stable_for_equal_keys() {
        let mut graph = PointerGraph::new();
        let base = ValueId::new();
        let n1 = graph.offset_node(base, 3);
        let n2 = graph.offset_node(base, 3);
        let n3 = graph.offset_node(base, 4);
        assert_eq!(n1, n2);
        assert_ne!(n1, n3);
    }

    #[test]
    fn transform_leaf_to_ref_rejects_existing_ref() {
        let mut graph = PointerGraph::new();
        let leaf = graph.insert_leaf(PointerStatus::DontKnow);
        let target = graph.insert_leaf(PointerStatus::NonNil);
        graph.transform_leaf_to_ref(leaf, target).unwrap();
        assert_eq!(graph.transform_leaf_to_ref(leaf, target), Err(GraphError::AlreadyReference));
    }

    #[test]
    fn store_through_mutates_existing_node_in_place() {
        let mut graph = PointerGraph::new();
        let base = ValueId::new();
        let addr = ValueId::new();
        let shared = graph.offset_node(base, -1);
        graph.bind(addr, shared);
        let other_alias = graph.offset_node(base, -1);

        let nil = graph.insert_leaf(PointerStatus::Nil);
        graph.store_through(addr, nil);

        assert_eq!(graph.ref_target(other_alias), Some(nil));
    }

    #[test]
    fn depth_counts_ref_chain_length() {
        let mut graph = PointerGraph::new();
        let leaf = graph.insert_leaf(PointerStatus::NonNil);
        let r1 = graph.insert_ref(leaf);
        let r2 = graph.insert_ref(r1);
        assert_eq!(graph.depth(r2), 2);
    }
}
