//! Diagnostic classifier (C3, spec §4.3).
use super::graph::PointerGraph;
use super::lattice::PointerStatus;
use super::node::NodeId;
use super::verdict::Verdict;

/// Classifies an attempted dereference of `node` into a verdict.
///
/// Callers must only invoke this when `deref_is_error(node)` held at the
/// point of the attempt; the non-error case maps back to `OK` so call
/// sites can apply it unconditionally after checking `deref_is_error`.
#[must_use]
pub fn classify(graph: &PointerGraph, node: NodeId) -> Verdict {
    match graph.status(node) {
        PointerStatus::Nil => Verdict::NullDeref,
        PointerStatus::Undefined => Verdict::UndefinedDeref,
        PointerStatus::NonNil | PointerStatus::DontKnow => Verdict::Ok,
    }
}
