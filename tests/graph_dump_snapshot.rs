//! Snapshot of `PointerGraph::dump`'s textual rendering, with the one
//! random `ValueId` normalized so the snapshot is stable across runs.
use nilgraph::engine::{PointerGraph, PointerStatus};
use nilgraph::ir::ValueId;

#[test]
fn graph_dump_lists_nodes_entries_and_offsets() {
    let mut graph = PointerGraph::new();
    let a = ValueId::new();

    let leaf = graph.insert_leaf(PointerStatus::Nil);
    let reference = graph.insert_ref(leaf);
    graph.bind(a, reference);
    graph.offset_node(a, 0);

    let normalized = graph.dump().replace(&a.to_string(), "%VALUE");

    insta::assert_snapshot!(normalized, @r#"
NODES IN GRAPH:
 - <0> LEAF/NIL (!)
 - <1> REF -> <0> at depth 1
 - <2> LEAF/NON_NIL

ENTRY POINTS INTO GRAPH:
 - %VALUE => <1>

DERIVED OFFSET NODES:
 - <2> = (%VALUE, 0)
"#);
}
