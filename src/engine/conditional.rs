//! Conditional analyzer stub (D5, spec §9).
//!
//! Deliberately never consulted by [`super::interpreter`] or
//! [`super::driver`]: the core is CFG-flat and reports `OK` on every
//! branch (scenario 6 in spec §8). This mirrors the unwired conditional
//! analyzer in the tool this core reimplements, which found branching
//! blocks and printed where they would merge but never joined the graph.
//!
//! A full path-sensitive extension would: snapshot the entry map at each
//! `CondBr`, refine the branching value to NIL on one successor and
//! NON_NIL on the other, then join the snapshots at the immediate
//! post-dominator by pointwise meet of statuses.
use crate::ir::cfg::ControlFlowGraph;
use std::sync::Arc;

/// One `CondBr`'s two successor labels, as found by [`find_branches`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub block: Arc<str>,
    pub then_label: Arc<str>,
    pub else_label: Arc<str>,
}

/// Scans every block in `cfg` for a trailing `CondBr` and records its two
/// successors. Never mutates the pointer graph; purely informational.
#[must_use]
pub fn find_branches(cfg: &ControlFlowGraph) -> Vec<Branch> {
    use crate::ir::instruction::InstructionKind;

    cfg.blocks()
        .filter_map(|block| {
            let last = block.instructions.last()?;
            if let InstructionKind::CondBr { then_label, else_label, .. } = &last.kind {
                Some(Branch { block: block.label.clone(), then_label: then_label.clone(), else_label: else_label.clone() })
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::basic_block::BasicBlock;
    use crate::ir::instruction::{Instruction, InstructionKind};
    use crate::ir::types::IrType;
    use crate::ir::value::{ConstantKind, Operand};

    #[test]
    fn finds_both_successors_of_a_condbr() {
        let mut cfg = ControlFlowGraph::new(Arc::from("entry"));
        let mut block = BasicBlock::new("entry");
        block.push(Instruction::new(InstructionKind::CondBr {
            cond: Operand::constant(ConstantKind::NonNullPtr, IrType::I32.ptr_to()),
            then_label: Arc::from("then"),
            else_label: Arc::from("else"),
        }));
        cfg.add_block(block);

        let branches = find_branches(&cfg);
        assert_eq!(branches.len(), 1);
        assert_eq!(branches[0].then_label.as_ref(), "then");
        assert_eq!(branches[0].else_label.as_ref(), "else");
    }
}
