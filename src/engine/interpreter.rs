//! Instruction interpreter (C2, spec §4.2).
use super::classifier::classify;
use super::graph::PointerGraph;
use super::lattice::PointerStatus;
use super::verdict::Verdict;
use crate::ir::instruction::{Instruction, InstructionKind};
use crate::ir::value::{ConstantKind, Operand, OperandKind};

/// Dispatches one instruction to its handler, mutating `graph` and
/// returning the verdict for this instruction alone.
pub fn interpret(graph: &mut PointerGraph, inst: &Instruction) -> Verdict {
    match &inst.kind {
        InstructionKind::Alloca { .. } => handle_alloca(graph, inst),
        InstructionKind::Store { value, addr } => handle_store(graph, value, addr),
        InstructionKind::Load { addr } => handle_load(graph, addr, inst),
        InstructionKind::GetElementPtr { indices, .. } => handle_gep(graph, indices, inst),
        InstructionKind::BitCast { value } => handle_bitcast(graph, value, inst),
        InstructionKind::MemCpy { src, dst } => handle_memcpy(graph, src, dst),
        InstructionKind::IntToPtr { .. } => handle_inttoptr(graph, inst),
        InstructionKind::Br { .. } | InstructionKind::CondBr { .. } | InstructionKind::Cmp { .. } | InstructionKind::Other => {
            Verdict::Ok
        }
    }
}

fn handle_alloca(graph: &mut PointerGraph, inst: &Instruction) -> Verdict {
    if let Some((id, _)) = inst.result {
        let node = graph.insert_leaf(PointerStatus::DontKnow);
        graph.bind(id, node);
    }
    Verdict::Ok
}

fn handle_store(graph: &mut PointerGraph, value: &Operand, addr: &Operand) -> Verdict {
    let Some(a) = addr.as_value_id() else { return Verdict::Ok };

    // invariant 1: a store destination must already have been introduced by
    // an allocation or a prior instruction, unlike a load's operand (§4.2).
    let Some(existing) = graph.lookup(a) else {
        return Verdict::MissingDefinition;
    };

    if graph.deref_is_error(existing) {
        return classify(graph, existing);
    }

    if !value.is_pointer() {
        return Verdict::Ok;
    }

    let target = match value.as_constant() {
        Some(ConstantKind::NullPtr) => graph.insert_leaf(PointerStatus::Nil),
        Some(ConstantKind::NonNullPtr) => graph.insert_leaf(PointerStatus::NonNil),
        Some(ConstantKind::Int(_) | ConstantKind::Other) => graph.insert_leaf(PointerStatus::DontKnow),
        None => {
            let v = value.as_value_id().expect("operand is either a constant or a value");
            match graph.lookup(v) {
                Some(existing) => existing,
                None => {
                    let fresh = graph.insert_leaf(PointerStatus::DontKnow);
                    graph.bind(v, fresh);
                    fresh
                }
            }
        }
    };

    graph.store_through(a, target);
    Verdict::Ok
}

fn handle_load(graph: &mut PointerGraph, addr: &Operand, inst: &Instruction) -> Verdict {
    let Some(a) = addr.as_value_id() else { return Verdict::Ok };
    let Some(n) = graph.lookup(a) else { return Verdict::Ok };

    if graph.deref_is_error(n) {
        let verdict = classify(graph, n);
        if let Some((r, _)) = inst.result {
            let undefined = graph.insert_leaf(PointerStatus::Undefined);
            graph.bind(r, undefined);
        }
        return verdict;
    }

    if let Some(target) = graph.ref_target(n) {
        if let Some((r, _)) = inst.result {
            graph.bind(r, target);
        }
        return Verdict::Ok;
    }

    // A leaf with status DONT_KNOW or NON_NIL: a successful load reveals
    // the leaf must have been a reference all along.
    let fresh = graph.insert_leaf(PointerStatus::DontKnow);
    graph.transform_leaf_to_ref(n, fresh).expect("n was just confirmed to be a Leaf, not a Ref");
    if let Some((r, _)) = inst.result {
        graph.bind(r, fresh);
    }
    Verdict::Ok
}

fn handle_gep(graph: &mut PointerGraph, indices: &[Operand], inst: &Instruction) -> Verdict {
    let Some((r, _)) = inst.result else { return Verdict::Ok };

    let Some(b) = inst.gep_base_value() else {
        let node = graph.insert_leaf(PointerStatus::DontKnow);
        graph.bind(r, node);
        return Verdict::Ok;
    };

    // invariant 1: the base must already have a node, unlike a load operand.
    if graph.lookup(b).is_none() {
        return Verdict::MissingDefinition;
    }

    let offset = canonical_offset(indices);
    let node = graph.offset_node(b, offset);
    graph.bind(r, node);
    Verdict::Ok
}

/// Sums constant integer indices into a single offset; any non-constant
/// operand collapses the whole GEP to the unknown sentinel (-1), spec §4.1.
fn canonical_offset(indices: &[Operand]) -> i64 {
    let mut offset: i64 = 0;
    for index in indices {
        match index.as_constant() {
            Some(ConstantKind::Int(v)) => offset = offset.saturating_add(v),
            _ => return -1,
        }
    }
    offset
}

fn handle_bitcast(graph: &mut PointerGraph, value: &Operand, inst: &Instruction) -> Verdict {
    if let Some((r, _)) = inst.result
        && let Some(v) = value.as_value_id()
        && let Some(n) = graph.lookup(v)
    {
        graph.bind(r, n);
    }
    Verdict::Ok
}

fn handle_memcpy(graph: &PointerGraph, src: &Operand, dst: &Operand) -> Verdict {
    let check = |op: &Operand| -> Verdict {
        match op.as_value_id().and_then(|id| graph.lookup(id)) {
            Some(n) if graph.deref_is_error(n) => classify(graph, n),
            _ => Verdict::Ok,
        }
    };
    let src_verdict = check(src);
    if !src_verdict.is_ok() {
        return src_verdict;
    }
    check(dst)
}

fn handle_inttoptr(graph: &mut PointerGraph, inst: &Instruction) -> Verdict {
    if let Some((r, _)) = inst.result {
        let node = graph.insert_leaf(PointerStatus::DontKnow);
        graph.bind(r, node);
    }
    Verdict::Ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::types::IrType;
    use crate::ir::value::ValueId;

    fn ptr_op(id: ValueId) -> Operand {
        Operand::value(id, IrType::I32.ptr_to())
    }

    #[test]
    fn store_null_then_load_is_null_deref() {
        let mut graph = PointerGraph::new();
        let a = ValueId::new();
        let r = ValueId::new();

        let alloca = Instruction::new(InstructionKind::Alloca { ty: IrType::I32.ptr_to() }).with_result(a, IrType::I32.ptr_to());
        assert_eq!(interpret(&mut graph, &alloca), Verdict::Ok);

        let store = Instruction::new(InstructionKind::Store {
            value: Operand::constant(ConstantKind::NullPtr, IrType::I32.ptr_to()),
            addr: ptr_op(a),
        });
        assert_eq!(interpret(&mut graph, &store), Verdict::Ok);

        let load = Instruction::new(InstructionKind::Load { addr: ptr_op(a) }).with_result(r, IrType::I32.ptr_to());
        assert_eq!(interpret(&mut graph, &load), Verdict::Ok);

        let load2 = Instruction::new(InstructionKind::Load { addr: ptr_op(r) });
        assert_eq!(interpret(&mut graph, &load2), Verdict::NullDeref);
    }

    #[test]
    fn reassignment_clears_null() {
        let mut graph = PointerGraph::new();
        let a = ValueId::new();
        let v = ValueId::new();
        let r = ValueId::new();

        interpret(&mut graph, &Instruction::new(InstructionKind::Alloca { ty: IrType::I32.ptr_to() }).with_result(a, IrType::I32.ptr_to()));
        interpret(
            &mut graph,
            &Instruction::new(InstructionKind::Store {
                value: Operand::constant(ConstantKind::NullPtr, IrType::I32.ptr_to()),
                addr: ptr_op(a),
            }),
        );
        interpret(&mut graph, &Instruction::new(InstructionKind::Alloca { ty: IrType::I32 }).with_result(v, IrType::I32));
        interpret(&mut graph, &Instruction::new(InstructionKind::Store { value: ptr_op(v), addr: ptr_op(a) }));
        let load1 = Instruction::new(InstructionKind::Load { addr: ptr_op(a) }).with_result(r, IrType::I32.ptr_to());
        assert_eq!(interpret(&mut graph, &load1), Verdict::Ok);
        let load2 = Instruction::new(InstructionKind::Load { addr: ptr_op(r) });
        assert_eq!(interpret(&mut graph, &load2), Verdict::Ok);
    }

    #[test]
    fn unknown_index_geps_collapse_to_shared_node() {
        let mut graph = PointerGraph::new();
        let arr = ValueId::new();
        let r1 = ValueId::new();
        let r2 = ValueId::new();

        interpret(&mut graph, &Instruction::new(InstructionKind::Alloca { ty: IrType::I32.ptr_to() }).with_result(arr, IrType::I32.ptr_to()));
        let gep1 = Instruction::new(InstructionKind::GetElementPtr {
            base: ptr_op(arr),
            indices: vec![Operand::value(ValueId::new(), IrType::I32)],
        })
        .with_result(r1, IrType::I32.ptr_to());
        interpret(&mut graph, &gep1);
        let gep2 = Instruction::new(InstructionKind::GetElementPtr {
            base: ptr_op(arr),
            indices: vec![Operand::value(ValueId::new(), IrType::I32)],
        })
        .with_result(r2, IrType::I32.ptr_to());
        interpret(&mut graph, &gep2);

        assert_eq!(graph.lookup(r1), graph.lookup(r2));
    }

    #[test]
    fn store_through_shared_offset_node_is_visible_to_other_alias() {
        let mut graph = PointerGraph::new();
        let arr = ValueId::new();
        let q = ValueId::new();
        let r = ValueId::new();
        let t = ValueId::new();

        interpret(&mut graph, &Instruction::new(InstructionKind::Alloca { ty: IrType::I32.ptr_to() }).with_result(arr, IrType::I32.ptr_to()));

        let gep_q = Instruction::new(InstructionKind::GetElementPtr {
            base: ptr_op(arr),
            indices: vec![Operand::value(ValueId::new(), IrType::I32)],
        })
        .with_result(q, IrType::I32.ptr_to());
        interpret(&mut graph, &gep_q);

        let store = Instruction::new(InstructionKind::Store {
            value: Operand::constant(ConstantKind::NullPtr, IrType::I32.ptr_to()),
            addr: ptr_op(q),
        });
        assert_eq!(interpret(&mut graph, &store), Verdict::Ok);

        let gep_r = Instruction::new(InstructionKind::GetElementPtr {
            base: ptr_op(arr),
            indices: vec![Operand::value(ValueId::new(), IrType::I32)],
        })
        .with_result(r, IrType::I32.ptr_to());
        interpret(&mut graph, &gep_r);

        let load1 = Instruction::new(InstructionKind::Load { addr: ptr_op(r) }).with_result(t, IrType::I32.ptr_to());
        assert_eq!(interpret(&mut graph, &load1), Verdict::Ok);

        let load2 = Instruction::new(InstructionKind::Load { addr: ptr_op(t) });
        assert_eq!(interpret(&mut graph, &load2), Verdict::NullDeref);
    }

    #[test]
    fn store_to_unbound_address_is_missing_definition() {
        let mut graph = PointerGraph::new();
        let a = ValueId::new();
        let store = Instruction::new(InstructionKind::Store {
            value: Operand::constant(ConstantKind::NullPtr, IrType::I32.ptr_to()),
            addr: ptr_op(a),
        });
        assert_eq!(interpret(&mut graph, &store), Verdict::MissingDefinition);
    }

    #[test]
    fn gep_on_unbound_base_is_missing_definition() {
        let mut graph = PointerGraph::new();
        let base = ValueId::new();
        let r = ValueId::new();
        let gep = Instruction::new(InstructionKind::GetElementPtr {
            base: ptr_op(base),
            indices: vec![Operand::constant(ConstantKind::Int(0), IrType::I64)],
        })
        .with_result(r, IrType::I32.ptr_to());
        assert_eq!(interpret(&mut graph, &gep), Verdict::MissingDefinition);
        assert_eq!(graph.lookup(r), None);
    }

    #[test]
    fn memcpy_reports_first_failing_side() {
        let mut graph = PointerGraph::new();
        let dst = ValueId::new();
        let src = ValueId::new();
        let nil = graph.insert_leaf(PointerStatus::Nil);
        graph.bind(src, nil);
        let ok = graph.insert_leaf(PointerStatus::NonNil);
        graph.bind(dst, ok);

        let inst = Instruction::new(InstructionKind::MemCpy { src: ptr_op(src), dst: ptr_op(dst) });
        assert_eq!(interpret(&mut graph, &inst), Verdict::NullDeref);
    }
}
