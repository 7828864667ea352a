// src/ir/instruction.rs
use super::types::IrType;
use super::value::{Operand, ValueId};
use std::fmt;
use std::sync::Arc;

/// One IR instruction: an opcode (`kind`) plus, for value-producing
/// opcodes, the identifier and type of the value it defines.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub result: Option<(ValueId, IrType)>,
}

/// The opcode set consumed by the core (spec §6): stack allocation, memory
/// load/store, pointer arithmetic, bitcast, memcpy, int-to-ptr, and
/// conditional/unconditional branches, plus a catch-all for anything else
/// the host's IR can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum InstructionKind {
    Alloca { ty: IrType },
    Store { value: Operand, addr: Operand },
    Load { addr: Operand },
    GetElementPtr { base: Operand, indices: Vec<Operand> },
    BitCast { value: Operand },
    MemCpy { src: Operand, dst: Operand },
    IntToPtr { value: Operand },
    Br { target: Arc<str> },
    CondBr { cond: Operand, then_label: Arc<str>, else_label: Arc<str> },
    Cmp { left: Operand, right: Operand },
    Other,
}

impl Instruction {
    #[must_use]
    pub fn new(kind: InstructionKind) -> Self {
        Instruction { kind, result: None }
    }

    #[must_use]
    pub fn with_result(mut self, id: ValueId, ty: IrType) -> Self {
        self.result = Some((id, ty));
        self
    }

    /// The base value an offset-canonicalized GEP is derived from, if this
    /// instruction is a `GetElementPtr` whose base is itself a prior value
    /// (the common case; a GEP off a bare constant has no base identity to
    /// canonicalize against).
    #[must_use]
    pub fn gep_base_value(&self) -> Option<ValueId> {
        match &self.kind {
            InstructionKind::GetElementPtr { base, .. } => base.as_value_id(),
            _ => None,
        }
    }

    /// The block labels this instruction can transfer control to, if any.
    #[must_use]
    pub fn branch_targets(&self) -> Vec<Arc<str>> {
        match &self.kind {
            InstructionKind::Br { target } => vec![target.clone()],
            InstructionKind::CondBr { then_label, else_label, .. } => {
                vec![then_label.clone(), else_label.clone()]
            }
            _ => Vec::new(),
        }
    }

    /// True for instructions that end a block's control flow.
    #[must_use]
    pub const fn is_terminator(&self) -> bool {
        matches!(self.kind, InstructionKind::Br { .. } | InstructionKind::CondBr { .. })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result_str = if let Some((id, ty)) = &self.result { format!("{id}: {ty} = ") } else { String::new() };

        match &self.kind {
            InstructionKind::Alloca { ty } => write!(f, "{result_str}alloca {ty}"),
            InstructionKind::Store { value, addr } => write!(f, "store {value} to {addr}"),
            InstructionKind::Load { addr } => write!(f, "{result_str}load {addr}"),
            InstructionKind::GetElementPtr { base, indices } => {
                let idx_str = indices.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
                write!(f, "{result_str}gep {base}, [{idx_str}]")
            }
            InstructionKind::BitCast { value } => write!(f, "{result_str}bitcast {value}"),
            InstructionKind::MemCpy { src, dst } => write!(f, "memcpy {dst}, {src}"),
            InstructionKind::IntToPtr { value } => write!(f, "{result_str}inttoptr {value}"),
            InstructionKind::Br { target } => write!(f, "br {target}"),
            InstructionKind::CondBr { cond, then_label, else_label } => {
                write!(f, "condbr {cond}, {then_label}, {else_label}")
            }
            InstructionKind::Cmp { left, right } => write!(f, "{result_str}cmp {left}, {right}"),
            InstructionKind::Other => write!(f, "{result_str}other"),
        }
    }
}
