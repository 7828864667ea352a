// src/ir/value.rs
use super::types::IrType;
use std::fmt;
use uuid::Uuid;

/// Opaque, host-assigned identifier for an SSA value.
///
/// Unique within one function's instruction stream; never compared across
/// functions (each analysis starts from a fresh [`crate::engine::PointerGraph`]).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ValueId(Uuid);

impl ValueId {
    #[must_use]
    pub fn new() -> Self {
        ValueId(Uuid::new_v4())
    }
}

impl Default for ValueId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form: stable-looking but readable in dumps and test output.
        write!(f, "%{}", &self.0.simple().to_string()[..8])
    }
}

/// The constant kinds the interpreter distinguishes (spec §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstantKind {
    /// A literal null pointer constant.
    NullPtr,
    /// A non-null pointer constant (e.g. the address of a global).
    NonNullPtr,
    /// A constant integer, sign-extended to 64 bits.
    Int(i64),
    /// Any other constant (floats, aggregates) the analyzer treats as opaque.
    Other,
}

impl fmt::Display for ConstantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantKind::NullPtr => write!(f, "null"),
            ConstantKind::NonNullPtr => write!(f, "nonnull"),
            ConstantKind::Int(v) => write!(f, "{v}"),
            ConstantKind::Other => write!(f, "<const>"),
        }
    }
}

/// An instruction operand: either a constant or a reference to a prior SSA
/// value, each carrying its declared type so handlers can read the
/// pointer-typed-operand flag without a side lookup (spec §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operand {
    pub kind: OperandKind,
    pub ty: IrType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
    Constant(ConstantKind),
    Value(ValueId),
}

impl Operand {
    #[must_use]
    pub fn constant(kind: ConstantKind, ty: IrType) -> Self {
        Operand { kind: OperandKind::Constant(kind), ty }
    }

    #[must_use]
    pub fn value(id: ValueId, ty: IrType) -> Self {
        Operand { kind: OperandKind::Value(id), ty }
    }

    #[must_use]
    pub const fn is_pointer(&self) -> bool {
        self.ty.is_pointer()
    }

    /// The `ValueId` this operand refers to, if it isn't a constant.
    #[must_use]
    pub const fn as_value_id(&self) -> Option<ValueId> {
        match self.kind {
            OperandKind::Value(id) => Some(id),
            OperandKind::Constant(_) => None,
        }
    }

    #[must_use]
    pub const fn as_constant(&self) -> Option<ConstantKind> {
        match self.kind {
            OperandKind::Constant(c) => Some(c),
            OperandKind::Value(_) => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            OperandKind::Constant(c) => write!(f, "{c}"),
            OperandKind::Value(id) => write!(f, "{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_ids_are_unique() {
        assert_ne!(ValueId::new(), ValueId::new());
    }

    #[test]
    fn operand_reports_pointer_type() {
        let op = Operand::constant(ConstantKind::NullPtr, IrType::I32.ptr_to());
        assert!(op.is_pointer());
        assert!(op.as_value_id().is_none());
        assert_eq!(op.as_constant(), Some(ConstantKind::NullPtr));
    }

    #[test]
    fn value_operand_carries_its_id() {
        let id = ValueId::new();
        let op = Operand::value(id, IrType::I32);
        assert_eq!(op.as_value_id(), Some(id));
        assert!(!op.is_pointer());
    }
}
