// src/ir/types.rs
use std::fmt;

/// The small type lattice the interpreter needs to reason about operands.
///
/// Only the pointer/non-pointer distinction is load-bearing for the core
/// (§4.2, Store case 2); the integer widths and `Opaque` exist so the IR
/// builder can describe a realistic instruction stream without the
/// analyzer needing to understand every type the host language has.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum IrType {
    /// 8-bit integer (`i8`).
    I8,
    /// 16-bit integer (`i16`).
    I16,
    /// 32-bit integer (`i32`).
    #[default]
    I32,
    /// 64-bit integer (`i64`).
    I64,
    /// The absence of a value, e.g. the declared type of a `store`.
    Void,
    /// Pointer to another `IrType`.
    Pointer(Box<IrType>),
    /// A type the analyzer does not need to reason about structurally
    /// (floats, aggregates it never indexes into, host-defined types).
    Opaque,
}

impl IrType {
    /// Allocates a pointer type to `self`.
    #[must_use]
    pub fn ptr_to(self) -> Self {
        IrType::Pointer(Box::new(self))
    }

    /// True for any `Pointer(_)` type, regardless of pointee.
    #[must_use]
    pub const fn is_pointer(&self) -> bool {
        matches!(self, IrType::Pointer(_))
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::I8 => write!(f, "i8"),
            IrType::I16 => write!(f, "i16"),
            IrType::I32 => write!(f, "i32"),
            IrType::I64 => write!(f, "i64"),
            IrType::Void => write!(f, "void"),
            IrType::Pointer(inner) => write!(f, "*{inner}"),
            IrType::Opaque => write!(f, "opaque"),
        }
    }
}
