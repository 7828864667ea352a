// src/ir/mod.rs
pub mod basic_block;
pub mod cfg;
pub mod function;
pub mod instruction;
pub mod module;
pub mod text;
pub mod types;
pub mod value;

pub use basic_block::BasicBlock;
pub use cfg::ControlFlowGraph;
pub use function::Function;
pub use instruction::{Instruction, InstructionKind};
pub use module::Module;
pub use types::IrType;
pub use value::{ConstantKind, Operand, ValueId};
