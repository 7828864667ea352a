// src/ir/basic_block.rs
use super::instruction::Instruction;
use std::fmt;
use std::sync::Arc;

/// A single block of straight-line code, terminated (if well-formed) by a
/// `Br`/`CondBr` instruction in its own instruction list rather than a
/// separate terminator field.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicBlock {
    pub label: Arc<str>,
    pub instructions: Vec<Instruction>,
}

impl BasicBlock {
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self { label: label.into(), instructions: Vec::new() }
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }
}

impl fmt::Display for BasicBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.label)?;
        for inst in &self.instructions {
            writeln!(f, "  {inst}")?;
        }
        Ok(())
    }
}
