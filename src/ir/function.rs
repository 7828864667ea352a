// src/ir/function.rs
use super::cfg::ControlFlowGraph;
use std::fmt;
use std::sync::Arc;

/// A function: a name and the control flow graph of its body.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: Arc<str>,
    pub cfg: ControlFlowGraph,
}

impl Function {
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, entry_label: impl Into<Arc<str>>) -> Self {
        Self { name: name.into(), cfg: ControlFlowGraph::new(entry_label.into()) }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "function {}:", self.name)?;
        for block in self.cfg.blocks() {
            for line in block.to_string().lines() {
                writeln!(f, "  {line}")?;
            }
        }
        Ok(())
    }
}
