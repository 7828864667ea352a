// src/engine/mod.rs
pub mod classifier;
pub mod conditional;
pub mod driver;
pub mod graph;
pub mod interpreter;
pub mod lattice;
pub mod node;
pub mod verdict;

pub use driver::{analyze_function, analyze_module, AnalysisReport};
pub use graph::PointerGraph;
pub use lattice::PointerStatus;
pub use node::{Node, NodeId};
pub use verdict::Verdict;
