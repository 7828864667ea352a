// src/lib.rs
//! `nilgraph` — a static analyzer that detects null-pointer dereferences in
//! an SSA-style IR by interpreting each instruction against an abstract
//! pointer graph with a four-valued nullability lattice.
//!
//! ## Modules
//! * `ir` — the concrete IR data model (`Value`, `Instruction`, `BasicBlock`,
//!   `Function`, `Module`) and the textual IR reader used by the CLI.
//! * `engine` — the analysis core: the pointer graph (C1), the instruction
//!   interpreter (C2), the diagnostic classifier (C3), and the per-function
//!   and per-module drivers (C4).
//! * `error` — error types for graph invariant violations and textual IR
//!   loading failures.
//! * `cli` — command-line argument parsing for the `nilgraph` binary.
pub mod cli;
pub mod engine;
pub mod error;
pub mod ir;
