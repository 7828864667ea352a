//! Function and module drivers (C4, spec §4.4) and the analysis report (D2).
use super::graph::PointerGraph;
use super::interpreter::interpret;
use super::verdict::Verdict;
use crate::ir::function::Function;
use crate::ir::module::Module;

/// One function's analysis result: the ordered per-instruction verdicts,
/// whether analysis halted early on an internal-family verdict, and the
/// final pointer graph (kept so the CLI can dump it on request).
pub struct AnalysisReport {
    pub function_name: std::sync::Arc<str>,
    pub verdicts: Vec<(usize, Verdict)>,
    pub halted_early: bool,
    pub graph: PointerGraph,
}

impl AnalysisReport {
    /// Count of verdicts equal to `kind`.
    #[must_use]
    pub fn count(&self, kind: Verdict) -> usize {
        self.verdicts.iter().filter(|(_, v)| *v == kind).count()
    }

    #[must_use]
    pub fn has_findings(&self) -> bool {
        self.verdicts.iter().any(|(_, v)| !v.is_ok())
    }
}

/// Runs the interpreter over every instruction of `function` in
/// reverse-post-order, threading one fresh [`PointerGraph`] through the
/// whole function. Stops early on the first internal-family verdict
/// (spec §4.4 step 3).
#[must_use]
pub fn analyze_function(function: &mut Function) -> AnalysisReport {
    let mut graph = PointerGraph::new();
    let mut verdicts = Vec::new();
    let mut halted_early = false;
    let mut index = 0usize;

    let order = function.cfg.reverse_post_order().to_vec();
    'blocks: for block_idx in order {
        let Some(block) = function.cfg.graph().node_weight(block_idx) else { continue };
        for inst in &block.instructions {
            let verdict = interpret(&mut graph, inst);
            verdicts.push((index, verdict));
            index += 1;
            if verdict.is_internal_family() {
                halted_early = true;
                break 'blocks;
            }
        }
    }

    AnalysisReport { function_name: function.name.clone(), verdicts, halted_early, graph }
}

/// Runs [`analyze_function`] once per function in `module`, never sharing a
/// graph between functions (spec §5).
#[must_use]
pub fn analyze_module(module: &mut Module) -> Vec<AnalysisReport> {
    module.functions.iter_mut().map(analyze_function).collect()
}
