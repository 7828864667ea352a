use clap::Parser;
use console::style;
use nilgraph::cli::Args;
use nilgraph::engine;
use nilgraph::error::IrError;
use nilgraph::ir::text;
use std::fs;

fn main() -> Result<(), IrError> {
    let args = Args::parse();
    let source = fs::read_to_string(&args.input)?;
    let mut module = text::parse_module(&source)?;

    if args.verbose {
        for function in module.functions() {
            eprintln!("{}", style(format!("analyzing {}", function.name)).dim());
        }
    }

    let reports = engine::analyze_module(&mut module);
    let mut total_findings = 0usize;

    for report in &reports {
        for (index, verdict) in &report.verdicts {
            if verdict.is_ok() {
                continue;
            }
            total_findings += 1;
            let line = format!("{}: instruction {index} -> {verdict}", report.function_name);
            eprintln!("{}", style(line).red().bold());
        }
        if report.halted_early {
            eprintln!("{}", style(format!("{}: analysis halted early", report.function_name)).yellow());
        }
        if args.dump_graph {
            println!("--- {} ---", report.function_name);
            println!("{}", report.graph.dump());
        }
    }

    if total_findings == 0 {
        println!("{}", style(format!("{} function(s) analyzed, no findings", reports.len())).green().bold());
    } else {
        println!("{}", style(format!("{total_findings} finding(s) across {} function(s)", reports.len())).red().bold());
    }

    Ok(())
}
