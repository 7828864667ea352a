//! A small, forgiving line-oriented textual IR reader (spec §6/D4).
//!
//! Not a general parser: it only needs to round-trip what the builder API
//! in this module can construct. One `func` block per function, one
//! `block` per label, one instruction per line using the mnemonics of the
//! interpreter (`alloca`, `store`, `load`, `gep`, `bitcast`, `memcpy`,
//! `inttoptr`, `br`, `condbr`, `cmp`, `other`).
use super::basic_block::BasicBlock;
use super::function::Function;
use super::instruction::{Instruction, InstructionKind};
use super::module::Module;
use super::types::IrType;
use super::value::{ConstantKind, Operand, ValueId};
use crate::error::IrError;
use std::collections::HashMap;
use std::sync::Arc;

/// Parses a complete textual IR module.
///
/// # Errors
///
/// Returns [`IrError::Parse`] for malformed lines, [`IrError::NoEntryBlock`]
/// for a `func` with no blocks, and [`IrError::UnknownBlock`] for a branch
/// target that never appears as a `block` label.
pub fn parse_module(text: &str) -> Result<Module, IrError> {
    let mut lines = text.lines().enumerate().peekable();
    let mut module_name = "module".to_string();

    if let Some((_, first)) = lines.peek() {
        let trimmed = first.trim();
        if let Some(name) = trimmed.strip_prefix("module ") {
            module_name = name.trim().to_string();
            lines.next();
        }
    }

    let mut module = Module::new(module_name);

    while let Some((line_no, raw)) = lines.next() {
        let line = strip_comment(raw);
        if line.is_empty() {
            continue;
        }
        let Some(rest) = line.strip_prefix("func ") else {
            return Err(parse_err(line_no, format!("expected 'func', found '{line}'")));
        };
        let (func_name, entry_label) = parse_func_header(line_no, rest)?;
        let function = parse_func_body(func_name, entry_label, &mut lines)?;
        module.add_function(function);
    }

    Ok(module)
}

fn parse_func_header(line_no: usize, rest: &str) -> Result<(&str, &str), IrError> {
    let mut parts = rest.split_whitespace();
    let name = parts.next().ok_or_else(|| parse_err(line_no, "missing function name".into()))?;
    match (parts.next(), parts.next()) {
        (Some("entry"), Some(label)) => Ok((name, label)),
        _ => Err(parse_err(line_no, "expected 'entry <label>' after function name".into())),
    }
}

type LineIter<'a> = std::iter::Peekable<std::iter::Enumerate<std::str::Lines<'a>>>;

fn parse_func_body(name: &str, entry_label: &str, lines: &mut LineIter<'_>) -> Result<Function, IrError> {
    let mut function = Function::new(name, entry_label);
    let mut names: HashMap<String, (ValueId, IrType)> = HashMap::new();
    let mut current_block: Option<BasicBlock> = None;
    let mut block_labels: Vec<Arc<str>> = Vec::new();

    while let Some((line_no, raw)) = lines.next() {
        let line = strip_comment(raw);
        if line.is_empty() {
            continue;
        }
        if line == "endfunc" {
            if let Some(block) = current_block.take() {
                function.cfg.add_block(block);
            }
            wire_branch_edges(&mut function, &block_labels)?;
            if function.cfg.get_entry_block().is_none() {
                return Err(IrError::NoEntryBlock(name.to_string()));
            }
            return Ok(function);
        }
        if let Some(label) = line.strip_prefix("block ") {
            if let Some(block) = current_block.take() {
                function.cfg.add_block(block);
            }
            let label = label.trim();
            block_labels.push(Arc::from(label));
            current_block = Some(BasicBlock::new(label));
            continue;
        }
        let block = current_block.as_mut().ok_or_else(|| parse_err(line_no, "instruction outside any block".into()))?;
        let inst = parse_instruction(line_no, line, &mut names)?;
        block.push(inst);
    }

    Err(parse_err(usize::MAX, format!("function '{name}' is missing 'endfunc'")))
}

fn wire_branch_edges(function: &mut Function, labels: &[Arc<str>]) -> Result<(), IrError> {
    let targets: Vec<(Arc<str>, Vec<Arc<str>>)> = labels
        .iter()
        .map(|label| {
            let targets = function
                .cfg
                .get_block(label)
                .map(|b| b.instructions.iter().flat_map(Instruction::branch_targets).collect())
                .unwrap_or_default();
            (label.clone(), targets)
        })
        .collect();

    for (from, tos) in targets {
        for to in tos {
            if function.cfg.get_block(&to).is_none() {
                return Err(IrError::UnknownBlock(to.to_string()));
            }
            function.cfg.connect_blocks(&from, &to);
        }
    }
    Ok(())
}

fn parse_instruction(
    line_no: usize,
    line: &str,
    names: &mut HashMap<String, (ValueId, IrType)>,
) -> Result<Instruction, IrError> {
    let (result, rest) = match line.split_once(" = ") {
        Some((lhs, rhs)) => (Some(parse_result_decl(line_no, lhs, names)?), rhs),
        None => (None, line),
    };

    let mut parts = rest.splitn(2, ' ');
    let opcode = parts.next().unwrap_or_default();
    let args = parts.next().unwrap_or_default().trim();

    let kind = match opcode {
        "alloca" => InstructionKind::Alloca { ty: parse_type(args) },
        "store" => {
            let (value, addr) =
                args.split_once(" to ").ok_or_else(|| parse_err(line_no, "store requires '<value> to <addr>'".into()))?;
            InstructionKind::Store { value: parse_operand(line_no, value.trim(), names)?, addr: parse_operand(line_no, addr.trim(), names)? }
        }
        "load" => InstructionKind::Load { addr: parse_operand(line_no, args, names)? },
        "gep" => {
            let (base, indices) = args.split_once(',').ok_or_else(|| parse_err(line_no, "gep requires '<base>, [indices]'".into()))?;
            let indices = indices
                .trim()
                .trim_start_matches('[')
                .trim_end_matches(']')
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| parse_operand(line_no, s, names))
                .collect::<Result<Vec<_>, _>>()?;
            InstructionKind::GetElementPtr { base: parse_operand(line_no, base.trim(), names)?, indices }
        }
        "bitcast" => InstructionKind::BitCast { value: parse_operand(line_no, args, names)? },
        "memcpy" => {
            let (dst, src) = args.split_once(',').ok_or_else(|| parse_err(line_no, "memcpy requires '<dst>, <src>'".into()))?;
            InstructionKind::MemCpy { dst: parse_operand(line_no, dst.trim(), names)?, src: parse_operand(line_no, src.trim(), names)? }
        }
        "inttoptr" => InstructionKind::IntToPtr { value: parse_operand(line_no, args, names)? },
        "br" => InstructionKind::Br { target: Arc::from(args) },
        "condbr" => {
            let mut fields = args.split(',').map(str::trim);
            let cond = fields.next().ok_or_else(|| parse_err(line_no, "condbr requires 3 fields".into()))?;
            let then_label = fields.next().ok_or_else(|| parse_err(line_no, "condbr requires 3 fields".into()))?;
            let else_label = fields.next().ok_or_else(|| parse_err(line_no, "condbr requires 3 fields".into()))?;
            InstructionKind::CondBr {
                cond: parse_operand(line_no, cond, names)?,
                then_label: Arc::from(then_label),
                else_label: Arc::from(else_label),
            }
        }
        "cmp" => {
            let (left, right) = args.split_once(',').ok_or_else(|| parse_err(line_no, "cmp requires '<lhs>, <rhs>'".into()))?;
            InstructionKind::Cmp { left: parse_operand(line_no, left.trim(), names)?, right: parse_operand(line_no, right.trim(), names)? }
        }
        "other" => InstructionKind::Other,
        other => return Err(parse_err(line_no, format!("unknown opcode '{other}'"))),
    };

    Ok(match result {
        Some((id, ty)) => Instruction::new(kind).with_result(id, ty),
        None => Instruction::new(kind),
    })
}

fn parse_result_decl(
    line_no: usize,
    lhs: &str,
    names: &mut HashMap<String, (ValueId, IrType)>,
) -> Result<(ValueId, IrType), IrError> {
    let (name, ty) = lhs.split_once(':').ok_or_else(|| parse_err(line_no, "expected '%name: type' result binding".into()))?;
    let name = name.trim();
    let ty = parse_type(ty.trim());
    let id = ValueId::new();
    names.insert(name.to_string(), (id, ty.clone()));
    Ok((id, ty))
}

fn parse_operand(line_no: usize, tok: &str, names: &HashMap<String, (ValueId, IrType)>) -> Result<Operand, IrError> {
    if let Some(stripped) = tok.strip_prefix('%') {
        let key = format!("%{stripped}");
        return names
            .get(&key)
            .map(|(id, ty)| Operand::value(*id, ty.clone()))
            .ok_or_else(|| parse_err(line_no, format!("reference to undefined value '{tok}'")));
    }
    Ok(match tok {
        "null" => Operand::constant(ConstantKind::NullPtr, IrType::Opaque.ptr_to()),
        "nonnull" => Operand::constant(ConstantKind::NonNullPtr, IrType::Opaque.ptr_to()),
        _ => match tok.parse::<i64>() {
            Ok(v) => Operand::constant(ConstantKind::Int(v), IrType::I64),
            Err(_) => Operand::constant(ConstantKind::Other, IrType::Opaque),
        },
    })
}

fn parse_type(tok: &str) -> IrType {
    if let Some(inner) = tok.strip_prefix('*') {
        return parse_type(inner).ptr_to();
    }
    match tok {
        "i8" => IrType::I8,
        "i16" => IrType::I16,
        "i32" => IrType::I32,
        "i64" => IrType::I64,
        "void" => IrType::Void,
        _ => IrType::Opaque,
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(idx) => line[..idx].trim(),
        None => line.trim(),
    }
}

fn parse_err(line_no: usize, message: String) -> IrError {
    IrError::Parse { line: line_no.wrapping_add(1), message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_direct_deref() {
        let text = "module demo\n\
                     func check entry entry\n\
                     block entry\n\
                     %p: *i32 = alloca i32\n\
                     store null to %p\n\
                     %v: i32 = load %p\n\
                     br exit\n\
                     block exit\n\
                     endfunc\n";
        let module = parse_module(text).expect("should parse");
        let func = module.get_function("check").expect("function exists");
        assert!(func.cfg.get_block("entry").is_some());
        assert!(func.cfg.get_block("exit").is_some());
        assert_eq!(func.cfg.get_block("entry").unwrap().instructions.len(), 4);
    }

    #[test]
    fn rejects_branch_to_unknown_block() {
        let text = "func check entry entry\nblock entry\nbr nowhere\nendfunc\n";
        assert!(matches!(parse_module(text), Err(IrError::UnknownBlock(_))));
    }

    #[test]
    fn rejects_missing_endfunc() {
        let text = "func check entry entry\nblock entry\nbr entry\n";
        assert!(parse_module(text).is_err());
    }
}
