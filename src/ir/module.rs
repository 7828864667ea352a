// src/ir/module.rs
use super::function::Function;
use std::fmt;
use std::sync::Arc;

/// A collection of functions to analyze, one at a time (spec §5: no
/// cross-function shared state).
#[derive(Debug, Clone)]
pub struct Module {
    pub name: Arc<str>,
    pub functions: Vec<Function>,
}

impl Module {
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self { name: name.into(), functions: Vec::new() }
    }

    pub fn add_function(&mut self, function: Function) {
        self.functions.push(function);
    }

    #[must_use]
    pub fn get_function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name.as_ref() == name)
    }

    #[must_use]
    pub fn functions(&self) -> &[Function] {
        &self.functions
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "module {} {{", self.name)?;
        if self.functions.is_empty() {
            writeln!(f, "  // No functions")?;
        } else {
            for function in &self.functions {
                for line in function.to_string().trim_end_matches('\n').lines() {
                    writeln!(f, "  {line}")?;
                }
            }
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_function_finds_by_name() {
        let mut module = Module::new("m");
        module.add_function(Function::new("check", "entry"));
        assert!(module.get_function("check").is_some());
        assert!(module.get_function("missing").is_none());
    }
}
