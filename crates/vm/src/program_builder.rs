//! Programmatic construction of programs.
//!
//! The builder is the reference producer for compilers, tests, and embedders
//! that generate instruction sequences directly. Labels and entries bind to
//! the index of the next emitted instruction; nothing is resolved at build
//! time, so forward references are free.

use hashbrown::HashMap;

use crate::instruction::Instruction;
use crate::program::{Entry, Program};

/// Helps construct programs instruction by instruction.
#[derive(Default)]
pub struct ProgramBuilder {
    instructions: Vec<Instruction>,
    labels: HashMap<String, usize>,
    entries: HashMap<String, Entry>,
    functions: HashMap<String, Entry>,
}

impl ProgramBuilder {
    /// Creates a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index the next emitted instruction will occupy.
    pub fn index(&self) -> usize {
        self.instructions.len()
    }

    /// Appends an instruction.
    pub fn emit(&mut self, instruction: Instruction) -> &mut Self {
        self.instructions.push(instruction);
        self
    }

    /// Appends every instruction in `instructions`.
    pub fn emit_all<I: IntoIterator<Item = Instruction>>(&mut self, instructions: I) -> &mut Self {
        self.instructions.extend(instructions);
        self
    }

    /// Binds a case-sensitive label to the next instruction index. Binding
    /// the same label again moves it.
    pub fn label<S: Into<String>>(&mut self, name: S) -> &mut Self {
        let index = self.index();
        self.labels.insert(name.into(), index);
        self
    }

    /// Declares a script entry point starting at the next instruction index.
    pub fn entry<S: Into<String>>(&mut self, name: S, parameter_count: usize) -> &mut Self {
        let name = name.into();
        let index = self.index();
        self.entries.insert(
            name.to_lowercase(),
            Entry::new(name, parameter_count, index),
        );
        self
    }

    /// Declares a local function starting at the next instruction index.
    pub fn function<S: Into<String>>(&mut self, name: S, parameter_count: usize) -> &mut Self {
        let name = name.into();
        let index = self.index();
        self.functions.insert(
            name.to_lowercase(),
            Entry::new(name, parameter_count, index),
        );
        self
    }

    /// Finishes the build and produces the immutable program.
    pub fn build(self) -> Program {
        Program::new(self.instructions, self.labels, self.entries, self.functions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Literal;

    #[test]
    fn test_forward_label_binding() {
        let mut builder = ProgramBuilder::new();
        builder
            .entry("main", 0)
            .emit(Instruction::Jump {
                label: "done".to_string(),
            })
            .emit(Instruction::Push {
                value: Literal::from(1i64),
            })
            .label("done")
            .emit(Instruction::Return);
        let program = builder.build();

        assert_eq!(program.resolve_label("done"), Some(2));
        assert_eq!(program.entry("main").unwrap().index(), 0);
    }

    #[test]
    fn test_rebinding_moves_label() {
        let mut builder = ProgramBuilder::new();
        builder
            .label("spot")
            .emit(Instruction::Noop)
            .label("spot")
            .emit(Instruction::Return);
        let program = builder.build();

        assert_eq!(program.resolve_label("spot"), Some(1));
    }

    #[test]
    fn test_function_table_separate_from_entries() {
        let mut builder = ProgramBuilder::new();
        builder
            .function("helper", 1)
            .emit(Instruction::Return)
            .entry("main", 0)
            .emit(Instruction::Return);
        let program = builder.build();

        assert!(program.function("HELPER").is_some());
        assert!(program.entry("helper").is_none());
        assert_eq!(program.entry("main").unwrap().index(), 1);
    }
}
