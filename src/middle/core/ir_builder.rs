//! IR Builder
//!
//! Appends instructions to the block at the current insertion point and
//! tracks which blocks are still open.

use crate::middle::core::ir::{BasicBlock, FunctionIR, Instruction, IrType, Operand, Terminator};
use indexmap::IndexMap;

/// Insertion-point invariant violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuilderError {
    #[error("block '{0}' is already terminated")]
    AlreadyTerminated(String),
    #[error("block '{0}' was left without a terminator")]
    Unterminated(String),
    #[error("no block with label {0}")]
    UnknownBlock(usize),
}

/// Builds one function
#[derive(Debug)]
pub struct IrBuilder {
    func: FunctionIR,
    cur: usize,
    /// How often each base block name has been handed out
    name_counts: IndexMap<String, usize>,
}

impl IrBuilder {
    /// Start a function with an open `entry` block as insertion point
    pub fn new(
        name: impl Into<String>,
        return_type: IrType,
    ) -> Self {
        let mut builder = Self {
            func: FunctionIR {
                name: name.into(),
                return_type,
                slots: Vec::new(),
                temps: Vec::new(),
                blocks: Vec::new(),
                entry: 0,
            },
            cur: 0,
            name_counts: IndexMap::new(),
        };
        builder.func.entry = builder.new_block("entry");
        builder
    }

    /// Append a new empty block; repeated names get a numeric suffix
    pub fn new_block(
        &mut self,
        name: &str,
    ) -> usize {
        let count = self.name_counts.entry(name.to_string()).or_insert(0);
        let unique = if *count == 0 {
            name.to_string()
        } else {
            format!("{}{}", name, count)
        };
        *count += 1;

        let label = self.func.blocks.len();
        self.func.blocks.push(BasicBlock::new(label, unique));
        label
    }

    /// Move the insertion point
    pub fn set_block(
        &mut self,
        label: usize,
    ) -> Result<(), BuilderError> {
        if label >= self.func.blocks.len() {
            return Err(BuilderError::UnknownBlock(label));
        }
        self.cur = label;
        Ok(())
    }

    #[inline]
    pub fn cur_block(&self) -> usize {
        self.cur
    }

    /// Whether the insertion block still accepts instructions
    pub fn is_open(&self) -> bool {
        self.current().terminator.is_none()
    }

    fn current(&self) -> &BasicBlock {
        &self.func.blocks[self.cur]
    }

    /// Fresh temporary of type `ty`
    pub fn new_temp(
        &mut self,
        ty: IrType,
    ) -> Operand {
        let id = self.func.temps.len();
        self.func.temps.push(ty);
        Operand::Temp(id)
    }

    /// Fresh named slot; emits its `alloca`
    pub fn alloca(
        &mut self,
        name: &str,
    ) -> Result<usize, BuilderError> {
        let slot = self.func.slots.len();
        self.func.slots.push(name.to_string());
        self.emit(Instruction::Alloca { slot })?;
        Ok(slot)
    }

    pub fn emit(
        &mut self,
        inst: Instruction,
    ) -> Result<(), BuilderError> {
        if !self.is_open() {
            return Err(BuilderError::AlreadyTerminated(self.current().name.clone()));
        }
        self.func.blocks[self.cur].instructions.push(inst);
        Ok(())
    }

    /// Close the insertion block
    pub fn term(
        &mut self,
        term: Terminator,
    ) -> Result<(), BuilderError> {
        if !self.is_open() {
            return Err(BuilderError::AlreadyTerminated(self.current().name.clone()));
        }
        self.func.blocks[self.cur].terminator = Some(term);
        Ok(())
    }

    /// Finish the function; every block must be terminated
    pub fn finish(self) -> Result<FunctionIR, BuilderError> {
        if let Some(open) = self.func.blocks.iter().find(|b| b.terminator.is_none()) {
            return Err(BuilderError::Unterminated(open.name.clone()));
        }
        Ok(self.func)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_block_is_insertion_point() {
        let builder = IrBuilder::new("main", IrType::I32);
        assert_eq!(builder.cur_block(), 0);
        assert!(builder.is_open());
    }

    #[test]
    fn test_repeated_block_names_are_unique() {
        let mut builder = IrBuilder::new("main", IrType::I32);
        let a = builder.new_block("if.then");
        let b = builder.new_block("if.then");
        let c = builder.new_block("if.then");
        builder.term(Terminator::Ret(None)).unwrap();
        for label in [a, b, c] {
            builder.set_block(label).unwrap();
            builder.term(Terminator::Ret(None)).unwrap();
        }
        let func = builder.finish().unwrap();
        let names: Vec<_> = func.blocks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["entry", "if.then", "if.then1", "if.then2"]);
    }

    #[test]
    fn test_double_termination_is_an_error() {
        let mut builder = IrBuilder::new("main", IrType::I32);
        builder.term(Terminator::Ret(Some(Operand::int(0)))).unwrap();
        assert_eq!(
            builder.term(Terminator::Ret(None)),
            Err(BuilderError::AlreadyTerminated("entry".to_string()))
        );
        assert!(builder.emit(Instruction::Alloca { slot: 0 }).is_err());
    }

    #[test]
    fn test_finish_rejects_open_blocks() {
        let mut builder = IrBuilder::new("main", IrType::I32);
        builder.new_block("dangling");
        builder.term(Terminator::Ret(None)).unwrap();
        assert_eq!(
            builder.finish(),
            Err(BuilderError::Unterminated("dangling".to_string()))
        );
    }

    #[test]
    fn test_set_block_checks_label() {
        let mut builder = IrBuilder::new("main", IrType::I32);
        assert_eq!(builder.set_block(7), Err(BuilderError::UnknownBlock(7)));
    }
}
