//! Human-readable method-body dumps
//!
//! Debugging renditions of an [`InstructionList`] and a
//! [`ControlFlowGraph`]: offsets, mnemonics, operands, and resolved label
//! targets. Nothing downstream depends on this output.

use std::fmt;

use crate::cfg::ControlFlowGraph;
use crate::list::InstructionList;

impl fmt::Display for InstructionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Offsets that are label targets get an `L<offset>:` marker line.
        let mut targets: Vec<usize> = self
            .active_labels()
            .iter()
            .filter(|label| label.is_resolved())
            .map(|label| label.position() as usize)
            .collect();
        targets.sort_unstable();
        targets.dedup();

        for (offset, insn) in self.iter().enumerate() {
            if targets.binary_search(&offset).is_ok() {
                writeln!(f, "L{offset}:")?;
            }
            writeln!(f, "{offset:4}  {insn}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ControlFlowGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, block) in self.blocks_in_entry_order().iter().enumerate() {
            writeln!(f, "B{id}:")?;
            for insn in block.instructions() {
                writeln!(f, "    {insn}")?;
            }
            if !block.successors().is_empty() {
                write!(f, "    -> ")?;
                for (i, succ) in block.successors().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "B{succ}")?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
