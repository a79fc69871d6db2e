//! Control-flow graphs
//!
//! A [`ControlFlowGraph`] organizes a finished method body into basic blocks
//! (sequences where control proceeds linearly from one instruction to the
//! next) and edges for the discontinuous transfers. Label targets become
//! block boundaries; branch operands become edges.

use rustc_hash::FxHashMap;

use crate::error::{CfgError, Result};
use crate::instruction::Instruction;
use crate::label::Label;
use crate::list::InstructionList;

/// A basic block: a straight-line run of instructions plus its successors.
#[derive(Debug, Default)]
pub struct Block {
    instructions: Vec<Instruction>,
    successors: Vec<usize>,
}

impl Block {
    /// The instructions of this block, in execution order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Ids of the blocks control can transfer to from this block. A
    /// fall-through successor, if any, comes first.
    pub fn successors(&self) -> &[usize] {
        &self.successors
    }

    /// Number of instructions in the block.
    pub fn size(&self) -> usize {
        self.instructions.len()
    }

    /// True if the block holds no instructions (only possible for an entry
    /// block whose first instruction is a label target).
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// True unless the block ends with an unconditional transfer of control.
    pub fn can_fall_through(&self) -> bool {
        match self.instructions.last() {
            Some(insn) => !insn.opcode().is_unconditional_transfer(),
            None => true,
        }
    }
}

/// The flow of control through a method body's instructions.
#[derive(Debug)]
pub struct ControlFlowGraph {
    /// Blocks in entry order; block 0 is the start block.
    blocks: Vec<Block>,
    /// Block ids keyed by labeled instruction offset.
    block_by_position: FxHashMap<usize, usize>,
}

impl ControlFlowGraph {
    /// Build the graph for a finished method body.
    ///
    /// The body must be complete: pending labels or an unbound branch operand
    /// are errors, as is a label position outside the body.
    pub fn build(list: &InstructionList) -> Result<Self> {
        if list.has_pending_labels() {
            return Err(CfgError::PendingLabels);
        }

        let len = list.size();

        // Label targets in the body open block boundaries.
        let mut boundaries: Vec<usize> = Vec::with_capacity(list.active_labels().len());
        for label in list.active_labels() {
            boundaries.push(Self::checked_position(label, len)?);
        }
        boundaries.sort_unstable();
        boundaries.dedup();

        let mut blocks: Vec<Block> = vec![Block::default()];
        let mut successor_targets: Vec<Vec<usize>> = vec![Vec::new()];
        let mut block_by_position = FxHashMap::default();
        let mut current = 0usize;
        let mut last_transferred = false;

        for (offset, insn) in list.iter().enumerate() {
            let at_label = boundaries.binary_search(&offset).is_ok();

            if at_label || last_transferred {
                // A non-empty current block ends here; if the first
                // instruction is itself a label target, the start block
                // simply stays empty.
                if !blocks[current].is_empty() {
                    let previous = current;
                    blocks.push(Block::default());
                    successor_targets.push(Vec::new());
                    current = blocks.len() - 1;

                    // Control falls from the previous block into this one.
                    if blocks[previous].can_fall_through() {
                        blocks[previous].successors.push(current);
                    }
                }

                if at_label {
                    block_by_position.insert(offset, current);
                }
            }

            if insn.is_branch() {
                // The target may be a forward reference to a block not yet
                // seen; record positions now, make edges after the pass.
                for label in insn.label_operands() {
                    successor_targets[current].push(Self::checked_position(label, len)?);
                }
            }

            blocks[current].instructions.push(insn.clone());
            last_transferred = insn.is_transfer_of_control();
        }

        // All blocks exist now; turn deferred target positions into edges.
        for (id, targets) in successor_targets.into_iter().enumerate() {
            for position in targets {
                if let Some(&target_block) = block_by_position.get(&position) {
                    blocks[id].successors.push(target_block);
                }
            }
        }

        Ok(Self {
            blocks,
            block_by_position,
        })
    }

    fn checked_position(label: &Label, len: usize) -> Result<usize> {
        if !label.is_resolved() {
            return Err(CfgError::UnresolvedLabel);
        }
        let position = label.position() as usize;
        if position >= len {
            return Err(CfgError::TargetOutOfRange {
                target: position,
                len,
            });
        }
        Ok(position)
    }

    /// The entry point of the method.
    pub fn start_block(&self) -> &Block {
        &self.blocks[0]
    }

    /// The blocks in their original entry order.
    pub fn blocks_in_entry_order(&self) -> &[Block] {
        &self.blocks
    }

    /// The blocks in depth-first preorder from the start block. Blocks
    /// unreachable by normal control flow are not visited.
    pub fn blocks_in_control_flow_order(&self) -> Vec<&Block> {
        let mut visited = vec![false; self.blocks.len()];
        let mut order = Vec::with_capacity(self.blocks.len());
        let mut stack = vec![0usize];

        while let Some(id) = stack.pop() {
            if visited[id] {
                continue;
            }
            visited[id] = true;
            order.push(&self.blocks[id]);

            // Push successors in reverse so the first successor is visited
            // first.
            for &succ in self.blocks[id].successors.iter().rev() {
                if !visited[succ] {
                    stack.push(succ);
                }
            }
        }

        order
    }

    /// The block a label targets, if the label addresses this body.
    pub fn block_of_label(&self, label: &Label) -> Option<&Block> {
        if !label.is_resolved() {
            return None;
        }
        self.block_by_position
            .get(&(label.position() as usize))
            .map(|&id| &self.blocks[id])
    }
}
