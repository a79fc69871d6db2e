//! # Heron Codegen
//!
//! Control-flow assembly helpers for Heron method-body generation: the layer
//! between a syntax-directed front end and the [`heron_abc`] instruction
//! model. Fragments for conditions, arms, and bodies are built independently
//! and stitched into if/while/switch/try shapes by merging, with relocatable
//! labels marking the join points.

#![warn(clippy::all)]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod flow;

pub use error::{FlowError, FlowResult};
pub use flow::{
    LoopContext, do_while_loop, if_then, if_then_else, switch_dispatch, try_catch, while_loop,
    while_loop_with,
};

#[cfg(test)]
mod proptests {
    use heron_abc::{Instruction, InstructionList, Opcode};
    use proptest::prelude::*;

    /// Append the `index`-th instruction of a generated sequence; `kind`
    /// selects between an executable push and a non-executable debug marker.
    fn append(list: &mut InstructionList, kind: u8, index: usize) {
        if kind == 0 {
            list.add_immediate(Opcode::PushByte, index as i32);
        } else {
            list.add_immediate(Opcode::DebugLine, index as i32);
        }
    }

    proptest! {
        /// Size and iteration order are independent of the fixed/variable
        /// storage configuration, for any mix of executable and debug
        /// instructions across the spill threshold.
        #[test]
        fn storage_is_transparent(kinds in proptest::collection::vec(0u8..2, 0..16)) {
            let mut list = InstructionList::new();
            for (index, &kind) in kinds.iter().enumerate() {
                append(&mut list, kind, index);
            }

            prop_assert_eq!(list.size(), kinds.len());
            let collected: Vec<i32> =
                list.iter().map(|insn| insn.immediate_value()).collect();
            let expected: Vec<i32> = (0..kinds.len() as i32).collect();
            prop_assert_eq!(collected, expected);

            if !kinds.is_empty() {
                prop_assert_eq!(list.first_element().immediate_value(), 0);
                prop_assert_eq!(
                    list.last_element().immediate_value(),
                    kinds.len() as i32 - 1
                );
            }
        }

        /// Splitting a sequence at any point and merging the halves yields
        /// the same instruction stream as appending directly.
        #[test]
        fn merge_equals_sequential_append(
            kinds in proptest::collection::vec(0u8..2, 0..12),
            split in 0usize..13,
        ) {
            let split = split.min(kinds.len());

            let mut direct = InstructionList::new();
            for (index, &kind) in kinds.iter().enumerate() {
                append(&mut direct, kind, index);
            }

            let mut head = InstructionList::new();
            for (index, &kind) in kinds[..split].iter().enumerate() {
                append(&mut head, kind, index);
            }
            let mut tail = InstructionList::new();
            for (offset, &kind) in kinds[split..].iter().enumerate() {
                append(&mut tail, kind, split + offset);
            }
            head.add_all(&mut tail);

            let direct_ops: Vec<Opcode> =
                direct.iter().map(Instruction::opcode).collect();
            let merged_ops: Vec<Opcode> =
                head.iter().map(Instruction::opcode).collect();
            prop_assert_eq!(direct_ops, merged_ops);
            prop_assert_eq!(head.size(), kinds.len());
        }
    }
}
