//! Instruction sequences
//!
//! An [`InstructionList`] holds a sequence of instructions and manages sets of
//! labels, which act as relocatable address constants, to compose control-flow
//! constructs from their constituent parts. Code generation builds a small
//! list per syntactic fragment and stitches fragments together with
//! [`InstructionList::add_all`], which re-anchors every label of the source
//! into the destination's coordinate space.
//!
//! Most fragments hold one to three instructions, so the list stores small
//! sequences in fixed slots and only spills to heap-allocated storage at four
//! or more. The spill is monotonic: once variable-length, a list never
//! returns to fixed storage.

use crate::instruction::Instruction;
use crate::label::Label;
use crate::opcode::Opcode;
use crate::operand::Operand;

/// Storage configuration: fixed slots for 0-3 instructions, a growable
/// buffer beyond that.
#[derive(Debug)]
enum Storage {
    Empty,
    One(Instruction),
    Two(Instruction, Instruction),
    Three(Instruction, Instruction, Instruction),
    Variable(Vec<Instruction>),
}

fn into_vec(storage: Storage) -> Vec<Instruction> {
    match storage {
        Storage::Empty => Vec::new(),
        Storage::One(a) => vec![a],
        Storage::Two(a, b) => vec![a, b],
        Storage::Three(a, b, c) => vec![a, b, c],
        Storage::Variable(buffer) => buffer,
    }
}

fn extend_into(buffer: &mut Vec<Instruction>, storage: Storage) {
    match storage {
        Storage::Empty => {}
        Storage::One(a) => buffer.push(a),
        Storage::Two(a, b) => {
            buffer.push(a);
            buffer.push(b);
        }
        Storage::Three(a, b, c) => {
            buffer.push(a);
            buffer.push(b);
            buffer.push(c);
        }
        Storage::Variable(tail) => buffer.extend(tail),
    }
}

/// Remove a label from `labels` by identity.
fn remove_label(labels: &mut Vec<Label>, target: &Label) -> bool {
    match labels.iter().position(|l| l.same_identity(target)) {
        Some(index) => {
            labels.remove(index);
            true
        }
        None => false,
    }
}

/// Rebuild an instruction for a list copy: any Label operand is replaced
/// with a fresh incarnation, registered in whichever label set of the copy
/// the original belonged to.
fn clone_instruction_with_labels(
    insn: &Instruction,
    remaining_active: &mut Vec<Label>,
    remaining_pending: &mut Vec<Label>,
    new_active: &mut Vec<Label>,
    new_pending: &mut Vec<Label>,
) -> Instruction {
    // Non-targetable instructions don't have labels.
    if !insn.is_targetable() || insn.operand_count() == 0 {
        return insn.clone();
    }

    let mut operands = Vec::with_capacity(insn.operand_count());
    for operand in insn.operands() {
        match operand {
            Operand::Label(label) => {
                let cloned = label.duplicate();
                if remove_label(remaining_active, label) {
                    new_active.push(cloned.clone());
                } else if remove_label(remaining_pending, label) {
                    new_pending.push(cloned.clone());
                }
                operands.push(Operand::Label(cloned));
            }
            other => operands.push(other.clone()),
        }
    }

    if operands.len() == 1 {
        let only = operands.remove(0);
        Instruction::with_operand(insn.opcode(), only)
    } else {
        Instruction::with_operands(insn.opcode(), operands)
    }
}

/// A sequence of instructions with relocatable-label bookkeeping.
///
/// A list is valid from its creation until it is the source operand of an
/// [`add_all`](InstructionList::add_all) to another list. At that point its
/// labels have been moved out and its data is stale; every further operation
/// on it is a programming-error fault.
#[derive(Debug)]
pub struct InstructionList {
    storage: Storage,
    /// Labels resolved to a known offset within this list.
    active_labels: Vec<Label>,
    /// Labels that reference "the next executable instruction past the
    /// current end of this list". They resolve when such an instruction
    /// arrives, via `add_instruction` or `add_all`; if none ever does, they
    /// are inherited by whatever list this one is merged into.
    pending_labels: Vec<Label>,
    is_valid: bool,
}

impl InstructionList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            storage: Storage::Empty,
            active_labels: Vec::new(),
            pending_labels: Vec::new(),
            is_valid: true,
        }
    }

    /// Create a list that can hold `capacity` instructions without
    /// reallocating. Starts in variable-length storage.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Storage::Variable(Vec::with_capacity(capacity)),
            ..Self::new()
        }
    }

    fn check_validity(&self) {
        assert!(self.is_valid, "operation on an invalidated InstructionList");
    }

    /// Number of instructions in the list.
    pub fn size(&self) -> usize {
        self.check_validity();
        match &self.storage {
            Storage::Empty => 0,
            Storage::One(_) => 1,
            Storage::Two(_, _) => 2,
            Storage::Three(_, _, _) => 3,
            Storage::Variable(buffer) => buffer.len(),
        }
    }

    /// True if the list holds no instructions.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// The first instruction in the list.
    ///
    /// # Panics
    ///
    /// If the list is empty.
    pub fn first_element(&self) -> &Instruction {
        self.check_validity();
        match &self.storage {
            Storage::One(a) | Storage::Two(a, _) | Storage::Three(a, _, _) => a,
            Storage::Variable(buffer) if !buffer.is_empty() => &buffer[0],
            _ => panic!("first element of an empty InstructionList"),
        }
    }

    /// The last instruction in the list.
    ///
    /// # Panics
    ///
    /// If the list is empty.
    pub fn last_element(&self) -> &Instruction {
        self.check_validity();
        match &self.storage {
            Storage::One(a) | Storage::Two(_, a) | Storage::Three(_, _, a) => a,
            Storage::Variable(buffer) if !buffer.is_empty() => &buffer[buffer.len() - 1],
            _ => panic!("last element of an empty InstructionList"),
        }
    }

    /// Iterate over the instructions in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        self.check_validity();
        Iter {
            inner: match &self.storage {
                Storage::Empty => IterInner::Fixed {
                    slots: [None, None, None],
                    next: 0,
                },
                Storage::One(a) => IterInner::Fixed {
                    slots: [Some(a), None, None],
                    next: 0,
                },
                Storage::Two(a, b) => IterInner::Fixed {
                    slots: [Some(a), Some(b), None],
                    next: 0,
                },
                Storage::Three(a, b, c) => IterInner::Fixed {
                    slots: [Some(a), Some(b), Some(c)],
                    next: 0,
                },
                Storage::Variable(buffer) => IterInner::Variable(buffer.iter()),
            },
        }
    }

    /// Append an instruction.
    ///
    /// If the instruction is executable, all currently pending labels first
    /// resolve to the offset it is about to occupy.
    pub fn add_instruction(&mut self, insn: Instruction) -> &Instruction {
        self.check_validity();

        // The incoming instruction is a real control-flow position, so any
        // pending labels can be resolved to its location.
        if insn.is_executable() {
            self.resolve_pending_labels_at(self.size());
        }

        match std::mem::replace(&mut self.storage, Storage::Empty) {
            Storage::Empty => self.storage = Storage::One(insn),
            Storage::One(a) => self.storage = Storage::Two(a, insn),
            Storage::Two(a, b) => self.storage = Storage::Three(a, b, insn),
            // A full fixed configuration spills into variable-length storage.
            Storage::Three(a, b, c) => {
                self.storage = Storage::Variable(vec![a, b, c, insn]);
            }
            Storage::Variable(mut buffer) => {
                buffer.push(insn);
                self.storage = Storage::Variable(buffer);
            }
        }

        self.last_element()
    }

    /// Append an instruction with no operands.
    pub fn add(&mut self, opcode: Opcode) -> &Instruction {
        self.add_instruction(Instruction::of(opcode))
    }

    /// Append an instruction with an immediate operand.
    pub fn add_immediate(&mut self, opcode: Opcode, immediate: i32) -> &Instruction {
        self.add_instruction(Instruction::immediate(opcode, immediate))
    }

    /// Append an instruction with a single operand.
    pub fn add_operand(&mut self, opcode: Opcode, operand: impl Into<Operand>) -> &Instruction {
        self.add_instruction(Instruction::with_operand(opcode, operand))
    }

    /// Append an instruction with arbitrary operands.
    pub fn add_operands(&mut self, opcode: Opcode, operands: Vec<Operand>) -> &Instruction {
        self.add_instruction(Instruction::with_operands(opcode, operands))
    }

    /// Append another list to this one.
    ///
    /// Active labels of `src` are shifted by this list's prior length and
    /// inherited; if `src` contributes an executable instruction, this list's
    /// pending labels resolve to the first one; `src`'s still-pending labels
    /// are inherited unresolved. `src` is permanently invalidated.
    pub fn add_all(&mut self, src: &mut InstructionList) {
        self.check_validity();
        src.check_validity();

        let prior_len = self.size();

        // Inherit active labels from the other list, adjusted to this list's
        // coordinate space.
        if prior_len > 0 {
            for label in &src.active_labels {
                label.adjust_offset(prior_len as i32);
            }
        }
        self.active_labels.append(&mut src.active_labels);

        if !src.is_empty() {
            // If the new sequence contains an executable instruction, this
            // list's pending labels resolve to the position of the first one
            // in the merged list.
            if let Some(offset) = src.first_executable_offset() {
                self.resolve_pending_labels_at(prior_len + offset);
            }

            // Copy src's storage into this list with the minimal-cost
            // transition: keep fixed slots while the combined size still fits
            // in three, otherwise spill whichever side is still fixed.
            let src_storage = std::mem::replace(&mut src.storage, Storage::Empty);
            let dest_storage = std::mem::replace(&mut self.storage, Storage::Empty);
            self.storage = match (dest_storage, src_storage) {
                (dest, Storage::Empty) => dest,
                (Storage::Empty, incoming) => incoming,
                (Storage::One(a), Storage::One(b)) => Storage::Two(a, b),
                (Storage::One(a), Storage::Two(b, c)) => Storage::Three(a, b, c),
                (Storage::Two(a, b), Storage::One(c)) => Storage::Three(a, b, c),
                (dest, incoming) => {
                    let mut buffer = into_vec(dest);
                    extend_into(&mut buffer, incoming);
                    Storage::Variable(buffer)
                }
            };
        }

        // Inherit any pending labels from the other list.
        self.pending_labels.append(&mut src.pending_labels);

        src.is_valid = false;
    }

    /// Bind `label` to the first executable instruction, or defer it until
    /// one arrives.
    pub fn label_first(&mut self, label: &Label) {
        match self.first_executable_offset() {
            Some(offset) => self.add_label_at(label, offset),
            None => self.label_next(label),
        }
    }

    /// Bind `label` at the end of the list: to the last executable
    /// instruction if the label requires one, to the last slot otherwise, or
    /// defer it if no suitable position exists yet.
    pub fn label_current(&mut self, label: &Label) {
        if label.target_must_be_executable() {
            if let Some(offset) = self.last_executable_offset() {
                return self.add_label_at(label, offset);
            }
        } else if self.size() > 0 {
            return self.add_label_at(label, self.size() - 1);
        }

        self.label_next(label);
    }

    /// Bind `label` at an explicit position.
    ///
    /// # Panics
    ///
    /// If `pos` is out of bounds, or the label is already bound elsewhere.
    pub fn add_label_at(&mut self, label: &Label, pos: usize) {
        self.check_validity();

        if !self.is_empty() {
            assert!(
                pos < self.size(),
                "label position {pos} out of bounds for {} instructions",
                self.size()
            );
            label.set_position(pos as i32);
            self.active_labels.push(label.clone());
        } else {
            assert!(pos == 0, "label position {pos} in an empty list");
            self.label_next(label);
        }
    }

    /// Defer `label` to the next executable instruction added to this list.
    pub fn label_next(&mut self, label: &Label) {
        self.check_validity();
        self.pending_labels.push(label.clone());
    }

    /// Synthesize a label identifying this list's first executable
    /// instruction (pending if there is none yet).
    pub fn get_label(&mut self) -> Label {
        self.check_validity();
        let label = Label::new();
        self.label_first(&label);
        label
    }

    /// Synthesize a label bound at the end of this list.
    ///
    /// # Panics
    ///
    /// If the list is empty.
    pub fn get_last_label(&mut self) -> Label {
        self.check_validity();
        assert!(!self.is_empty(), "last label of an empty InstructionList");

        let label = Label::new();
        self.label_current(&label);
        label
    }

    /// Labels resolved to known offsets within this list.
    pub fn active_labels(&self) -> &[Label] {
        self.check_validity();
        &self.active_labels
    }

    /// True if the list has unresolved pending labels.
    pub fn has_pending_labels(&self) -> bool {
        self.check_validity();
        !self.pending_labels.is_empty()
    }

    /// Take this list's pending labels without resolving them, so they can be
    /// re-assigned to an enclosing list at a later time.
    pub fn strip_pending_labels(&mut self) -> Vec<Label> {
        self.check_validity();
        std::mem::take(&mut self.pending_labels)
    }

    /// Add pending labels previously taken from a component list.
    pub fn add_all_pending_labels(&mut self, labels: Vec<Label>) {
        self.check_validity();
        self.pending_labels.extend(labels);
    }

    /// A suitable target has presented itself; resolve all pending labels.
    fn resolve_pending_labels_at(&mut self, offset: usize) {
        if self.pending_labels.is_empty() {
            return;
        }

        for label in &self.pending_labels {
            label.set_position(offset as i32);
        }

        // Move the pending labels to active status.
        self.active_labels.append(&mut self.pending_labels);
    }

    /// Offset of the first executable instruction, if any.
    fn first_executable_offset(&self) -> Option<usize> {
        self.iter().position(|insn| insn.is_executable())
    }

    /// Offset of the last executable instruction, if any.
    fn last_executable_offset(&self) -> Option<usize> {
        let mut result = None;
        for (offset, insn) in self.iter().enumerate() {
            if insn.is_executable() {
                result = Some(offset);
            }
        }
        result
    }

    /// True if an instruction with this opcode is part of the list.
    pub fn has_such_instruction(&self, opcode: Opcode) -> bool {
        self.find_occurrences(opcode, true) > 0
    }

    /// Count occurrences of an opcode.
    pub fn count_occurrences(&self, opcode: Opcode) -> usize {
        self.find_occurrences(opcode, false)
    }

    fn find_occurrences(&self, opcode: Opcode, stop_after_first: bool) -> usize {
        self.check_validity();

        let mut result = 0;
        match &self.storage {
            Storage::Empty => {}
            Storage::One(a) => {
                result += usize::from(a.opcode() == opcode);
            }
            Storage::Two(a, b) => {
                result += usize::from(a.opcode() == opcode);
                result += usize::from(b.opcode() == opcode);
            }
            Storage::Three(a, b, c) => {
                result += usize::from(a.opcode() == opcode);
                result += usize::from(b.opcode() == opcode);
                result += usize::from(c.opcode() == opcode);
            }
            Storage::Variable(buffer) => {
                for insn in buffer {
                    if insn.opcode() == opcode {
                        result += 1;
                        if stop_after_first {
                            break;
                        }
                    }
                }
            }
        }

        result
    }

    /// True unless the list ends with an unconditional transfer of control
    /// (return, throw, or unconditional jump).
    pub fn can_fall_through(&self) -> bool {
        self.check_validity();

        if self.size() > 0 {
            !self.last_element().opcode().is_unconditional_transfer()
        } else {
            true
        }
    }

    /// Append the cheapest instruction that pushes `value` onto the value
    /// stack.
    ///
    /// The encoding tiers and their exact boundaries are load-bearing:
    /// downstream consumers depend on the encoding chosen for a given
    /// literal. In particular `0` takes the byte form, and the int form's
    /// bounds are `-0xFFFF_FFFF` and `0xFFFF_FFFE`, both exclusive.
    #[allow(clippy::manual_range_contains)]
    pub fn push_numeric_constant(&mut self, value: i64) {
        if value >= -128 && value < 128 {
            self.add_immediate(Opcode::PushByte, value as i32);
        } else if value > 0 && value < 32768 {
            self.add_immediate(Opcode::PushShort, value as i32);
        } else if value > -0xFFFF_FFFF && value < 0xFFFF_FFFE {
            self.add_operand(Opcode::PushInt, Operand::Int(value as i32));
        } else {
            self.add_operand(Opcode::PushDouble, Operand::Double(value as f64));
        }
    }

    /// True if this list is in variable-length storage.
    #[cfg(test)]
    fn is_variable_storage(&self) -> bool {
        matches!(self.storage, Storage::Variable(_))
    }
}

impl Default for InstructionList {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InstructionList {
    /// Label-aware deep copy.
    ///
    /// Instructions are shallow-copied, except that an instruction carrying a
    /// Label operand is rebuilt around a fresh label incarnation, registered
    /// in whichever of the copy's label sets the original belonged to.
    /// Labels in the source's sets that no instruction references are
    /// also duplicated into the matching set, so handles obtained via
    /// [`get_label`](InstructionList::get_label) have a counterpart in the
    /// copy.
    fn clone(&self) -> Self {
        self.check_validity();

        let mut remaining_active = self.active_labels.clone();
        let mut remaining_pending = self.pending_labels.clone();
        let mut new_active = Vec::with_capacity(self.active_labels.len());
        let mut new_pending = Vec::with_capacity(self.pending_labels.len());

        let mut cloned: Vec<Instruction> = self
            .iter()
            .map(|insn| {
                clone_instruction_with_labels(
                    insn,
                    &mut remaining_active,
                    &mut remaining_pending,
                    &mut new_active,
                    &mut new_pending,
                )
            })
            .collect();

        // Rebuild the same storage configuration the source had.
        let storage = match &self.storage {
            Storage::Variable(_) => Storage::Variable(cloned),
            _ => {
                let mut drain = cloned.drain(..);
                match (drain.next(), drain.next(), drain.next()) {
                    (None, _, _) => Storage::Empty,
                    (Some(a), None, _) => Storage::One(a),
                    (Some(a), Some(b), None) => Storage::Two(a, b),
                    (Some(a), Some(b), Some(c)) => Storage::Three(a, b, c),
                }
            }
        };

        // Duplicate any labels not referenced by an instruction.
        for label in &remaining_active {
            new_active.push(label.duplicate());
        }
        for label in &remaining_pending {
            new_pending.push(label.duplicate());
        }

        Self {
            storage,
            active_labels: new_active,
            pending_labels: new_pending,
            is_valid: true,
        }
    }
}

impl<'a> IntoIterator for &'a InstructionList {
    type Item = &'a Instruction;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Iterator over a list's instructions.
pub struct Iter<'a> {
    inner: IterInner<'a>,
}

enum IterInner<'a> {
    Fixed {
        slots: [Option<&'a Instruction>; 3],
        next: usize,
    },
    Variable(std::slice::Iter<'a, Instruction>),
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Instruction;

    fn next(&mut self) -> Option<&'a Instruction> {
        match &mut self.inner {
            IterInner::Fixed { slots, next } => {
                let item = slots.get(*next).copied().flatten();
                *next += 1;
                item
            }
            IterInner::Variable(iter) => iter.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exec() -> Instruction {
        Instruction::of(Opcode::Nop)
    }

    fn debug_line(line: i32) -> Instruction {
        Instruction::immediate(Opcode::DebugLine, line)
    }

    #[test]
    fn test_storage_transparency() {
        for n in 0..=6 {
            let mut list = InstructionList::new();
            for i in 0..n {
                list.add_immediate(Opcode::PushByte, i as i32);
            }

            assert_eq!(list.size(), n);
            assert_eq!(list.is_empty(), n == 0);

            let collected: Vec<i32> = list.iter().map(|i| i.immediate_value()).collect();
            let expected: Vec<i32> = (0..n as i32).collect();
            assert_eq!(collected, expected);

            if n > 0 {
                assert_eq!(list.first_element().immediate_value(), 0);
                assert_eq!(list.last_element().immediate_value(), n as i32 - 1);
            }
        }
    }

    #[test]
    fn test_storage_spills_at_four() {
        let mut list = InstructionList::new();
        for _ in 0..3 {
            list.add_instruction(exec());
        }
        assert!(!list.is_variable_storage());

        list.add_instruction(exec());
        assert!(list.is_variable_storage());
    }

    #[test]
    fn test_with_capacity_starts_variable() {
        let mut list = InstructionList::with_capacity(8);
        assert!(list.is_variable_storage());
        list.add_instruction(exec());
        assert_eq!(list.size(), 1);
        assert!(list.is_variable_storage());
    }

    #[test]
    fn test_pending_label_resolution() {
        let mut list = InstructionList::new();
        let label = Label::new();
        list.label_next(&label);
        assert!(list.has_pending_labels());

        list.add_instruction(exec());

        assert_eq!(label.position(), 0);
        assert!(!list.has_pending_labels());
        assert!(
            list.active_labels()
                .iter()
                .any(|l| l.same_identity(&label))
        );
    }

    #[test]
    fn test_debug_instructions_do_not_resolve_pending_labels() {
        let mut list = InstructionList::new();
        let label = Label::new();
        list.label_next(&label);

        list.add_instruction(debug_line(10));
        assert!(list.has_pending_labels());
        assert!(!label.is_resolved());

        list.add_instruction(exec());
        assert_eq!(label.position(), 1);
    }

    #[test]
    fn test_merge_offsets() {
        let mut a = InstructionList::new();
        a.add_instruction(exec());
        a.add_instruction(exec());
        let la = Label::new();
        a.label_next(&la);

        let mut b = InstructionList::new();
        b.add_instruction(exec());
        b.add_instruction(exec());
        b.add_instruction(exec());
        let lb = Label::new();
        b.add_label_at(&lb, 1);

        a.add_all(&mut b);

        assert_eq!(a.size(), 5);
        assert_eq!(lb.position(), 3);
        assert_eq!(la.position(), 2);
        assert_eq!(a.active_labels().len(), 2);
    }

    #[test]
    fn test_merge_into_empty_list_keeps_label_offsets() {
        let mut a = InstructionList::new();
        let mut b = InstructionList::new();
        b.add_instruction(exec());
        let label = b.get_label();

        a.add_all(&mut b);
        assert_eq!(label.position(), 0);
    }

    #[test]
    fn test_merge_with_inexecutable_source_keeps_labels_pending() {
        let mut a = InstructionList::new();
        let label = Label::new();
        a.label_next(&label);

        let mut b = InstructionList::new();
        b.add_instruction(debug_line(1));

        a.add_all(&mut b);
        assert!(a.has_pending_labels());
        assert!(!label.is_resolved());

        a.add_instruction(exec());
        assert_eq!(label.position(), 1);
    }

    #[test]
    fn test_merge_inherits_pending_labels() {
        let mut a = InstructionList::new();
        a.add_instruction(exec());

        let mut b = InstructionList::new();
        b.add_instruction(exec());
        let label = Label::new();
        b.label_next(&label);

        a.add_all(&mut b);
        assert!(a.has_pending_labels());

        a.add_instruction(exec());
        assert_eq!(label.position(), 2);
    }

    #[test]
    #[should_panic(expected = "invalidated")]
    fn test_merged_source_size_faults() {
        let mut a = InstructionList::new();
        let mut b = InstructionList::new();
        b.add_instruction(exec());
        a.add_all(&mut b);
        b.size();
    }

    #[test]
    #[should_panic(expected = "invalidated")]
    fn test_merged_source_add_faults() {
        let mut a = InstructionList::new();
        let mut b = InstructionList::new();
        a.add_all(&mut b);
        b.add_instruction(exec());
    }

    #[test]
    fn test_merge_storage_transitions() {
        // 1 + 2 instructions still fit in fixed slots.
        let mut a = InstructionList::new();
        a.add_instruction(exec());
        let mut b = InstructionList::new();
        b.add_instruction(exec());
        b.add_instruction(exec());
        a.add_all(&mut b);
        assert_eq!(a.size(), 3);
        assert!(!a.is_variable_storage());

        // 2 + 2 spills.
        let mut c = InstructionList::new();
        c.add_instruction(exec());
        c.add_instruction(exec());
        let mut d = InstructionList::new();
        d.add_instruction(exec());
        d.add_instruction(exec());
        c.add_all(&mut d);
        assert_eq!(c.size(), 4);
        assert!(c.is_variable_storage());

        // Variable storage is monotonic even when merging a small list in.
        let mut e = InstructionList::with_capacity(1);
        let mut f = InstructionList::new();
        f.add_instruction(exec());
        e.add_all(&mut f);
        assert_eq!(e.size(), 1);
        assert!(e.is_variable_storage());
    }

    #[test]
    fn test_label_first_and_current() {
        let mut list = InstructionList::new();
        list.add_instruction(debug_line(1));
        list.add_instruction(exec());
        list.add_instruction(exec());
        list.add_instruction(debug_line(2));

        let first = Label::new();
        list.label_first(&first);
        assert_eq!(first.position(), 1);

        let current = Label::new();
        list.label_current(&current);
        assert_eq!(current.position(), 2);

        let any_target = Label::with_target_policy(false);
        list.label_current(&any_target);
        assert_eq!(any_target.position(), 3);
    }

    #[test]
    fn test_label_current_defers_on_empty_list() {
        let mut list = InstructionList::new();
        let label = Label::new();
        list.label_current(&label);
        assert!(list.has_pending_labels());
    }

    #[test]
    fn test_add_label_at_empty_list_defers() {
        let mut list = InstructionList::new();
        let label = Label::new();
        list.add_label_at(&label, 0);
        assert!(list.has_pending_labels());
        assert!(!label.is_resolved());
    }

    #[test]
    #[should_panic(expected = "label position")]
    fn test_add_label_at_conflicting_position_faults() {
        let mut list = InstructionList::new();
        list.add_instruction(exec());
        list.add_instruction(exec());

        let label = Label::new();
        list.add_label_at(&label, 0);
        list.add_label_at(&label, 1);
    }

    #[test]
    fn test_get_label_and_get_last_label() {
        let mut list = InstructionList::new();
        list.add_instruction(exec());
        list.add_instruction(exec());

        assert_eq!(list.get_label().position(), 0);
        assert_eq!(list.get_last_label().position(), 1);
    }

    #[test]
    #[should_panic(expected = "empty")]
    fn test_get_last_label_on_empty_list_faults() {
        InstructionList::new().get_last_label();
    }

    #[test]
    fn test_strip_and_readd_pending_labels() {
        let mut inner = InstructionList::new();
        inner.add_instruction(exec());
        let label = Label::new();
        inner.label_next(&label);

        let stripped = inner.strip_pending_labels();
        assert!(!inner.has_pending_labels());
        assert_eq!(stripped.len(), 1);

        // The label survives an intervening instruction unresolved.
        inner.add_instruction(exec());
        assert!(!label.is_resolved());

        let mut outer = InstructionList::new();
        outer.add_all(&mut inner);
        outer.add_all_pending_labels(stripped);
        outer.add_instruction(exec());
        assert_eq!(label.position(), 2);
    }

    #[test]
    fn test_fall_through() {
        let mut list = InstructionList::new();
        assert!(list.can_fall_through());

        list.add_instruction(exec());
        assert!(list.can_fall_through());

        for opcode in [
            Opcode::ReturnVoid,
            Opcode::ReturnValue,
            Opcode::Throw,
        ] {
            let mut ending = InstructionList::new();
            ending.add(opcode);
            assert!(!ending.can_fall_through(), "{opcode}");
        }

        let mut jumping = InstructionList::new();
        jumping.add_operand(Opcode::Jump, Label::new());
        assert!(!jumping.can_fall_through());

        let mut branching = InstructionList::new();
        branching.add_operand(Opcode::IfTrue, Label::new());
        assert!(branching.can_fall_through());
    }

    #[test]
    fn test_occurrence_queries() {
        let mut list = InstructionList::new();
        list.add(Opcode::Dup);
        list.add(Opcode::Pop);
        list.add(Opcode::Dup);
        assert!(list.has_such_instruction(Opcode::Dup));
        assert!(!list.has_such_instruction(Opcode::Swap));
        assert_eq!(list.count_occurrences(Opcode::Dup), 2);

        // Same answers once spilled to variable storage.
        list.add(Opcode::Dup);
        list.add(Opcode::Nop);
        assert!(list.is_variable_storage());
        assert_eq!(list.count_occurrences(Opcode::Dup), 3);
        assert!(!list.has_such_instruction(Opcode::Swap));
    }

    #[test]
    fn test_numeric_constant_tiers() {
        let cases: &[(i64, Opcode)] = &[
            (5, Opcode::PushByte),
            (0, Opcode::PushByte),
            (-128, Opcode::PushByte),
            (127, Opcode::PushByte),
            (128, Opcode::PushShort),
            (200, Opcode::PushShort),
            (32767, Opcode::PushShort),
            (-129, Opcode::PushInt),
            (32768, Opcode::PushInt),
            (100_000, Opcode::PushInt),
            (0xFFFF_FFFD, Opcode::PushInt),
            (0xFFFF_FFFE, Opcode::PushDouble),
            (-0xFFFF_FFFE, Opcode::PushInt),
            (-0xFFFF_FFFF, Opcode::PushDouble),
            (9_999_999_999, Opcode::PushDouble),
        ];

        for &(value, expected) in cases {
            let mut list = InstructionList::new();
            list.push_numeric_constant(value);
            assert_eq!(
                list.last_element().opcode(),
                expected,
                "encoding for {value}"
            );
        }
    }

    #[test]
    fn test_clone_duplicates_label_operands() {
        let mut list = InstructionList::new();
        let target = Label::new();
        list.add_instruction(exec());
        list.add_label_at(&target, 0);
        list.add_operand(Opcode::Jump, target.clone());

        let copy = list.clone();

        let copied_target = copy.last_element().target();
        assert!(!copied_target.same_identity(&target));
        assert_eq!(copied_target.position(), 0);
        assert_eq!(copy.active_labels().len(), 1);
        assert!(
            copy.active_labels()[0].same_identity(copied_target),
            "clone must register the duplicated label as its own active label"
        );

        // The copy's label is a separate incarnation.
        target.adjust_offset(5);
        assert_eq!(copied_target.position(), 0);
    }

    #[test]
    fn test_clone_copies_unreferenced_labels() {
        let mut list = InstructionList::new();
        list.add_instruction(exec());
        let bound = list.get_label();
        let pending = Label::new();
        list.label_next(&pending);

        let mut copy = list.clone();

        assert_eq!(copy.active_labels().len(), 1);
        assert!(!copy.active_labels()[0].same_identity(&bound));
        assert_eq!(copy.active_labels()[0].position(), 0);

        // The pending label was duplicated too: resolving the copy must not
        // touch the original incarnation.
        copy.add_instruction(exec());
        assert!(!pending.is_resolved());
        assert!(!copy.has_pending_labels());
    }

    #[test]
    fn test_clone_preserves_pending_branch_targets() {
        let mut list = InstructionList::new();
        let join = Label::new();
        list.add_operand(Opcode::Jump, join.clone());
        list.label_next(&join);

        let mut copy = list.clone();
        copy.add_instruction(exec());

        // The copy resolved its own incarnation; the original stays pending.
        assert_eq!(copy.first_element().target().position(), 1);
        assert!(!join.is_resolved());
        assert!(list.has_pending_labels());
    }
}
