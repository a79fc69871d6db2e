//! Instructions
//!
//! An [`Instruction`] is an immutable value: one opcode plus operands. The
//! four operand shapes mirror the four instruction layouts the assembler
//! distinguishes: no operands, a bare immediate, a single operand, and an
//! arbitrary operand list (e.g. `lookupswitch`).

use crate::label::Label;
use crate::opcode::Opcode;
use crate::operand::Operand;

/// Operand storage for one instruction.
#[derive(Debug, Clone)]
enum Operands {
    /// No operands; the common case for stack-to-stack opcodes.
    None,
    /// A bare integer immediate (`pushbyte`, `debugline`, `getlocal`, ...).
    Immediate(i32),
    /// Exactly one operand (`getlex`, `jump`, `coerce`, ...).
    One(Operand),
    /// Arbitrary operands (`lookupswitch`, `debug`, ...).
    Many(Box<[Operand]>),
}

/// One opcode plus zero or more operands, immutable once constructed.
///
/// Cloning an `Instruction` copies operand values but shares Label operand
/// identity; substituting operands means building a new `Instruction`.
#[derive(Debug, Clone)]
pub struct Instruction {
    opcode: Opcode,
    operands: Operands,
}

impl Instruction {
    /// An instruction with no operands.
    pub fn of(opcode: Opcode) -> Self {
        Self {
            opcode,
            operands: Operands::None,
        }
    }

    /// An instruction with an integer immediate operand.
    pub fn immediate(opcode: Opcode, immediate: i32) -> Self {
        Self {
            opcode,
            operands: Operands::Immediate(immediate),
        }
    }

    /// An instruction with a single operand.
    pub fn with_operand(opcode: Opcode, operand: impl Into<Operand>) -> Self {
        Self {
            opcode,
            operands: Operands::One(operand.into()),
        }
    }

    /// An instruction with an arbitrary number of operands.
    pub fn with_operands(opcode: Opcode, operands: Vec<Operand>) -> Self {
        Self {
            opcode,
            operands: Operands::Many(operands.into_boxed_slice()),
        }
    }

    /// Copy an instruction's operands, whatever they may be, under a new
    /// opcode.
    pub fn modified(opcode: Opcode, original: &Instruction) -> Self {
        Self {
            opcode,
            operands: original.operands.clone(),
        }
    }

    /// This instruction's opcode.
    #[inline]
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Number of operands (an immediate does not count as an operand).
    pub fn operand_count(&self) -> usize {
        match &self.operands {
            Operands::None | Operands::Immediate(_) => 0,
            Operands::One(_) => 1,
            Operands::Many(operands) => operands.len(),
        }
    }

    /// Get an operand by index.
    ///
    /// # Panics
    ///
    /// If `index` is out of range.
    pub fn operand(&self, index: usize) -> &Operand {
        match (&self.operands, index) {
            (Operands::One(operand), 0) => operand,
            (Operands::Many(operands), i) if i < operands.len() => &operands[i],
            _ => panic!(
                "operand index {index} out of range for {}",
                self.opcode.name()
            ),
        }
    }

    /// All operands as a slice; empty for no-operand and immediate forms.
    pub fn operands(&self) -> &[Operand] {
        match &self.operands {
            Operands::None | Operands::Immediate(_) => &[],
            Operands::One(operand) => std::slice::from_ref(operand),
            Operands::Many(operands) => operands,
        }
    }

    /// The integer immediate of this instruction.
    ///
    /// # Panics
    ///
    /// If the instruction does not carry an immediate.
    pub fn immediate_value(&self) -> i32 {
        match self.operands {
            Operands::Immediate(value) => value,
            _ => panic!("{} carries no immediate", self.opcode.name()),
        }
    }

    /// The branch target of a single-target branch.
    ///
    /// # Panics
    ///
    /// If this instruction cannot carry a Label operand, or carries none.
    pub fn target(&self) -> &Label {
        assert!(
            self.is_targetable(),
            "{} cannot carry a branch target",
            self.opcode.name()
        );
        match self.operand(0) {
            Operand::Label(label) => label,
            other => panic!(
                "{} operand 0 is {other}, not a label",
                self.opcode.name()
            ),
        }
    }

    /// Iterate over the Label operands of this instruction.
    pub fn label_operands(&self) -> impl Iterator<Item = &Label> {
        self.operands().iter().filter_map(Operand::as_label)
    }

    /// See [`Opcode::is_executable`].
    #[inline]
    pub fn is_executable(&self) -> bool {
        self.opcode.is_executable()
    }

    /// See [`Opcode::is_branch`].
    #[inline]
    pub fn is_branch(&self) -> bool {
        self.opcode.is_branch()
    }

    /// See [`Opcode::is_targetable`].
    #[inline]
    pub fn is_targetable(&self) -> bool {
        self.opcode.is_targetable()
    }

    /// See [`Opcode::is_transfer_of_control`].
    #[inline]
    pub fn is_transfer_of_control(&self) -> bool {
        self.opcode.is_transfer_of_control()
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.opcode.name())?;
        match &self.operands {
            Operands::None => Ok(()),
            Operands::Immediate(value) => write!(f, " {value}"),
            Operands::One(operand) => write!(f, " {operand}"),
            Operands::Many(operands) => {
                for (i, operand) in operands.iter().enumerate() {
                    if i == 0 {
                        write!(f, " {operand}")?;
                    } else {
                        write!(f, ", {operand}")?;
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_shapes() {
        let nop = Instruction::of(Opcode::Nop);
        assert_eq!(nop.operand_count(), 0);

        let push = Instruction::immediate(Opcode::PushByte, 5);
        assert_eq!(push.operand_count(), 0);
        assert_eq!(push.immediate_value(), 5);

        let jump = Instruction::with_operand(Opcode::Jump, Label::new());
        assert_eq!(jump.operand_count(), 1);

        let switch = Instruction::with_operands(
            Opcode::LookupSwitch,
            vec![Label::new().into(), Label::new().into()],
        );
        assert_eq!(switch.operand_count(), 2);
        assert_eq!(switch.label_operands().count(), 2);
    }

    #[test]
    fn test_modified_shares_operands() {
        let label = Label::new();
        let iftrue = Instruction::with_operand(Opcode::IfTrue, label.clone());
        let iffalse = Instruction::modified(Opcode::IfFalse, &iftrue);

        assert_eq!(iffalse.opcode(), Opcode::IfFalse);
        assert!(iffalse.target().same_identity(&label));
    }

    #[test]
    fn test_clone_shares_label_identity() {
        let label = Label::new();
        let jump = Instruction::with_operand(Opcode::Jump, label.clone());
        let copy = jump.clone();

        label.set_position(9);
        assert_eq!(copy.target().position(), 9);
    }

    #[test]
    #[should_panic(expected = "cannot carry a branch target")]
    fn test_target_on_untargetable_faults() {
        Instruction::of(Opcode::Add).target();
    }

    #[test]
    fn test_display() {
        assert_eq!(Instruction::of(Opcode::Dup).to_string(), "dup");
        assert_eq!(
            Instruction::immediate(Opcode::PushByte, 12).to_string(),
            "pushbyte 12"
        );

        let label = Label::new();
        label.set_position(4);
        assert_eq!(
            Instruction::with_operand(Opcode::Jump, label).to_string(),
            "jump L4"
        );
    }
}
