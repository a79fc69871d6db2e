//! Control-flow assembly
//!
//! Helpers that stitch [`InstructionList`] fragments into the standard
//! control-flow shapes. Each helper consumes its fragments (they are merged
//! away and invalidated) and returns a single list, usually with a pending
//! label that resolves to whatever the caller appends next.
//!
//! Condition fragments leave a boolean on the value stack; the helpers
//! append the conditional branch themselves. Backward-branch targets get the
//! AVM2 `label` instruction at the loop head.

use heron_abc::{InstructionList, Label, Opcode};

use crate::error::{FlowError, FlowResult};

fn check_condition(cond: &InstructionList) -> FlowResult<()> {
    if cond.is_empty() {
        return Err(FlowError::EmptyCondition);
    }
    if !cond.can_fall_through() {
        return Err(FlowError::DeadCondition);
    }
    Ok(())
}

/// Assemble `if (cond) { then_body }`.
///
/// The result ends with a pending label past the then-arm; it resolves to
/// the next executable instruction the caller appends.
pub fn if_then(mut cond: InstructionList, mut then_body: InstructionList) -> FlowResult<InstructionList> {
    check_condition(&cond)?;

    let tail = Label::new();
    cond.add_operand(Opcode::IfFalse, tail.clone());

    let mut result = cond;
    result.add_all(&mut then_body);
    result.label_next(&tail);
    Ok(result)
}

/// Assemble `if (cond) { then_body } else { else_body }`.
pub fn if_then_else(
    mut cond: InstructionList,
    mut then_body: InstructionList,
    mut else_body: InstructionList,
) -> FlowResult<InstructionList> {
    check_condition(&cond)?;

    let else_head = Label::new();
    let join = Label::new();

    cond.add_operand(Opcode::IfFalse, else_head.clone());

    let mut result = cond;
    result.add_all(&mut then_body);
    result.add_operand(Opcode::Jump, join.clone());

    else_body.label_first(&else_head);
    result.add_all(&mut else_body);
    result.label_next(&join);
    Ok(result)
}

/// Break/continue targets for one loop.
///
/// Body statements jump against the context while the loop is being
/// assembled; the loop helper binds the targets when the shape is complete.
/// One context serves exactly one loop.
pub struct LoopContext {
    break_label: Label,
    continue_label: Label,
}

impl LoopContext {
    /// Create targets for a new loop.
    pub fn new() -> Self {
        Self {
            break_label: Label::new(),
            continue_label: Label::new(),
        }
    }

    /// The label a `break` transfers to: the code after the loop.
    pub fn break_target(&self) -> &Label {
        &self.break_label
    }

    /// The label a `continue` transfers to: the loop's test.
    pub fn continue_target(&self) -> &Label {
        &self.continue_label
    }

    /// Emit a `break` out of the loop being assembled.
    pub fn emit_break(&self, body: &mut InstructionList) {
        body.add_operand(Opcode::Jump, self.break_label.clone());
    }

    /// Emit a `continue` to the loop's test.
    pub fn emit_continue(&self, body: &mut InstructionList) {
        body.add_operand(Opcode::Jump, self.continue_label.clone());
    }
}

impl Default for LoopContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Assemble `while (cond) { body }` with fresh break/continue targets.
pub fn while_loop(cond: InstructionList, body: InstructionList) -> FlowResult<InstructionList> {
    while_loop_with(&LoopContext::new(), cond, body)
}

/// Assemble `while (cond) { body }` against an existing [`LoopContext`].
///
/// Shape: jump to the test, `label`-marked body, test, conditional branch
/// back. The context's continue target binds to the test, its break target
/// is left pending past the loop.
pub fn while_loop_with(
    context: &LoopContext,
    mut cond: InstructionList,
    mut body: InstructionList,
) -> FlowResult<InstructionList> {
    check_condition(&cond)?;

    let head = Label::new();

    let mut result = InstructionList::new();
    result.add_operand(Opcode::Jump, context.continue_label.clone());

    // Backward-branch target; verification requires the marker instruction.
    let mut loop_body = InstructionList::new();
    loop_body.add(Opcode::Label);
    loop_body.label_first(&head);
    loop_body.add_all(&mut body);
    result.add_all(&mut loop_body);

    cond.label_first(&context.continue_label);
    result.add_all(&mut cond);
    result.add_operand(Opcode::IfTrue, head.clone());

    result.label_next(&context.break_label);
    Ok(result)
}

/// Assemble `do { body } while (cond)` against an existing [`LoopContext`].
pub fn do_while_loop(
    context: &LoopContext,
    mut body: InstructionList,
    mut cond: InstructionList,
) -> FlowResult<InstructionList> {
    check_condition(&cond)?;

    let head = Label::new();

    let mut result = InstructionList::new();
    result.add(Opcode::Label);
    result.label_first(&head);
    result.add_all(&mut body);

    cond.label_first(&context.continue_label);
    result.add_all(&mut cond);
    result.add_operand(Opcode::IfTrue, head.clone());

    result.label_next(&context.break_label);
    Ok(result)
}

/// Assemble a `lookupswitch` dispatch over `cases` with a trailing default.
///
/// The caller emits the selector index before this fragment. Case bodies
/// fall through to the next case unless they end in a transfer (emit a break
/// against an enclosing context to get C-style cases). Operand order is the
/// default label first, then one label per case.
pub fn switch_dispatch(
    cases: Vec<InstructionList>,
    mut default_body: InstructionList,
) -> FlowResult<InstructionList> {
    if cases.is_empty() {
        return Err(FlowError::EmptySwitch);
    }

    let default_label = Label::new();
    let case_labels: Vec<Label> = cases.iter().map(|_| Label::new()).collect();

    let mut operands = Vec::with_capacity(cases.len() + 1);
    operands.push(default_label.clone().into());
    for label in &case_labels {
        operands.push(label.clone().into());
    }

    let mut result = InstructionList::new();
    result.add_operands(Opcode::LookupSwitch, operands);

    for (mut case, label) in cases.into_iter().zip(case_labels) {
        case.label_first(&label);
        result.add_all(&mut case);
    }

    default_body.label_first(&default_label);
    result.add_all(&mut default_body);
    Ok(result)
}

/// Assemble the code shape of `try { try_body } catch { catch_body }`.
///
/// The exception table that makes the catch reachable is a later stage's
/// concern; this lays out the regions. Labels still pending at the end of
/// the try region target the code after the whole construct, not the catch
/// block that physically follows it, so they are carried over the catch
/// body unresolved.
pub fn try_catch(
    try_body: InstructionList,
    mut catch_body: InstructionList,
) -> FlowResult<InstructionList> {
    let join = Label::new();

    let mut result = try_body;
    if result.can_fall_through() {
        result.add_operand(Opcode::Jump, join.clone());
    }

    let carried = result.strip_pending_labels();
    result.add_all(&mut catch_body);
    result.add_all_pending_labels(carried);
    result.label_next(&join);
    Ok(result)
}
