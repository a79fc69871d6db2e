//! Code generation errors

use thiserror::Error;

/// Errors from the control-flow assembly helpers.
///
/// These indicate a front end handed the assembler a construct shape that
/// cannot branch; compilation of other constructs can continue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    /// A condition fragment contained no instructions.
    #[error("condition fragment is empty")]
    EmptyCondition,

    /// A condition fragment ends in an unconditional transfer and can never
    /// reach the branch that would consume its value.
    #[error("condition fragment cannot reach its branch")]
    DeadCondition,

    /// A switch dispatch with no case arms.
    #[error("switch dispatch requires at least one case")]
    EmptySwitch,
}

/// Result type for flow assembly.
pub type FlowResult<T> = std::result::Result<T, FlowError>;
