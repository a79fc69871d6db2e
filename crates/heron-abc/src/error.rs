//! Errors for method-body consumers
//!
//! Programming-error faults inside the assembler itself (use after
//! invalidation, conflicting label bindings, empty-structure queries) panic;
//! the errors here are the recoverable kind a consumer of a finished method
//! body can encounter.

use thiserror::Error;

/// Errors raised when deriving a control-flow graph from a method body.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CfgError {
    /// The body still has labels waiting for an instruction that never came.
    #[error("method body has unresolved pending labels")]
    PendingLabels,

    /// A label or branch operand has no bound position.
    #[error("label has no bound position")]
    UnresolvedLabel,

    /// A label position does not fall inside the body.
    #[error("label target {target} out of range for {len} instructions")]
    TargetOutOfRange {
        /// The offending position.
        target: usize,
        /// Number of instructions in the body.
        len: usize,
    },
}

/// Result type for control-flow-graph operations.
pub type Result<T> = std::result::Result<T, CfgError>;
