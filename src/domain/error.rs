//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::reduce::Step;

/// Domain errors represent violations of the snailfish number rules.
/// These are independent of file and terminal concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("pair at depth {depth} must hold two regular numbers to explode, found {pair}")]
    MalformedDepth { depth: usize, pair: String },

    #[error("cannot split a node that already has children: {0}")]
    InvalidSplitTarget(String),

    #[error("invalid snailfish literal: {message}")]
    InvalidLiteral { message: String },

    #[error("need at least {required} snailfish number(s), found {found}")]
    NotEnoughNumbers { required: usize, found: usize },

    #[error("reduction did not settle within {limit} steps")]
    StepLimitExceeded { limit: usize },

    #[error("{rule:?} was due but found no target")]
    RuleNotApplied { rule: Step },

    #[error("{operation} overflows a 64-bit regular number")]
    ValueOverflow { operation: &'static str },

    #[error("tree references a node that is no longer in the arena")]
    DanglingNode,
}

impl DomainError {
    pub(crate) fn invalid_literal(message: impl Into<String>) -> Self {
        Self::InvalidLiteral {
            message: message.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
