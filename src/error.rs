//! Error types.

use thiserror::Error;

use crate::types::Var;

/// Errors produced by formula operations under a bounded configuration.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FormulaError {
    /// AND cross-product would exceed the configured cap.
    #[error("conjunction of {left} x {right} disjuncts exceeds the product limit {limit}")]
    ProductTooLarge {
        left: usize,
        right: usize,
        limit: usize,
    },
}

/// Errors that can occur during evaluation under an assignment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Required variable value was not provided.
    #[error("no value assigned to variable {0}")]
    Unassigned(Var),
}

/// Failures of a compression engine.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// `add` or `terminate` was called after `terminate`.
    #[error("engine is already finalized")]
    Finalized,

    /// A word operation inside the round function failed.
    #[error(transparent)]
    Formula(#[from] FormulaError),
}

/// A runtime bit sequence does not match the bit-vector width.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("expected {expected} bits, got {actual}")]
pub struct WidthError {
    pub expected: usize,
    pub actual: usize,
}
