//! Scoring engine error types.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("follow-up horizon must be 2, 7, or 14 days (got {0})")]
    InvalidHorizon(u32),

    #[error("scoring produced a non-finite probability")]
    NonFiniteResult,
}
