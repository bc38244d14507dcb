//! HTTP handlers for all routes.

pub mod admin;
pub mod patient;
pub mod predict;
pub mod system;

use gravida_common::ApiError;
use gravida_engine::EngineError;

/// Map engine failures onto the API error taxonomy: bad horizons are the
/// client's problem, non-finite arithmetic is ours.
pub(crate) fn engine_error(err: EngineError) -> ApiError {
    match err {
        EngineError::InvalidHorizon(_) => ApiError::Validation(err.to_string()),
        EngineError::NonFiniteResult => ApiError::Internal(err.to_string()),
    }
}
