//! gravida-common — Shared types and errors used across the Gravida crates.

pub mod error;

pub use error::{ApiError, ApiResult};
