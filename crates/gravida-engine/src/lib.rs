//! gravida-engine — Point-in-time risk scoring for pregnancy-hypertension
//! complications.
//!
//! Two logistic models (adverse perinatal outcome in fetal growth
//! restriction; neonatal outcome in FGR-preceded preeclampsia) and two
//! Cox-type survival models (maternal and neonatal adverse outcome at a
//! 2/7/14-day follow-up horizon). Everything here is pure in-memory
//! arithmetic over immutable inputs and frozen coefficient tables — no
//! I/O, no async, safe to call concurrently without locking.

pub mod coefficients;
pub mod dates;
pub mod error;
pub mod horizon;
pub mod measurements;
pub mod scorer;

pub use coefficients::{
    BaselineHazards, FgrNeonatalCoefficients, FgrOutcomeCoefficients, MaternalCoxCoefficients,
    NeonatalCoxCoefficients, RiskModels,
};
pub use error::{EngineError, Result};
pub use horizon::Horizon;
pub use measurements::{
    FgrNeonatalMeasurement, FgrOutcomeMeasurement, MaternalCoxMeasurement, NeonatalCoxMeasurement,
};
pub use scorer::{
    score_fgr_neonatal, score_fgr_outcome, score_maternal_survival, score_neonatal_survival,
    Diagnostics, ScoreResult,
};
