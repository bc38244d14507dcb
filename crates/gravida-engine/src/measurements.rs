//! Input records for the four scoring models.
//!
//! One immutable, flat record per model. Each scoring call is a pure
//! function of one of these; the engine holds no reference after returning.
//! The survival records carry their horizon as a [`Horizon`], so an
//! out-of-set day count is rejected while the record is being built.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::horizon::Horizon;

/// Inputs for the FGR adverse-perinatal-outcome logistic model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FgrOutcomeMeasurement {
    pub preterm: bool,
    pub lmp_date: NaiveDate,
    pub diagnosis_date: NaiveDate,
    pub hypertension: bool,
    pub nst_abnormal: bool,
    pub weight_growth_abnormal: bool,
    pub umbilical_flow_abnormal: bool,
}

/// Inputs for the neonatal-outcome-given-FGR logistic model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FgrNeonatalMeasurement {
    pub antenatal_visits: u32,
    pub umbilical_flow_abnormal: bool,
    pub preeclampsia: bool,
    pub delivery_abnormal: bool,
    pub fetal_growth_abnormal: bool,
}

/// Inputs for the maternal adverse-outcome Cox model.
///
/// Lab values are taken in the units the model was fitted on; the engine
/// applies no unit conversion and no plausibility bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaternalCoxMeasurement {
    pub platelet_count: f64,
    pub creatinine: f64,
    pub urine_protein_24h: f64,
    pub alt: f64,
    pub systolic_max: f64,
    pub pda: bool,
    pub horizon: Horizon,
}

/// Inputs for the neonatal adverse-outcome Cox model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeonatalCoxMeasurement {
    pub lmp_date: NaiveDate,
    pub admission_date: NaiveDate,
    pub gda_group: f64,
    pub horizon: Horizon,
    pub nst_abnormal: bool,
    pub admission_systolic: f64,
    pub admission_diastolic: f64,
    pub creatinine: f64,
}
