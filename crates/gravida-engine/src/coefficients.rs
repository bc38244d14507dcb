//! Published model parameters.
//!
//! Each table is a plain struct of named weights with the fitted values as
//! its `Default`. The values are part of the wire contract and are
//! reproduced here exactly as published; nothing in the engine mutates them
//! after construction.

use serde::{Deserialize, Serialize};

use crate::horizon::Horizon;

/// Logistic model: adverse perinatal outcome given fetal growth restriction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FgrOutcomeCoefficients {
    pub intercept: f64,
    pub preterm: f64,
    pub gestational_days: f64,
    pub hypertension: f64,
    pub nst_abnormal: f64,
    pub weight_growth_abnormal: f64,
    pub umbilical_flow_abnormal: f64,
}

impl Default for FgrOutcomeCoefficients {
    fn default() -> Self {
        Self {
            intercept:               0.864,
            preterm:                 1.39,
            gestational_days:       -0.02,
            hypertension:            1.05,
            nst_abnormal:            1.44,
            weight_growth_abnormal:  1.12,
            umbilical_flow_abnormal: 2.58,
        }
    }
}

/// Logistic model: neonatal outcome in preeclampsia preceded by FGR.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FgrNeonatalCoefficients {
    pub intercept: f64,
    pub antenatal_visits: f64,
    pub umbilical_flow_abnormal: f64,
    pub preeclampsia: f64,
    pub delivery_abnormal: f64,
    pub fetal_growth_abnormal: f64,
}

impl Default for FgrNeonatalCoefficients {
    fn default() -> Self {
        Self {
            intercept:              -0.663,
            antenatal_visits:       -0.246,
            umbilical_flow_abnormal: 2.648,
            preeclampsia:            1.445,
            delivery_abnormal:       1.378,
            fetal_growth_abnormal:   1.363,
        }
    }
}

/// Baseline cumulative hazards at the three published follow-up horizons.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BaselineHazards {
    pub day2: f64,
    pub day7: f64,
    pub day14: f64,
}

impl BaselineHazards {
    /// Hazard at a horizon. Exhaustive over [`Horizon`], so the lookup
    /// cannot miss.
    pub fn at(&self, horizon: Horizon) -> f64 {
        match horizon {
            Horizon::Day2 => self.day2,
            Horizon::Day7 => self.day7,
            Horizon::Day14 => self.day14,
        }
    }
}

/// Cox model: maternal adverse outcome in preeclampsia. No intercept term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaternalCoxCoefficients {
    pub platelet_count: f64,
    pub creatinine: f64,
    pub urine_protein_24h: f64,
    pub alt: f64,
    pub systolic_max: f64,
    pub pda: f64,
    pub baseline: BaselineHazards,
}

impl Default for MaternalCoxCoefficients {
    fn default() -> Self {
        Self {
            platelet_count:   -0.0042557634938221612,
            creatinine:        0.010409835010157001,
            urine_protein_24h: 4.6316653571796355e-05,
            alt:               0.0089270404049626561,
            systolic_max:      0.017089075146461921,
            pda:               0.98017990629549234,
            baseline: BaselineHazards {
                day2:  0.02,
                day7:  0.15,
                day14: 0.35,
            },
        }
    }
}

/// Cox model: neonatal adverse outcome in preeclampsia. No intercept term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeonatalCoxCoefficients {
    pub gda_time: f64,
    pub gestational_days: f64,
    pub nst_abnormal: f64,
    pub mean_arterial_pressure: f64,
    pub creatinine: f64,
    pub baseline: BaselineHazards,
}

impl Default for NeonatalCoxCoefficients {
    fn default() -> Self {
        Self {
            gda_time:               -1.5028012954898466,
            gestational_days:        0.12399924268311081,
            nst_abnormal:            0.58280288270031,
            mean_arterial_pressure:  0.0089758049607547696,
            creatinine:              0.0072253318806071304,
            baseline: BaselineHazards {
                day2:  0.04998589,
                day7:  0.13582579,
                day14: 0.34366626,
            },
        }
    }
}

/// All four parameter tables, built once at startup and shared read-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskModels {
    pub fgr_outcome: FgrOutcomeCoefficients,
    pub fgr_neonatal: FgrNeonatalCoefficients,
    pub maternal_cox: MaternalCoxCoefficients,
    pub neonatal_cox: NeonatalCoxCoefficients,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maternal_hazards_grow_with_horizon() {
        let baseline = MaternalCoxCoefficients::default().baseline;
        assert!(baseline.at(Horizon::Day2) < baseline.at(Horizon::Day7));
        assert!(baseline.at(Horizon::Day7) < baseline.at(Horizon::Day14));
    }

    #[test]
    fn neonatal_hazards_are_non_negative_and_monotone() {
        let baseline = NeonatalCoxCoefficients::default().baseline;
        let mut previous = 0.0;
        for horizon in Horizon::ALL {
            let hazard = baseline.at(horizon);
            assert!(hazard >= previous);
            previous = hazard;
        }
    }

    #[test]
    fn published_day7_maternal_hazard() {
        let models = RiskModels::default();
        assert_eq!(models.maternal_cox.baseline.at(Horizon::Day7), 0.15);
    }
}
