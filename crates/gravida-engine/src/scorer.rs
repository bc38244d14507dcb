//! The four risk scoring functions.
//!
//! Two logistic models and two Cox-type survival models. All four are pure:
//! no shared mutable state, no I/O, identical inputs always produce the
//! identical [`ScoreResult`]. Coefficient tables are passed in by reference
//! and never written.
//!
//! The logistic transform is evaluated without overflow clamping: at the
//! documented operating ranges |logit| stays far below the ~700 where
//! `exp` leaves double precision, and clamping would change the published
//! model's output. A non-finite final probability (possible only with
//! pathological inputs) is surfaced as an error instead of being returned.

use serde::{Deserialize, Serialize};

use crate::coefficients::{
    FgrNeonatalCoefficients, FgrOutcomeCoefficients, MaternalCoxCoefficients,
    NeonatalCoxCoefficients,
};
use crate::dates::{gestational_days, mean_arterial_pressure};
use crate::error::{EngineError, Result};
use crate::measurements::{
    FgrNeonatalMeasurement, FgrOutcomeMeasurement, MaternalCoxMeasurement,
    NeonatalCoxMeasurement,
};

/// Model-specific intermediate values, reproducible from the same inputs.
///
/// Untagged: each variant serializes as the flat name/value map the API
/// returns and the prediction tables store. Variant order matters for
/// deserialization: wider field sets must come first, or a narrower
/// variant would match a wider map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Diagnostics {
    NeonatalSurvival {
        gestational_days: i64,
        map_value: f64,
        gda_time: f64,
        linear_predictor: f64,
        baseline_hazard: f64,
        survival_probability: f64,
    },
    MaternalSurvival {
        linear_predictor: f64,
        baseline_hazard: f64,
        survival_probability: f64,
    },
    FgrOutcome {
        gestational_days: i64,
        logit_value: f64,
    },
    FgrNeonatal {
        logit_value: f64,
    },
}

/// Outcome of one scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Event probability in percent, 0–100.
    pub probability_percent: f64,
    pub message: String,
    pub diagnostics: Diagnostics,
}

fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

fn logistic(logit: f64) -> f64 {
    logit.exp() / (1.0 + logit.exp())
}

fn checked_percent(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::NonFiniteResult)
    }
}

/// Adverse perinatal outcome probability for a fetal-growth-restriction
/// pregnancy, scored at diagnosis.
pub fn score_fgr_outcome(
    measurement: &FgrOutcomeMeasurement,
    coefficients: &FgrOutcomeCoefficients,
) -> Result<ScoreResult> {
    let days = gestational_days(measurement.lmp_date, measurement.diagnosis_date);

    let logit_value = coefficients.intercept
        + coefficients.preterm * indicator(measurement.preterm)
        + coefficients.gestational_days * days as f64
        + coefficients.hypertension * indicator(measurement.hypertension)
        + coefficients.nst_abnormal * indicator(measurement.nst_abnormal)
        + coefficients.weight_growth_abnormal * indicator(measurement.weight_growth_abnormal)
        + coefficients.umbilical_flow_abnormal * indicator(measurement.umbilical_flow_abnormal);

    let probability_percent = checked_percent(logistic(logit_value) * 100.0)?;

    Ok(ScoreResult {
        probability_percent,
        message: format!("Predicted probability: {probability_percent:.2}%"),
        diagnostics: Diagnostics::FgrOutcome {
            gestational_days: days,
            logit_value,
        },
    })
}

/// Neonatal adverse outcome probability for preeclampsia preceded by FGR.
pub fn score_fgr_neonatal(
    measurement: &FgrNeonatalMeasurement,
    coefficients: &FgrNeonatalCoefficients,
) -> Result<ScoreResult> {
    let logit_value = coefficients.intercept
        + coefficients.antenatal_visits * f64::from(measurement.antenatal_visits)
        + coefficients.umbilical_flow_abnormal * indicator(measurement.umbilical_flow_abnormal)
        + coefficients.preeclampsia * indicator(measurement.preeclampsia)
        + coefficients.delivery_abnormal * indicator(measurement.delivery_abnormal)
        + coefficients.fetal_growth_abnormal * indicator(measurement.fetal_growth_abnormal);

    let probability_percent = checked_percent(logistic(logit_value) * 100.0)?;

    Ok(ScoreResult {
        probability_percent,
        message: format!("Predicted probability: {probability_percent:.2}%"),
        diagnostics: Diagnostics::FgrNeonatal { logit_value },
    })
}

/// Maternal adverse outcome risk at the requested follow-up horizon.
pub fn score_maternal_survival(
    measurement: &MaternalCoxMeasurement,
    coefficients: &MaternalCoxCoefficients,
) -> Result<ScoreResult> {
    let linear_predictor = coefficients.platelet_count * measurement.platelet_count
        + coefficients.creatinine * measurement.creatinine
        + coefficients.urine_protein_24h * measurement.urine_protein_24h
        + coefficients.alt * measurement.alt
        + coefficients.systolic_max * measurement.systolic_max
        + coefficients.pda * indicator(measurement.pda);

    let baseline_hazard = coefficients.baseline.at(measurement.horizon);
    let survival_probability = (-baseline_hazard * linear_predictor.exp()).exp();
    let risk = 1.0 - survival_probability;
    let probability_percent = checked_percent(risk * 100.0)?;

    Ok(ScoreResult {
        probability_percent,
        message: format!(
            "Predicted day-{} risk: {probability_percent:.2}%",
            measurement.horizon.days()
        ),
        diagnostics: Diagnostics::MaternalSurvival {
            linear_predictor,
            baseline_hazard,
            survival_probability,
        },
    })
}

/// Neonatal adverse outcome risk at the requested follow-up horizon.
///
/// Derives gestational days at admission, admission MAP, and the
/// time-interaction term `gda_group * log10(days + 20)` before forming the
/// linear predictor. The log argument is at least 22 for every legal
/// horizon, so the term is always defined.
pub fn score_neonatal_survival(
    measurement: &NeonatalCoxMeasurement,
    coefficients: &NeonatalCoxCoefficients,
) -> Result<ScoreResult> {
    let days = gestational_days(measurement.lmp_date, measurement.admission_date);
    let map_value = mean_arterial_pressure(
        measurement.admission_systolic,
        measurement.admission_diastolic,
    );
    let gda_time =
        measurement.gda_group * f64::from(measurement.horizon.days() + 20).log10();

    let linear_predictor = coefficients.gda_time * gda_time
        + coefficients.gestational_days * days as f64
        + coefficients.nst_abnormal * indicator(measurement.nst_abnormal)
        + coefficients.mean_arterial_pressure * map_value
        + coefficients.creatinine * measurement.creatinine;

    let baseline_hazard = coefficients.baseline.at(measurement.horizon);
    let survival_probability = (-baseline_hazard * linear_predictor.exp()).exp();
    let risk = 1.0 - survival_probability;
    let probability_percent = checked_percent(risk * 100.0)?;

    Ok(ScoreResult {
        probability_percent,
        message: format!(
            "Predicted day-{} risk: {probability_percent:.2}%",
            measurement.horizon.days()
        ),
        diagnostics: Diagnostics::NeonatalSurvival {
            gestational_days: days,
            map_value,
            gda_time,
            linear_predictor,
            baseline_hazard,
            survival_probability,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::horizon::Horizon;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fgr_measurement() -> FgrOutcomeMeasurement {
        FgrOutcomeMeasurement {
            preterm: true,
            lmp_date: date(2024, 1, 1),
            diagnosis_date: date(2024, 1, 8),
            hypertension: false,
            nst_abnormal: true,
            weight_growth_abnormal: false,
            umbilical_flow_abnormal: false,
        }
    }

    fn maternal_measurement(horizon: Horizon) -> MaternalCoxMeasurement {
        MaternalCoxMeasurement {
            platelet_count: 250.0,
            creatinine: 0.8,
            urine_protein_24h: 300.0,
            alt: 20.0,
            systolic_max: 150.0,
            pda: false,
            horizon,
        }
    }

    fn neonatal_measurement() -> NeonatalCoxMeasurement {
        NeonatalCoxMeasurement {
            lmp_date: date(2024, 1, 1),
            admission_date: date(2024, 7, 1),
            gda_group: 1.0,
            horizon: Horizon::Day7,
            nst_abnormal: true,
            admission_systolic: 150.0,
            admission_diastolic: 95.0,
            creatinine: 62.0,
        }
    }

    #[test]
    fn fgr_outcome_reproduces_the_published_logit() {
        let coefficients = FgrOutcomeCoefficients::default();
        let result = score_fgr_outcome(&fgr_measurement(), &coefficients).unwrap();

        // preterm and abnormal NST at 21 gestational days, nothing else set.
        let expected_logit: f64 = 0.864 + 1.39 - 0.02 * 21.0 + 1.44;
        let expected_percent = 100.0 * expected_logit.exp() / (1.0 + expected_logit.exp());

        match result.diagnostics {
            Diagnostics::FgrOutcome {
                gestational_days,
                logit_value,
            } => {
                assert_eq!(gestational_days, 21);
                assert!((logit_value - expected_logit).abs() < 1e-12);
            }
            other => panic!("wrong diagnostics variant: {other:?}"),
        }
        assert!((result.probability_percent - expected_percent).abs() < 1e-9);
    }

    #[test]
    fn fgr_neonatal_counts_visits_continuously() {
        let coefficients = FgrNeonatalCoefficients::default();
        let measurement = FgrNeonatalMeasurement {
            antenatal_visits: 8,
            umbilical_flow_abnormal: true,
            preeclampsia: true,
            delivery_abnormal: false,
            fetal_growth_abnormal: false,
        };
        let result = score_fgr_neonatal(&measurement, &coefficients).unwrap();

        let expected_logit = -0.663 - 0.246 * 8.0 + 2.648 + 1.445;
        match result.diagnostics {
            Diagnostics::FgrNeonatal { logit_value } => {
                assert!((logit_value - expected_logit).abs() < 1e-12);
            }
            other => panic!("wrong diagnostics variant: {other:?}"),
        }
    }

    #[test]
    fn maternal_survival_day7_chain() {
        let coefficients = MaternalCoxCoefficients::default();
        let result =
            score_maternal_survival(&maternal_measurement(Horizon::Day7), &coefficients).unwrap();

        let expected_lp = coefficients.platelet_count * 250.0
            + coefficients.creatinine * 0.8
            + coefficients.urine_protein_24h * 300.0
            + coefficients.alt * 20.0
            + coefficients.systolic_max * 150.0;
        let expected_survival = (-0.15 * expected_lp.exp()).exp();
        let expected_percent = (1.0 - expected_survival) * 100.0;

        match result.diagnostics {
            Diagnostics::MaternalSurvival {
                linear_predictor,
                baseline_hazard,
                survival_probability,
            } => {
                assert!((linear_predictor - expected_lp).abs() < 1e-9);
                assert_eq!(baseline_hazard, 0.15);
                assert!((survival_probability - expected_survival).abs() < 1e-9);
            }
            other => panic!("wrong diagnostics variant: {other:?}"),
        }
        assert!((result.probability_percent - expected_percent).abs() < 1e-9);
    }

    #[test]
    fn maternal_risk_grows_with_horizon() {
        let coefficients = MaternalCoxCoefficients::default();
        let mut previous = 0.0;
        for horizon in Horizon::ALL {
            let result =
                score_maternal_survival(&maternal_measurement(horizon), &coefficients).unwrap();
            assert!(result.probability_percent > previous);
            previous = result.probability_percent;
        }
    }

    #[test]
    fn neonatal_survival_derives_all_intermediates() {
        let coefficients = NeonatalCoxCoefficients::default();
        let result = score_neonatal_survival(&neonatal_measurement(), &coefficients).unwrap();

        let expected_days = 182 + 14;
        let expected_map = 95.0 + (150.0 - 95.0) / 3.0;
        let expected_gda_time = 1.0 * 27.0f64.log10();

        match result.diagnostics {
            Diagnostics::NeonatalSurvival {
                gestational_days,
                map_value,
                gda_time,
                linear_predictor,
                baseline_hazard,
                survival_probability,
            } => {
                assert_eq!(gestational_days, expected_days);
                assert!((map_value - expected_map).abs() < 1e-12);
                assert!((gda_time - expected_gda_time).abs() < 1e-12);

                let expected_lp = coefficients.gda_time * expected_gda_time
                    + coefficients.gestational_days * expected_days as f64
                    + coefficients.nst_abnormal
                    + coefficients.mean_arterial_pressure * expected_map
                    + coefficients.creatinine * 62.0;
                assert!((linear_predictor - expected_lp).abs() < 1e-9);
                assert_eq!(baseline_hazard, 0.13582579);
                let expected_survival = (-0.13582579 * expected_lp.exp()).exp();
                assert!((survival_probability - expected_survival).abs() < 1e-9);
            }
            other => panic!("wrong diagnostics variant: {other:?}"),
        }
    }

    #[test]
    fn all_models_stay_inside_percent_range() {
        let models = crate::coefficients::RiskModels::default();

        let fgr = score_fgr_outcome(&fgr_measurement(), &models.fgr_outcome).unwrap();
        assert!((0.0..=100.0).contains(&fgr.probability_percent));

        let neonatal_logistic = score_fgr_neonatal(
            &FgrNeonatalMeasurement {
                antenatal_visits: 0,
                umbilical_flow_abnormal: true,
                preeclampsia: true,
                delivery_abnormal: true,
                fetal_growth_abnormal: true,
            },
            &models.fgr_neonatal,
        )
        .unwrap();
        assert!((0.0..=100.0).contains(&neonatal_logistic.probability_percent));

        for horizon in Horizon::ALL {
            let maternal =
                score_maternal_survival(&maternal_measurement(horizon), &models.maternal_cox)
                    .unwrap();
            assert!((0.0..=100.0).contains(&maternal.probability_percent));
        }

        let neonatal =
            score_neonatal_survival(&neonatal_measurement(), &models.neonatal_cox).unwrap();
        assert!((0.0..=100.0).contains(&neonatal.probability_percent));
    }

    #[test]
    fn scoring_is_deterministic() {
        let coefficients = MaternalCoxCoefficients::default();
        let measurement = maternal_measurement(Horizon::Day14);
        let first = score_maternal_survival(&measurement, &coefficients).unwrap();
        let second = score_maternal_survival(&measurement, &coefficients).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn non_finite_inputs_become_an_error_not_nan() {
        let coefficients = MaternalCoxCoefficients::default();
        let mut measurement = maternal_measurement(Horizon::Day7);
        measurement.creatinine = f64::NAN;
        assert_eq!(
            score_maternal_survival(&measurement, &coefficients),
            Err(EngineError::NonFiniteResult)
        );
    }

    #[test]
    fn messages_render_two_decimals() {
        let coefficients = MaternalCoxCoefficients::default();
        let result =
            score_maternal_survival(&maternal_measurement(Horizon::Day7), &coefficients).unwrap();
        let rendered = format!("{:.2}%", result.probability_percent);
        assert!(result.message.contains(&rendered));
        assert!(result.message.contains("day-7"));
    }

    #[test]
    fn diagnostics_survive_a_serde_round_trip() {
        let models = crate::coefficients::RiskModels::default();
        let result =
            score_neonatal_survival(&neonatal_measurement(), &models.neonatal_cox).unwrap();

        let json = serde_json::to_string(&result).unwrap();
        let back: ScoreResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);

        // Untagged variants resolve by field set, widest first.
        let maternal =
            score_maternal_survival(&maternal_measurement(Horizon::Day2), &models.maternal_cox)
                .unwrap();
        let json = serde_json::to_string(&maternal.diagnostics).unwrap();
        let back: Diagnostics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, maternal.diagnostics);
    }
}
