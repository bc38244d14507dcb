//! Prediction repository.
//!
//! One table per model, each row holding the scored inputs, the returned
//! probability and every diagnostic for that model. Inserts come from the
//! prediction handlers fire-and-forget; listings serve the admin API.

use serde::{Deserialize, Serialize};
use serde_json::json;

use gravida_engine::{
    Diagnostics, FgrNeonatalMeasurement, FgrOutcomeMeasurement, MaternalCoxMeasurement,
    NeonatalCoxMeasurement, ScoreResult,
};

use crate::database::Database;
use crate::error::{DbError, Result};
use crate::query::{Conditions, DateRange, StoredRecord};
use crate::schema;

/// Which model a stored prediction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    FgrOutcome,
    FgrNeonatal,
    MaternalCox,
    NeonatalCox,
}

impl ModelKind {
    pub const ALL: [ModelKind; 4] = [
        ModelKind::FgrOutcome,
        ModelKind::FgrNeonatal,
        ModelKind::MaternalCox,
        ModelKind::NeonatalCox,
    ];

    pub fn table(self) -> &'static str {
        match self {
            ModelKind::FgrOutcome => schema::TABLE_FGR_OUTCOME,
            ModelKind::FgrNeonatal => schema::TABLE_FGR_NEONATAL,
            ModelKind::MaternalCox => schema::TABLE_MATERNAL_COX,
            ModelKind::NeonatalCox => schema::TABLE_NEONATAL_COX,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModelKind::FgrOutcome => "fgr_outcome",
            ModelKind::FgrNeonatal => "fgr_neonatal",
            ModelKind::MaternalCox => "maternal_cox",
            ModelKind::NeonatalCox => "neonatal_cox",
        }
    }
}

/// Filters for the admin prediction listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PredictionFilter {
    pub model: Option<ModelKind>,
    pub range: DateRange,
    pub min_probability: Option<f64>,
    pub max_probability: Option<f64>,
}

/// Per-model prediction counts.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ModelCounts {
    pub fgr_outcome: u64,
    pub fgr_neonatal: u64,
    pub maternal_cox: u64,
    pub neonatal_cox: u64,
}

impl ModelCounts {
    pub fn total(&self) -> u64 {
        self.fgr_outcome + self.fgr_neonatal + self.maternal_cox + self.neonatal_cox
    }
}

#[derive(Clone)]
pub struct PredictionRepository {
    db: Database,
}

impl PredictionRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn insert_fgr_outcome(
        &self,
        measurement: &FgrOutcomeMeasurement,
        result: &ScoreResult,
    ) -> Result<i64> {
        let Diagnostics::FgrOutcome {
            gestational_days,
            logit_value,
        } = &result.diagnostics
        else {
            return Err(DbError::WrongDiagnostics("FGR outcome"));
        };

        let client = self.db.client().await?;
        let row = client
            .query_one(
                "INSERT INTO fgr_outcome_predictions (
                    preterm, lmp_date, diagnosis_date, hypertension, nst_abnormal,
                    weight_growth_abnormal, umbilical_flow_abnormal,
                    probability_percent, gestational_days, logit_value
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING id",
                &[
                    &measurement.preterm,
                    &measurement.lmp_date,
                    &measurement.diagnosis_date,
                    &measurement.hypertension,
                    &measurement.nst_abnormal,
                    &measurement.weight_growth_abnormal,
                    &measurement.umbilical_flow_abnormal,
                    &result.probability_percent,
                    gestational_days,
                    logit_value,
                ],
            )
            .await?;

        Ok(row.get(0))
    }

    pub async fn insert_fgr_neonatal(
        &self,
        measurement: &FgrNeonatalMeasurement,
        result: &ScoreResult,
    ) -> Result<i64> {
        let Diagnostics::FgrNeonatal { logit_value } = &result.diagnostics else {
            return Err(DbError::WrongDiagnostics("FGR neonatal"));
        };

        let antenatal_visits = measurement.antenatal_visits as i32;
        let client = self.db.client().await?;
        let row = client
            .query_one(
                "INSERT INTO fgr_neonatal_predictions (
                    antenatal_visits, umbilical_flow_abnormal, preeclampsia,
                    delivery_abnormal, fetal_growth_abnormal,
                    probability_percent, logit_value
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id",
                &[
                    &antenatal_visits,
                    &measurement.umbilical_flow_abnormal,
                    &measurement.preeclampsia,
                    &measurement.delivery_abnormal,
                    &measurement.fetal_growth_abnormal,
                    &result.probability_percent,
                    logit_value,
                ],
            )
            .await?;

        Ok(row.get(0))
    }

    pub async fn insert_maternal_cox(
        &self,
        measurement: &MaternalCoxMeasurement,
        result: &ScoreResult,
    ) -> Result<i64> {
        let Diagnostics::MaternalSurvival {
            linear_predictor,
            baseline_hazard,
            survival_probability,
        } = &result.diagnostics
        else {
            return Err(DbError::WrongDiagnostics("maternal survival"));
        };

        let horizon_days = measurement.horizon.days() as i32;
        let client = self.db.client().await?;
        let row = client
            .query_one(
                "INSERT INTO maternal_cox_predictions (
                    platelet_count, creatinine, urine_protein_24h, alt, systolic_max,
                    pda, horizon_days, probability_percent,
                    linear_predictor, baseline_hazard, survival_probability
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                RETURNING id",
                &[
                    &measurement.platelet_count,
                    &measurement.creatinine,
                    &measurement.urine_protein_24h,
                    &measurement.alt,
                    &measurement.systolic_max,
                    &measurement.pda,
                    &horizon_days,
                    &result.probability_percent,
                    linear_predictor,
                    baseline_hazard,
                    survival_probability,
                ],
            )
            .await?;

        Ok(row.get(0))
    }

    pub async fn insert_neonatal_cox(
        &self,
        measurement: &NeonatalCoxMeasurement,
        result: &ScoreResult,
    ) -> Result<i64> {
        let Diagnostics::NeonatalSurvival {
            gestational_days,
            map_value,
            gda_time,
            linear_predictor,
            baseline_hazard,
            survival_probability,
        } = &result.diagnostics
        else {
            return Err(DbError::WrongDiagnostics("neonatal survival"));
        };

        let horizon_days = measurement.horizon.days() as i32;
        let client = self.db.client().await?;
        let row = client
            .query_one(
                "INSERT INTO neonatal_cox_predictions (
                    lmp_date, admission_date, gda_group, horizon_days, nst_abnormal,
                    admission_systolic, admission_diastolic, creatinine,
                    probability_percent, gestational_days, map_value, gda_time,
                    linear_predictor, baseline_hazard, survival_probability
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
                RETURNING id",
                &[
                    &measurement.lmp_date,
                    &measurement.admission_date,
                    &measurement.gda_group,
                    &horizon_days,
                    &measurement.nst_abnormal,
                    &measurement.admission_systolic,
                    &measurement.admission_diastolic,
                    &measurement.creatinine,
                    &result.probability_percent,
                    gestational_days,
                    map_value,
                    gda_time,
                    linear_predictor,
                    baseline_hazard,
                    survival_probability,
                ],
            )
            .await?;

        Ok(row.get(0))
    }

    /// Paginated prediction listing. With a model filter the full stored
    /// row is returned; without one, a cross-model summary.
    pub async fn list(
        &self,
        filter: &PredictionFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<StoredRecord>> {
        let mut conditions = Conditions::new();
        conditions.push_range("created_at", &filter.range);
        if let Some(ref min) = filter.min_probability {
            conditions.push("probability_percent >=", min);
        }
        if let Some(ref max) = filter.max_probability {
            conditions.push("probability_percent <=", max);
        }
        let limit_index = conditions.bind(&limit);
        let offset_index = conditions.bind(&offset);

        let client = self.db.client().await?;

        match filter.model {
            Some(model) => {
                let sql = format!(
                    "SELECT id, created_at, to_jsonb(t) AS data
                     FROM {table} AS t{where_clause}
                     ORDER BY created_at DESC
                     LIMIT ${limit_index} OFFSET ${offset_index}",
                    table = model.table(),
                    where_clause = conditions.where_clause(),
                );
                let rows = client.query(&sql, conditions.params()).await?;
                Ok(rows
                    .into_iter()
                    .map(|row| StoredRecord {
                        id: row.get("id"),
                        created_at: row.get("created_at"),
                        data: row.get("data"),
                    })
                    .collect())
            }
            None => {
                let union = ModelKind::ALL
                    .map(|model| {
                        format!(
                            "SELECT '{name}' AS model_type, id, probability_percent, created_at
                             FROM {table}",
                            name = model.as_str(),
                            table = model.table(),
                        )
                    })
                    .join(" UNION ALL ");
                let sql = format!(
                    "SELECT model_type, id, probability_percent, created_at
                     FROM ({union}) AS t{where_clause}
                     ORDER BY created_at DESC
                     LIMIT ${limit_index} OFFSET ${offset_index}",
                    where_clause = conditions.where_clause(),
                );
                let rows = client.query(&sql, conditions.params()).await?;
                Ok(rows
                    .into_iter()
                    .map(|row| StoredRecord {
                        id: row.get("id"),
                        created_at: row.get("created_at"),
                        data: json!({
                            "model_type": row.get::<_, String>("model_type"),
                            "probability_percent": row.get::<_, f64>("probability_percent"),
                        }),
                    })
                    .collect())
            }
        }
    }

    /// Per-model counts within an optional date range.
    pub async fn counts(&self, range: &DateRange) -> Result<ModelCounts> {
        let client = self.db.client().await?;
        let mut counts = ModelCounts::default();

        for model in ModelKind::ALL {
            let mut conditions = Conditions::new();
            conditions.push_range("created_at", range);
            let sql = format!(
                "SELECT COUNT(*) FROM {table}{where_clause}",
                table = model.table(),
                where_clause = conditions.where_clause(),
            );
            let row = client.query_one(&sql, conditions.params()).await?;
            let count = row.get::<_, i64>(0) as u64;
            match model {
                ModelKind::FgrOutcome => counts.fgr_outcome = count,
                ModelKind::FgrNeonatal => counts.fgr_neonatal = count,
                ModelKind::MaternalCox => counts.maternal_cox = count,
                ModelKind::NeonatalCox => counts.neonatal_cox = count,
            }
        }

        Ok(counts)
    }

    /// Most recent predictions across all four models, for the patient
    /// detail view.
    pub async fn recent(&self, limit: i64) -> Result<Vec<StoredRecord>> {
        self.list(&PredictionFilter::default(), 0, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_kind_round_trips_through_serde() {
        for model in ModelKind::ALL {
            let json = serde_json::to_string(&model).unwrap();
            assert_eq!(json, format!("\"{}\"", model.as_str()));
            let back: ModelKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, model);
        }
    }

    #[test]
    fn unknown_model_kind_is_rejected() {
        assert!(serde_json::from_str::<ModelKind>("\"linear\"").is_err());
    }

    #[test]
    fn model_counts_sum_to_total() {
        let counts = ModelCounts {
            fgr_outcome: 2,
            fgr_neonatal: 3,
            maternal_cox: 5,
            neonatal_cox: 7,
        };
        assert_eq!(counts.total(), 17);
    }
}
