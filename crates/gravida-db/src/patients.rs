//! Patient data repository.
//!
//! Stores the three intake record types and serves the admin listings,
//! statistics and export queries over them.

use chrono::NaiveDate;
use serde::Serialize;

use crate::database::Database;
use crate::error::{DbError, Result};
use crate::query::{Conditions, DateRange, StoredRecord};
use crate::schema::{GeneralInfoRecord, HomeMonitoringRecord, LabPanelRecord};

/// Filters for the general-info listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneralInfoFilter {
    pub range: DateRange,
    pub age_min: Option<i32>,
    pub age_max: Option<i32>,
}

/// Daily intake count for the statistics endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Clone)]
pub struct PatientRepository {
    db: Database,
}

impl PatientRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn insert_general_info(&self, record: &GeneralInfoRecord) -> Result<i64> {
        let client = self.db.client().await?;
        let row = client
            .query_one(
                "INSERT INTO patient_general_info (
                    age, ethnicity, education, occupation, economic_status, height,
                    pre_pregnancy_weight, pre_pregnancy_bmi, last_menstrual_period,
                    gestational_weeks, pre_pregnancy_systolic, pre_pregnancy_diastolic,
                    pre_pregnancy_map, medical_history, gravidity, parity,
                    uterine_surgery, family_history, allergy_history, conception_method,
                    pregnancy_type, aspirin_use, complications
                ) VALUES (
                    $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                    $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23
                )
                RETURNING id",
                &[
                    &record.age,
                    &record.ethnicity,
                    &record.education,
                    &record.occupation,
                    &record.economic_status,
                    &record.height,
                    &record.pre_pregnancy_weight,
                    &record.pre_pregnancy_bmi,
                    &record.last_menstrual_period,
                    &record.gestational_weeks,
                    &record.pre_pregnancy_systolic,
                    &record.pre_pregnancy_diastolic,
                    &record.pre_pregnancy_map,
                    &record.medical_history,
                    &record.gravidity,
                    &record.parity,
                    &record.uterine_surgery,
                    &record.family_history,
                    &record.allergy_history,
                    &record.conception_method,
                    &record.pregnancy_type,
                    &record.aspirin_use,
                    &record.complications,
                ],
            )
            .await?;

        Ok(row.get(0))
    }

    pub async fn insert_lab_panel(&self, record: &LabPanelRecord) -> Result<i64> {
        let client = self.db.client().await?;
        let row = client
            .query_one(
                "INSERT INTO patient_lab_panel (
                    examination_date, ultrasound_date, rbc_count, wbc_count, hemoglobin,
                    platelet_count, hematocrit, platelet_volume, urine_protein_qualitative,
                    urine_cast, urine_protein_24h, total_bilirubin, total_protein, albumin,
                    alt, ast, total_bile_acid, creatinine, urea, uric_acid, aptt, pt, inr,
                    tt, fib, d_dimer, fasting_glucose, glucose_1h, glucose_2h, plgf, sflt1,
                    sflt1_plgf_ratio, nt, uta_pi, ua_sd_ratio, ua_pi, ua_ri, mca_sd_ratio,
                    mca_pi, mca_ri, cpr
                ) VALUES (
                    $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                    $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28,
                    $29, $30, $31, $32, $33, $34, $35, $36, $37, $38, $39, $40, $41
                )
                RETURNING id",
                &[
                    &record.examination_date,
                    &record.ultrasound_date,
                    &record.rbc_count,
                    &record.wbc_count,
                    &record.hemoglobin,
                    &record.platelet_count,
                    &record.hematocrit,
                    &record.platelet_volume,
                    &record.urine_protein_qualitative,
                    &record.urine_cast,
                    &record.urine_protein_24h,
                    &record.total_bilirubin,
                    &record.total_protein,
                    &record.albumin,
                    &record.alt,
                    &record.ast,
                    &record.total_bile_acid,
                    &record.creatinine,
                    &record.urea,
                    &record.uric_acid,
                    &record.aptt,
                    &record.pt,
                    &record.inr,
                    &record.tt,
                    &record.fib,
                    &record.d_dimer,
                    &record.fasting_glucose,
                    &record.glucose_1h,
                    &record.glucose_2h,
                    &record.plgf,
                    &record.sflt1,
                    &record.sflt1_plgf_ratio,
                    &record.nt,
                    &record.uta_pi,
                    &record.ua_sd_ratio,
                    &record.ua_pi,
                    &record.ua_ri,
                    &record.mca_sd_ratio,
                    &record.mca_pi,
                    &record.mca_ri,
                    &record.cpr,
                ],
            )
            .await?;

        Ok(row.get(0))
    }

    pub async fn insert_home_monitoring(&self, record: &HomeMonitoringRecord) -> Result<i64> {
        let client = self.db.client().await?;
        let row = client
            .query_one(
                "INSERT INTO patient_home_monitoring (
                    home_monitoring_date, home_systolic, home_diastolic,
                    fetal_heart_rate, fetal_movement, sflt1_plgf_ratio,
                    fetal_monitoring_file, urine_test_file
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING id",
                &[
                    &record.home_monitoring_date,
                    &record.home_systolic,
                    &record.home_diastolic,
                    &record.fetal_heart_rate,
                    &record.fetal_movement,
                    &record.sflt1_plgf_ratio,
                    &record.fetal_monitoring_file,
                    &record.urine_test_file,
                ],
            )
            .await?;

        Ok(row.get(0))
    }

    pub async fn list_general_info(
        &self,
        filter: &GeneralInfoFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<StoredRecord>> {
        let mut conditions = Conditions::new();
        conditions.push_range("created_at", &filter.range);
        if let Some(ref age_min) = filter.age_min {
            conditions.push("age >=", age_min);
        }
        if let Some(ref age_max) = filter.age_max {
            conditions.push("age <=", age_max);
        }
        let limit_index = conditions.bind(&limit);
        let offset_index = conditions.bind(&offset);

        let sql = format!(
            "SELECT id, created_at, to_jsonb(t) AS data
             FROM patient_general_info AS t{where_clause}
             ORDER BY created_at DESC
             LIMIT ${limit_index} OFFSET ${offset_index}",
            where_clause = conditions.where_clause(),
        );

        let client = self.db.client().await?;
        let rows = client.query(&sql, conditions.params()).await?;
        Ok(rows.into_iter().map(stored_record).collect())
    }

    pub async fn list_lab_panels(
        &self,
        range: &DateRange,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<StoredRecord>> {
        let mut conditions = Conditions::new();
        conditions.push_range("examination_date", range);
        let limit_index = conditions.bind(&limit);
        let offset_index = conditions.bind(&offset);

        let sql = format!(
            "SELECT id, created_at, to_jsonb(t) AS data
             FROM patient_lab_panel AS t{where_clause}
             ORDER BY created_at DESC
             LIMIT ${limit_index} OFFSET ${offset_index}",
            where_clause = conditions.where_clause(),
        );

        let client = self.db.client().await?;
        let rows = client.query(&sql, conditions.params()).await?;
        Ok(rows.into_iter().map(stored_record).collect())
    }

    /// Home monitoring listing. File contents never leave the database;
    /// only presence flags are reported.
    pub async fn list_home_monitoring(
        &self,
        range: &DateRange,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<StoredRecord>> {
        let mut conditions = Conditions::new();
        conditions.push_range("home_monitoring_date", range);
        let limit_index = conditions.bind(&limit);
        let offset_index = conditions.bind(&offset);

        let sql = format!(
            "SELECT id, created_at, to_jsonb(t) AS data
             FROM (
                 SELECT id, home_monitoring_date, home_systolic, home_diastolic,
                        fetal_heart_rate, fetal_movement, sflt1_plgf_ratio,
                        (fetal_monitoring_file IS NOT NULL) AS has_fetal_monitoring_file,
                        (urine_test_file IS NOT NULL) AS has_urine_test_file,
                        created_at
                 FROM patient_home_monitoring{where_clause}
             ) AS t
             ORDER BY created_at DESC
             LIMIT ${limit_index} OFFSET ${offset_index}",
            where_clause = conditions.where_clause(),
        );

        let client = self.db.client().await?;
        let rows = client.query(&sql, conditions.params()).await?;
        Ok(rows.into_iter().map(stored_record).collect())
    }

    pub async fn find_general_info(&self, id: i64) -> Result<StoredRecord> {
        let client = self.db.client().await?;
        let rows = client
            .query(
                "SELECT id, created_at, to_jsonb(t) AS data
                 FROM patient_general_info AS t
                 WHERE id = $1",
                &[&id],
            )
            .await?;

        rows.into_iter()
            .next()
            .map(stored_record)
            .ok_or_else(|| DbError::NotFound(format!("patient {id}")))
    }

    pub async fn count_general_info(&self, range: &DateRange) -> Result<u64> {
        let mut conditions = Conditions::new();
        conditions.push_range("created_at", range);
        let sql = format!(
            "SELECT COUNT(*) FROM patient_general_info{where_clause}",
            where_clause = conditions.where_clause(),
        );

        let client = self.db.client().await?;
        let row = client.query_one(&sql, conditions.params()).await?;
        Ok(row.get::<_, i64>(0) as u64)
    }

    /// Intake counts per day, most recent first.
    pub async fn intake_by_day(&self, range: &DateRange, days: i64) -> Result<Vec<DailyCount>> {
        let mut conditions = Conditions::new();
        conditions.push_range("created_at", range);
        let limit_index = conditions.bind(&days);

        let sql = format!(
            "SELECT created_at::date AS date, COUNT(*) AS count
             FROM patient_general_info{where_clause}
             GROUP BY created_at::date
             ORDER BY date DESC
             LIMIT ${limit_index}",
            where_clause = conditions.where_clause(),
        );

        let client = self.db.client().await?;
        let rows = client.query(&sql, conditions.params()).await?;
        Ok(rows
            .into_iter()
            .map(|row| DailyCount {
                date: row.get("date"),
                count: row.get::<_, i64>("count") as u64,
            })
            .collect())
    }

    /// Joined snapshot for export: each patient with their most recent lab
    /// panel and home monitoring entry.
    pub async fn export_snapshot(&self, range: &DateRange) -> Result<Vec<serde_json::Value>> {
        let mut conditions = Conditions::new();
        conditions.push_range("p.created_at", range);

        let sql = format!(
            "SELECT to_jsonb(t) AS data
             FROM (
                 SELECT p.*,
                        l.examination_date, l.rbc_count, l.wbc_count, l.hemoglobin,
                        h.home_monitoring_date, h.home_systolic, h.home_diastolic
                 FROM patient_general_info AS p
                 LEFT JOIN LATERAL (
                     SELECT examination_date, rbc_count, wbc_count, hemoglobin
                     FROM patient_lab_panel
                     ORDER BY created_at DESC
                     LIMIT 1
                 ) AS l ON TRUE
                 LEFT JOIN LATERAL (
                     SELECT home_monitoring_date, home_systolic, home_diastolic
                     FROM patient_home_monitoring
                     ORDER BY created_at DESC
                     LIMIT 1
                 ) AS h ON TRUE{where_clause}
                 ORDER BY p.created_at DESC
             ) AS t",
            where_clause = conditions.where_clause(),
        );

        let client = self.db.client().await?;
        let rows = client.query(&sql, conditions.params()).await?;
        Ok(rows.into_iter().map(|row| row.get("data")).collect())
    }
}

fn stored_record(row: tokio_postgres::Row) -> StoredRecord {
    StoredRecord {
        id: row.get("id"),
        created_at: row.get("created_at"),
        data: row.get("data"),
    }
}
