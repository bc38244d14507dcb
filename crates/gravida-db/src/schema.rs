//! Table definitions and the patient record types they store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const TABLE_GENERAL_INFO: &str = "patient_general_info";
pub const TABLE_LAB_PANEL: &str = "patient_lab_panel";
pub const TABLE_HOME_MONITORING: &str = "patient_home_monitoring";
pub const TABLE_FGR_OUTCOME: &str = "fgr_outcome_predictions";
pub const TABLE_FGR_NEONATAL: &str = "fgr_neonatal_predictions";
pub const TABLE_MATERNAL_COX: &str = "maternal_cox_predictions";
pub const TABLE_NEONATAL_COX: &str = "neonatal_cox_predictions";

pub const ALL_TABLES: [&str; 7] = [
    TABLE_GENERAL_INFO,
    TABLE_LAB_PANEL,
    TABLE_HOME_MONITORING,
    TABLE_FGR_OUTCOME,
    TABLE_FGR_NEONATAL,
    TABLE_MATERNAL_COX,
    TABLE_NEONATAL_COX,
];

/// Idempotent DDL, executed once at startup.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS patient_general_info (
    id BIGSERIAL PRIMARY KEY,
    age INT,
    ethnicity TEXT,
    education TEXT,
    occupation TEXT,
    economic_status TEXT,
    height DOUBLE PRECISION,
    pre_pregnancy_weight DOUBLE PRECISION,
    pre_pregnancy_bmi DOUBLE PRECISION,
    last_menstrual_period DATE,
    gestational_weeks TEXT,
    pre_pregnancy_systolic DOUBLE PRECISION,
    pre_pregnancy_diastolic DOUBLE PRECISION,
    pre_pregnancy_map DOUBLE PRECISION,
    medical_history TEXT,
    gravidity INT,
    parity INT,
    uterine_surgery TEXT,
    family_history TEXT,
    allergy_history TEXT,
    conception_method TEXT,
    pregnancy_type TEXT,
    aspirin_use TEXT,
    complications TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS patient_lab_panel (
    id BIGSERIAL PRIMARY KEY,
    examination_date DATE,
    ultrasound_date DATE,
    rbc_count DOUBLE PRECISION,
    wbc_count DOUBLE PRECISION,
    hemoglobin DOUBLE PRECISION,
    platelet_count DOUBLE PRECISION,
    hematocrit DOUBLE PRECISION,
    platelet_volume DOUBLE PRECISION,
    urine_protein_qualitative TEXT,
    urine_cast TEXT,
    urine_protein_24h DOUBLE PRECISION,
    total_bilirubin DOUBLE PRECISION,
    total_protein DOUBLE PRECISION,
    albumin DOUBLE PRECISION,
    alt DOUBLE PRECISION,
    ast DOUBLE PRECISION,
    total_bile_acid DOUBLE PRECISION,
    creatinine DOUBLE PRECISION,
    urea DOUBLE PRECISION,
    uric_acid DOUBLE PRECISION,
    aptt DOUBLE PRECISION,
    pt DOUBLE PRECISION,
    inr DOUBLE PRECISION,
    tt DOUBLE PRECISION,
    fib DOUBLE PRECISION,
    d_dimer DOUBLE PRECISION,
    fasting_glucose DOUBLE PRECISION,
    glucose_1h DOUBLE PRECISION,
    glucose_2h DOUBLE PRECISION,
    plgf DOUBLE PRECISION,
    sflt1 DOUBLE PRECISION,
    sflt1_plgf_ratio DOUBLE PRECISION,
    nt DOUBLE PRECISION,
    uta_pi DOUBLE PRECISION,
    ua_sd_ratio DOUBLE PRECISION,
    ua_pi DOUBLE PRECISION,
    ua_ri DOUBLE PRECISION,
    mca_sd_ratio DOUBLE PRECISION,
    mca_pi DOUBLE PRECISION,
    mca_ri DOUBLE PRECISION,
    cpr DOUBLE PRECISION,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS patient_home_monitoring (
    id BIGSERIAL PRIMARY KEY,
    home_monitoring_date DATE,
    home_systolic DOUBLE PRECISION,
    home_diastolic DOUBLE PRECISION,
    fetal_heart_rate DOUBLE PRECISION,
    fetal_movement DOUBLE PRECISION,
    sflt1_plgf_ratio DOUBLE PRECISION,
    fetal_monitoring_file BYTEA,
    urine_test_file BYTEA,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS fgr_outcome_predictions (
    id BIGSERIAL PRIMARY KEY,
    preterm BOOLEAN NOT NULL,
    lmp_date DATE NOT NULL,
    diagnosis_date DATE NOT NULL,
    hypertension BOOLEAN NOT NULL,
    nst_abnormal BOOLEAN NOT NULL,
    weight_growth_abnormal BOOLEAN NOT NULL,
    umbilical_flow_abnormal BOOLEAN NOT NULL,
    probability_percent DOUBLE PRECISION NOT NULL,
    gestational_days BIGINT NOT NULL,
    logit_value DOUBLE PRECISION NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS fgr_neonatal_predictions (
    id BIGSERIAL PRIMARY KEY,
    antenatal_visits INT NOT NULL,
    umbilical_flow_abnormal BOOLEAN NOT NULL,
    preeclampsia BOOLEAN NOT NULL,
    delivery_abnormal BOOLEAN NOT NULL,
    fetal_growth_abnormal BOOLEAN NOT NULL,
    probability_percent DOUBLE PRECISION NOT NULL,
    logit_value DOUBLE PRECISION NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS maternal_cox_predictions (
    id BIGSERIAL PRIMARY KEY,
    platelet_count DOUBLE PRECISION NOT NULL,
    creatinine DOUBLE PRECISION NOT NULL,
    urine_protein_24h DOUBLE PRECISION NOT NULL,
    alt DOUBLE PRECISION NOT NULL,
    systolic_max DOUBLE PRECISION NOT NULL,
    pda BOOLEAN NOT NULL,
    horizon_days INT NOT NULL,
    probability_percent DOUBLE PRECISION NOT NULL,
    linear_predictor DOUBLE PRECISION NOT NULL,
    baseline_hazard DOUBLE PRECISION NOT NULL,
    survival_probability DOUBLE PRECISION NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS neonatal_cox_predictions (
    id BIGSERIAL PRIMARY KEY,
    lmp_date DATE NOT NULL,
    admission_date DATE NOT NULL,
    gda_group DOUBLE PRECISION NOT NULL,
    horizon_days INT NOT NULL,
    nst_abnormal BOOLEAN NOT NULL,
    admission_systolic DOUBLE PRECISION NOT NULL,
    admission_diastolic DOUBLE PRECISION NOT NULL,
    creatinine DOUBLE PRECISION NOT NULL,
    probability_percent DOUBLE PRECISION NOT NULL,
    gestational_days BIGINT NOT NULL,
    map_value DOUBLE PRECISION NOT NULL,
    gda_time DOUBLE PRECISION NOT NULL,
    linear_predictor DOUBLE PRECISION NOT NULL,
    baseline_hazard DOUBLE PRECISION NOT NULL,
    survival_probability DOUBLE PRECISION NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
"#;

/// Demographics and obstetric history. Every field is optional; intake
/// forms arrive incomplete and are stored as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralInfoRecord {
    pub age: Option<i32>,
    pub ethnicity: Option<String>,
    pub education: Option<String>,
    pub occupation: Option<String>,
    pub economic_status: Option<String>,
    pub height: Option<f64>,
    pub pre_pregnancy_weight: Option<f64>,
    pub pre_pregnancy_bmi: Option<f64>,
    pub last_menstrual_period: Option<NaiveDate>,
    pub gestational_weeks: Option<String>,
    pub pre_pregnancy_systolic: Option<f64>,
    pub pre_pregnancy_diastolic: Option<f64>,
    pub pre_pregnancy_map: Option<f64>,
    pub medical_history: Option<String>,
    pub gravidity: Option<i32>,
    pub parity: Option<i32>,
    pub uterine_surgery: Option<String>,
    pub family_history: Option<String>,
    pub allergy_history: Option<String>,
    pub conception_method: Option<String>,
    pub pregnancy_type: Option<String>,
    pub aspirin_use: Option<String>,
    pub complications: Option<String>,
}

/// Laboratory and imaging panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabPanelRecord {
    pub examination_date: Option<NaiveDate>,
    pub ultrasound_date: Option<NaiveDate>,
    pub rbc_count: Option<f64>,
    pub wbc_count: Option<f64>,
    pub hemoglobin: Option<f64>,
    pub platelet_count: Option<f64>,
    pub hematocrit: Option<f64>,
    pub platelet_volume: Option<f64>,
    pub urine_protein_qualitative: Option<String>,
    pub urine_cast: Option<String>,
    pub urine_protein_24h: Option<f64>,
    pub total_bilirubin: Option<f64>,
    pub total_protein: Option<f64>,
    pub albumin: Option<f64>,
    pub alt: Option<f64>,
    pub ast: Option<f64>,
    pub total_bile_acid: Option<f64>,
    pub creatinine: Option<f64>,
    pub urea: Option<f64>,
    pub uric_acid: Option<f64>,
    pub aptt: Option<f64>,
    pub pt: Option<f64>,
    pub inr: Option<f64>,
    pub tt: Option<f64>,
    pub fib: Option<f64>,
    pub d_dimer: Option<f64>,
    pub fasting_glucose: Option<f64>,
    pub glucose_1h: Option<f64>,
    pub glucose_2h: Option<f64>,
    pub plgf: Option<f64>,
    pub sflt1: Option<f64>,
    pub sflt1_plgf_ratio: Option<f64>,
    pub nt: Option<f64>,
    pub uta_pi: Option<f64>,
    pub ua_sd_ratio: Option<f64>,
    pub ua_pi: Option<f64>,
    pub ua_ri: Option<f64>,
    pub mca_sd_ratio: Option<f64>,
    pub mca_pi: Option<f64>,
    pub mca_ri: Option<f64>,
    pub cpr: Option<f64>,
}

/// Home monitoring entry. The two uploads are opaque byte blobs; nothing
/// downstream interprets them.
#[derive(Debug, Clone, Default)]
pub struct HomeMonitoringRecord {
    pub home_monitoring_date: Option<NaiveDate>,
    pub home_systolic: Option<f64>,
    pub home_diastolic: Option<f64>,
    pub fetal_heart_rate: Option<f64>,
    pub fetal_movement: Option<f64>,
    pub sflt1_plgf_ratio: Option<f64>,
    pub fetal_monitoring_file: Option<Vec<u8>>,
    pub urine_test_file: Option<Vec<u8>>,
}
