//! Patient data capture endpoints.

use std::fmt::Display;
use std::str::FromStr;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use gravida_common::{ApiError, ApiResult};
use gravida_db::{GeneralInfoRecord, HomeMonitoringRecord, LabPanelRecord, PatientRepository};

use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
    pub id: i64,
}

impl SaveResponse {
    fn saved(what: &str, id: i64) -> Self {
        Self {
            success: true,
            message: format!("{what} saved"),
            id,
        }
    }
}

/// POST /api/patient/general-info
pub async fn save_general_info(
    State(state): State<SharedState>,
    Json(record): Json<GeneralInfoRecord>,
) -> ApiResult<Json<SaveResponse>> {
    let repository = PatientRepository::new(state.db.clone());
    let id = repository.insert_general_info(&record).await?;
    Ok(Json(SaveResponse::saved("patient general info", id)))
}

/// POST /api/patient/lab-panel
pub async fn save_lab_panel(
    State(state): State<SharedState>,
    Json(record): Json<LabPanelRecord>,
) -> ApiResult<Json<SaveResponse>> {
    let repository = PatientRepository::new(state.db.clone());
    let id = repository.insert_lab_panel(&record).await?;
    Ok(Json(SaveResponse::saved("lab panel", id)))
}

/// POST /api/patient/home-monitoring
///
/// Multipart: scalar fields as text parts, the two monitoring files as
/// binary parts stored verbatim. Unknown parts are ignored.
pub async fn save_home_monitoring(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> ApiResult<Json<SaveResponse>> {
    let mut record = HomeMonitoringRecord::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::validation(err.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "home_monitoring_date" => {
                record.home_monitoring_date = parse_part(&name, field.text().await)?;
            }
            "home_systolic" => {
                record.home_systolic = parse_part(&name, field.text().await)?;
            }
            "home_diastolic" => {
                record.home_diastolic = parse_part(&name, field.text().await)?;
            }
            "fetal_heart_rate" => {
                record.fetal_heart_rate = parse_part(&name, field.text().await)?;
            }
            "fetal_movement" => {
                record.fetal_movement = parse_part(&name, field.text().await)?;
            }
            "sflt1_plgf_ratio" => {
                record.sflt1_plgf_ratio = parse_part(&name, field.text().await)?;
            }
            "fetal_monitoring_file" => {
                record.fetal_monitoring_file = Some(read_file(&name, field).await?);
            }
            "urine_test_file" => {
                record.urine_test_file = Some(read_file(&name, field).await?);
            }
            _ => {}
        }
    }

    let repository = PatientRepository::new(state.db.clone());
    let id = repository.insert_home_monitoring(&record).await?;
    Ok(Json(SaveResponse::saved("home monitoring entry", id)))
}

fn parse_part<T>(
    name: &str,
    text: Result<String, axum::extract::multipart::MultipartError>,
) -> ApiResult<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let text = text.map_err(|err| ApiError::validation(err.to_string()))?;
    if text.is_empty() {
        return Ok(None);
    }
    text.parse()
        .map(Some)
        .map_err(|err| ApiError::validation(format!("invalid {name}: {err}")))
}

async fn read_file(
    name: &str,
    field: axum::extract::multipart::Field<'_>,
) -> ApiResult<Vec<u8>> {
    field
        .bytes()
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(|err| ApiError::validation(format!("failed to read {name}: {err}")))
}
