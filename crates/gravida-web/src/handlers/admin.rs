//! Review and statistics endpoints.
//!
//! Paginated listings over everything the platform has stored, aggregate
//! statistics, per-patient detail, and CSV/JSON export. Unlike the
//! prediction path, storage errors here are the contract and surface
//! as 500s.

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use gravida_common::{ApiError, ApiResult};
use gravida_db::{
    DailyCount, DateRange, GeneralInfoFilter, ModelCounts, ModelKind, PatientRepository,
    PredictionFilter, PredictionRepository, StoredRecord,
};

use crate::state::SharedState;

const MAX_PAGE_SIZE: u32 = 100;
const DETAIL_LIMIT: i64 = 50;
const STATISTICS_DAYS: i64 = 30;

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

/// Validate page/page_size bounds and turn them into OFFSET/LIMIT.
fn page_bounds(page: u32, page_size: u32) -> ApiResult<(i64, i64)> {
    if page < 1 {
        return Err(ApiError::validation("page must be at least 1"));
    }
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(ApiError::validation(format!(
            "page_size must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    let offset = i64::from(page - 1) * i64::from(page_size);
    Ok((offset, i64::from(page_size)))
}

#[derive(Debug, Deserialize)]
pub struct GeneralInfoQuery {
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default = "default_page_size")]
    page_size: u32,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    age_min: Option<i32>,
    age_max: Option<i32>,
}

/// GET /admin/patients/general-info
pub async fn list_general_info(
    State(state): State<SharedState>,
    Query(query): Query<GeneralInfoQuery>,
) -> ApiResult<Json<Vec<StoredRecord>>> {
    let (offset, limit) = page_bounds(query.page, query.page_size)?;
    let filter = GeneralInfoFilter {
        range: DateRange {
            start_date: query.start_date,
            end_date: query.end_date,
        },
        age_min: query.age_min,
        age_max: query.age_max,
    };

    let repository = PatientRepository::new(state.db.clone());
    let records = repository.list_general_info(&filter, offset, limit).await?;
    Ok(Json(records))
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default = "default_page_size")]
    page_size: u32,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl PageQuery {
    fn range(&self) -> DateRange {
        DateRange {
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// GET /admin/patients/lab-panel
pub async fn list_lab_panels(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Vec<StoredRecord>>> {
    let (offset, limit) = page_bounds(query.page, query.page_size)?;
    let repository = PatientRepository::new(state.db.clone());
    let records = repository
        .list_lab_panels(&query.range(), offset, limit)
        .await?;
    Ok(Json(records))
}

/// GET /admin/patients/home-monitoring
pub async fn list_home_monitoring(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Vec<StoredRecord>>> {
    let (offset, limit) = page_bounds(query.page, query.page_size)?;
    let repository = PatientRepository::new(state.db.clone());
    let records = repository
        .list_home_monitoring(&query.range(), offset, limit)
        .await?;
    Ok(Json(records))
}

#[derive(Debug, Deserialize)]
pub struct PredictionQuery {
    model_type: Option<ModelKind>,
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default = "default_page_size")]
    page_size: u32,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    min_probability: Option<f64>,
    max_probability: Option<f64>,
}

/// GET /admin/predictions
pub async fn list_predictions(
    State(state): State<SharedState>,
    Query(query): Query<PredictionQuery>,
) -> ApiResult<Json<Vec<StoredRecord>>> {
    let (offset, limit) = page_bounds(query.page, query.page_size)?;
    for bound in [query.min_probability, query.max_probability].into_iter().flatten() {
        if !(0.0..=100.0).contains(&bound) {
            return Err(ApiError::validation(
                "probability bounds must be between 0 and 100",
            ));
        }
    }

    let filter = PredictionFilter {
        model: query.model_type,
        range: DateRange {
            start_date: query.start_date,
            end_date: query.end_date,
        },
        min_probability: query.min_probability,
        max_probability: query.max_probability,
    };

    let repository = PredictionRepository::new(state.db.clone());
    let records = repository.list(&filter, offset, limit).await?;
    Ok(Json(records))
}

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl RangeQuery {
    fn range(&self) -> DateRange {
        DateRange {
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    pub total_patients: u64,
    pub total_predictions: u64,
    pub data_by_date: Vec<DailyCount>,
    pub prediction_distribution: ModelCounts,
}

/// GET /admin/statistics
pub async fn statistics(
    State(state): State<SharedState>,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Json<StatisticsResponse>> {
    let range = query.range();
    let patients = PatientRepository::new(state.db.clone());
    let predictions = PredictionRepository::new(state.db.clone());

    let total_patients = patients.count_general_info(&range).await?;
    let prediction_distribution = predictions.counts(&range).await?;
    let data_by_date = patients.intake_by_day(&range, STATISTICS_DAYS).await?;

    Ok(Json(StatisticsResponse {
        total_patients,
        total_predictions: prediction_distribution.total(),
        data_by_date,
        prediction_distribution,
    }))
}

#[derive(Debug, Serialize)]
pub struct PatientDetailResponse {
    pub general_info: StoredRecord,
    pub lab_panels: Vec<StoredRecord>,
    pub home_monitoring: Vec<StoredRecord>,
    pub predictions: Vec<StoredRecord>,
}

/// GET /admin/patients/{id}/detail
///
/// Only the general info is scoped by `id`; the intake and prediction
/// tables carry no patient key, so the rest of the view is the most
/// recent entries platform-wide.
pub async fn patient_detail(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<PatientDetailResponse>> {
    let patients = PatientRepository::new(state.db.clone());
    let predictions = PredictionRepository::new(state.db.clone());

    let general_info = patients.find_general_info(id).await?;
    let range = DateRange::default();
    let lab_panels = patients.list_lab_panels(&range, 0, DETAIL_LIMIT).await?;
    let home_monitoring = patients
        .list_home_monitoring(&range, 0, DETAIL_LIMIT)
        .await?;
    let predictions = predictions.recent(DETAIL_LIMIT).await?;

    Ok(Json(PatientDetailResponse {
        general_info,
        lab_panels,
        home_monitoring,
        predictions,
    }))
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    format: ExportFormat,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

/// GET /admin/export/patients
pub async fn export_patients(
    State(state): State<SharedState>,
    Query(query): Query<ExportQuery>,
) -> ApiResult<Response> {
    let range = DateRange {
        start_date: query.start_date,
        end_date: query.end_date,
    };
    let repository = PatientRepository::new(state.db.clone());
    let rows = repository.export_snapshot(&range).await?;

    match query.format {
        ExportFormat::Json => Ok(Json(json!({ "data": rows })).into_response()),
        ExportFormat::Csv => {
            let body = render_csv(&rows)?;
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                    (
                        header::CONTENT_DISPOSITION,
                        "attachment; filename=\"patients.csv\"",
                    ),
                ],
                body,
            )
                .into_response())
        }
    }
}

/// Render export rows as CSV. Column order follows the JSON object key
/// order, which serde_json keeps sorted, so exports are stable.
fn render_csv(rows: &[serde_json::Value]) -> ApiResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let Some(first) = rows.first().and_then(|row| row.as_object()) else {
        return Ok(Vec::new());
    };
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    writer
        .write_record(&headers)
        .map_err(|err| ApiError::internal(err.to_string()))?;

    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|key| match row.get(*key) {
                None | Some(serde_json::Value::Null) => String::new(),
                Some(serde_json::Value::String(text)) => text.clone(),
                Some(other) => other.to_string(),
            })
            .collect();
        writer
            .write_record(&cells)
            .map_err(|err| ApiError::internal(err.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|err| ApiError::internal(err.to_string()))
}

/// GET /admin/health — DB connectivity plus per-table row counts.
pub async fn admin_health(State(state): State<SharedState>) -> Json<serde_json::Value> {
    match state.db.stats().await {
        Ok(stats) => {
            let tables: serde_json::Map<String, serde_json::Value> = stats
                .tables
                .into_iter()
                .map(|(table, count)| (table, json!(count)))
                .collect();
            Json(json!({
                "status": "healthy",
                "database": "connected",
                "table_statistics": tables,
            }))
        }
        Err(err) => Json(json!({
            "status": "unhealthy",
            "error": err.to_string(),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_bounds_reject_zero_page() {
        assert!(page_bounds(0, 20).is_err());
    }

    #[test]
    fn page_bounds_reject_oversized_pages() {
        assert!(page_bounds(1, 0).is_err());
        assert!(page_bounds(1, MAX_PAGE_SIZE + 1).is_err());
    }

    #[test]
    fn page_bounds_compute_the_offset() {
        let (offset, limit) = page_bounds(3, 20).unwrap();
        assert_eq!(offset, 40);
        assert_eq!(limit, 20);
    }

    #[test]
    fn csv_renders_headers_and_blank_nulls() {
        let rows = vec![
            json!({"age": 31, "ethnicity": "han", "height": serde_json::Value::Null}),
            json!({"age": 27, "ethnicity": "hui", "height": 1.62}),
        ];
        let body = render_csv(&rows).unwrap();
        let text = String::from_utf8(body).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("age,ethnicity,height"));
        assert_eq!(lines.next(), Some("31,han,"));
        assert_eq!(lines.next(), Some("27,hui,1.62"));
    }

    #[test]
    fn csv_of_no_rows_is_empty() {
        assert!(render_csv(&[]).unwrap().is_empty());
    }

    #[test]
    fn export_format_defaults_to_csv() {
        let query: ExportQuery = serde_json::from_str("{}").unwrap();
        assert!(matches!(query.format, ExportFormat::Csv));
    }
}
