//! Prediction endpoints.
//!
//! Each endpoint scores synchronously and responds immediately; the result
//! is handed to storage on a spawned task. Persistence is best-effort: a
//! storage failure is logged and never turns a computed score into an
//! error response.

use axum::{extract::State, Json};

use gravida_common::ApiResult;
use gravida_db::PredictionRepository;
use gravida_engine::{
    score_fgr_neonatal, score_fgr_outcome, score_maternal_survival, score_neonatal_survival,
    FgrNeonatalMeasurement, FgrOutcomeMeasurement, MaternalCoxMeasurement,
    NeonatalCoxMeasurement, ScoreResult,
};

use crate::handlers::engine_error;
use crate::state::SharedState;

/// POST /predict/fgr — adverse perinatal outcome in fetal growth restriction.
pub async fn predict_fgr_outcome(
    State(state): State<SharedState>,
    Json(measurement): Json<FgrOutcomeMeasurement>,
) -> ApiResult<Json<ScoreResult>> {
    let result =
        score_fgr_outcome(&measurement, &state.models.fgr_outcome).map_err(engine_error)?;

    let repository = PredictionRepository::new(state.db.clone());
    let stored = result.clone();
    tokio::spawn(async move {
        match repository.insert_fgr_outcome(&measurement, &stored).await {
            Ok(id) => tracing::debug!(id, "stored FGR outcome prediction"),
            Err(err) => tracing::warn!(error = %err, "failed to store FGR outcome prediction"),
        }
    });

    Ok(Json(result))
}

/// POST /predict/fgr-neonatal — neonatal outcome in FGR-preceded preeclampsia.
pub async fn predict_fgr_neonatal(
    State(state): State<SharedState>,
    Json(measurement): Json<FgrNeonatalMeasurement>,
) -> ApiResult<Json<ScoreResult>> {
    let result =
        score_fgr_neonatal(&measurement, &state.models.fgr_neonatal).map_err(engine_error)?;

    let repository = PredictionRepository::new(state.db.clone());
    let stored = result.clone();
    tokio::spawn(async move {
        match repository.insert_fgr_neonatal(&measurement, &stored).await {
            Ok(id) => tracing::debug!(id, "stored FGR neonatal prediction"),
            Err(err) => tracing::warn!(error = %err, "failed to store FGR neonatal prediction"),
        }
    });

    Ok(Json(result))
}

/// POST /predict/maternal-cox — maternal adverse outcome risk at a
/// 2/7/14-day horizon.
pub async fn predict_maternal_survival(
    State(state): State<SharedState>,
    Json(measurement): Json<MaternalCoxMeasurement>,
) -> ApiResult<Json<ScoreResult>> {
    let result =
        score_maternal_survival(&measurement, &state.models.maternal_cox).map_err(engine_error)?;

    let repository = PredictionRepository::new(state.db.clone());
    let stored = result.clone();
    tokio::spawn(async move {
        match repository.insert_maternal_cox(&measurement, &stored).await {
            Ok(id) => tracing::debug!(id, "stored maternal survival prediction"),
            Err(err) => tracing::warn!(error = %err, "failed to store maternal survival prediction"),
        }
    });

    Ok(Json(result))
}

/// POST /predict/neonatal-cox — neonatal adverse outcome risk at a
/// 2/7/14-day horizon.
pub async fn predict_neonatal_survival(
    State(state): State<SharedState>,
    Json(measurement): Json<NeonatalCoxMeasurement>,
) -> ApiResult<Json<ScoreResult>> {
    let result =
        score_neonatal_survival(&measurement, &state.models.neonatal_cox).map_err(engine_error)?;

    let repository = PredictionRepository::new(state.db.clone());
    let stored = result.clone();
    tokio::spawn(async move {
        match repository.insert_neonatal_cox(&measurement, &stored).await {
            Ok(id) => tracing::debug!(id, "stored neonatal survival prediction"),
            Err(err) => tracing::warn!(error = %err, "failed to store neonatal survival prediction"),
        }
    });

    Ok(Json(result))
}
