//! Axum router — maps all URL paths to handlers.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    admin::{
        admin_health, export_patients, list_general_info, list_home_monitoring,
        list_lab_panels, list_predictions, patient_detail, statistics,
    },
    patient::{save_general_info, save_home_monitoring, save_lab_panel},
    predict::{
        predict_fgr_neonatal, predict_fgr_outcome, predict_maternal_survival,
        predict_neonatal_survival,
    },
    system::{health, index},
};
use crate::state::{AppState, SharedState};

/// Build and return the full axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Service
        .route("/", get(index))
        .route("/health", get(health))

        // Scoring
        .route("/predict/fgr", post(predict_fgr_outcome))
        .route("/predict/fgr-neonatal", post(predict_fgr_neonatal))
        .route("/predict/maternal-cox", post(predict_maternal_survival))
        .route("/predict/neonatal-cox", post(predict_neonatal_survival))

        // Patient data capture
        .route("/api/patient/general-info", post(save_general_info))
        .route("/api/patient/lab-panel", post(save_lab_panel))
        .route("/api/patient/home-monitoring", post(save_home_monitoring))

        // Review
        .route("/admin/patients/general-info", get(list_general_info))
        .route("/admin/patients/lab-panel", get(list_lab_panels))
        .route("/admin/patients/home-monitoring", get(list_home_monitoring))
        .route("/admin/patients/{id}/detail", get(patient_detail))
        .route("/admin/predictions", get(list_predictions))
        .route("/admin/statistics", get(statistics))
        .route("/admin/export/patients", get(export_patients))
        .route("/admin/health", get(admin_health))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
