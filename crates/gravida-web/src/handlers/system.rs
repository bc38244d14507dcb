//! Service metadata and liveness.

use axum::Json;
use serde_json::json;

/// GET / — endpoint index.
pub async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "service": "gravida",
        "description": "Pregnancy hypertension monitoring and outcome prediction API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/predict/fgr": "adverse perinatal outcome in fetal growth restriction",
            "/predict/fgr-neonatal": "neonatal outcome in FGR-preceded preeclampsia",
            "/predict/maternal-cox": "maternal adverse outcome risk at 2/7/14 days",
            "/predict/neonatal-cox": "neonatal adverse outcome risk at 2/7/14 days",
            "/api/patient/general-info": "store patient demographics",
            "/api/patient/lab-panel": "store laboratory and imaging panel",
            "/api/patient/home-monitoring": "store home monitoring entry",
        },
    }))
}

/// GET /health — liveness only; storage health lives under /admin/health.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "service": "gravida" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_lists_every_prediction_route() {
        let Json(body) = tokio_test::block_on(index());
        let endpoints = body["endpoints"].as_object().unwrap();
        for route in [
            "/predict/fgr",
            "/predict/fgr-neonatal",
            "/predict/maternal-cox",
            "/predict/neonatal-cox",
        ] {
            assert!(endpoints.contains_key(route), "missing {route}");
        }
    }

    #[test]
    fn health_reports_healthy_without_touching_storage() {
        let Json(body) = tokio_test::block_on(health());
        assert_eq!(body["status"], "healthy");
    }
}
