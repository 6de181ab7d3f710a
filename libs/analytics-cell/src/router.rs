// =====================================================================================
// ANALYTICS CELL ROUTER
// =====================================================================================

use axum::{routing::post, Router};
use std::sync::Arc;

use crate::error::AnalyticsError;
use crate::handlers::{
    analyze_appointments, appointment_clusters, peak_hours, workload_summary, AnalyticsHandlers,
};
use shared_config::AppConfig;

pub fn create_analytics_router(config: Arc<AppConfig>) -> Result<Router, AnalyticsError> {
    let handlers = Arc::new(AnalyticsHandlers::new(&config)?);

    Ok(Router::new()
        .route("/appointments", post(analyze_appointments))
        .route("/peak-hours", post(peak_hours))
        .route("/clusters", post(appointment_clusters))
        .route("/workload", post(workload_summary))
        .with_state(handlers))
}
