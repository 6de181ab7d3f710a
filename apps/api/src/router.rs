use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use analytics_cell::{create_analytics_router, AnalyticsError};
use doctor_cell::router::doctor_routes;
use lead_cell::router::create_lead_router;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Result<Router, AnalyticsError> {
    Ok(Router::new()
        .route("/", get(|| async { "Teleclinic API is running!" }))
        .nest("/doctors", doctor_routes(state.clone()))
        .nest("/leads", create_lead_router())
        .nest("/analytics", create_analytics_router(state)?))
}
