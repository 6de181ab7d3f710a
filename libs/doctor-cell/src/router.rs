use std::sync::Arc;

use axum::{
    Router,
    routing::post,
};

use shared_config::AppConfig;

use crate::handlers::{self, DoctorHandlers};

pub fn doctor_routes(config: Arc<AppConfig>) -> Router {
    let handlers = Arc::new(DoctorHandlers::new(&config));

    Router::new()
        .route("/rank", post(handlers::rank_doctors))
        .route("/match", post(handlers::match_doctors))
        .with_state(handlers)
}
