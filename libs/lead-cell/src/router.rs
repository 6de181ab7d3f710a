use axum::{routing::post, Router};
use std::sync::Arc;

use crate::handlers::{triage_leads, LeadHandlers};

pub fn create_lead_router() -> Router {
    let handlers = Arc::new(LeadHandlers::new());

    Router::new()
        .route("/triage", post(triage_leads))
        .with_state(handlers)
}
