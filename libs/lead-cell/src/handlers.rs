use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::models::{TriageRequest, TriageResponse};
use crate::services::{LeadPrioritizer, LeadPriorityQueue};
use shared_models::error::AppError;

pub struct LeadHandlers {
    prioritizer: Arc<LeadPrioritizer>,
}

impl LeadHandlers {
    pub fn new() -> Self {
        Self {
            prioritizer: Arc::new(LeadPrioritizer::default()),
        }
    }
}

impl Default for LeadHandlers {
    fn default() -> Self {
        Self::new()
    }
}

/// Orders the posted leads the way the triage queue would hand them out.
#[instrument(skip(handlers, request), fields(leads = request.leads.len()))]
pub async fn triage_leads(
    State(handlers): State<Arc<LeadHandlers>>,
    Json(request): Json<TriageRequest>,
) -> Result<Json<TriageResponse>, AppError> {
    if request.limit == Some(0) {
        return Err(AppError::BadRequest("limit must be at least 1".to_string()));
    }

    let queue = LeadPriorityQueue::from_leads(handlers.prioritizer.clone(), request.leads);
    let distribution = queue.priority_distribution();
    let total = queue.size();

    let leads = match request.limit {
        Some(limit) => queue.top(limit),
        None => queue.into_sorted_vec(),
    };

    info!(
        "Triaged {} leads, top priority {}",
        total,
        leads.first().map(|l| l.priority).unwrap_or(0)
    );

    Ok(Json(TriageResponse {
        leads,
        total,
        distribution,
    }))
}
