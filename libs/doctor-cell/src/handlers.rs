use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::{info, instrument};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{
    MatchDoctorsRequest, MatchDoctorsResponse, RankDoctorsRequest, RankDoctorsResponse,
    MAX_RATING,
};
use crate::services::matching::average_score;
use crate::services::{DoctorRankingIndex, MatchScorer};

pub struct DoctorHandlers {
    scorer: MatchScorer,
}

impl DoctorHandlers {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            scorer: MatchScorer::new(config),
        }
    }
}

// ==============================================================================
// RANKING
// ==============================================================================

/// Ranking needs no scorer state; the index is rebuilt from the posted doctors.
#[instrument(skip(payload), fields(doctors = payload.doctors.len()))]
pub async fn rank_doctors(
    Json(payload): Json<RankDoctorsRequest>,
) -> Result<Json<RankDoctorsResponse>, AppError> {
    let min_rating = payload.min_rating.unwrap_or(0.0);
    if !min_rating.is_finite() || !(0.0..=MAX_RATING).contains(&min_rating) {
        return Err(AppError::ValidationError(format!(
            "min_rating must be between 0 and {}",
            MAX_RATING
        )));
    }

    let total_candidates = payload.doctors.len();
    let index = DoctorRankingIndex::from_doctors(payload.doctors);
    let limit = payload.limit.unwrap_or(total_candidates);

    let doctors = match payload.specialization.as_deref() {
        Some(specialization) => {
            let mut in_range = index.range_by_specialization(specialization, min_rating);
            in_range.truncate(limit);
            in_range
        }
        None if min_rating > 0.0 => index
            .iter()
            .filter(|d| d.normalized_rating() >= min_rating)
            .take(limit)
            .cloned()
            .collect(),
        None => index.top_n(limit),
    };

    info!("Ranked {} of {} doctors", doctors.len(), total_candidates);

    Ok(Json(RankDoctorsResponse {
        total: doctors.len(),
        doctors,
    }))
}

// ==============================================================================
// MATCHING
// ==============================================================================

#[instrument(skip(handlers, payload), fields(doctors = payload.doctors.len()))]
pub async fn match_doctors(
    State(handlers): State<Arc<DoctorHandlers>>,
    Json(payload): Json<MatchDoctorsRequest>,
) -> Result<Json<MatchDoctorsResponse>, AppError> {
    if payload.request.specialization.trim().is_empty() {
        return Err(AppError::ValidationError(
            "specialization is required".to_string(),
        ));
    }

    let matches = handlers
        .scorer
        .find_best_matches(&payload.request, &payload.doctors);

    Ok(Json(MatchDoctorsResponse {
        total: matches.len(),
        average_score: average_score(&matches),
        matches,
    }))
}
