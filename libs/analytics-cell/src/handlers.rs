// =====================================================================================
// ANALYTICS CELL HANDLERS
// =====================================================================================

use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;

use crate::error::AnalyticsError;
use crate::models::{
    AnalyticsReport, AnalyticsRequest, AnalyticsSettings, ClusterRequest, ClusterResponse,
    PeakHoursRequest, PeakWindow, WorkloadRequest, WorkloadResponse, WorkloadStatus,
    HOURS_PER_DAY, MAX_CLUSTER_GAP_MINUTES,
};
use crate::services::{clustering, peak, WindowedMetrics};
use shared_config::AppConfig;
use shared_models::error::AppError;

pub struct AnalyticsHandlers {
    metrics: WindowedMetrics,
}

impl AnalyticsHandlers {
    pub fn new(config: &AppConfig) -> Result<Self, AnalyticsError> {
        Ok(Self {
            metrics: WindowedMetrics::new(AnalyticsSettings::from_config(config))?,
        })
    }
}

#[instrument(skip(handlers, request), fields(samples = request.samples.len()))]
pub async fn analyze_appointments(
    State(handlers): State<Arc<AnalyticsHandlers>>,
    Json(request): Json<AnalyticsRequest>,
) -> Result<Json<AnalyticsReport>, AppError> {
    let now = request.now.unwrap_or_else(Utc::now);

    let report = match request.window_days {
        Some(days) if days != handlers.metrics.settings().window_days => handlers
            .metrics
            .with_window_days(days)?
            .analyze(&request.samples, now),
        _ => handlers.metrics.analyze(&request.samples, now),
    };

    Ok(Json(report))
}

#[instrument(skip(handlers, request), fields(samples = request.samples.len()))]
pub async fn peak_hours(
    State(handlers): State<Arc<AnalyticsHandlers>>,
    Json(request): Json<PeakHoursRequest>,
) -> Result<Json<PeakWindow>, AppError> {
    let peak = match request.window_hours {
        Some(hours) if hours == 0 || hours as usize > HOURS_PER_DAY => {
            return Err(AnalyticsError::InvalidPeakWindow(hours).into());
        }
        Some(hours) => peak::peak_window(&request.samples, hours),
        None => handlers.metrics.peak_hours(&request.samples),
    };

    Ok(Json(peak))
}

#[instrument(skip(handlers, request), fields(samples = request.samples.len()))]
pub async fn appointment_clusters(
    State(handlers): State<Arc<AnalyticsHandlers>>,
    Json(request): Json<ClusterRequest>,
) -> Result<Json<ClusterResponse>, AppError> {
    let clusters = match request.gap_minutes {
        Some(gap) if gap <= 0 || gap > MAX_CLUSTER_GAP_MINUTES => {
            return Err(AnalyticsError::InvalidClusterGap(gap).into());
        }
        Some(gap) => clustering::find_clusters(&request.samples, gap),
        None => handlers.metrics.clusters(&request.samples),
    };

    Ok(Json(ClusterResponse {
        total: clusters.len(),
        clusters,
    }))
}

#[instrument(skip(handlers, request), fields(samples = request.samples.len()))]
pub async fn workload_summary(
    State(handlers): State<Arc<AnalyticsHandlers>>,
    Json(request): Json<WorkloadRequest>,
) -> Result<Json<WorkloadResponse>, AppError> {
    let doctors = handlers.metrics.workload(&request.samples);
    let count = |status: WorkloadStatus| doctors.iter().filter(|d| d.status == status).count();

    Ok(Json(WorkloadResponse {
        overloaded: count(WorkloadStatus::Overloaded),
        underutilized: count(WorkloadStatus::Underutilized),
        doctors,
    }))
}
