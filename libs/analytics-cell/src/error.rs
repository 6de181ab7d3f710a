use thiserror::Error;

use shared_models::error::AppError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Window must cover at least one day and at most 366 days, got {0}")]
    InvalidWindow(u32),

    #[error("Peak window must span 1 to 24 hours, got {0}")]
    InvalidPeakWindow(u32),

    #[error("Cluster gap must be between 1 and 1440 minutes, got {0}")]
    InvalidClusterGap(i64),

    #[error("Overload gap ({overload} min) must be below the underutilized gap ({underutilized} min)")]
    InvalidWorkloadThresholds { overload: f64, underutilized: f64 },
}

impl From<AnalyticsError> for AppError {
    fn from(err: AnalyticsError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
