// =====================================================================================
// ANALYTICS CELL - TRAILING-WINDOW APPOINTMENT METRICS
// =====================================================================================
//
// Request-scoped analytics over appointment samples:
// - Status counts, completion and cancellation rates
// - Revenue totals, per-day breakdown and trend
// - Peak booking hours via a fixed sliding window
// - Appointment clustering and per-doctor workload
//
// =====================================================================================

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use error::AnalyticsError;
pub use models::*;
pub use services::{
    find_clusters, hourly_distribution, linear_regression_slope, peak_window, doctor_workload,
    WindowedMetrics,
};

pub use router::create_analytics_router;
