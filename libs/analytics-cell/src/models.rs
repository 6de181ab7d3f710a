// =====================================================================================
// ANALYTICS CELL MODELS
// =====================================================================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_config::AppConfig;

use crate::error::AnalyticsError;

pub const HOURS_PER_DAY: usize = 24;
/// Longest trailing window, one leap year.
pub const MAX_WINDOW_DAYS: u32 = 366;
/// Widest gap that still joins two appointments into one cluster.
pub const MAX_CLUSTER_GAP_MINUTES: i64 = 24 * 60;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
}

/// One timestamped appointment observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSample {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub doctor_id: Option<Uuid>,
    #[serde(default)]
    pub patient_id: Option<Uuid>,
}

impl MetricSample {
    pub fn is_revenue(&self) -> bool {
        self.status == AppointmentStatus::Completed && self.payment_status == PaymentStatus::Paid
    }

    /// Fee with non-finite values treated as zero.
    pub fn revenue_value(&self) -> f64 {
        if self.value.is_finite() {
            self.value
        } else {
            0.0
        }
    }
}

/// Tunables for every windowed analysis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsSettings {
    pub window_days: u32,
    pub peak_window_hours: u32,
    pub cluster_gap_minutes: i64,
    pub overload_gap_minutes: f64,
    pub underutilized_gap_minutes: f64,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl AnalyticsSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            window_days: config.analytics_window_days,
            peak_window_hours: config.analytics_peak_window_hours,
            cluster_gap_minutes: config.analytics_cluster_gap_minutes,
            overload_gap_minutes: config.workload_overload_gap_minutes,
            underutilized_gap_minutes: config.workload_underutilized_gap_minutes,
        }
    }

    pub fn validate(&self) -> Result<(), AnalyticsError> {
        if self.window_days == 0 || self.window_days > MAX_WINDOW_DAYS {
            return Err(AnalyticsError::InvalidWindow(self.window_days));
        }
        if self.peak_window_hours == 0 || self.peak_window_hours as usize > HOURS_PER_DAY {
            return Err(AnalyticsError::InvalidPeakWindow(self.peak_window_hours));
        }
        if self.cluster_gap_minutes <= 0 || self.cluster_gap_minutes > MAX_CLUSTER_GAP_MINUTES {
            return Err(AnalyticsError::InvalidClusterGap(self.cluster_gap_minutes));
        }
        if !(self.overload_gap_minutes < self.underutilized_gap_minutes) {
            return Err(AnalyticsError::InvalidWorkloadThresholds {
                overload: self.overload_gap_minutes,
                underutilized: self.underutilized_gap_minutes,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StatusSummary {
    pub total: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub no_show: usize,
    pub completion_rate: f64,   // percentage
    pub cancellation_rate: f64, // percentage
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: f64,
    pub appointments: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RevenueSummary {
    pub total_revenue: f64,
    pub average_daily_revenue: f64,
    pub paid_appointments: usize,
    pub daily: Vec<DailyRevenue>,
    pub trend_slope: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeakWindow {
    pub start_hour: u32,
    pub end_hour: u32,
    pub window_hours: u32,
    pub appointment_count: u32,
    pub hourly_distribution: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentCluster {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub size: usize,
    pub span_minutes: i64,
    pub sample_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadStatus {
    Overloaded,
    Balanced,
    Underutilized,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoctorWorkload {
    pub doctor_id: Uuid,
    pub appointments: usize,
    pub average_gap_minutes: f64,
    pub min_gap_minutes: f64,
    pub max_gap_minutes: f64,
    pub status: WorkloadStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub generated_at: DateTime<Utc>,
    pub window_start: DateTime<Utc>,
    pub window_days: u32,
    pub samples_in_window: usize,
    pub status: StatusSummary,
    pub revenue: RevenueSummary,
    pub peak_hours: PeakWindow,
    pub clusters: Vec<AppointmentCluster>,
    pub workload: Vec<DoctorWorkload>,
}

// Request/Response DTOs

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsRequest {
    pub samples: Vec<MetricSample>,
    pub now: Option<DateTime<Utc>>,
    pub window_days: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeakHoursRequest {
    pub samples: Vec<MetricSample>,
    pub window_hours: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterRequest {
    pub samples: Vec<MetricSample>,
    pub gap_minutes: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterResponse {
    pub clusters: Vec<AppointmentCluster>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadRequest {
    pub samples: Vec<MetricSample>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadResponse {
    pub doctors: Vec<DoctorWorkload>,
    pub overloaded: usize,
    pub underutilized: usize,
}
