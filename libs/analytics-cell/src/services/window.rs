// =====================================================================================
// WINDOWED METRICS SERVICE
// =====================================================================================

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{debug, info, instrument};

use crate::error::AnalyticsError;
use crate::models::{
    AnalyticsReport, AnalyticsSettings, AppointmentCluster, AppointmentStatus, DailyRevenue,
    DoctorWorkload, MetricSample, PeakWindow, RevenueSummary, StatusSummary,
};
use crate::services::{clustering, peak, workload};

/// Trailing-window analytics. Holds only validated settings; every call
/// works on the samples it is given.
#[derive(Debug, Clone)]
pub struct WindowedMetrics {
    settings: AnalyticsSettings,
}

impl WindowedMetrics {
    pub fn new(settings: AnalyticsSettings) -> Result<Self, AnalyticsError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &AnalyticsSettings {
        &self.settings
    }

    /// Same analyses over a different window length.
    pub fn with_window_days(&self, window_days: u32) -> Result<Self, AnalyticsError> {
        Self::new(AnalyticsSettings {
            window_days,
            ..self.settings
        })
    }

    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(Duration::days(i64::from(self.settings.window_days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Samples with `now - window_days <= timestamp <= now`.
    pub fn trailing_window<'a>(&self, samples: &'a [MetricSample], now: DateTime<Utc>) -> Vec<&'a MetricSample> {
        let start = self.window_start(now);
        samples
            .iter()
            .filter(|s| s.timestamp >= start && s.timestamp <= now)
            .collect()
    }

    pub fn status_summary(&self, samples: &[&MetricSample]) -> StatusSummary {
        let total = samples.len();
        let count = |status: AppointmentStatus| samples.iter().filter(|s| s.status == status).count();

        let completed = count(AppointmentStatus::Completed);
        let cancelled = count(AppointmentStatus::Cancelled);
        let no_show = count(AppointmentStatus::NoShow);

        StatusSummary {
            total,
            completed,
            cancelled,
            no_show,
            completion_rate: percentage(completed, total),
            cancellation_rate: percentage(cancelled, total),
        }
    }

    /// One entry per calendar day in the window, oldest first, ending on `now`'s date.
    pub fn daily_revenue(&self, samples: &[&MetricSample], now: DateTime<Utc>) -> Vec<DailyRevenue> {
        let today = now.date_naive();
        let days = i64::from(self.settings.window_days);

        let mut by_day: BTreeMap<NaiveDate, (f64, usize)> = (0..days)
            .filter_map(|offset| today.checked_sub_signed(Duration::days(days - 1 - offset)))
            .map(|date| (date, (0.0, 0)))
            .collect();

        for sample in samples.iter().filter(|s| s.is_revenue()) {
            // Samples on the partial day before the first calendar day are not broken out
            if let Some(entry) = by_day.get_mut(&sample.timestamp.date_naive()) {
                entry.0 += sample.revenue_value();
                entry.1 += 1;
            }
        }

        by_day
            .into_iter()
            .map(|(date, (revenue, appointments))| DailyRevenue {
                date,
                revenue,
                appointments,
            })
            .collect()
    }

    pub fn revenue_summary(&self, samples: &[&MetricSample], now: DateTime<Utc>) -> RevenueSummary {
        let paid: Vec<&&MetricSample> = samples.iter().filter(|s| s.is_revenue()).collect();
        let total_revenue: f64 = paid.iter().map(|s| s.revenue_value()).sum();

        let daily = self.daily_revenue(samples, now);
        let series: Vec<f64> = daily.iter().map(|d| d.revenue).collect();

        RevenueSummary {
            total_revenue,
            average_daily_revenue: total_revenue / f64::from(self.settings.window_days),
            paid_appointments: paid.len(),
            trend_slope: linear_regression_slope(&series),
            daily,
        }
    }

    pub fn peak_hours(&self, samples: &[MetricSample]) -> PeakWindow {
        peak::peak_window(samples, self.settings.peak_window_hours)
    }

    pub fn clusters(&self, samples: &[MetricSample]) -> Vec<AppointmentCluster> {
        clustering::find_clusters(samples, self.settings.cluster_gap_minutes)
    }

    pub fn workload(&self, samples: &[MetricSample]) -> Vec<DoctorWorkload> {
        workload::doctor_workload(
            samples,
            self.settings.overload_gap_minutes,
            self.settings.underutilized_gap_minutes,
        )
    }

    /// Every analysis over the trailing window ending at `now`.
    #[instrument(skip(self, samples), fields(sample_count = samples.len()))]
    pub fn analyze(&self, samples: &[MetricSample], now: DateTime<Utc>) -> AnalyticsReport {
        let in_window = self.trailing_window(samples, now);
        debug!(
            "{} of {} samples fall inside the {}-day window",
            in_window.len(),
            samples.len(),
            self.settings.window_days
        );

        let owned: Vec<MetricSample> = in_window.iter().map(|s| (*s).clone()).collect();

        let report = AnalyticsReport {
            generated_at: now,
            window_start: self.window_start(now),
            window_days: self.settings.window_days,
            samples_in_window: in_window.len(),
            status: self.status_summary(&in_window),
            revenue: self.revenue_summary(&in_window, now),
            peak_hours: self.peak_hours(&owned),
            clusters: self.clusters(&owned),
            workload: self.workload(&owned),
        };

        info!(
            "Analytics: {} appointments, completion {:.1}%, revenue {:.2}",
            report.status.total, report.status.completion_rate, report.revenue.total_revenue
        );

        report
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Least-squares slope of `values` against their index; 0 when undefined.
pub fn linear_regression_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }

    let n_f = n as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (i, y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let denominator = n_f * sum_xx - sum_x * sum_x;
    if denominator.abs() < f64::EPSILON {
        return 0.0;
    }

    let slope = (n_f * sum_xy - sum_x * sum_y) / denominator;
    if slope.is_finite() {
        slope
    } else {
        0.0
    }
}
