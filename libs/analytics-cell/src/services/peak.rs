// =====================================================================================
// PEAK HOUR DETECTION
// =====================================================================================

use chrono::Timelike;
use tracing::debug;

use crate::models::{MetricSample, PeakWindow, HOURS_PER_DAY};

/// Appointment count per hour of day (UTC).
pub fn hourly_distribution(samples: &[MetricSample]) -> [u32; HOURS_PER_DAY] {
    let mut buckets = [0u32; HOURS_PER_DAY];
    for sample in samples {
        buckets[sample.timestamp.hour() as usize] += 1;
    }
    buckets
}

/// Busiest run of `window_hours` consecutive hours. Windows do not wrap past
/// midnight; the earliest start wins ties. `window_hours` is clamped to 1..=24.
pub fn peak_window(samples: &[MetricSample], window_hours: u32) -> PeakWindow {
    let width = (window_hours as usize).clamp(1, HOURS_PER_DAY);
    let buckets = hourly_distribution(samples);

    let mut current: u32 = buckets[..width].iter().sum();
    let mut best_sum = current;
    let mut best_start = 0usize;

    for start in 1..=(HOURS_PER_DAY - width) {
        current = current + buckets[start + width - 1] - buckets[start - 1];
        if current > best_sum {
            best_sum = current;
            best_start = start;
        }
    }

    debug!(
        "Peak window starts at {:02}:00 with {} appointments",
        best_start, best_sum
    );

    PeakWindow {
        start_hour: best_start as u32,
        end_hour: (best_start + width - 1) as u32,
        window_hours: width as u32,
        appointment_count: best_sum,
        hourly_distribution: buckets.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn at_hours(hours: &[u32]) -> Vec<MetricSample> {
        hours
            .iter()
            .map(|h| MetricSample {
                id: Uuid::new_v4(),
                timestamp: Utc.with_ymd_and_hms(2026, 10, 12, *h, 15, 0).unwrap(),
                value: 0.0,
                status: Default::default(),
                payment_status: Default::default(),
                doctor_id: None,
                patient_id: None,
            })
            .collect()
    }

    fn brute_force(buckets: &[u32; HOURS_PER_DAY], width: usize) -> (usize, u32) {
        let mut best = (0, 0);
        for start in 0..=(HOURS_PER_DAY - width) {
            let sum: u32 = buckets[start..start + width].iter().sum();
            if sum > best.1 {
                best = (start, sum);
            }
        }
        best
    }

    #[test]
    fn test_peak_window_matches_brute_force() {
        let samples = at_hours(&[9, 9, 10, 14, 14, 14, 15]);
        let peak = peak_window(&samples, 3);

        assert_eq!(peak.start_hour, 13);
        assert_eq!(peak.end_hour, 15);
        assert_eq!(peak.appointment_count, 4);

        let (start, sum) = brute_force(&hourly_distribution(&samples), 3);
        assert_eq!(peak.start_hour as usize, start);
        assert_eq!(peak.appointment_count, sum);
    }

    #[test]
    fn test_empty_samples_have_zero_peak() {
        let peak = peak_window(&[], 3);
        assert_eq!(peak.start_hour, 0);
        assert_eq!(peak.appointment_count, 0);
        assert_eq!(peak.hourly_distribution.len(), 24);
    }

    #[test]
    fn test_window_width_is_clamped() {
        let samples = at_hours(&[0, 23]);

        let whole_day = peak_window(&samples, 48);
        assert_eq!(whole_day.window_hours, 24);
        assert_eq!(whole_day.appointment_count, 2);

        let single = peak_window(&samples, 0);
        assert_eq!(single.window_hours, 1);
        assert_eq!(single.start_hour, 0);
    }

    #[test]
    fn test_late_evening_peak_reaches_last_window() {
        let samples = at_hours(&[21, 22, 23, 23, 8]);
        let peak = peak_window(&samples, 3);

        assert_eq!(peak.start_hour, 21);
        assert_eq!(peak.end_hour, 23);
        assert_eq!(peak.appointment_count, 4);
    }
}
