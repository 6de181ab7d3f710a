use chrono::Duration;
use tracing::debug;

use crate::models::{AppointmentCluster, MetricSample, MAX_CLUSTER_GAP_MINUTES};

/// Groups time-sorted samples into runs whose consecutive gaps are at most
/// `max_gap_minutes` (clamped to a day). Largest clusters first; equal sizes stay chronological.
pub fn find_clusters(samples: &[MetricSample], max_gap_minutes: i64) -> Vec<AppointmentCluster> {
    if samples.is_empty() {
        return Vec::new();
    }

    let max_gap = Duration::minutes(max_gap_minutes.clamp(0, MAX_CLUSTER_GAP_MINUTES));
    let mut sorted: Vec<&MetricSample> = samples.iter().collect();
    sorted.sort_by_key(|s| s.timestamp);

    let mut clusters = Vec::new();
    let mut left = 0;
    while left < sorted.len() {
        let mut right = left;
        while right + 1 < sorted.len()
            && sorted[right + 1].timestamp - sorted[right].timestamp <= max_gap
        {
            right += 1;
        }

        let members = &sorted[left..=right];
        let start = members[0].timestamp;
        let end = members[members.len() - 1].timestamp;
        clusters.push(AppointmentCluster {
            start,
            end,
            size: members.len(),
            span_minutes: (end - start).num_minutes(),
            sample_ids: members.iter().map(|s| s.id).collect(),
        });

        left = right + 1;
    }

    clusters.sort_by(|a, b| b.size.cmp(&a.size));
    debug!("Found {} appointment clusters", clusters.len());
    clusters
}
