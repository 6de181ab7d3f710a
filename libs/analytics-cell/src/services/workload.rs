use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::models::{AppointmentStatus, DoctorWorkload, MetricSample, WorkloadStatus};

/// Gap statistics between each doctor's consecutive appointments.
/// Cancelled appointments and samples without a doctor are ignored.
/// Busiest doctors come first.
pub fn doctor_workload(
    samples: &[MetricSample],
    overload_gap_minutes: f64,
    underutilized_gap_minutes: f64,
) -> Vec<DoctorWorkload> {
    let mut schedules: BTreeMap<Uuid, Vec<DateTime<Utc>>> = BTreeMap::new();
    for sample in samples {
        if sample.status == AppointmentStatus::Cancelled {
            continue;
        }
        if let Some(doctor_id) = sample.doctor_id {
            schedules.entry(doctor_id).or_default().push(sample.timestamp);
        }
    }

    let mut workloads: Vec<DoctorWorkload> = schedules
        .into_iter()
        .map(|(doctor_id, mut times)| {
            times.sort();
            let gaps: Vec<f64> = times
                .windows(2)
                .map(|pair| (pair[1] - pair[0]).num_seconds() as f64 / 60.0)
                .collect();

            let (average, min, max) = if gaps.is_empty() {
                (0.0, 0.0, 0.0)
            } else {
                let sum: f64 = gaps.iter().sum();
                let min = gaps.iter().copied().fold(f64::INFINITY, f64::min);
                let max = gaps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                (sum / gaps.len() as f64, min, max)
            };

            let status = if gaps.is_empty() {
                WorkloadStatus::Balanced
            } else if average < overload_gap_minutes {
                WorkloadStatus::Overloaded
            } else if average > underutilized_gap_minutes {
                WorkloadStatus::Underutilized
            } else {
                WorkloadStatus::Balanced
            };

            DoctorWorkload {
                doctor_id,
                appointments: times.len(),
                average_gap_minutes: average,
                min_gap_minutes: min,
                max_gap_minutes: max,
                status,
            }
        })
        .collect();

    workloads.sort_by(|a, b| b.appointments.cmp(&a.appointments));
    debug!("Computed workload for {} doctors", workloads.len());
    workloads
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn appointment(doctor_id: Uuid, hour: u32, minute: u32, status: AppointmentStatus) -> MetricSample {
        MetricSample {
            id: Uuid::new_v4(),
            timestamp: Utc.with_ymd_and_hms(2026, 10, 15, hour, minute, 0).unwrap(),
            value: 40.0,
            status,
            payment_status: Default::default(),
            doctor_id: Some(doctor_id),
            patient_id: None,
        }
    }

    #[test]
    fn test_overloaded_doctor() {
        let doctor = Uuid::new_v4();
        let samples = vec![
            appointment(doctor, 9, 0, AppointmentStatus::Completed),
            appointment(doctor, 9, 10, AppointmentStatus::Completed),
            appointment(doctor, 9, 30, AppointmentStatus::Confirmed),
        ];

        let workload = doctor_workload(&samples, 15.0, 120.0);
        assert_eq!(workload.len(), 1);
        assert_eq!(workload[0].appointments, 3);
        assert!((workload[0].average_gap_minutes - 15.0).abs() < 1e-9);
        assert_eq!(workload[0].min_gap_minutes, 10.0);
        assert_eq!(workload[0].max_gap_minutes, 20.0);
        // exactly at the threshold is not overloaded
        assert_eq!(workload[0].status, WorkloadStatus::Balanced);

        let busier = vec![
            appointment(doctor, 9, 0, AppointmentStatus::Completed),
            appointment(doctor, 9, 10, AppointmentStatus::Completed),
        ];
        assert_eq!(doctor_workload(&busier, 15.0, 120.0)[0].status, WorkloadStatus::Overloaded);
    }

    #[test]
    fn test_underutilized_doctor_and_cancellations_ignored() {
        let doctor = Uuid::new_v4();
        let samples = vec![
            appointment(doctor, 8, 0, AppointmentStatus::Completed),
            appointment(doctor, 9, 0, AppointmentStatus::Cancelled),
            appointment(doctor, 12, 0, AppointmentStatus::Completed),
        ];

        let workload = doctor_workload(&samples, 15.0, 120.0);
        assert_eq!(workload[0].appointments, 2);
        assert_eq!(workload[0].average_gap_minutes, 240.0);
        assert_eq!(workload[0].status, WorkloadStatus::Underutilized);
    }

    #[test]
    fn test_single_appointment_has_zero_gaps() {
        let doctor = Uuid::new_v4();
        let workload = doctor_workload(
            &[appointment(doctor, 10, 0, AppointmentStatus::Scheduled)],
            15.0,
            120.0,
        );

        assert_eq!(workload[0].average_gap_minutes, 0.0);
        assert_eq!(workload[0].min_gap_minutes, 0.0);
        assert_eq!(workload[0].max_gap_minutes, 0.0);
        assert_eq!(workload[0].status, WorkloadStatus::Balanced);
    }

    #[test]
    fn test_busiest_doctor_first() {
        let quiet = Uuid::new_v4();
        let busy = Uuid::new_v4();
        let samples = vec![
            appointment(quiet, 10, 0, AppointmentStatus::Completed),
            appointment(busy, 10, 0, AppointmentStatus::Completed),
            appointment(busy, 11, 0, AppointmentStatus::Completed),
        ];

        let workload = doctor_workload(&samples, 15.0, 120.0);
        assert_eq!(workload[0].doctor_id, busy);
        assert_eq!(workload[1].doctor_id, quiet);
        assert!(doctor_workload(&[], 15.0, 120.0).is_empty());
    }
}
