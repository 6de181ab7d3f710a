// libs/doctor-cell/src/services/ranking.rs
use std::cmp::Ordering;

use tracing::debug;

use crate::models::DoctorRecord;

/// Doctors kept in rank order: rating descending, then experience descending.
/// Doctors with equal rank stay in insertion order.
#[derive(Debug, Clone, Default)]
pub struct DoctorRankingIndex {
    doctors: Vec<DoctorRecord>,
}

/// `Less` means `a` ranks ahead of `b`.
pub fn rank_order(a: &DoctorRecord, b: &DoctorRecord) -> Ordering {
    b.normalized_rating()
        .total_cmp(&a.normalized_rating())
        .then_with(|| b.experience_years.cmp(&a.experience_years))
}

impl DoctorRankingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_doctors<I>(doctors: I) -> Self
    where
        I: IntoIterator<Item = DoctorRecord>,
    {
        let mut index = Self::new();
        for doctor in doctors {
            index.insert(doctor);
        }
        debug!("Built ranking index over {} doctors", index.len());
        index
    }

    pub fn insert(&mut self, doctor: DoctorRecord) {
        // Insert after every doctor ranked ahead of or level with the new one
        let position = self
            .doctors
            .partition_point(|existing| rank_order(existing, &doctor) != Ordering::Greater);
        self.doctors.insert(position, doctor);
    }

    /// Every doctor offering `specialization` with a rating of at least `min_rating`.
    pub fn range_by_specialization(&self, specialization: &str, min_rating: f64) -> Vec<DoctorRecord> {
        self.doctors
            .iter()
            .filter(|d| d.offers(specialization) && d.normalized_rating() >= min_rating)
            .cloned()
            .collect()
    }

    pub fn top_n(&self, n: usize) -> Vec<DoctorRecord> {
        self.doctors.iter().take(n).cloned().collect()
    }

    pub fn top_n_by_specialization(&self, specialization: &str, n: usize) -> Vec<DoctorRecord> {
        self.doctors
            .iter()
            .filter(|d| d.offers(specialization))
            .take(n)
            .cloned()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DoctorRecord> {
        self.doctors.iter()
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }
}

impl FromIterator<DoctorRecord> for DoctorRankingIndex {
    fn from_iter<I: IntoIterator<Item = DoctorRecord>>(iter: I) -> Self {
        Self::from_doctors(iter)
    }
}
