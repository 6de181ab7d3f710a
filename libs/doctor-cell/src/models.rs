use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorRecord {
    pub id: Uuid,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub specializations: BTreeSet<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub experience_years: u32,
    #[serde(default)]
    pub consultation_fee: f64,
    #[serde(default)]
    pub weekly_availability: Vec<WeeklySlot>,
}

impl DoctorRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Rating clamped to `[0, 5]`; non-finite ratings count as 0.
    pub fn normalized_rating(&self) -> f64 {
        if self.rating.is_finite() {
            self.rating.clamp(0.0, MAX_RATING)
        } else {
            0.0
        }
    }

    pub fn offers(&self, specialization: &str) -> bool {
        let wanted = specialization.trim();
        self.specializations
            .iter()
            .any(|s| s.trim().eq_ignore_ascii_case(wanted))
    }

    pub fn has_availability(&self) -> bool {
        !self.weekly_availability.is_empty()
    }

    pub fn is_available_at(&self, at: DateTime<Utc>) -> bool {
        let day = at.weekday().num_days_from_sunday() as u8;
        let time = at.time();
        self.weekly_availability
            .iter()
            .any(|slot| slot.contains(day, time))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySlot {
    pub day_of_week: u8, // 0 = Sunday, 1 = Monday, etc.
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default = "default_slot_duration")]
    pub slot_duration_minutes: u32,
}

fn default_slot_duration() -> u32 {
    30
}

impl WeeklySlot {
    /// Half-open: a booking starting exactly at `end_time` is outside the slot.
    pub fn contains(&self, day_of_week: u8, time: NaiveTime) -> bool {
        self.day_of_week == day_of_week && self.start_time <= time && time < self.end_time
    }

    /// Number of whole bookable slots in this window.
    pub fn slot_count(&self) -> u32 {
        if self.slot_duration_minutes == 0 || self.end_time <= self.start_time {
            return 0;
        }
        let minutes = (self.end_time - self.start_time).num_minutes().max(0) as u32;
        minutes / self.slot_duration_minutes
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingUrgency {
    Low,
    #[default]
    Medium,
    High,
    Emergency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub specialization: String,
    pub preferred_time: DateTime<Utc>,
    #[serde(default)]
    pub urgency: BookingUrgency,
    pub max_fee: Option<f64>,
    #[serde(default)]
    pub symptoms: String,
}

/// Relative weight of each match factor; the factors sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MatchWeights {
    pub specialization: f64,
    pub rating: f64,
    pub experience: f64,
    pub availability: f64,
    pub fee: f64,
    pub location: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            specialization: 0.30,
            rating: 0.25,
            experience: 0.15,
            availability: 0.15,
            fee: 0.10,
            location: 0.05,
        }
    }
}

impl MatchWeights {
    pub fn total(&self) -> f64 {
        self.specialization + self.rating + self.experience + self.availability + self.fee + self.location
    }
}

/// Weighted contribution of each factor, in score points.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoreBreakdown {
    pub specialization: f64,
    pub rating: f64,
    pub experience: f64,
    pub availability: f64,
    pub fee: f64,
    pub location: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        let sum = self.specialization + self.rating + self.experience + self.availability + self.fee + self.location;
        sum.clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorMatch {
    pub doctor: DoctorRecord,
    pub match_score: f64, // 0.0 to 100.0, higher is better match
    pub breakdown: ScoreBreakdown,
    pub match_reasons: Vec<String>,
}

// Request/Response DTOs

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankDoctorsRequest {
    pub doctors: Vec<DoctorRecord>,
    pub specialization: Option<String>,
    pub min_rating: Option<f64>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankDoctorsResponse {
    pub doctors: Vec<DoctorRecord>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDoctorsRequest {
    pub request: BookingRequest,
    pub doctors: Vec<DoctorRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDoctorsResponse {
    pub matches: Vec<DoctorMatch>,
    pub total: usize,
    pub average_score: f64,
}
