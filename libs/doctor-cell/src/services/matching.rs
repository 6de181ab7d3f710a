// libs/doctor-cell/src/services/matching.rs
use tracing::{debug, info};

use shared_config::AppConfig;

use crate::models::{
    BookingRequest, BookingUrgency, DoctorMatch, DoctorRecord, MatchWeights, ScoreBreakdown,
};

pub const DEFAULT_MAX_MATCHES: usize = 5;

/// Partial credit for a doctor who publishes availability, just not at the requested time.
const OFF_SLOT_AVAILABILITY_POINTS: f64 = 20.0;

pub struct MatchScorer {
    weights: MatchWeights,
    max_results: usize,
}

impl Default for MatchScorer {
    fn default() -> Self {
        Self {
            weights: MatchWeights::default(),
            max_results: DEFAULT_MAX_MATCHES,
        }
    }
}

impl MatchScorer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            weights: MatchWeights::default(),
            max_results: config.matching_max_results.max(1),
        }
    }

    pub fn with_weights(mut self, weights: MatchWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Relevance of `doctor` for `request`, in `[0, 100]`.
    pub fn score(&self, doctor: &DoctorRecord, request: &BookingRequest) -> f64 {
        self.breakdown(doctor, request).total()
    }

    pub fn breakdown(&self, doctor: &DoctorRecord, request: &BookingRequest) -> ScoreBreakdown {
        let w = &self.weights;

        let specialization_points = if doctor.offers(&request.specialization) { 100.0 } else { 0.0 };
        let rating_points = (doctor.normalized_rating() * 20.0).min(100.0);
        let experience_points = (f64::from(doctor.experience_years) * 5.0).min(100.0);

        let availability_points = if !doctor.has_availability() {
            0.0
        } else if doctor.is_available_at(request.preferred_time) {
            100.0
        } else {
            OFF_SLOT_AVAILABILITY_POINTS
        };

        ScoreBreakdown {
            specialization: specialization_points * w.specialization,
            rating: rating_points * w.rating,
            experience: experience_points * w.experience,
            availability: availability_points * w.availability,
            fee: fee_points(doctor.consultation_fee, request.max_fee) * w.fee,
            // No location data on either side yet
            location: 0.0,
        }
    }

    /// Best matching doctors by descending score; equal scores keep input order.
    pub fn find_best_matches(&self, request: &BookingRequest, doctors: &[DoctorRecord]) -> Vec<DoctorMatch> {
        debug!(
            "Scoring {} doctors for specialization '{}'",
            doctors.len(),
            request.specialization
        );

        let mut matches: Vec<DoctorMatch> = doctors
            .iter()
            .map(|doctor| {
                let breakdown = self.breakdown(doctor, request);
                DoctorMatch {
                    doctor: doctor.clone(),
                    match_score: breakdown.total(),
                    match_reasons: self.generate_match_reasons(doctor, request),
                    breakdown,
                }
            })
            .collect();

        // sort_by is stable
        matches.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
        matches.truncate(self.max_results);

        let avg_score = average_score(&matches);
        info!(
            "Found {} matching doctors with average score: {:.2}",
            matches.len(),
            avg_score
        );

        matches
    }

    fn generate_match_reasons(&self, doctor: &DoctorRecord, request: &BookingRequest) -> Vec<String> {
        let mut reasons = Vec::new();

        if doctor.offers(&request.specialization) {
            reasons.push(format!("Specializes in {}", request.specialization));
        }

        if doctor.is_available_at(request.preferred_time) {
            if request.urgency == BookingUrgency::Emergency {
                reasons.push("Available for an emergency consultation at the requested time".to_string());
            } else {
                reasons.push("Available at the requested time".to_string());
            }
        } else if doctor.has_availability() {
            let weekly_slots: u32 = doctor.weekly_availability.iter().map(|s| s.slot_count()).sum();
            reasons.push(format!("Offers {} consultation slots per week", weekly_slots));
        }

        if doctor.normalized_rating() >= 4.0 {
            reasons.push(format!("Highly rated ({:.1}/5.0)", doctor.normalized_rating()));
        }

        if doctor.experience_years >= 5 {
            reasons.push(format!("{} years of experience", doctor.experience_years));
        }

        if let Some(max_fee) = request.max_fee {
            if max_fee > 0.0 && doctor.consultation_fee <= max_fee {
                reasons.push(format!("Consultation fee {:.2} within budget", doctor.consultation_fee));
            }
        }

        reasons
    }
}

/// Fee affordability in points. No cap means the fee is never a barrier;
/// a cap of zero or below yields nothing rather than dividing by zero.
fn fee_points(fee: f64, max_fee: Option<f64>) -> f64 {
    let fee = if fee.is_finite() { fee.max(0.0) } else { 0.0 };

    match max_fee {
        None => 100.0,
        Some(cap) if !cap.is_finite() || cap <= 0.0 => 0.0,
        Some(cap) if fee > cap => 0.0,
        Some(cap) => ((cap - fee) / cap * 100.0).clamp(0.0, 100.0),
    }
}

pub fn average_score(matches: &[DoctorMatch]) -> f64 {
    if matches.is_empty() {
        0.0
    } else {
        matches.iter().map(|m| m.match_score).sum::<f64>() / matches.len() as f64
    }
}
