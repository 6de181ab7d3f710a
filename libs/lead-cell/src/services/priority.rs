use regex::Regex;
use tracing::debug;

use crate::models::{LeadRecord, PrioritizedLead, MAX_PRIORITY};

pub const URGENT_KEYWORDS: [&str; 4] = ["emergency", "chest pain", "breathing difficulty", "severe pain"];
pub const HIGH_DEMAND_SPECIALIZATIONS: [&str; 4] = ["cardiology", "neurology", "oncology", "psychiatry"];

const URGENT_CONDITION_POINTS: u32 = 5;
const HIGH_DEMAND_POINTS: u32 = 3;
const MAX_INTERACTION_POINTS: u32 = 2;

/// Derives lead priorities. Holds only the compiled keyword patterns, so one
/// instance can be shared by every request.
pub struct LeadPrioritizer {
    urgent_patterns: Vec<Regex>,
    high_demand_specializations: Vec<String>,
}

impl Default for LeadPrioritizer {
    fn default() -> Self {
        Self::new(&URGENT_KEYWORDS, &HIGH_DEMAND_SPECIALIZATIONS)
    }
}

impl LeadPrioritizer {
    pub fn new(urgent_keywords: &[&str], high_demand_specializations: &[&str]) -> Self {
        let urgent_patterns = urgent_keywords
            .iter()
            .filter_map(|k| Regex::new(&format!("(?i){}", regex::escape(k))).ok())
            .collect();

        Self {
            urgent_patterns,
            high_demand_specializations: high_demand_specializations
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
        }
    }

    pub fn has_urgent_condition(&self, lead: &LeadRecord) -> bool {
        lead.medical_condition
            .as_deref()
            .map(|condition| self.urgent_patterns.iter().any(|p| p.is_match(condition)))
            .unwrap_or(false)
    }

    pub fn is_high_demand(&self, lead: &LeadRecord) -> bool {
        lead.specialization
            .as_deref()
            .map(|s| {
                let wanted = s.trim().to_lowercase();
                self.high_demand_specializations.iter().any(|h| *h == wanted)
            })
            .unwrap_or(false)
    }

    /// Priority in `[0, 10]`. Interactions earn half a point each, capped at
    /// two points; only whole points count.
    pub fn priority(&self, lead: &LeadRecord) -> u8 {
        let mut score = u32::from(lead.kind.priority_points()) + u32::from(lead.source.priority_points());

        if self.has_urgent_condition(lead) {
            score += URGENT_CONDITION_POINTS;
        }

        if self.is_high_demand(lead) {
            score += HIGH_DEMAND_POINTS;
        }

        score += (lead.interaction_count / 2).min(MAX_INTERACTION_POINTS);

        let priority = score.min(u32::from(MAX_PRIORITY)) as u8;
        debug!("Lead {} scored {} (raw {})", lead.id, priority, score);
        priority
    }

    pub fn prioritize(&self, lead: LeadRecord) -> PrioritizedLead {
        let priority = self.priority(&lead);
        PrioritizedLead { lead, priority }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LeadKind, LeadSource};
    use chrono::Utc;
    use uuid::Uuid;

    fn lead(kind: LeadKind, source: LeadSource) -> LeadRecord {
        LeadRecord {
            id: Uuid::new_v4(),
            kind,
            source,
            name: None,
            email: None,
            medical_condition: None,
            specialization: None,
            interaction_count: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_urgent_referral_patient_is_clamped() {
        let prioritizer = LeadPrioritizer::default();
        let mut patient = lead(LeadKind::Patient, LeadSource::Referral);
        patient.medical_condition = Some("chest pain".to_string());

        // 2 + 4 + 5 = 11
        assert_eq!(prioritizer.priority(&patient), 10);
    }

    #[test]
    fn test_kind_and_source_points() {
        let prioritizer = LeadPrioritizer::default();

        assert_eq!(prioritizer.priority(&lead(LeadKind::Doctor, LeadSource::Website)), 5);
        assert_eq!(prioritizer.priority(&lead(LeadKind::Patient, LeadSource::SocialMedia)), 3);
        assert_eq!(prioritizer.priority(&lead(LeadKind::Patient, LeadSource::Advertisement)), 5);
        assert_eq!(prioritizer.priority(&lead(LeadKind::Doctor, LeadSource::Unknown)), 3);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive_substring() {
        let prioritizer = LeadPrioritizer::default();
        let mut patient = lead(LeadKind::Patient, LeadSource::SocialMedia);

        patient.medical_condition = Some("Sudden SEVERE PAIN in the left arm".to_string());
        assert!(prioritizer.has_urgent_condition(&patient));

        patient.medical_condition = Some("seasonal allergies".to_string());
        assert!(!prioritizer.has_urgent_condition(&patient));
    }

    #[test]
    fn test_high_demand_specialization() {
        let prioritizer = LeadPrioritizer::default();
        let mut doctor = lead(LeadKind::Doctor, LeadSource::SocialMedia);
        doctor.specialization = Some(" Neurology ".to_string());

        assert!(prioritizer.is_high_demand(&doctor));
        assert_eq!(prioritizer.priority(&doctor), 3 + 1 + 3);

        doctor.specialization = Some("dermatology".to_string());
        assert!(!prioritizer.is_high_demand(&doctor));
    }

    #[test]
    fn test_interaction_points_are_capped_and_floored() {
        let prioritizer = LeadPrioritizer::default();
        let mut patient = lead(LeadKind::Patient, LeadSource::SocialMedia);

        patient.interaction_count = 1;
        assert_eq!(prioritizer.priority(&patient), 3);

        patient.interaction_count = 3;
        assert_eq!(prioritizer.priority(&patient), 4);

        patient.interaction_count = 40;
        assert_eq!(prioritizer.priority(&patient), 5);
    }
}
