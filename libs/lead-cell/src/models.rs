use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_PRIORITY: u8 = 10;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LeadKind {
    Patient,
    Doctor,
}

impl LeadKind {
    pub fn priority_points(&self) -> u8 {
        match self {
            LeadKind::Doctor => 3,
            LeadKind::Patient => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    Website,
    Referral,
    SocialMedia,
    Advertisement,
    /// Missing or unrecognised source; earns no points.
    #[default]
    #[serde(other)]
    Unknown,
}

impl LeadSource {
    pub fn priority_points(&self) -> u8 {
        match self {
            LeadSource::Referral => 4,
            LeadSource::Advertisement => 3,
            LeadSource::Website => 2,
            LeadSource::SocialMedia => 1,
            LeadSource::Unknown => 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: Uuid,
    pub kind: LeadKind,
    #[serde(default)]
    pub source: LeadSource,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub medical_condition: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub interaction_count: u32,
    pub created_at: DateTime<Utc>,
}

/// A lead together with its freshly derived priority in `[0, 10]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrioritizedLead {
    #[serde(flatten)]
    pub lead: LeadRecord,
    pub priority: u8,
}

// Request/Response DTOs

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageRequest {
    pub leads: Vec<LeadRecord>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageResponse {
    pub leads: Vec<PrioritizedLead>,
    pub total: usize,
    pub distribution: BTreeMap<u8, usize>,
}
