mod policy;
mod rules;

pub use policy::{
    InvalidWeightPolicy, WeightPolicy, DEFAULT_PREFERRED_WEIGHT, DEFAULT_REQUIRED_WEIGHT,
};

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::Importance;
use super::profile::Profile;
use super::vocabulary::CompetencyId;

/// Per-competency contribution to a score, kept for transparent explanations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub competency_id: CompetencyId,
    pub required_level: Option<u8>,
    pub attained_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance: Option<Importance>,
    pub weight: f64,
    /// `weight * achievement_ratio`; zero for competencies the need side does not ask for.
    pub contribution: f64,
}

impl BreakdownEntry {
    /// True when a level is asked for and the attained level (missing counts as 0) falls short.
    pub fn is_gap(&self) -> bool {
        match self.required_level {
            Some(required) => self.attained_level.unwrap_or(0) < required,
            None => false,
        }
    }
}

/// Normalized score plus the ordered explanation behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairScore {
    pub score: f64,
    pub breakdown: Vec<BreakdownEntry>,
}

/// Score how well `have` covers `need` under the given weights.
///
/// An empty `need` is trivially satisfied and scores 1.0, as does a need side whose
/// weights are all zero. Competencies only present in `have` are listed with a zero
/// contribution and never change the score.
pub fn score_pair(have: &Profile, need: &Profile, policy: &WeightPolicy) -> PairScore {
    let (mut breakdown, totals) = rules::score_entries(have, need, policy);
    breakdown.sort_by(compare_entries);

    let score = if need.is_empty() || totals.total_weight <= 0.0 {
        1.0
    } else {
        (totals.weighted_sum / totals.total_weight).clamp(0.0, 1.0)
    };

    PairScore { score, breakdown }
}

fn compare_entries(left: &BreakdownEntry, right: &BreakdownEntry) -> Ordering {
    right
        .contribution
        .total_cmp(&left.contribution)
        .then_with(|| left.competency_id.cmp(&right.competency_id))
}
