use super::super::domain::Importance;
use super::super::profile::Profile;
use super::policy::WeightPolicy;
use super::BreakdownEntry;

pub(crate) struct ScoreTotals {
    pub weighted_sum: f64,
    pub total_weight: f64,
}

/// Share of a needed level that the attained level covers, capped at 1.
pub(crate) fn achievement_ratio(attained: Option<u8>, needed: u8) -> f64 {
    match attained {
        None => 0.0,
        Some(_) if needed == 0 => 1.0,
        Some(level) => f64::from(level.min(needed)) / f64::from(needed),
    }
}

/// One breakdown entry per competency in either profile, plus the weighted totals.
pub(crate) fn score_entries(
    have: &Profile,
    need: &Profile,
    policy: &WeightPolicy,
) -> (Vec<BreakdownEntry>, ScoreTotals) {
    let mut entries = Vec::with_capacity(need.len() + have.len());
    let mut totals = ScoreTotals {
        weighted_sum: 0.0,
        total_weight: 0.0,
    };

    for (competency_id, needed) in need.iter() {
        let attained = have.level_of(competency_id);
        let weight = policy.weight_for(needed.importance);
        let ratio = achievement_ratio(attained, needed.level);
        let contribution = weight * ratio;

        totals.weighted_sum += contribution;
        totals.total_weight += weight;

        entries.push(BreakdownEntry {
            competency_id: competency_id.clone(),
            required_level: Some(needed.level),
            attained_level: attained,
            importance: Some(needed.importance.unwrap_or(Importance::Required)),
            weight,
            contribution,
        });
    }

    for (competency_id, held) in have.iter() {
        if need.contains(competency_id) {
            continue;
        }

        entries.push(BreakdownEntry {
            competency_id: competency_id.clone(),
            required_level: None,
            attained_level: Some(held.level),
            importance: None,
            weight: 0.0,
            contribution: 0.0,
        });
    }

    (entries, totals)
}
