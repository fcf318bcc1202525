use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::{CurriculumItem, LevelScale, Role, Student};
use super::profile::{Profile, ProfileBuilder, ProfileError, ProfileSource};
use super::scoring::{score_pair, BreakdownEntry, WeightPolicy};
use super::vocabulary::Vocabulary;

/// Which side of a ranking query is the subject.
///
/// The needing side is always the role or curriculum and the having side is always the
/// student, whichever of the two is the subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Subject needs competencies; candidates are students.
    RoleToStudents,
    /// Subject is a student; candidates are roles.
    StudentToRoles,
    /// Subject is a student; candidates are curriculum items.
    StudentToCurricula,
}

/// Scored pairing between a subject and one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub subject_id: String,
    pub candidate_id: String,
    pub score: f64,
    pub breakdown: Vec<BreakdownEntry>,
}

impl MatchResult {
    /// Breakdown entries where the attained level falls short of the target.
    pub fn gaps(&self) -> impl Iterator<Item = &BreakdownEntry> {
        self.breakdown.iter().filter(|entry| entry.is_gap())
    }
}

/// Candidate excluded from a ranking because its profile could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingWarning {
    pub candidate_id: String,
    pub error: ProfileError,
}

/// Ranked results plus the candidates that had to be skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedMatches {
    pub results: Vec<MatchResult>,
    pub warnings: Vec<RankingWarning>,
}

/// Stateless ranker; every call works on the snapshot it is handed.
#[derive(Debug, Clone, Copy)]
pub struct MatchRanker<'a> {
    builder: ProfileBuilder<'a>,
    policy: WeightPolicy,
}

impl<'a> MatchRanker<'a> {
    pub fn new(vocabulary: &'a Vocabulary, scale: LevelScale, policy: WeightPolicy) -> Self {
        Self {
            builder: ProfileBuilder::new(vocabulary, scale),
            policy,
        }
    }

    pub fn builder(&self) -> &ProfileBuilder<'a> {
        &self.builder
    }

    pub fn policy(&self) -> &WeightPolicy {
        &self.policy
    }

    /// Rank students against a role. Fails only when the role's own profile is invalid.
    pub fn best_students_for_role(
        &self,
        role: &Role,
        students: &[Student],
        limit: Option<i64>,
    ) -> Result<RankedMatches, ProfileError> {
        let subject = role.compute_profile(&self.builder)?;
        Ok(self.rank_candidates(
            &subject,
            role.source_id(),
            Direction::RoleToStudents,
            students,
            limit,
        ))
    }

    /// Rank roles for a student. Fails only when the student's own profile is invalid.
    pub fn best_roles_for_student(
        &self,
        student: &Student,
        roles: &[Role],
        limit: Option<i64>,
    ) -> Result<RankedMatches, ProfileError> {
        let subject = student.compute_profile(&self.builder)?;
        Ok(self.rank_candidates(
            &subject,
            student.source_id(),
            Direction::StudentToRoles,
            roles,
            limit,
        ))
    }

    /// Rank school programs by how well the student already covers their targets.
    pub fn best_curricula_for_student(
        &self,
        student: &Student,
        curricula: &[CurriculumItem],
        limit: Option<i64>,
    ) -> Result<RankedMatches, ProfileError> {
        let subject = student.compute_profile(&self.builder)?;
        Ok(self.rank_candidates(
            &subject,
            student.source_id(),
            Direction::StudentToCurricula,
            curricula,
            limit,
        ))
    }

    /// Score every candidate against an already-built subject profile.
    ///
    /// Results are ordered by score descending, then candidate id ascending, and the
    /// limit is applied only after that sort. `limit <= 0` yields no results.
    ///
    /// Candidate ids are expected to be unique. Records sharing an id and a score keep
    /// their input order.
    pub fn rank_candidates<C>(
        &self,
        subject: &Profile,
        subject_id: &str,
        direction: Direction,
        candidates: &[C],
        limit: Option<i64>,
    ) -> RankedMatches
    where
        C: ProfileSource,
    {
        let mut ranked = RankedMatches::default();

        for candidate in candidates {
            let candidate_id = candidate.source_id();
            let profile = match candidate.compute_profile(&self.builder) {
                Ok(profile) => profile,
                Err(error) => {
                    ranked.warnings.push(RankingWarning {
                        candidate_id: candidate_id.to_string(),
                        error,
                    });
                    continue;
                }
            };

            let (have, need) = match direction {
                Direction::RoleToStudents => (&profile, subject),
                Direction::StudentToRoles | Direction::StudentToCurricula => (subject, &profile),
            };
            let pair = score_pair(have, need, &self.policy);

            ranked.results.push(MatchResult {
                subject_id: subject_id.to_string(),
                candidate_id: candidate_id.to_string(),
                score: pair.score,
                breakdown: pair.breakdown,
            });
        }

        ranked.results.sort_by(compare_results);
        apply_limit(&mut ranked.results, limit);
        ranked
    }
}

fn compare_results(left: &MatchResult, right: &MatchResult) -> Ordering {
    right
        .score
        .total_cmp(&left.score)
        .then_with(|| left.candidate_id.cmp(&right.candidate_id))
}

fn apply_limit(results: &mut Vec<MatchResult>, limit: Option<i64>) {
    match limit {
        None => {}
        Some(limit) if limit <= 0 => results.clear(),
        Some(limit) => results.truncate(usize::try_from(limit).unwrap_or(usize::MAX)),
    }
}
