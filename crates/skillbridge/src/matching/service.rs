use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::domain::{RoleId, StudentId};
use super::profile::ProfileError;
use super::ranker::{Direction, MatchRanker, MatchResult, RankedMatches};
use super::repository::{CatalogRepository, RepositoryError};
use super::vocabulary::{Competency, Vocabulary};
use crate::config::MatchingConfig;

/// Service pulling snapshots from the catalog and handing them to the ranker.
pub struct MatchService<R> {
    repository: Arc<R>,
    config: MatchingConfig,
}

impl<R> MatchService<R>
where
    R: CatalogRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: MatchingConfig) -> Self {
        Self { repository, config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Students ranked for a role.
    pub fn match_role(
        &self,
        role_id: &RoleId,
        limit: Option<i64>,
    ) -> Result<MatchReport, MatchServiceError> {
        let role = found(self.repository.role(role_id), || role_id.to_string())?;
        let vocabulary = self.vocabulary()?;
        let students = self.repository.students()?;

        debug!(role = %role_id, candidates = students.len(), "ranking students for role");
        let ranked = self
            .ranker(&vocabulary)
            .best_students_for_role(&role, &students, self.effective_limit(limit))?;

        Ok(self.report(role_id.to_string(), Direction::RoleToStudents, ranked))
    }

    /// Roles ranked for a student.
    pub fn match_student(
        &self,
        student_id: &StudentId,
        limit: Option<i64>,
    ) -> Result<MatchReport, MatchServiceError> {
        let student = found(self.repository.student(student_id), || {
            student_id.to_string()
        })?;
        let vocabulary = self.vocabulary()?;
        let roles = self.repository.roles()?;

        debug!(student = %student_id, candidates = roles.len(), "ranking roles for student");
        let ranked = self.ranker(&vocabulary).best_roles_for_student(
            &student,
            &roles,
            self.effective_limit(limit),
        )?;

        Ok(self.report(student_id.to_string(), Direction::StudentToRoles, ranked))
    }

    /// Curriculum programs ranked for a student.
    pub fn match_student_curricula(
        &self,
        student_id: &StudentId,
        limit: Option<i64>,
    ) -> Result<MatchReport, MatchServiceError> {
        let student = found(self.repository.student(student_id), || {
            student_id.to_string()
        })?;
        let vocabulary = self.vocabulary()?;
        let curricula = self.repository.curricula()?;

        debug!(student = %student_id, candidates = curricula.len(), "ranking curricula for student");
        let ranked = self.ranker(&vocabulary).best_curricula_for_student(
            &student,
            &curricula,
            self.effective_limit(limit),
        )?;

        Ok(self.report(student_id.to_string(), Direction::StudentToCurricula, ranked))
    }

    /// Competency vocabulary in id order.
    pub fn competencies(&self) -> Result<Vec<Competency>, MatchServiceError> {
        Ok(self.vocabulary()?.iter().cloned().collect())
    }

    fn vocabulary(&self) -> Result<Vocabulary, MatchServiceError> {
        Ok(Vocabulary::new(self.repository.competencies()?))
    }

    fn ranker<'v>(&self, vocabulary: &'v Vocabulary) -> MatchRanker<'v> {
        MatchRanker::new(vocabulary, self.config.scale, self.config.weights)
    }

    fn effective_limit(&self, limit: Option<i64>) -> Option<i64> {
        limit.or(self.config.default_limit)
    }

    fn report(&self, subject_id: String, direction: Direction, ranked: RankedMatches) -> MatchReport {
        let warnings = ranked
            .warnings
            .into_iter()
            .map(|warning| {
                warn!(
                    subject = %subject_id,
                    candidate = %warning.candidate_id,
                    error = %warning.error,
                    "candidate excluded from ranking"
                );
                WarningView {
                    candidate_id: warning.candidate_id,
                    reason: warning.error.to_string(),
                }
            })
            .collect();

        MatchReport {
            subject_id,
            direction,
            results: ranked.results,
            warnings,
        }
    }
}

fn found<T>(
    lookup: Result<Option<T>, RepositoryError>,
    subject: impl FnOnce() -> String,
) -> Result<T, MatchServiceError> {
    match lookup {
        Ok(Some(value)) => Ok(value),
        Ok(None) | Err(RepositoryError::NotFound) => {
            Err(MatchServiceError::SubjectNotFound(subject()))
        }
        Err(other) => Err(MatchServiceError::Repository(other)),
    }
}

/// Ranked matches ready for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub subject_id: String,
    pub direction: Direction,
    pub results: Vec<MatchResult>,
    pub warnings: Vec<WarningView>,
}

/// Rendered form of a candidate that was excluded from the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarningView {
    pub candidate_id: String,
    pub reason: String,
}

/// Error raised by the match service.
#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error("subject '{0}' not found")]
    SubjectNotFound(String),
    #[error("subject profile is invalid: {0}")]
    InvalidSubject(#[from] ProfileError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
