//! Competency matching between students and the roles or curricula that need them.
//!
//! Profiles are validated once when they are built; scoring and ranking work on those
//! validated profiles and never fail. The repository trait is the seam to whatever store
//! supplies catalog snapshots.

pub mod domain;
pub mod import;
pub mod profile;
pub mod ranker;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod vocabulary;

#[cfg(test)]
mod tests;

pub use domain::{
    CompetencyEvidence, CompetencyRequirement, CurriculumId, CurriculumItem, Importance,
    LevelScale, Role, RoleId, Student, StudentId,
};
pub use import::{CatalogError, SkillsImporter};
pub use profile::{Profile, ProfileBuilder, ProfileEntry, ProfileError, ProfileSource};
pub use ranker::{Direction, MatchRanker, MatchResult, RankedMatches, RankingWarning};
pub use repository::{CatalogRepository, CatalogSnapshot, RepositoryError};
pub use router::match_router;
pub use scoring::{
    score_pair, BreakdownEntry, InvalidWeightPolicy, PairScore, WeightPolicy,
    DEFAULT_PREFERRED_WEIGHT, DEFAULT_REQUIRED_WEIGHT,
};
pub use service::{MatchReport, MatchService, MatchServiceError, WarningView};
pub use vocabulary::{Competency, CompetencyId, Vocabulary};
