use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{
    CompetencyEvidence, CompetencyRequirement, CurriculumItem, Importance, LevelScale, Role,
    Student,
};
use super::vocabulary::{CompetencyId, Vocabulary};

/// Validation errors raised while building a profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("unknown competency '{competency_id}'")]
    InvalidCompetencyReference { competency_id: CompetencyId },
    #[error("level {level} for '{competency_id}' outside scale {min}..={max}")]
    InvalidLevelRange {
        competency_id: CompetencyId,
        level: i64,
        min: u8,
        max: u8,
    },
    #[error("competency '{competency_id}' listed more than once")]
    DuplicateCompetency { competency_id: CompetencyId },
}

/// Level (and importance, on the needing side) recorded for one competency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileEntry {
    pub level: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance: Option<Importance>,
}

/// Normalized mapping from competency id to level for one entity.
///
/// Only [`ProfileBuilder`] produces profiles, so every id is known to the vocabulary and
/// every level sits inside the scale the builder was configured with.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Profile {
    entries: BTreeMap<CompetencyId, ProfileEntry>,
}

impl Profile {
    pub fn get(&self, id: &CompetencyId) -> Option<&ProfileEntry> {
        self.entries.get(id)
    }

    pub fn level_of(&self, id: &CompetencyId) -> Option<u8> {
        self.entries.get(id).map(|entry| entry.level)
    }

    pub fn contains(&self, id: &CompetencyId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CompetencyId, &ProfileEntry)> {
        self.entries.iter()
    }
}

/// Turns raw requirement/evidence records into validated profiles.
#[derive(Debug, Clone, Copy)]
pub struct ProfileBuilder<'a> {
    vocabulary: &'a Vocabulary,
    scale: LevelScale,
}

impl<'a> ProfileBuilder<'a> {
    pub fn new(vocabulary: &'a Vocabulary, scale: LevelScale) -> Self {
        Self { vocabulary, scale }
    }

    pub fn scale(&self) -> LevelScale {
        self.scale
    }

    pub fn vocabulary(&self) -> &'a Vocabulary {
        self.vocabulary
    }

    /// Profile describing what a role or curriculum needs.
    pub fn need_profile(
        &self,
        requirements: &[CompetencyRequirement],
    ) -> Result<Profile, ProfileError> {
        self.collect(requirements.iter().map(|requirement| {
            (
                &requirement.competency_id,
                requirement.level,
                Some(requirement.importance),
            )
        }))
    }

    /// Profile describing what a student has demonstrated.
    pub fn have_profile(&self, skills: &[CompetencyEvidence]) -> Result<Profile, ProfileError> {
        self.collect(
            skills
                .iter()
                .map(|skill| (&skill.competency_id, skill.level, None)),
        )
    }

    pub fn for_role(&self, role: &Role) -> Result<Profile, ProfileError> {
        self.need_profile(&role.requirements)
    }

    pub fn for_curriculum(&self, item: &CurriculumItem) -> Result<Profile, ProfileError> {
        self.need_profile(&item.requirements)
    }

    pub fn for_student(&self, student: &Student) -> Result<Profile, ProfileError> {
        self.have_profile(&student.skills)
    }

    fn collect<'r, I>(&self, rows: I) -> Result<Profile, ProfileError>
    where
        I: Iterator<Item = (&'r CompetencyId, i64, Option<Importance>)>,
    {
        let mut entries = BTreeMap::new();

        for (competency_id, raw_level, importance) in rows {
            if !self.vocabulary.contains(competency_id) {
                return Err(ProfileError::InvalidCompetencyReference {
                    competency_id: competency_id.clone(),
                });
            }

            let level = match u8::try_from(raw_level) {
                Ok(level) if self.scale.contains(level) => level,
                _ => {
                    return Err(ProfileError::InvalidLevelRange {
                        competency_id: competency_id.clone(),
                        level: raw_level,
                        min: self.scale.min(),
                        max: self.scale.max(),
                    })
                }
            };

            match entries.entry(competency_id.clone()) {
                Entry::Occupied(_) => {
                    return Err(ProfileError::DuplicateCompetency {
                        competency_id: competency_id.clone(),
                    })
                }
                Entry::Vacant(slot) => {
                    slot.insert(ProfileEntry { level, importance });
                }
            }
        }

        Ok(Profile { entries })
    }
}

/// Entities that can be turned into a profile and ranked.
pub trait ProfileSource {
    /// Identifier reported in match results and warnings.
    fn source_id(&self) -> &str;

    fn compute_profile(&self, builder: &ProfileBuilder<'_>) -> Result<Profile, ProfileError>;
}

impl ProfileSource for Role {
    fn source_id(&self) -> &str {
        &self.id.0
    }

    fn compute_profile(&self, builder: &ProfileBuilder<'_>) -> Result<Profile, ProfileError> {
        builder.for_role(self)
    }
}

impl ProfileSource for CurriculumItem {
    fn source_id(&self) -> &str {
        &self.id.0
    }

    fn compute_profile(&self, builder: &ProfileBuilder<'_>) -> Result<Profile, ProfileError> {
        builder.for_curriculum(self)
    }
}

impl ProfileSource for Student {
    fn source_id(&self) -> &str {
        &self.id.0
    }

    fn compute_profile(&self, builder: &ProfileBuilder<'_>) -> Result<Profile, ProfileError> {
        builder.for_student(self)
    }
}
