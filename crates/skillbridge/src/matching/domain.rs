use std::fmt;

use serde::{Deserialize, Serialize};

use super::vocabulary::CompetencyId;

/// Identifier wrapper for students.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub String);

/// Identifier wrapper for industry roles.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub String);

/// Identifier wrapper for curriculum items (one school program).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurriculumId(pub String);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for CurriculumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a requirement must be met or merely improves the fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Required,
    Preferred,
}

impl Importance {
    pub const fn label(self) -> &'static str {
        match self {
            Importance::Required => "required",
            Importance::Preferred => "preferred",
        }
    }
}

/// Inclusive bounds of the competency level scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelScale {
    min: u8,
    max: u8,
}

impl LevelScale {
    pub const DEFAULT_MIN: u8 = 0;
    pub const DEFAULT_MAX: u8 = 5;

    /// Returns `None` when `min > max`.
    pub fn new(min: u8, max: u8) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    pub fn contains(&self, level: u8) -> bool {
        (self.min..=self.max).contains(&level)
    }
}

impl Default for LevelScale {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

/// A needed competency attached to a role or curriculum item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetencyRequirement {
    pub competency_id: CompetencyId,
    /// Raw level as supplied; checked against the scale when the profile is built.
    pub level: i64,
    pub importance: Importance,
}

/// A student's claimed attainment of a competency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetencyEvidence {
    pub competency_id: CompetencyId,
    pub level: i64,
    /// Opaque reference (usually a portfolio or certificate URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_link: Option<String>,
}

/// Industry role offered by a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub title: String,
    pub industry_id: String,
    #[serde(default)]
    pub requirements: Vec<CompetencyRequirement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<CompetencyEvidence>,
}

/// Target levels a school program teaches towards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumItem {
    pub id: CurriculumId,
    pub school_id: String,
    pub program: String,
    #[serde(default)]
    pub requirements: Vec<CompetencyRequirement>,
}
