use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for a competency shared by students, roles, and curricula.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompetencyId(pub String);

impl CompetencyId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompetencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CompetencyId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A named skill tracked across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competency {
    pub id: CompetencyId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Canonical set of competencies that profiles are validated against.
///
/// Ids are unique; when a seed lists the same id twice the first entry is kept.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: BTreeMap<CompetencyId, Competency>,
}

impl Vocabulary {
    pub fn new<I>(competencies: I) -> Self
    where
        I: IntoIterator<Item = Competency>,
    {
        let mut entries = BTreeMap::new();
        for competency in competencies {
            entries.entry(competency.id.clone()).or_insert(competency);
        }
        Self { entries }
    }

    pub fn contains(&self, id: &CompetencyId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &CompetencyId) -> Option<&Competency> {
        self.entries.get(id)
    }

    /// Display name for an id, falling back to the raw id.
    pub fn name_of<'a>(&'a self, id: &'a CompetencyId) -> &'a str {
        self.entries
            .get(id)
            .map(|competency| competency.name.as_str())
            .unwrap_or_else(|| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Competency> {
        self.entries.values()
    }
}

impl FromIterator<Competency> for Vocabulary {
    fn from_iter<T: IntoIterator<Item = Competency>>(iter: T) -> Self {
        Self::new(iter)
    }
}
