use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{CurriculumItem, Role, RoleId, Student, StudentId};
use super::import::CatalogError;
use super::vocabulary::{Competency, Vocabulary};

/// Read-only access to the catalog the matching engine works on.
///
/// Every call returns an owned snapshot; the engine never writes back.
pub trait CatalogRepository: Send + Sync {
    fn competencies(&self) -> Result<Vec<Competency>, RepositoryError>;
    fn students(&self) -> Result<Vec<Student>, RepositoryError>;
    fn roles(&self) -> Result<Vec<Role>, RepositoryError>;
    fn curricula(&self) -> Result<Vec<CurriculumItem>, RepositoryError>;
    fn student(&self, id: &StudentId) -> Result<Option<Student>, RepositoryError>;
    fn role(&self, id: &RoleId) -> Result<Option<Role>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Complete catalog held in memory, also the JSON format accepted by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub competencies: Vec<Competency>,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub curricula: Vec<CurriculumItem>,
}

impl CatalogSnapshot {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn vocabulary(&self) -> Vocabulary {
        self.competencies.iter().cloned().collect()
    }
}

impl CatalogRepository for CatalogSnapshot {
    fn competencies(&self) -> Result<Vec<Competency>, RepositoryError> {
        Ok(self.competencies.clone())
    }

    fn students(&self) -> Result<Vec<Student>, RepositoryError> {
        Ok(self.students.clone())
    }

    fn roles(&self) -> Result<Vec<Role>, RepositoryError> {
        Ok(self.roles.clone())
    }

    fn curricula(&self) -> Result<Vec<CurriculumItem>, RepositoryError> {
        Ok(self.curricula.clone())
    }

    fn student(&self, id: &StudentId) -> Result<Option<Student>, RepositoryError> {
        Ok(self
            .students
            .iter()
            .find(|student| &student.id == id)
            .cloned())
    }

    fn role(&self, id: &RoleId) -> Result<Option<Role>, RepositoryError> {
        Ok(self.roles.iter().find(|role| &role.id == id).cloned())
    }
}
