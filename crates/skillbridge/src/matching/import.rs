use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{CompetencyEvidence, Student, StudentId};
use super::vocabulary::CompetencyId;

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read catalog data: {}", err),
            CatalogError::Csv(err) => write!(f, "invalid skills CSV data: {}", err),
            CatalogError::Json(err) => write!(f, "invalid catalog JSON: {}", err),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Csv(err) => Some(err),
            CatalogError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Loads student skill sheets exported as CSV.
///
/// Expected header: `student_id,student_name,competency_id,level,evidence_link`. One row per
/// skill; rows for the same student are grouped in first-seen order. Competency ids and
/// levels are not validated here, that happens when the profile is built.
pub struct SkillsImporter;

impl SkillsImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Student>, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Student>, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut students: Vec<Student> = Vec::new();

        for row in csv_reader.deserialize::<SkillRow>() {
            let row = row?;
            let evidence = CompetencyEvidence {
                competency_id: CompetencyId(row.competency_id),
                level: row.level,
                evidence_link: row.evidence_link,
            };

            match students
                .iter_mut()
                .find(|student| student.id.0 == row.student_id)
            {
                Some(student) => student.skills.push(evidence),
                None => students.push(Student {
                    id: StudentId(row.student_id),
                    name: row.student_name,
                    skills: vec![evidence],
                }),
            }
        }

        Ok(students)
    }
}

#[derive(Debug, Deserialize)]
struct SkillRow {
    student_id: String,
    student_name: String,
    competency_id: String,
    level: i64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    evidence_link: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
