use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::config::MatchingConfig;
use crate::matching::domain::{
    CompetencyEvidence, CompetencyRequirement, CurriculumId, CurriculumItem, Importance, Role,
    RoleId, Student, StudentId,
};
use crate::matching::repository::{CatalogRepository, CatalogSnapshot, RepositoryError};
use crate::matching::vocabulary::{Competency, CompetencyId, Vocabulary};
use crate::matching::{match_router, MatchService};

pub(super) const TOLERANCE: f64 = 1e-9;

pub(super) fn competency(id: &str, name: &str) -> Competency {
    Competency {
        id: CompetencyId::from(id),
        name: name.to_string(),
        category: None,
    }
}

pub(super) fn competencies() -> Vec<Competency> {
    vec![
        competency("welding", "Welding"),
        competency("safety", "Safety (K3)"),
        competency("html", "HTML"),
        competency("sql", "SQL"),
        competency("teamwork", "Teamwork"),
    ]
}

pub(super) fn vocabulary() -> Vocabulary {
    Vocabulary::new(competencies())
}

pub(super) fn required(id: &str, level: i64) -> CompetencyRequirement {
    CompetencyRequirement {
        competency_id: CompetencyId::from(id),
        level,
        importance: Importance::Required,
    }
}

pub(super) fn preferred(id: &str, level: i64) -> CompetencyRequirement {
    CompetencyRequirement {
        competency_id: CompetencyId::from(id),
        level,
        importance: Importance::Preferred,
    }
}

pub(super) fn skill(id: &str, level: i64) -> CompetencyEvidence {
    CompetencyEvidence {
        competency_id: CompetencyId::from(id),
        level,
        evidence_link: None,
    }
}

pub(super) fn role(id: &str, requirements: Vec<CompetencyRequirement>) -> Role {
    Role {
        id: RoleId(id.to_string()),
        title: format!("Role {id}"),
        industry_id: "manufacturing".to_string(),
        requirements,
    }
}

pub(super) fn student(id: &str, skills: Vec<CompetencyEvidence>) -> Student {
    Student {
        id: StudentId(id.to_string()),
        name: format!("Student {id}"),
        skills,
    }
}

/// Needs welding 3 (required) and safety 2 (preferred).
pub(super) fn welding_role() -> Role {
    role(
        "role-weld",
        vec![required("welding", 3), preferred("safety", 2)],
    )
}

/// A covers everything, B partially covers welding, C has nothing relevant.
pub(super) fn welding_students() -> Vec<Student> {
    vec![
        student("s-a", vec![skill("welding", 3), skill("safety", 2)]),
        student("s-b", vec![skill("welding", 2)]),
        student("s-c", vec![skill("html", 4)]),
    ]
}

pub(super) fn sql_role() -> Role {
    role(
        "role-data",
        vec![required("sql", 3), preferred("teamwork", 3)],
    )
}

pub(super) fn curriculum(id: &str, requirements: Vec<CompetencyRequirement>) -> CurriculumItem {
    CurriculumItem {
        id: CurriculumId(id.to_string()),
        school_id: "school-1".to_string(),
        program: format!("Program {id}"),
        requirements,
    }
}

pub(super) fn snapshot() -> CatalogSnapshot {
    let mut students = welding_students();
    students.push(student(
        "s-bad",
        vec![skill("welding", 3), skill("unknown-x", 2)],
    ));

    CatalogSnapshot {
        competencies: competencies(),
        students,
        roles: vec![welding_role(), sql_role()],
        curricula: vec![
            curriculum("cur-mech", vec![required("welding", 4), required("safety", 4)]),
            curriculum("cur-data", vec![required("sql", 2)]),
        ],
    }
}

pub(super) fn build_service() -> MatchService<CatalogSnapshot> {
    MatchService::new(Arc::new(snapshot()), MatchingConfig::default())
}

pub(super) fn router_with_service<R>(service: MatchService<R>) -> axum::Router
where
    R: CatalogRepository + 'static,
{
    match_router(Arc::new(service))
}

pub(super) struct UnavailableCatalog;

impl CatalogRepository for UnavailableCatalog {
    fn competencies(&self) -> Result<Vec<Competency>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn students(&self) -> Result<Vec<Student>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn roles(&self) -> Result<Vec<Role>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn curricula(&self) -> Result<Vec<CurriculumItem>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn student(&self, _id: &StudentId) -> Result<Option<Student>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn role(&self, _id: &RoleId) -> Result<Option<Role>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Store that reports missing records as errors rather than `None`.
pub(super) struct StrictCatalog;

impl CatalogRepository for StrictCatalog {
    fn competencies(&self) -> Result<Vec<Competency>, RepositoryError> {
        Ok(competencies())
    }

    fn students(&self) -> Result<Vec<Student>, RepositoryError> {
        Ok(Vec::new())
    }

    fn roles(&self) -> Result<Vec<Role>, RepositoryError> {
        Ok(Vec::new())
    }

    fn curricula(&self) -> Result<Vec<CurriculumItem>, RepositoryError> {
        Ok(Vec::new())
    }

    fn student(&self, _id: &StudentId) -> Result<Option<Student>, RepositoryError> {
        Err(RepositoryError::NotFound)
    }

    fn role(&self, _id: &RoleId) -> Result<Option<Role>, RepositoryError> {
        Err(RepositoryError::NotFound)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
