use metrics_exporter_prometheus::PrometheusHandle;
use skillbridge::error::AppError;
use skillbridge::matching::{
    CatalogSnapshot, Competency, CompetencyEvidence, CompetencyId, CompetencyRequirement,
    CurriculumId, CurriculumItem, Importance, Role, RoleId, SkillsImporter, Student, StudentId,
};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Catalog from a JSON snapshot (or the demo data), optionally replacing its students
/// with a skills CSV export.
pub(crate) fn load_catalog(
    catalog: Option<PathBuf>,
    skills_csv: Option<PathBuf>,
) -> Result<CatalogSnapshot, AppError> {
    let mut snapshot = match catalog {
        Some(path) => CatalogSnapshot::from_path(path)?,
        None => demo_catalog(),
    };

    if let Some(path) = skills_csv {
        snapshot.students = SkillsImporter::from_path(path)?;
    }

    Ok(snapshot)
}

fn competency(id: &str, name: &str, category: &str) -> Competency {
    Competency {
        id: CompetencyId::from(id),
        name: name.to_string(),
        category: Some(category.to_string()),
    }
}

fn requirement(id: &str, level: i64, importance: Importance) -> CompetencyRequirement {
    CompetencyRequirement {
        competency_id: CompetencyId::from(id),
        level,
        importance,
    }
}

fn evidence(id: &str, level: i64, link: Option<&str>) -> CompetencyEvidence {
    CompetencyEvidence {
        competency_id: CompetencyId::from(id),
        level,
        evidence_link: link.map(str::to_string),
    }
}

/// Sample vocational catalog: two schools, three companies, four students.
pub(crate) fn demo_catalog() -> CatalogSnapshot {
    use Importance::{Preferred, Required};

    let competencies = vec![
        competency("html", "HTML", "Web Development"),
        competency("css", "CSS", "Web Development"),
        competency("javascript", "JavaScript", "Web Development"),
        competency("sql", "SQL", "Data & Databases"),
        competency("git", "Git Basics", "Tools"),
        competency("ui-ux", "UI/UX Basics", "Design"),
        competency("communication", "Communication", "Soft Skills"),
        competency("teamwork", "Teamwork", "Soft Skills"),
        competency("plc", "PLC Basics", "Industrial Automation"),
        competency("sensors", "Sensor & Actuator Basics", "Industrial Automation"),
        competency("cnc", "CNC Basics", "Manufacturing"),
        competency("safety-k3", "Safety (K3)", "Manufacturing"),
    ];

    let curricula = vec![
        CurriculumItem {
            id: CurriculumId("smkn1-jakarta-rpl".to_string()),
            school_id: "smkn1-jakarta".to_string(),
            program: "RPL (Software Engineering)".to_string(),
            requirements: vec![
                requirement("html", 4, Required),
                requirement("css", 4, Required),
                requirement("javascript", 3, Required),
                requirement("sql", 3, Required),
                requirement("git", 3, Required),
                requirement("communication", 3, Required),
                requirement("teamwork", 3, Required),
            ],
        },
        CurriculumItem {
            id: CurriculumId("smk-telkom-tkj".to_string()),
            school_id: "smk-telkom-bandung".to_string(),
            program: "TKJ (Computer & Network)".to_string(),
            requirements: vec![
                requirement("sql", 2, Required),
                requirement("git", 2, Required),
                requirement("communication", 3, Required),
                requirement("teamwork", 3, Required),
            ],
        },
        CurriculumItem {
            id: CurriculumId("smk-telkom-mechatronics".to_string()),
            school_id: "smk-telkom-bandung".to_string(),
            program: "Mechatronics".to_string(),
            requirements: vec![
                requirement("plc", 3, Required),
                requirement("sensors", 3, Required),
                requirement("safety-k3", 4, Required),
            ],
        },
    ];

    let roles = vec![
        Role {
            id: RoleId("web-intern".to_string()),
            title: "Web Intern (Frontend)".to_string(),
            industry_id: "nusantara-tech".to_string(),
            requirements: vec![
                requirement("html", 3, Required),
                requirement("css", 3, Required),
                requirement("javascript", 2, Required),
                requirement("git", 2, Preferred),
                requirement("ui-ux", 2, Preferred),
                requirement("communication", 3, Preferred),
            ],
        },
        Role {
            id: RoleId("data-assistant".to_string()),
            title: "Junior Data Assistant".to_string(),
            industry_id: "nusantara-tech".to_string(),
            requirements: vec![
                requirement("sql", 3, Required),
                requirement("communication", 3, Required),
                requirement("teamwork", 3, Preferred),
            ],
        },
        Role {
            id: RoleId("cnc-trainee".to_string()),
            title: "CNC Operator Trainee".to_string(),
            industry_id: "bali-manufacturing".to_string(),
            requirements: vec![
                requirement("cnc", 2, Required),
                requirement("safety-k3", 3, Required),
                requirement("teamwork", 3, Preferred),
            ],
        },
        Role {
            id: RoleId("plc-intern".to_string()),
            title: "PLC Technician Intern".to_string(),
            industry_id: "surabaya-automation".to_string(),
            requirements: vec![
                requirement("plc", 3, Required),
                requirement("sensors", 2, Required),
                requirement("safety-k3", 3, Required),
                requirement("communication", 3, Preferred),
            ],
        },
    ];

    let students = vec![
        Student {
            id: StudentId("ayu-pratama".to_string()),
            name: "Ayu Pratama".to_string(),
            skills: vec![
                evidence("html", 4, Some("https://example.com/ayu-landing")),
                evidence("css", 4, Some("https://example.com/ayu-landing")),
                evidence("javascript", 3, None),
                evidence("git", 3, Some("https://example.com/ayu-git")),
                evidence("ui-ux", 3, None),
                evidence("communication", 4, None),
                evidence("teamwork", 4, None),
            ],
        },
        Student {
            id: StudentId("bagus-santoso".to_string()),
            name: "Bagus Santoso".to_string(),
            skills: vec![
                evidence("sql", 4, Some("https://example.com/bagus-sql")),
                evidence("javascript", 2, None),
                evidence("git", 2, None),
                evidence("communication", 3, None),
                evidence("teamwork", 3, None),
            ],
        },
        Student {
            id: StudentId("citra-maharani".to_string()),
            name: "Citra Maharani".to_string(),
            skills: vec![
                evidence("plc", 4, Some("https://example.com/citra-plc")),
                evidence("sensors", 3, None),
                evidence("safety-k3", 4, None),
                evidence("communication", 3, None),
                evidence("teamwork", 4, None),
            ],
        },
        Student {
            id: StudentId("dewa-putra".to_string()),
            name: "Dewa Putra".to_string(),
            skills: vec![
                evidence("cnc", 3, None),
                evidence("safety-k3", 4, Some("https://example.com/dewa-k3")),
                evidence("teamwork", 4, None),
                evidence("communication", 3, None),
            ],
        },
    ];

    CatalogSnapshot {
        competencies,
        students,
        roles,
        curricula,
    }
}
