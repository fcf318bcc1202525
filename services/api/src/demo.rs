use crate::cli::{CatalogArgs, RoleMatchArgs, StudentMatchArgs};
use crate::infra::{demo_catalog, load_catalog};
use clap::Args;
use skillbridge::config::AppConfig;
use skillbridge::error::AppError;
use skillbridge::matching::{
    BreakdownEntry, CatalogSnapshot, MatchReport, MatchService, RoleId, StudentId, Vocabulary,
};
use std::fmt::Write as _;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Number of candidates shown per ranking
    #[arg(long, default_value_t = 3, allow_hyphen_values = true)]
    pub(crate) limit: i64,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self { limit: 3 }
    }
}

pub(crate) fn run_match_role(args: RoleMatchArgs) -> Result<(), AppError> {
    let RoleMatchArgs { role_id, catalog } = args;
    let CatalogArgs {
        catalog,
        skills_csv,
        limit,
        json,
    } = catalog;

    let snapshot = Arc::new(load_catalog(catalog, skills_csv)?);
    let vocabulary = snapshot.vocabulary();
    let service = service_for(snapshot)?;

    let report = service.match_role(&RoleId(role_id), limit)?;
    print_report(&report, &vocabulary, json);
    Ok(())
}

pub(crate) fn run_match_student(args: StudentMatchArgs) -> Result<(), AppError> {
    let StudentMatchArgs {
        student_id,
        curricula,
        catalog,
    } = args;
    let CatalogArgs {
        catalog,
        skills_csv,
        limit,
        json,
    } = catalog;

    let snapshot = Arc::new(load_catalog(catalog, skills_csv)?);
    let vocabulary = snapshot.vocabulary();
    let service = service_for(snapshot)?;

    let student_id = StudentId(student_id);
    let report = if curricula {
        service.match_student_curricula(&student_id, limit)?
    } else {
        service.match_student(&student_id, limit)?
    };
    print_report(&report, &vocabulary, json);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let catalog = Arc::new(demo_catalog());
    let vocabulary = catalog.vocabulary();
    let service = service_for(catalog.clone())?;
    let limit = Some(args.limit);

    println!("Competency matching demo");
    println!(
        "Catalog: {} competencies | {} students | {} roles | {} curriculum programs",
        catalog.competencies.len(),
        catalog.students.len(),
        catalog.roles.len(),
        catalog.curricula.len()
    );

    for role in &catalog.roles {
        println!("\n== {} ({})", role.title, role.industry_id);
        let report = service.match_role(&role.id, limit)?;
        print!("{}", render_report(&report, &vocabulary));
    }

    if let Some(student) = catalog.students.first() {
        println!("\n== Roles for {}", student.name);
        let report = service.match_student(&student.id, limit)?;
        print!("{}", render_report(&report, &vocabulary));

        println!("\n== Curriculum programs for {}", student.name);
        let report = service.match_student_curricula(&student.id, limit)?;
        print!("{}", render_report(&report, &vocabulary));
    }

    Ok(())
}

fn service_for(
    catalog: Arc<CatalogSnapshot>,
) -> Result<MatchService<CatalogSnapshot>, AppError> {
    let config = AppConfig::load()?;
    Ok(MatchService::new(catalog, config.matching))
}

fn print_report(report: &MatchReport, vocabulary: &Vocabulary, json: bool) {
    if !json {
        print!("{}", render_report(report, vocabulary));
        return;
    }

    match serde_json::to_string_pretty(report) {
        Ok(payload) => println!("{payload}"),
        Err(err) => eprintln!("report payload unavailable: {err}"),
    }
}

pub(crate) fn render_report(report: &MatchReport, vocabulary: &Vocabulary) -> String {
    let mut out = String::new();

    if report.results.is_empty() {
        let _ = writeln!(out, "No candidates ranked for {}", report.subject_id);
    }

    for (rank, result) in report.results.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} | score {:.0}%",
            rank + 1,
            result.candidate_id,
            result.score * 100.0
        );
        for entry in &result.breakdown {
            let _ = writeln!(out, "   - {}", describe_entry(entry, vocabulary));
        }

        let gaps: Vec<&str> = result
            .gaps()
            .map(|entry| vocabulary.name_of(&entry.competency_id))
            .collect();
        if !gaps.is_empty() {
            let _ = writeln!(out, "   gaps: {}", gaps.join(", "));
        }
    }

    for warning in &report.warnings {
        let _ = writeln!(
            out,
            "! skipped {}: {}",
            warning.candidate_id, warning.reason
        );
    }

    out
}

fn describe_entry(entry: &BreakdownEntry, vocabulary: &Vocabulary) -> String {
    let name = vocabulary.name_of(&entry.competency_id);
    let attained = entry.attained_level.unwrap_or(0);

    match (entry.required_level, entry.importance) {
        (Some(required), Some(importance)) => format!(
            "{name}: level {attained}/{required} ({}) contributes {:.2}",
            importance.label(),
            entry.contribution
        ),
        _ => format!("{name}: level {attained} (not required)"),
    }
}
