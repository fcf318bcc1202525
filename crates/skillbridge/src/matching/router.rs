use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{RoleId, StudentId};
use super::repository::CatalogRepository;
use super::service::{MatchReport, MatchService, MatchServiceError};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LimitQuery {
    #[serde(default)]
    pub(crate) limit: Option<i64>,
}

/// Router builder exposing both ranking directions over HTTP.
pub fn match_router<R>(service: Arc<MatchService<R>>) -> Router
where
    R: CatalogRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/match/roles/:role_id/students",
            get(role_students_handler::<R>),
        )
        .route(
            "/api/v1/match/students/:student_id/roles",
            get(student_roles_handler::<R>),
        )
        .route(
            "/api/v1/match/students/:student_id/curricula",
            get(student_curricula_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn role_students_handler<R>(
    State(service): State<Arc<MatchService<R>>>,
    Path(role_id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    report_response(service.match_role(&RoleId(role_id), query.limit))
}

pub(crate) async fn student_roles_handler<R>(
    State(service): State<Arc<MatchService<R>>>,
    Path(student_id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    report_response(service.match_student(&StudentId(student_id), query.limit))
}

pub(crate) async fn student_curricula_handler<R>(
    State(service): State<Arc<MatchService<R>>>,
    Path(student_id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    report_response(service.match_student_curricula(&StudentId(student_id), query.limit))
}

fn report_response(result: Result<MatchReport, MatchServiceError>) -> Response {
    match result {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(MatchServiceError::SubjectNotFound(subject)) => {
            let payload = json!({
                "error": "subject not found",
                "subject_id": subject,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(MatchServiceError::InvalidSubject(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
