use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use skillbridge::error::AppError;
use skillbridge::matching::{match_router, CatalogRepository, Competency, MatchService};
use std::sync::Arc;

pub(crate) fn with_match_routes<R>(service: Arc<MatchService<R>>) -> axum::Router
where
    R: CatalogRepository + 'static,
{
    match_router(service.clone())
        .route(
            "/api/v1/competencies",
            axum::routing::get(competencies_endpoint::<R>),
        )
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .layer(Extension(service))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn competencies_endpoint<R>(
    Extension(service): Extension<Arc<MatchService<R>>>,
) -> Result<Json<Vec<Competency>>, AppError>
where
    R: CatalogRepository + 'static,
{
    Ok(Json(service.competencies()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::demo_catalog;
    use axum::http::Request;
    use skillbridge::config::MatchingConfig;
    use skillbridge::matching::{
        CatalogSnapshot, CurriculumItem, RepositoryError, Role, RoleId, Student, StudentId,
    };
    use tower::ServiceExt;

    fn demo_service() -> Arc<MatchService<CatalogSnapshot>> {
        Arc::new(MatchService::new(
            Arc::new(demo_catalog()),
            MatchingConfig::default(),
        ))
    }

    struct OfflineCatalog;

    impl CatalogRepository for OfflineCatalog {
        fn competencies(&self) -> Result<Vec<Competency>, RepositoryError> {
            Err(RepositoryError::Unavailable("offline".to_string()))
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
            Ok(None)
        }

        fn role(&self, _id: &RoleId) -> Result<Option<Role>, RepositoryError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn competencies_endpoint_lists_vocabulary() {
        let Json(body) = competencies_endpoint(Extension(demo_service()))
            .await
            .expect("vocabulary loads");

        assert_eq!(body.len(), 12);
        assert_eq!(body[0].id.as_str(), "cnc");
    }

    #[tokio::test]
    async fn competencies_endpoint_maps_repository_failures() {
        let service = Arc::new(MatchService::new(
            Arc::new(OfflineCatalog),
            MatchingConfig::default(),
        ));

        let response = competencies_endpoint(Extension(service))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn demo_role_ranking_is_served() {
        let router = with_match_routes(demo_service());

        let response = router
            .oneshot(
                Request::get("/api/v1/match/roles/plc-intern/students?limit=1")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        let payload: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
        assert_eq!(payload["results"][0]["candidate_id"], "citra-maharani");
        assert_eq!(payload["results"][0]["score"], 1.0);
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }
}
