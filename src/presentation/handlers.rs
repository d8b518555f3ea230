// HTTP request handlers
use crate::application::error::DashboardError;
use crate::application::log_service::LogQuery;
use crate::infrastructure::http_response::{error_response, render};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct ChartParams {
    #[serde(rename = "type", default)]
    pub chart_type: String,
    #[serde(default)]
    pub duration: String,
}

#[derive(Deserialize)]
pub struct LogParams {
    #[serde(default)]
    pub component: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub offset: String,
    #[serde(default)]
    pub duration: String,
}

impl TryFrom<LogParams> for LogQuery {
    type Error = DashboardError;

    fn try_from(params: LogParams) -> Result<Self, Self::Error> {
        Ok(LogQuery {
            offset: LogQuery::parse_offset(&params.offset)?,
            component: params.component,
            severity: params.severity,
            context: params.context,
            duration: params.duration,
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/hatchets", get(list_hatchets))
        .route("/hatchets/:hatchet/charts", get(chart_index))
        .route("/hatchets/:hatchet/charts/:attr", get(chart))
        .route("/hatchets/:hatchet/logs", get(logs))
        .route("/hatchets/:hatchet/logs/:attr", get(logs_by_attr))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List all hatchets
pub async fn list_hatchets(State(state): State<Arc<AppState>>) -> Response {
    match state.hatchet_service.list_hatchets().await {
        Ok(names) => Json(names).into_response(),
        Err(e) => error_response(&DashboardError::DatasetUnavailable(e)),
    }
}

pub async fn chart_index(
    Path(hatchet): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    render(state.chart_service.render_index(&hatchet).await)
}

/// GET /hatchets/{hatchet}/charts/{attr}?type=&duration=
pub async fn chart(
    Path((hatchet, attr)): Path<(String, String)>,
    Query(params): Query<ChartParams>,
    State(state): State<Arc<AppState>>,
) -> Response {
    render(
        state
            .chart_service
            .render_chart(&hatchet, &attr, &params.chart_type, &params.duration)
            .await,
    )
}

pub async fn logs(
    Path(hatchet): Path<String>,
    Query(params): Query<LogParams>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match LogQuery::try_from(params) {
        Ok(query) => render(state.log_service.render_logs(&hatchet, "", &query).await),
        Err(e) => error_response(&e),
    }
}

pub async fn logs_by_attr(
    Path((hatchet, attr)): Path<(String, String)>,
    Query(params): Query<LogParams>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match LogQuery::try_from(params) {
        Ok(query) => render(state.log_service.render_logs(&hatchet, &attr, &query).await),
        Err(e) => error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_service::tests::{log, StubRepository};
    use crate::application::chart_service::ChartService;
    use crate::application::hatchet_repository::HatchetRepository;
    use crate::application::hatchet_service::HatchetService;
    use crate::application::log_service::LogService;
    use crate::domain::chart::ChartCatalog;
    use crate::infrastructure::chart_templates::ChartTemplates;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;

    fn test_server(repo: StubRepository) -> TestServer {
        let repository: Arc<dyn HatchetRepository> = Arc::new(repo);
        let components: Vec<String> = vec!["COMMAND".to_string()];
        let state = Arc::new(AppState {
            hatchet_service: HatchetService::new(repository.clone()),
            chart_service: ChartService::new(
                repository.clone(),
                Arc::new(ChartCatalog::standard().unwrap()),
                Arc::new(ChartTemplates::standard()),
            ),
            log_service: LogService::new(repository, components.into(), 2),
        });
        TestServer::new(router(state)).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = test_server(StubRepository::default());
        let response = server.get("/healthz").await;
        response.assert_status_ok();
        response.assert_text("ok");
    }

    #[tokio::test]
    async fn test_list_hatchets() {
        let server = test_server(StubRepository::default());
        let names: Vec<String> = server.get("/hatchets").await.json();
        assert_eq!(names, vec!["mongod_log"]);
    }

    #[tokio::test]
    async fn test_chart_page() {
        let server = test_server(StubRepository::default());
        let response = server
            .get("/hatchets/mongod_log/charts/slowops")
            .add_query_param("type", "counts")
            .add_query_param("duration", "2023-01-01T00:00,2023-01-02T00:00")
            .await;
        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("slowops-counts"));
        assert!(html.contains("2023-01-01T00:00 to 2023-01-02T00:00"));
    }

    #[tokio::test]
    async fn test_unknown_chart_type_is_error_json() {
        let server = test_server(StubRepository::default());
        let response = server
            .get("/hatchets/mongod_log/charts/connections")
            .add_query_param("type", "bogus")
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["ok"], 0);
        assert_eq!(body["error"], "unknown connections chart type 'bogus'");
    }

    #[tokio::test]
    async fn test_unknown_hatchet_is_error_json() {
        let server = test_server(StubRepository::default());
        let response = server.get("/hatchets/missing/charts/ops").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["ok"], 0);
        assert_eq!(body["error"], "hatchet unavailable: hatchet 'missing' not found");
    }

    #[tokio::test]
    async fn test_query_failure_is_error_json() {
        let server = test_server(StubRepository {
            fail_queries: true,
            ..Default::default()
        });
        let response = server.get("/hatchets/mongod_log/charts/reslen").await;
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["error"], "query failed: connection refused");
    }

    #[tokio::test]
    async fn test_legacy_logs_page() {
        let server = test_server(StubRepository {
            logs: (0..5).map(|i| log(&format!("message {i}"))).collect(),
            ..Default::default()
        });
        let response = server
            .get("/hatchets/mongod_log/logs")
            .add_query_param("offset", "2")
            .add_query_param("component", "COMMAND")
            .await;
        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("<td align='right'>3</td>"));
        assert!(html.contains("<td align='right'>4</td>"));
        assert!(html.contains("<option value='COMMAND' SELECTED>COMMAND</option>"));
        assert!(html.contains("offset=4"));
    }

    #[tokio::test]
    async fn test_max_offset_does_not_overflow() {
        let server = test_server(StubRepository {
            logs: (0..5).map(|i| log(&format!("message {i}"))).collect(),
            ..Default::default()
        });
        let response = server
            .get("/hatchets/mongod_log/logs")
            .add_query_param("offset", usize::MAX.to_string())
            .await;
        response.assert_status_ok();
        assert!(!response.text().contains("<table"));
    }

    #[tokio::test]
    async fn test_malformed_offset_is_error_json() {
        let server = test_server(StubRepository::default());
        for path in ["/hatchets/mongod_log/logs", "/hatchets/mongod_log/logs/legacy"] {
            let response = server.get(path).add_query_param("offset", "abc").await;
            assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
            let body: Value = response.json();
            assert_eq!(body["ok"], 0);
            assert_eq!(body["error"], "invalid offset 'abc'");
        }

        let response = server
            .get("/hatchets/mongod_log/logs")
            .add_query_param("offset", "18446744073709551616")
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_slowops_logs_page() {
        let server = test_server(StubRepository {
            logs: vec![log("update 1200ms")],
            ..Default::default()
        });
        let response = server.get("/hatchets/mongod_log/logs/slowops").await;
        response.assert_status_ok();
        assert!(response.text().contains("update <mark>1200ms</mark>"));
    }

    #[tokio::test]
    async fn test_chart_index() {
        let server = test_server(StubRepository::default());
        let response = server.get("/hatchets/mongod_log/charts").await;
        response.assert_status_ok();
        assert!(response.text().contains("Accepted &amp; Ended Connections"));
    }
}
