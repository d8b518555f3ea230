// HTTP response utilities for HTML pages and JSON error payloads
use crate::application::error::DashboardError;
use axum::{
    body::Body,
    http::{header, HeaderValue, Response, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;

/// Build a `text/html` response from a rendered page
pub fn html_response(page: String) -> Response<Body> {
    let mut response = Response::new(Body::from(page));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    response
}

pub fn status_for(error: &DashboardError) -> StatusCode {
    match error {
        DashboardError::Selection(_) | DashboardError::InvalidParameter { .. } => {
            StatusCode::BAD_REQUEST
        }
        DashboardError::DatasetUnavailable(_) => StatusCode::NOT_FOUND,
        DashboardError::Query(_)
        | DashboardError::Template(_)
        | DashboardError::MissingDescriptor(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `{"ok": 0, "error": "<message>"}` in place of the page
pub fn error_response(error: &DashboardError) -> Response<Body> {
    let status = status_for(error);
    if status.is_server_error() {
        tracing::error!("request failed: {}", error);
    } else {
        tracing::debug!("request rejected: {}", error);
    }
    (status, Json(json!({ "ok": 0, "error": error.to_string() }))).into_response()
}

pub fn render(result: Result<String, DashboardError>) -> Response<Body> {
    match result {
        Ok(page) => html_response(page),
        Err(e) => error_response(&e),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
