use crate::api::AppState;
use crate::domain::QueryKind;
use axum::{
    extract::{MatchedPath, Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> Response {
    state.prometheus_handle.as_ref().map_or_else(
        || {
            (
                StatusCode::NOT_FOUND,
                "Metrics not enabled or failed to initialize",
            )
                .into_response()
        },
        |handle| handle.render().into_response(),
    )
}

/// Resolver query served by a route, if any.
fn query_kind(route: &str) -> Option<QueryKind> {
    match route {
        "/location" => Some(QueryKind::Location),
        "/weather" => Some(QueryKind::Weather),
        "/events" => Some(QueryKind::Events),
        _ => None,
    }
}

/// Wraps every request in a span carrying a fresh request id and, for the
/// resolver routes, the query kind. The id is echoed back in `x-request-id`.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4();

    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or("unmatched", MatchedPath::as_str)
        .to_string();
    let kind = query_kind(&route);

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        route = %route,
        query_kind = kind.map(|k| k.as_str()),
    );

    async move {
        let mut response = next.run(req).await;

        let elapsed = start.elapsed();
        let status = response.status();

        let labels = [
            ("method", method.to_string()),
            ("path", route.clone()),
            ("status", status.as_u16().to_string()),
        ];
        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());

        if let Some(kind) = kind {
            metrics::histogram!("resolver_request_duration_seconds", "kind" => kind.as_str())
                .record(elapsed.as_secs_f64());
        }

        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response
                .headers_mut()
                .insert(REQUEST_ID_HEADER.clone(), value);
        }

        info!(
            status_code = status.as_u16(),
            duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            failed = status.is_server_error(),
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_routes_map_to_query_kinds() {
        assert_eq!(query_kind("/location"), Some(QueryKind::Location));
        assert_eq!(query_kind("/weather"), Some(QueryKind::Weather));
        assert_eq!(query_kind("/events"), Some(QueryKind::Events));
        assert_eq!(query_kind("/health"), None);
        assert_eq!(query_kind("unmatched"), None);
    }
}
