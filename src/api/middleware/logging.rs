//! Request logging keyed by the Lambda invocation

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

const REQUEST_ID_HEADER: &str = "x-request-id";
const TRACE_ID_HEADER: &str = "x-amzn-trace-id";

/// Identifiers that tie a log line to an invocation and its X-Ray trace
#[derive(Debug, Clone, PartialEq, Eq)]
struct RequestIds {
    request_id: String,
    trace_id: Option<String>,
}

/// One line per completed request. Headers and bodies carry key material and
/// are never logged; only the method, route and identifiers are.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = extract_path(&request);
    let ids = extract_ids(&request);

    let response = next.run(request).await;
    let status = response.status();
    let duration_ms = start.elapsed().as_millis();
    let trace_id = ids.trace_id.as_deref().unwrap_or("-");

    if is_failure(status) {
        warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            request_id = %ids.request_id,
            trace_id,
            "Request failed"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            request_id = %ids.request_id,
            trace_id,
            "Request completed"
        );
    }

    response
}

fn extract_path(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

/// Request id: `x-request-id`, then the Lambda invocation id, then a fresh UUID.
/// Trace id: `x-amzn-trace-id`, then the invocation's X-Ray trace id.
fn extract_ids(request: &Request<Body>) -> RequestIds {
    let context = request.extensions().get::<lambda_http::Context>();

    let request_id = header_value(request, REQUEST_ID_HEADER)
        .or_else(|| {
            context
                .map(|ctx| ctx.request_id.clone())
                .filter(|id| !id.is_empty())
        })
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let trace_id = header_value(request, TRACE_ID_HEADER)
        .or_else(|| context.and_then(|ctx| ctx.xray_trace_id.clone()));

    RequestIds {
        request_id,
        trace_id,
    }
}

fn header_value(request: &Request<Body>, name: &str) -> Option<String> {
    request
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn is_failure(status: StatusCode) -> bool {
    status.is_server_error()
}
