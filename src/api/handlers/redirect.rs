//! Handler for short-link redirects.

use axum::{
    extract::{ConnectInfo, Path, Query, State, rejection::PathRejection},
    http::{HeaderMap, HeaderValue, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::net::SocketAddr;
use tracing::{error, warn};

use crate::application::services::compose_location;
use crate::domain::access_event::{AccessEvent, RequestMeta};
use crate::domain::entities::AccessStatus;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::origin_ip;

/// Plain-text body returned when no route matches.
pub const NOT_FOUND_BODY: &str = "No Redirect Found!.";

const ROUTE_PREFIX: &str = "/r/";

/// Redirects a short path token to its stored target.
///
/// # Endpoint
///
/// `GET /r/{path}?q={query}`
///
/// # Request Flow
///
/// 1. Look up the route by exact path
/// 2. Enqueue one access event with the outcome (not awaited by the store)
/// 3. Respond
///
/// # Responses
///
/// - **308 Permanent Redirect** to `target + q` when a route exists
/// - **200 OK** with a plain-text message when no route matches
/// - **400 Bad Request** when the token is not valid UTF-8 once decoded, or
///   `target + q` is not a valid `Location` header value
/// - **500 Internal Server Error** when the route store faults
///
/// Only the first `q` parameter is used; a missing `q` appends nothing.
/// Every outcome, including rejected tokens, enqueues exactly one access event.
pub async fn redirect_handler(
    path: Result<Path<String>, PathRejection>,
    Query(params): Query<Vec<(String, String)>>,
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    let meta = RequestMeta::new(
        origin_ip(&headers, peer, state.behind_proxy),
        method.as_str(),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );

    let path = match path {
        Ok(Path(path)) => path,
        Err(rejection) => {
            // Keep the still-encoded segment so the record shows what was requested.
            let raw = uri
                .path()
                .strip_prefix(ROUTE_PREFIX)
                .unwrap_or(uri.path())
                .to_string();
            warn!(path = %raw, error = %rejection, "Rejected redirect token");
            state
                .audit_logger
                .record(AccessEvent::new(raw.clone(), meta, AccessStatus::BadRequest))
                .await;

            return Err(AppError::bad_request(
                "Invalid path token",
                json!({ "path": raw }),
            ));
        }
    };

    let query = params
        .into_iter()
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value)
        .unwrap_or_default();

    match state.resolver.lookup(&path).await {
        Ok(route) => {
            let location = compose_location(&route.target, &query);

            match HeaderValue::try_from(location) {
                Ok(location) => {
                    state
                        .audit_logger
                        .record(AccessEvent::new(path, meta, AccessStatus::Success))
                        .await;

                    Ok((
                        StatusCode::PERMANENT_REDIRECT,
                        [(header::LOCATION, location)],
                    )
                        .into_response())
                }
                Err(e) => {
                    warn!(path = %path, error = %e, "Redirect location is not a valid header value");
                    state
                        .audit_logger
                        .record(AccessEvent::new(path.clone(), meta, AccessStatus::BadRequest))
                        .await;

                    Err(AppError::bad_request(
                        "Redirect location is not a valid header value",
                        json!({ "path": path }),
                    ))
                }
            }
        }
        Err(e) if e.is_not_found() => {
            state
                .audit_logger
                .record(AccessEvent::new(path, meta, AccessStatus::NotFound))
                .await;

            Ok((StatusCode::OK, NOT_FOUND_BODY).into_response())
        }
        Err(e) => {
            error!(path = %path, error = %e, "Route lookup failed");
            state
                .audit_logger
                .record(AccessEvent::new(path, meta, AccessStatus::Error))
                .await;

            Err(e)
        }
    }
}

/// Rejects `HEAD /r/{path}` with 405.
///
/// Without an explicit route axum would answer HEAD through the GET handler
/// and record an access log for it.
pub async fn redirect_head_handler() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, HeaderValue::from_static("GET"))],
    )
        .into_response()
}
