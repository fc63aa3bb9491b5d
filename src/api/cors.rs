use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::config::{CorsConfig, ServerConfig};

const ALLOW_HEADERS: &str = "Content-Type";
const ALLOW_METHODS: &str = "GET,PUT,POST,DELETE,OPTIONS";

/// `scheme://netloc/` of an origin, or `None` when it has no scheme.
fn origin_domain(origin: &str) -> Option<String> {
    let (scheme, rest) = origin.split_once("://")?;
    let netloc = rest.split(['/', '?', '#']).next().unwrap_or_default();
    Some(format!("{scheme}://{netloc}/"))
}

pub fn origin_is_allowed(cors: &CorsConfig, origin: &str) -> bool {
    let Some(domain) = origin_domain(origin) else {
        return false;
    };
    if let Some(project) = &cors.firebase_project {
        if domain.starts_with(&format!("https://{project}--")) {
            return true;
        }
    }
    cors.allowed_origins.iter().any(|allowed| *allowed == domain)
}

/// The value for `Access-Control-Allow-Origin`, if any.
fn allowed_origin_value(cors: &CorsConfig, headers: &HeaderMap) -> Option<HeaderValue> {
    match headers.get(header::ORIGIN) {
        Some(origin) => {
            let cleaned = origin.to_str().ok()?.trim_end_matches('/');
            if origin_is_allowed(cors, cleaned) {
                HeaderValue::from_str(cleaned).ok()
            } else {
                None
            }
        }
        None if cors.allow_no_origin => Some(HeaderValue::from_static("*")),
        None => None,
    }
}

/// Adds CORS headers for allowed origins and answers pre-flight requests.
pub async fn cors_middleware(
    State(config): State<Arc<ServerConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let allow_origin = allowed_origin_value(&config.cors, request.headers());
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    if let Some(origin) = allow_origin {
        let headers = response.headers_mut();
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
    }
    response
}
