//! Request middleware.

use axum::extract::Request;
use axum::http::header::ACCESS_CONTROL_REQUEST_METHOD;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;

/// Answer `OPTIONS` with 405 unless it is a CORS preflight.
///
/// The CORS layer treats every `OPTIONS` request as a preflight; only
/// requests carrying `Access-Control-Request-Method` are let through to it.
pub async fn reject_plain_options(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS
        && !req.headers().contains_key(ACCESS_CONTROL_REQUEST_METHOD)
    {
        return AppError::MethodNotAllowed.into_response();
    }
    next.run(req).await
}
