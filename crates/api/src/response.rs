//! Shared response types for API handlers.

use axum::response::{IntoResponse, Response};

/// Plain-text `OK` acknowledgement returned by mutating requests.
#[derive(Debug, Clone, Copy)]
pub struct Acknowledged;

impl IntoResponse for Acknowledged {
    fn into_response(self) -> Response {
        "OK".into_response()
    }
}
