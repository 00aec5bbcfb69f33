//! Lenient request body extraction.
//!
//! The game client and the web uploader send worlds as JSON, urlencoded
//! forms or multipart forms. [`FieldBody`] normalises all three into a
//! [`FieldMap`]. A body that cannot be parsed yields an empty map rather
//! than a rejection; only transport failures (such as exceeding the body
//! size limit) reject the request, as an [`AppError`] so the response keeps
//! the `{"error": ...}` shape.

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use serde_json::Value;
use worlds_core::fields::FieldMap;

use crate::error::AppError;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Request body parsed into loosely-typed fields.
#[derive(Debug, Default)]
pub struct FieldBody(pub FieldMap);

/// How a body is decoded, chosen from its `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Form,
    Multipart,
    Json,
}

fn body_kind(req: &Request) -> BodyKind {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if content_type.starts_with(FORM_URLENCODED) {
        BodyKind::Form
    } else if content_type.starts_with(MULTIPART_FORM_DATA) {
        BodyKind::Multipart
    } else {
        BodyKind::Json
    }
}

impl<S> FromRequest<S> for FieldBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(&req) {
            BodyKind::Multipart => {
                let fields = match Multipart::from_request(req, state).await {
                    Ok(multipart) => parse_multipart(multipart).await?,
                    Err(rejection) => {
                        tracing::debug!(error = %rejection, "Unreadable multipart body");
                        FieldMap::new()
                    }
                };
                Ok(FieldBody(fields))
            }
            kind => {
                let bytes = Bytes::from_request(req, state).await?;
                let fields = if kind == BodyKind::Form {
                    parse_form(&bytes)
                } else {
                    parse_json(&bytes)
                };
                Ok(FieldBody(fields))
            }
        }
    }
}

/// Decode an urlencoded body. Repeated keys keep the last value.
pub fn parse_form(bytes: &[u8]) -> FieldMap {
    match serde_urlencoded::from_bytes::<Vec<(String, String)>>(bytes) {
        Ok(pairs) => pairs
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect(),
        Err(e) => {
            tracing::debug!(error = %e, "Unparseable form body, treating as empty");
            FieldMap::new()
        }
    }
}

/// Decode a JSON body. Anything but a JSON object yields an empty map.
pub fn parse_json(bytes: &[u8]) -> FieldMap {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return FieldMap::new();
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            tracing::debug!("JSON body is not an object, treating as empty");
            FieldMap::new()
        }
        Err(e) => {
            tracing::debug!(error = %e, "Unparseable JSON body, treating as empty");
            FieldMap::new()
        }
    }
}

/// Collect every named multipart part as text. File parts are read as
/// (lossy) UTF-8 so a `.tbw` file can be uploaded in the `tbw` field.
///
/// Malformed input keeps the parts read so far; only a body over the size
/// limit rejects the request.
async fn parse_multipart(mut multipart: Multipart) -> Result<FieldMap, AppError> {
    let mut fields = FieldMap::new();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                reject_if_too_large(&e)?;
                tracing::debug!(error = %e, "Malformed multipart body, keeping parts read so far");
                break;
            }
        };
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match field.bytes().await {
            Ok(data) => {
                fields.insert(name, Value::String(String::from_utf8_lossy(&data).into_owned()));
            }
            Err(e) => {
                reject_if_too_large(&e)?;
                tracing::debug!(error = %e, field = %name, "Unreadable multipart part");
                break;
            }
        }
    }
    Ok(fields)
}

fn reject_if_too_large(err: &MultipartError) -> Result<(), AppError> {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return Err(AppError::Rejected {
            status: err.status(),
            message: err.body_text(),
        });
    }
    Ok(())
}
