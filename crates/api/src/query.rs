//! Query parameters accepted by the worlds endpoint.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

/// `?id=` and `?report=` selectors.
///
/// Kept as raw strings: an empty value counts as absent, and a value that
/// is not an integer simply names no world. A repeated key keeps its last
/// value; unrelated keys are ignored.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct WorldQuery {
    pub id: Option<String>,
    pub report: Option<String>,
}

impl WorldQuery {
    pub fn id(&self) -> Option<&str> {
        non_empty(self.id.as_deref())
    }

    pub fn report(&self) -> Option<&str> {
        non_empty(self.report.as_deref())
    }

    /// Parse a raw query string (without the leading `?`).
    pub fn parse(query: &str) -> Result<Self, AppError> {
        let pairs = serde_urlencoded::from_str::<Vec<(String, String)>>(query)
            .map_err(|e| AppError::BadRequest(format!("invalid query string: {e}")))?;

        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "id" => params.id = Some(value),
                "report" => params.report = Some(value),
                _ => {}
            }
        }
        Ok(params)
    }
}

impl<S> FromRequestParts<S> for WorldQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::parse(parts.uri.query().unwrap_or_default())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_keys_keep_last_value() {
        let params = WorldQuery::parse("id=1&id=2&report=3").unwrap();
        assert_eq!(params.id(), Some("2"));
        assert_eq!(params.report(), Some("3"));
    }

    #[test]
    fn empty_values_count_as_absent() {
        let params = WorldQuery::parse("id=&report=").unwrap();
        assert_eq!(params.id(), None);
        assert_eq!(params.report(), None);
        assert_eq!(WorldQuery::parse("").unwrap(), WorldQuery::default());
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let params = WorldQuery::parse("page=2&id=5").unwrap();
        assert_eq!(params.id(), Some("5"));
        assert_eq!(params.report, None);
    }
}
