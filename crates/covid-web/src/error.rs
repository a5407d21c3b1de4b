//! Error responses.
//!
//! Failures are answered in plain text, one line each.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use covid_core::CovidError;

#[derive(Debug)]
pub enum ApiError {
    /// A required query parameter was absent or empty.
    MissingParameter(&'static str),
    /// The query ran but matched nothing.
    NotFound,
    /// The query could not be executed.
    Query(CovidError),
}

impl From<CovidError> for ApiError {
    fn from(err: CovidError) -> Self {
        Self::Query(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::MissingParameter(name) => format!("Missing '{name}' parameter"),
            Self::NotFound => "No data found".to_string(),
            Self::Query(err) => format!("Could not query data: {err}"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Query(err) = &self {
            tracing::error!(error = %err, "Query failed");
        }

        (
            self.status(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("{}\n", self.message()),
        )
            .into_response()
    }
}

/// Take the first value of a required query parameter, treating an empty value as missing.
pub fn required<'a>(params: &'a [(String, String)], name: &'static str) -> Result<&'a str, ApiError> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .filter(|value| !value.is_empty())
        .ok_or(ApiError::MissingParameter(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::MissingParameter("date").message(), "Missing 'date' parameter");
        assert_eq!(ApiError::NotFound.message(), "No data found");
        assert_eq!(
            ApiError::from(CovidError::Query("connection refused".into())).message(),
            "Could not query data: connection refused"
        );
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_required_rejects_empty_values() {
        assert_eq!(required(&pairs(&[("country", "US")]), "country").unwrap(), "US");
        assert!(matches!(
            required(&pairs(&[("country", "")]), "country"),
            Err(ApiError::MissingParameter("country"))
        ));
        assert!(required(&[], "date").is_err());
    }

    #[test]
    fn test_required_takes_first_of_repeated_values() {
        let params = pairs(&[("country", "US"), ("date", "2021-12-01"), ("country", "BR")]);
        assert_eq!(required(&params, "country").unwrap(), "US");

        let params = pairs(&[("country", ""), ("country", "BR")]);
        assert!(required(&params, "country").is_err());
    }
}
