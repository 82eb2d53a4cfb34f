//! Backend errors.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors returned by the hosted backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport failure, or a response body that could not be decoded.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Api {
        /// HTTP status
        status: u16,

        /// PostgreSQL or PostgREST error code, when given
        code: Option<String>,

        /// Backend message
        message: String,
    },
}

/// What went wrong, independent of transport details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorKind {
    /// Unique constraint violated (`23505`)
    UniqueViolation,

    /// Foreign key violated (`23503`)
    ForeignKeyViolation,

    /// Not-null constraint violated (`23502`)
    NotNullViolation,

    /// Check constraint violated (`23514`)
    CheckViolation,

    /// No row matched a single-row request (`PGRST116`)
    NotFound,

    /// Missing or rejected credentials
    Unauthorized,

    /// Anything else
    Other,
}

impl BackendError {
    /// Build an API error from a response status and raw body.
    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorBody>(body).unwrap_or_default();

        let message = parsed
            .message
            .or(parsed.error)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    status.to_string()
                } else {
                    body.trim().to_string()
                }
            });

        Self::Api {
            status: status.as_u16(),
            code: parsed.code,
            message,
        }
    }

    /// Classify the error.
    pub fn kind(&self) -> BackendErrorKind {
        let Self::Api { status, code, .. } = self else {
            return BackendErrorKind::Other;
        };

        match code.as_deref() {
            Some("23505") => BackendErrorKind::UniqueViolation,
            Some("23503") => BackendErrorKind::ForeignKeyViolation,
            Some("23502") => BackendErrorKind::NotNullViolation,
            Some("23514") => BackendErrorKind::CheckViolation,
            Some("PGRST116") => BackendErrorKind::NotFound,
            _ if matches!(status, 401 | 403) => BackendErrorKind::Unauthorized,
            _ if *status == 404 => BackendErrorKind::NotFound,
            _ => BackendErrorKind::Other,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,

    #[serde(default)]
    message: Option<String>,

    #[serde(default)]
    error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postgrest_codes_are_classified() {
        let cases = [
            ("23505", BackendErrorKind::UniqueViolation),
            ("23503", BackendErrorKind::ForeignKeyViolation),
            ("23502", BackendErrorKind::NotNullViolation),
            ("23514", BackendErrorKind::CheckViolation),
            ("PGRST116", BackendErrorKind::NotFound),
            ("42P01", BackendErrorKind::Other),
        ];

        for (code, kind) in cases {
            let body = format!(r#"{{"code":"{code}","message":"boom","details":null}}"#);
            let error = BackendError::from_response(StatusCode::CONFLICT, &body);

            assert_eq!(error.kind(), kind, "code {code}");
        }
    }

    #[test]
    fn auth_failures_are_unauthorized() {
        let error = BackendError::from_response(StatusCode::UNAUTHORIZED, r#"{"message":"JWT expired"}"#);

        assert_eq!(error.kind(), BackendErrorKind::Unauthorized);
        assert_eq!(error.to_string(), "backend returned 401: JWT expired");
    }

    #[test]
    fn storage_errors_use_the_error_field() {
        let error = BackendError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"statusCode":"400","error":"InvalidKey"}"#,
        );

        assert!(matches!(
            error,
            BackendError::Api { status: 400, ref message, .. } if message == "InvalidKey"
        ));
    }

    #[test]
    fn non_json_bodies_are_kept_as_the_message() {
        let error = BackendError::from_response(StatusCode::BAD_GATEWAY, "upstream down\n");

        assert_eq!(error.kind(), BackendErrorKind::Other);
        assert_eq!(error.to_string(), "backend returned 502: upstream down");
    }

    #[test]
    fn empty_bodies_fall_back_to_the_status() {
        let error = BackendError::from_response(StatusCode::NOT_FOUND, "");

        assert_eq!(error.kind(), BackendErrorKind::NotFound);
        assert_eq!(error.to_string(), "backend returned 404: 404 Not Found");
    }
}
