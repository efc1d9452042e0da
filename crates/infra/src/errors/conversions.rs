//! Conversions from external infrastructure errors into domain errors.

use duedash_domain::DueDashError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub DueDashError);

impl From<InfraError> for DueDashError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<DueDashError> for InfraError {
    fn from(value: DueDashError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoDueDashError {
    fn into_duedash(self) -> DueDashError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → DueDashError */
/* -------------------------------------------------------------------------- */

impl IntoDueDashError for HttpError {
    fn into_duedash(self) -> DueDashError {
        if self.is_timeout() {
            return DueDashError::Timeout("HTTP request timed out".into());
        }

        if self.is_connect() {
            return DueDashError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return DueDashError::Upstream(format!("malformed response body: {self}"));
        }

        if let Some(status) = self.status() {
            return status_error(status, None);
        }

        DueDashError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_duedash())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → DueDashError */
/* -------------------------------------------------------------------------- */

impl IntoDueDashError for serde_json::Error {
    fn into_duedash(self) -> DueDashError {
        DueDashError::Upstream(format!("malformed response body: {self}"))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_duedash())
    }
}

/// Classify a non-success HTTP status, keeping a snippet of the body when
/// one was read.
pub fn status_error(status: reqwest::StatusCode, body: Option<&str>) -> DueDashError {
    let code = status.as_u16();
    let mut message =
        format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));
    if let Some(body) = body.map(str::trim).filter(|b| !b.is_empty()) {
        let snippet: String = body.chars().take(200).collect();
        message.push_str(": ");
        message.push_str(&snippet);
    }

    match code {
        401 | 403 => DueDashError::Auth(message),
        404 => DueDashError::NotFound(message),
        408 | 504 => DueDashError::Timeout(message),
        _ => DueDashError::Upstream(message),
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
