//! JSON rendering of audit results and errors

use crate::audit::AuditResult;
use crate::output::traits::OutputResult;
use crate::AuditError;
use serde::Serialize;

/// Error body returned in place of an [`AuditResult`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub error: String,
    pub status: u16,
}

impl From<&AuditError> for ErrorPayload {
    fn from(error: &AuditError) -> Self {
        Self {
            error: error.user_message(),
            status: error.status_code(),
        }
    }
}

/// Renders an audit result as pretty-printed JSON
pub fn render_json(result: &AuditResult) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Renders the client-facing error body for a failed audit
pub fn render_error_json(error: &AuditError) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(&ErrorPayload::from(error))?)
}
