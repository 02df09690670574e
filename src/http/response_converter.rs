//! Dual-layer status classification.
//!
//! The platform reports failures twice: once in the HTTP status and once in
//! the `relatedHTTPCode` of the JSON envelope. A 200 transport status with a
//! failing related code is still a failure.

use crate::error::{CallSite, EgeriaError, ExceptionDetail, Result};
use crate::error_code::ErrorCode;
use crate::types::{DispatchOutcome, ParsedBody, RawResponse, ResponseEnvelope};
use reqwest::StatusCode;
use serde_json::Value;

/// Maps a [`RawResponse`] to a [`DispatchOutcome`] or a typed error
#[derive(Debug, Clone, Copy)]
pub struct ResponseClassifier;

impl ResponseClassifier {
    /// Create a new response classifier
    pub fn new() -> Self {
        Self
    }

    /// Classify one response. Pure: the same input always yields the same result.
    pub fn classify(&self, site: &CallSite, endpoint: &str, response: RawResponse) -> Result<DispatchOutcome> {
        let parsed = ResponseEnvelope::parse(&response.body);
        let status = response.status;

        match status {
            200 | 201 => match parsed {
                ParsedBody::Envelope(envelope) if envelope.related_http_code == 200 => {
                    Ok(DispatchOutcome::Envelope(envelope))
                }
                ParsedBody::Envelope(envelope) => Err(application_failure(site, endpoint, &envelope)),
                ParsedBody::InvalidRelatedCode(related) => Err(invalid_related_code(site, endpoint, status, &related)),
                ParsedBody::Plain => Ok(DispatchOutcome::Text(response.body)),
            },
            400 | 401 | 403 | 404 | 405 => Err(EgeriaError::InvalidParameter(Box::new(status_detail(
                ErrorCode::ClientSideRestApiError,
                site,
                endpoint,
                status,
                parsed.envelope(),
            )))),
            500..=504 => Err(EgeriaError::PropertyServerFailure(Box::new(status_detail(
                ErrorCode::ExceptionResponseFromApi,
                site,
                endpoint,
                status,
                parsed.envelope(),
            )))),
            _ => Err(unexpected_response(site, endpoint, status, parsed.envelope())),
        }
    }
}

impl Default for ResponseClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the error for a response whose shape or status nothing expects
pub(crate) fn unexpected_response(
    site: &CallSite,
    endpoint: &str,
    status: u16,
    envelope: Option<&ResponseEnvelope>,
) -> EgeriaError {
    let detail = ExceptionDetail::new(
        ErrorCode::UnexpectedResponse,
        site,
        &[status.to_string().as_str(), site.method_name, endpoint],
    )
    .with_params(vec![endpoint.to_string()]);

    EgeriaError::UnexpectedResponse(Box::new(attach_envelope(detail, envelope)))
}

/// A success status whose `relatedHTTPCode` is not a status code at all
fn invalid_related_code(site: &CallSite, endpoint: &str, status: u16, related: &Value) -> EgeriaError {
    let detail = ExceptionDetail::new(
        ErrorCode::UnexpectedResponse,
        site,
        &[status.to_string().as_str(), site.method_name, endpoint],
    )
    .with_params(vec![endpoint.to_string(), format!("relatedHTTPCode={}", related)]);

    EgeriaError::UnexpectedResponse(Box::new(detail))
}

fn application_failure(site: &CallSite, endpoint: &str, envelope: &ResponseEnvelope) -> EgeriaError {
    let related = envelope.related_http_code.to_string();
    let server_message = envelope
        .exception_error_message
        .clone()
        .unwrap_or_else(|| "no message was returned".to_string());

    let detail = ExceptionDetail::new(
        ErrorCode::ExceptionResponseFromApi,
        site,
        &[related.as_str(), site.method_name, endpoint, server_message.as_str()],
    )
    .with_params(vec![endpoint.to_string()]);

    EgeriaError::ApplicationFailure(Box::new(attach_envelope(detail, Some(envelope))))
}

/// Detail for a failing transport status; the detail's status is the transport's
fn status_detail(
    code: ErrorCode,
    site: &CallSite,
    endpoint: &str,
    status: u16,
    envelope: Option<&ResponseEnvelope>,
) -> ExceptionDetail {
    let message = envelope
        .and_then(|e| e.exception_error_message.clone())
        .unwrap_or_else(|| status_reason(status));

    let detail = ExceptionDetail::new(
        code,
        site,
        &[status.to_string().as_str(), site.method_name, endpoint, message.as_str()],
    )
    .with_http_error_code(status)
    .with_params(vec![endpoint.to_string()]);

    attach_envelope(detail, envelope)
}

fn attach_envelope(detail: ExceptionDetail, envelope: Option<&ResponseEnvelope>) -> ExceptionDetail {
    detail
        .with_related_http_code(envelope.map(|e| e.related_http_code))
        .with_server_diagnostics(envelope.map(ResponseEnvelope::diagnostics))
}

fn status_reason(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map(|reason| format!("{} {}", status, reason))
        .unwrap_or_else(|| format!("HTTP status {}", status))
}
