//! Request observers.
//!
//! The dispatcher never logs directly. It reports to a [`RequestObserver`],
//! and [`TracingObserver`] turns those reports into `tracing` events.

use crate::error::EgeriaError;
use crate::traits::RequestObserver;
use crate::types::{RawResponse, RequestDescriptor};
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, warn};

/// Emits `debug!` events for traffic and `warn!` events for failures
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_request(&self, request: &RequestDescriptor) {
        debug!(
            method = %request.method,
            endpoint = %request.endpoint,
            has_body = request.body.is_some(),
            at = %Utc::now().to_rfc3339(),
            "dispatching request"
        );
    }

    fn on_response(&self, request: &RequestDescriptor, response: &RawResponse, elapsed: Duration) {
        debug!(
            method = %request.method,
            endpoint = %request.endpoint,
            status = response.status,
            final_url = %response.url,
            elapsed_ms = elapsed.as_millis() as u64,
            body_len = response.body.len(),
            "response received"
        );
    }

    fn on_failure(&self, request: &RequestDescriptor, error: &EgeriaError) {
        warn!(
            method = %request.method,
            endpoint = %request.endpoint,
            code = error.code().map(|c| c.as_str()).unwrap_or("none"),
            http_error_code = error.http_error_code(),
            at = %Utc::now().to_rfc3339(),
            "request failed: {}",
            error
        );
    }
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RequestObserver for NoopObserver {}
