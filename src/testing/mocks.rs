use crate::error::{TransportError, TransportErrorKind};
use crate::traits::Transport;
use crate::types::{RawResponse, RequestDescriptor};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock transport for testing.
///
/// Clones share the call counter and request log, so a test can keep one
/// handle while the dispatcher owns another.
#[derive(Clone)]
pub struct MockTransport {
    response: RawResponse,
    failure: Option<(TransportErrorKind, String)>,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<RequestDescriptor>>>,
}

impl MockTransport {
    /// Answers every request with `200 {"relatedHTTPCode":200}`
    pub fn new() -> Self {
        Self {
            response: RawResponse::new(200, r#"{"relatedHTTPCode":200}"#, ""),
            failure: None,
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(mut self, response: RawResponse) -> Self {
        self.response = response;
        self
    }

    pub fn with_failure(mut self, error: TransportError) -> Self {
        self.failure = Some((error.kind, error.message().to_string()));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests seen so far, in order
    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().map(|log| log.clone()).unwrap_or_default()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<RawResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut log) = self.requests.lock() {
            log.push(request.clone());
        }

        match &self.failure {
            Some((kind, message)) => Err(TransportError::new(*kind, message.clone())),
            None => Ok(RawResponse {
                url: request.endpoint.clone(),
                ..self.response.clone()
            }),
        }
    }
}
