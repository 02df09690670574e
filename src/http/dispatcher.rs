use crate::error::{CallSite, EgeriaError, Result};
use crate::http::response_converter::{unexpected_response, ResponseClassifier};
use crate::http::ReqwestTransport;
use crate::observer::TracingObserver;
use crate::traits::{RequestObserver, Transport};
use crate::types::{DispatchOutcome, RequestDescriptor, ResponseEnvelope};
use crate::validation::validate_url;
use std::sync::Arc;
use std::time::Instant;

/// Single chokepoint for every network call.
///
/// Validates the endpoint, performs exactly one transport call, and
/// classifies the result. Holds no mutable state, so one dispatcher can be
/// shared by any number of resource clients.
pub struct RequestDispatcher<T: Transport = ReqwestTransport> {
    transport: Arc<T>,
    observer: Arc<dyn RequestObserver>,
    classifier: ResponseClassifier,
}

impl<T: Transport> Clone for RequestDispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            observer: Arc::clone(&self.observer),
            classifier: self.classifier,
        }
    }
}

impl<T: Transport> RequestDispatcher<T> {
    /// Create a dispatcher that reports through [`TracingObserver`]
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            observer: Arc::new(TracingObserver),
            classifier: ResponseClassifier::new(),
        }
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Check that `address` is a usable target. Pure and idempotent.
    pub fn validate_target(address: &str, site: &CallSite) -> Result<()> {
        validate_url(address, site).map(|_| ())
    }

    /// Dispatch one request and classify the outcome
    pub async fn send(&self, request: RequestDescriptor, site: &CallSite) -> Result<DispatchOutcome> {
        self.dispatch(&request, site).await.map(|(_, outcome)| outcome)
    }

    /// Dispatch a request whose endpoint must answer with an envelope
    pub async fn send_envelope(&self, request: RequestDescriptor, site: &CallSite) -> Result<ResponseEnvelope> {
        match self.dispatch(&request, site).await? {
            (_, DispatchOutcome::Envelope(envelope)) => Ok(envelope),
            (status, DispatchOutcome::Text(_)) => {
                Err(self.reject(&request, unexpected_response(site, &request.endpoint, status, None)))
            }
        }
    }

    /// Dispatch and pull a required value out of the envelope.
    ///
    /// A text body, or an envelope for which `extract` returns `None`, is an
    /// `UnexpectedResponse`.
    pub async fn send_required<R, F>(&self, request: RequestDescriptor, site: &CallSite, extract: F) -> Result<R>
    where
        F: FnOnce(&mut ResponseEnvelope) -> Option<R>,
    {
        match self.dispatch(&request, site).await? {
            (status, DispatchOutcome::Envelope(mut envelope)) => match extract(&mut envelope) {
                Some(value) => Ok(value),
                None => Err(self.reject(
                    &request,
                    unexpected_response(site, &request.endpoint, status, Some(&envelope)),
                )),
            },
            (status, DispatchOutcome::Text(_)) => {
                Err(self.reject(&request, unexpected_response(site, &request.endpoint, status, None)))
            }
        }
    }

    /// Dispatch a request whose endpoint answers with plain text
    pub async fn send_text(&self, request: RequestDescriptor, site: &CallSite) -> Result<String> {
        match self.dispatch(&request, site).await? {
            (_, DispatchOutcome::Text(body)) => Ok(body),
            (status, DispatchOutcome::Envelope(envelope)) => Err(self.reject(
                &request,
                unexpected_response(site, &request.endpoint, status, Some(&envelope)),
            )),
        }
    }

    async fn dispatch(&self, request: &RequestDescriptor, site: &CallSite) -> Result<(u16, DispatchOutcome)> {
        if let Err(error) = Self::validate_target(&request.endpoint, site) {
            return Err(self.reject(request, error));
        }

        self.observer.on_request(request);
        let started = Instant::now();

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(source) => {
                let error = EgeriaError::connection_failure(site, &request.endpoint, source);
                return Err(self.reject(request, error));
            }
        };

        self.observer.on_response(request, &response, started.elapsed());

        let status = response.status;
        match self.classifier.classify(site, &request.endpoint, response) {
            Ok(outcome) => Ok((status, outcome)),
            Err(error) => Err(self.reject(request, error)),
        }
    }

    fn reject(&self, request: &RequestDescriptor, error: EgeriaError) -> EgeriaError {
        self.observer.on_failure(request, &error);
        error
    }
}
