use crate::error::{EgeriaError, Result, TransportError};
use crate::types::{RawResponse, RequestDescriptor};
use std::future::Future;
use std::time::Duration;

/// Trait for the I/O layer underneath the dispatcher
pub trait Transport: Send + Sync {
    /// Perform exactly one HTTP exchange.
    ///
    /// Any HTTP status is a successful exchange; only failures to obtain a
    /// status (connect, timeout, TLS, body read) are errors.
    fn send(
        &self,
        request: &RequestDescriptor,
    ) -> impl Future<Output = std::result::Result<RawResponse, TransportError>> + Send;
}

/// Hook notified around every dispatched request
pub trait RequestObserver: Send + Sync {
    fn on_request(&self, _request: &RequestDescriptor) {}

    fn on_response(&self, _request: &RequestDescriptor, _response: &RawResponse, _elapsed: Duration) {}

    /// Called once for every call that ends in an error, including
    /// validation failures that never reach the transport
    fn on_failure(&self, _request: &RequestDescriptor, _error: &EgeriaError) {}
}

/// Trait for configuration validation
pub trait ConfigValidator: Send + Sync {
    type Config;

    /// Validate configuration
    fn validate(&self, config: &Self::Config) -> Result<()>;
}
