//! Egeria client - typed access to the Egeria open metadata platform REST APIs
//!
//! Every operation validates its inputs locally, sends exactly one request to
//! the OMAG Server Platform and classifies the answer into a value or an
//! [`EgeriaError`] carrying a stable error code.

// Error taxonomy
pub mod error;
pub mod error_code;

// Core modules
pub mod config;
pub mod traits;
pub mod types;
pub mod validation;

// Request plumbing
pub mod http;
pub mod observer;
pub mod url_builder;

// Resource clients
pub mod client;
pub mod clients;

pub mod testing;

// Re-export main types for convenience
pub use client::{EgeriaClient, ServiceCall};
pub use clients::{AssetConsumer, AssetOrigin, AssetOwner, ConnectedAsset, OwnerType, Platform};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{CallSite, EgeriaError, ExceptionDetail, Result, ServerDiagnostics, TransportError, TransportErrorKind};
pub use error_code::ErrorCode;
pub use http::{ReqwestTransport, RequestDispatcher};
pub use observer::{NoopObserver, TracingObserver};
pub use traits::{RequestObserver, Transport};
pub use types::{CommentType, DispatchOutcome, HttpMethod, ParsedBody, RawResponse, RequestDescriptor, ResponseEnvelope, StarRating};
