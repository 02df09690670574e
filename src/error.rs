use crate::error_code::ErrorCode;
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Egeria client operations
pub type Result<T> = std::result::Result<T, EgeriaError>;

/// Errors returned by every Egeria client operation
#[derive(Debug, Error)]
pub enum EgeriaError {
    /// Caller-supplied input was empty or malformed, or the platform
    /// answered with a 4xx transport status
    #[error("Invalid parameter: {0}")]
    InvalidParameter(Box<ExceptionDetail>),

    /// The request never produced an HTTP response
    #[error("REST connection failure: {detail}")]
    RestConnectionFailure {
        detail: Box<ExceptionDetail>,
        #[source]
        source: TransportError,
    },

    /// The transport succeeded but the response envelope reported a
    /// related HTTP code other than 200
    #[error("Application failure: {0}")]
    ApplicationFailure(Box<ExceptionDetail>),

    /// The platform answered with a 5xx transport status
    #[error("Property server failure: {0}")]
    PropertyServerFailure(Box<ExceptionDetail>),

    /// Any response that fits none of the other classes
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(Box<ExceptionDetail>),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl EgeriaError {
    /// Create an invalid parameter error for a locally detected problem
    pub fn invalid_parameter<S: AsRef<str>>(code: ErrorCode, site: &CallSite, args: &[S]) -> Self {
        Self::InvalidParameter(Box::new(ExceptionDetail::new(code, site, args)))
    }

    /// Create a REST connection failure wrapping the transport error
    pub fn connection_failure(site: &CallSite, endpoint: &str, source: TransportError) -> Self {
        let detail = ExceptionDetail::new(
            ErrorCode::ClientSideRestApiError,
            site,
            &[source.kind.as_str(), site.method_name, endpoint, source.message()],
        )
        .with_params(vec![endpoint.to_string()]);

        Self::RestConnectionFailure {
            detail: Box::new(detail),
            source,
        }
    }

    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Structured detail for the taxonomy variants
    pub fn detail(&self) -> Option<&ExceptionDetail> {
        match self {
            Self::InvalidParameter(detail)
            | Self::ApplicationFailure(detail)
            | Self::PropertyServerFailure(detail)
            | Self::UnexpectedResponse(detail)
            | Self::RestConnectionFailure { detail, .. } => Some(detail.as_ref()),
            Self::ConfigNotFound { .. } | Self::ConfigParse(_) | Self::InvalidConfig { .. } => None,
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.detail().map(|d| d.code)
    }

    pub fn http_error_code(&self) -> Option<u16> {
        self.detail().map(|d| d.http_error_code)
    }

    pub fn related_http_code(&self) -> Option<u16> {
        self.detail().and_then(|d| d.related_http_code)
    }
}

/// Identifies the operation that raised an error.
///
/// Call sites name themselves explicitly; nothing is inferred from the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub class_name: &'static str,
    pub method_name: &'static str,
}

impl CallSite {
    pub const fn new(class_name: &'static str, method_name: &'static str) -> Self {
        Self {
            class_name,
            method_name,
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.class_name, self.method_name)
    }
}

/// Exception detail fields the platform returns inside a failed envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDiagnostics {
    pub error_message: Option<String>,
    pub system_action: Option<String>,
    pub user_action: Option<String>,
}

impl ServerDiagnostics {
    pub fn is_empty(&self) -> bool {
        self.error_message.is_none() && self.system_action.is_none() && self.user_action.is_none()
    }
}

/// A fully formatted error built from one [`ErrorCode`] and its call site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionDetail {
    pub code: ErrorCode,
    /// Message template with the arguments substituted
    pub message: String,
    /// Status reported to the caller: the record's code, or the transport
    /// status when the platform answered
    pub http_error_code: u16,
    /// `relatedHTTPCode` from the response envelope, if one was present
    pub related_http_code: Option<u16>,
    pub class_name: String,
    pub method_name: String,
    /// Offending values (endpoint, parameter value, ...)
    pub params: Vec<String>,
    pub server: Option<ServerDiagnostics>,
}

impl ExceptionDetail {
    /// Format `code`'s template with `args` and attach the call site
    pub fn new<S: AsRef<str>>(code: ErrorCode, site: &CallSite, args: &[S]) -> Self {
        let record = code.record();
        Self {
            code,
            message: record.format_message(args),
            http_error_code: record.http_error_code,
            related_http_code: None,
            class_name: site.class_name.to_string(),
            method_name: site.method_name.to_string(),
            params: Vec::new(),
            server: None,
        }
    }

    #[must_use]
    pub fn with_http_error_code(mut self, status: u16) -> Self {
        self.http_error_code = status;
        self
    }

    #[must_use]
    pub fn with_related_http_code(mut self, related: Option<u16>) -> Self {
        self.related_http_code = related;
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: Vec<String>) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn with_server_diagnostics(mut self, diagnostics: Option<ServerDiagnostics>) -> Self {
        self.server = diagnostics.filter(|d| !d.is_empty());
        self
    }

    pub fn message_id(&self) -> &'static str {
        self.code.message_id()
    }

    pub fn system_action(&self) -> &'static str {
        self.code.record().system_action
    }

    pub fn user_action(&self) -> &'static str {
        self.code.record().user_action
    }
}

impl fmt::Display for ExceptionDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (http_error_code={}",
            self.message_id(),
            self.code,
            self.http_error_code
        )?;
        if let Some(related) = self.related_http_code {
            write!(f, ", relatedHTTPCode={}", related)?;
        }
        write!(
            f,
            "): {} occurred in class: {} in method: {}",
            self.message, self.class_name, self.method_name
        )?;
        if let Some(message) = self.server.as_ref().and_then(|s| s.error_message.as_deref()) {
            write!(f, "; server reported: {}", message)?;
        }
        write!(f, "; user action: {}", self.user_action())
    }
}

/// Broad class of a transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Connect,
    Timeout,
    Request,
    Body,
}

impl TransportErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Timeout => "timeout",
            Self::Request => "request",
            Self::Body => "body",
        }
    }
}

/// Failure reported by a [`crate::traits::Transport`] before any HTTP
/// status was obtained
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl TransportError {
    pub fn new<S: Into<String>>(kind: TransportErrorKind, message: S) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            TransportErrorKind::Timeout
        } else if error.is_connect() {
            TransportErrorKind::Connect
        } else if error.is_body() || error.is_decode() {
            TransportErrorKind::Body
        } else {
            TransportErrorKind::Request
        };

        // reqwest keeps the useful part ("Connection refused") in the source chain
        let mut message = error.to_string();
        let mut cause = error.source();
        while let Some(inner) = cause {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            cause = inner.source();
        }

        Self {
            kind,
            message,
            source: Some(Box::new(error)),
        }
    }
}
