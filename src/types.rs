use crate::error::ServerDiagnostics;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// HTTP methods the Egeria REST APIs use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Whether requests with this method carry a JSON body
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One request, built fresh per call and handed to the dispatcher
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    /// Absolute URL including query string
    pub endpoint: String,
    pub body: Option<Value>,
    /// Extra headers for this request only
    pub headers: BTreeMap<String, String>,
    /// Overrides the transport's default timeout
    pub timeout: Option<Duration>,
}

impl RequestDescriptor {
    pub fn new<S: Into<String>>(method: HttpMethod, endpoint: S) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            body: None,
            headers: BTreeMap::new(),
            timeout: None,
        }
    }

    pub fn get<S: Into<String>>(endpoint: S) -> Self {
        Self::new(HttpMethod::Get, endpoint)
    }

    pub fn post<S: Into<String>>(endpoint: S, body: Value) -> Self {
        Self::new(HttpMethod::Post, endpoint).with_body(body)
    }

    pub fn delete<S: Into<String>>(endpoint: S) -> Self {
        Self::new(HttpMethod::Delete, endpoint)
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Transport-level response before any classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
    pub url: String,
}

impl RawResponse {
    pub fn new<B: Into<String>, U: Into<String>>(status: u16, body: B, url: U) -> Self {
        Self {
            status,
            body: body.into(),
            url: url.into(),
        }
    }
}

/// The JSON wrapper the platform puts around most responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "relatedHTTPCode")]
    pub related_http_code: u16,
    #[serde(rename = "exceptionErrorMessage", default, skip_serializing_if = "Option::is_none")]
    pub exception_error_message: Option<String>,
    #[serde(rename = "exceptionSystemAction", default, skip_serializing_if = "Option::is_none")]
    pub exception_system_action: Option<String>,
    #[serde(rename = "exceptionUserAction", default, skip_serializing_if = "Option::is_none")]
    pub exception_user_action: Option<String>,
    /// Every other field (`list`, `guid`, `guids`, `asset`, ...)
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl ResponseEnvelope {
    /// Decode `body` as an envelope.
    ///
    /// Bodies that are not JSON objects, or objects without a
    /// `relatedHTTPCode` key, are [`ParsedBody::Plain`]. A key whose value is
    /// not an integral status code is [`ParsedBody::InvalidRelatedCode`].
    /// Non-string exception fields are left in the payload.
    pub fn parse(body: &str) -> ParsedBody {
        let Ok(Value::Object(mut payload)) = serde_json::from_str::<Value>(body) else {
            return ParsedBody::Plain;
        };

        let Some(related) = payload.remove("relatedHTTPCode") else {
            return ParsedBody::Plain;
        };
        let Some(related_http_code) = status_code(&related) else {
            return ParsedBody::InvalidRelatedCode(related);
        };

        let mut take_text = |field: &str| match payload.remove(field) {
            Some(Value::String(text)) => Some(text),
            Some(Value::Null) | None => None,
            Some(other) => {
                payload.insert(field.to_string(), other);
                None
            }
        };

        ParsedBody::Envelope(Self {
            exception_error_message: take_text("exceptionErrorMessage"),
            exception_system_action: take_text("exceptionSystemAction"),
            exception_user_action: take_text("exceptionUserAction"),
            related_http_code,
            payload,
        })
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.payload.get(field)
    }

    /// Remove a payload field, leaving the rest of the envelope intact
    pub fn take(&mut self, field: &str) -> Option<Value> {
        self.payload.remove(field)
    }

    pub fn list(&self) -> Option<&Vec<Value>> {
        self.get("list").and_then(Value::as_array)
    }

    pub fn guid(&self) -> Option<&str> {
        self.get("guid").and_then(Value::as_str)
    }

    /// String entries of the `guids` array; empty if the field is absent
    pub fn guids(&self) -> Vec<String> {
        self.get("guids")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn flag(&self) -> Option<bool> {
        self.get("flag").and_then(Value::as_bool)
    }

    pub fn diagnostics(&self) -> ServerDiagnostics {
        ServerDiagnostics {
            error_message: self.exception_error_message.clone(),
            system_action: self.exception_system_action.clone(),
            user_action: self.exception_user_action.clone(),
        }
    }
}

/// A response body as the classifier sees it
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBody {
    Envelope(ResponseEnvelope),
    /// `relatedHTTPCode` was present but held no usable status code
    InvalidRelatedCode(Value),
    Plain,
}

impl ParsedBody {
    pub fn envelope(&self) -> Option<&ResponseEnvelope> {
        match self {
            Self::Envelope(envelope) => Some(envelope),
            Self::InvalidRelatedCode(_) | Self::Plain => None,
        }
    }
}

// integral JSON numbers only; 404.0 counts, "404" does not
fn status_code(value: &Value) -> Option<u16> {
    let Value::Number(number) = value else {
        return None;
    };
    let code = match number.as_u64() {
        Some(code) => code,
        None => number
            .as_f64()
            .filter(|code| code.fract() == 0.0 && (0.0..=f64::from(u16::MAX)).contains(code))
            .map(|code| code as u64)?,
    };
    u16::try_from(code).ok()
}

/// Successful result of a dispatched call
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// Decoded envelope whose related code was 200
    Envelope(ResponseEnvelope),
    /// Body of an endpoint that does not use the envelope
    Text(String),
}

/// Comment types accepted by the asset consumer service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommentType {
    Answer,
    Other,
    Question,
    StandardComment,
    Suggestion,
    UsageExperience,
}

/// Star ratings accepted by the asset consumer service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StarRating {
    NoRecommendation,
    OneStar,
    TwoStars,
    ThreeStars,
    FourStars,
    FiveStars,
}
