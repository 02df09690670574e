use crate::config::{ClientConfig, ConfigValidatorImpl};
use crate::error::{CallSite, Result};
use crate::http::{ReqwestTransport, RequestDispatcher};
use crate::traits::{ConfigValidator, RequestObserver, Transport};
use crate::types::{DispatchOutcome, HttpMethod, RequestDescriptor, ResponseEnvelope};
use crate::url_builder::EndpointBuilder;
use crate::validation::{validate_paging, validate_user_id};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// One call against an Egeria service, relative to the service's user path
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCall<'a> {
    pub method: HttpMethod,
    pub path: Vec<&'a str>,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
    /// Overrides the connection-level identity for this call
    pub user_id: Option<&'a str>,
    pub timeout: Option<Duration>,
}

impl<'a> ServiceCall<'a> {
    pub fn new(method: HttpMethod, path: &[&'a str]) -> Self {
        Self {
            method,
            path: path.to_vec(),
            query: Vec::new(),
            body: None,
            user_id: None,
            timeout: None,
        }
    }

    pub fn get(path: &[&'a str]) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: &[&'a str]) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn delete(path: &[&'a str]) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn query<V: ToString>(mut self, key: &'static str, value: V) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    #[must_use]
    pub fn user(mut self, user_id: Option<&'a str>) -> Self {
        self.user_id = user_id;
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Connection to one OMAG server, shared by the resource clients.
///
/// Holds the validated configuration and a dispatcher. Cloning shares the
/// underlying transport.
pub struct EgeriaClient<T: Transport = ReqwestTransport> {
    config: Arc<ClientConfig>,
    dispatcher: RequestDispatcher<T>,
}

impl<T: Transport> Clone for EgeriaClient<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl EgeriaClient<ReqwestTransport> {
    /// Overlay `API_KEY`, validate `config` and connect over reqwest.
    ///
    /// An `api_key` already set in `config` wins over the environment. The
    /// platform URL is checked before the transport is built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let config = config.with_env_overrides(|key| std::env::var(key).ok());
        ConfigValidatorImpl::new().validate(&config)?;
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::from_parts(config, transport))
    }

    /// Load a TOML configuration file and connect
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(ClientConfig::load_with_validation(path)?)
    }
}

impl<T: Transport> EgeriaClient<T> {
    /// Validate `config` and use the given transport
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        ConfigValidatorImpl::new().validate(&config)?;
        Ok(Self::from_parts(config, transport))
    }

    fn from_parts(config: ClientConfig, transport: T) -> Self {
        Self {
            config: Arc::new(config),
            dispatcher: RequestDispatcher::new(transport),
        }
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.dispatcher = self.dispatcher.with_observer(observer);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn server_name(&self) -> &str {
        &self.config.server_name
    }

    pub fn dispatcher(&self) -> &RequestDispatcher<T> {
        &self.dispatcher
    }

    /// Pick the acting identity: per-call, then connection-level.
    ///
    /// Fails with `NULL_USER_ID` when neither is usable.
    pub fn resolve_user_id<'a>(&'a self, user_id: Option<&'a str>, site: &CallSite) -> Result<&'a str> {
        let user_id = user_id.or(self.config.user_id.as_deref()).unwrap_or_default();
        validate_user_id(user_id, site)?;
        Ok(user_id)
    }

    /// Check paging arguments against the configured maximum page size
    pub fn validate_paging(&self, start_from: i32, page_size: i32, site: &CallSite) -> Result<()> {
        validate_paging(start_from, page_size, self.config.max_page_size, site)
    }

    /// `<platform>/servers/{server}/open-metadata/{service}/users/{user}`
    pub fn service_endpoint(&self, service: &str, user_id: &str, site: &CallSite) -> Result<EndpointBuilder> {
        Ok(EndpointBuilder::new(&self.config.platform_url, site)?
            .segments(&["servers", self.config.server_name.as_str(), "open-metadata"])
            .path(service)
            .segments(&["users", user_id]))
    }

    /// `<platform>/open-metadata/platform-services/users/{user}/server-platform`
    pub fn platform_endpoint(&self, user_id: &str, site: &CallSite) -> Result<EndpointBuilder> {
        Ok(EndpointBuilder::new(&self.config.platform_url, site)?
            .path("open-metadata/platform-services")
            .segments(&["users", user_id, "server-platform"]))
    }

    /// Resolve identity, build the service endpoint and dispatch
    pub async fn call(&self, service: &str, call: ServiceCall<'_>, site: &CallSite) -> Result<DispatchOutcome> {
        let request = self.service_request(service, call, site)?;
        self.dispatcher.send(request, site).await
    }

    /// Like [`call`](Self::call) for endpoints that always answer with an envelope
    pub async fn call_envelope(&self, service: &str, call: ServiceCall<'_>, site: &CallSite) -> Result<ResponseEnvelope> {
        let request = self.service_request(service, call, site)?;
        self.dispatcher.send_envelope(request, site).await
    }

    /// Call for side effects only
    pub async fn call_unit(&self, service: &str, call: ServiceCall<'_>, site: &CallSite) -> Result<()> {
        self.call_envelope(service, call, site).await.map(|_| ())
    }

    /// Call an endpoint that answers with a `guid`
    pub async fn call_guid(&self, service: &str, call: ServiceCall<'_>, site: &CallSite) -> Result<String> {
        let request = self.service_request(service, call, site)?;
        self.dispatcher
            .send_required(request, site, |envelope| envelope.guid().map(str::to_string))
            .await
    }

    /// Call an endpoint that answers with a required payload field
    pub async fn call_field(&self, service: &str, field: &str, call: ServiceCall<'_>, site: &CallSite) -> Result<Value> {
        let request = self.service_request(service, call, site)?;
        self.dispatcher
            .send_required(request, site, |envelope| envelope.take(field))
            .await
    }

    /// Call an endpoint that answers with an array in `field`.
    ///
    /// The platform omits empty arrays, so a missing field is an empty result.
    pub async fn call_list(&self, service: &str, field: &str, call: ServiceCall<'_>, site: &CallSite) -> Result<Vec<Value>> {
        let mut envelope = self.call_envelope(service, call, site).await?;
        Ok(take_array(&mut envelope, field))
    }

    /// Call an endpoint that answers with an array of strings in `field`
    pub async fn call_strings(&self, service: &str, field: &str, call: ServiceCall<'_>, site: &CallSite) -> Result<Vec<String>> {
        let mut envelope = self.call_envelope(service, call, site).await?;
        Ok(take_strings(&mut envelope, field))
    }

    fn service_request(&self, service: &str, call: ServiceCall<'_>, site: &CallSite) -> Result<RequestDescriptor> {
        let user_id = self.resolve_user_id(call.user_id, site)?;
        let endpoint = call
            .query
            .iter()
            .fold(
                self.service_endpoint(service, user_id, site)?.segments(&call.path),
                |builder, (key, value)| builder.query(key, value),
            )
            .build();

        let mut request = RequestDescriptor::new(call.method, endpoint);
        request.body = call.body;
        request.timeout = call.timeout;
        Ok(request)
    }
}

pub(crate) fn take_array(envelope: &mut ResponseEnvelope, field: &str) -> Vec<Value> {
    match envelope.take(field) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// String entries of an array-valued field
pub(crate) fn take_strings(envelope: &mut ResponseEnvelope, field: &str) -> Vec<String> {
    take_array(envelope, field)
        .into_iter()
        .filter_map(|item| match item {
            Value::String(text) => Some(text),
            _ => None,
        })
        .collect()
}
