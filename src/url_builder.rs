use crate::error::{CallSite, Result};
use crate::validation::validate_url;
use url::Url;
use urlencoding::encode;

/// Builder for endpoint URLs below a validated platform address.
///
/// Path segments are percent-encoded one by one, so a name containing `/`
/// or spaces stays a single segment.
#[derive(Debug, Clone)]
pub struct EndpointBuilder {
    url: Url,
    query: Vec<(String, String)>,
}

impl EndpointBuilder {
    /// Start from `base`, which must pass address validation
    pub fn new(base: &str, site: &CallSite) -> Result<Self> {
        let mut url = validate_url(base, site)?;
        url.set_query(None);
        url.set_fragment(None);
        Ok(Self {
            url,
            query: Vec::new(),
        })
    }

    /// Append one path segment
    #[must_use]
    pub fn segment(mut self, segment: &str) -> Self {
        if let Ok(mut segments) = self.url.path_segments_mut() {
            segments.pop_if_empty().push(segment);
        }
        self
    }

    #[must_use]
    pub fn segments(self, segments: &[&str]) -> Self {
        segments.iter().fold(self, |builder, s| builder.segment(s))
    }

    /// Append a fixed `/`-separated path such as `access-services/asset-consumer`
    #[must_use]
    pub fn path(self, path: &str) -> Self {
        path.split('/')
            .filter(|s| !s.is_empty())
            .fold(self, |builder, s| builder.segment(s))
    }

    #[must_use]
    pub fn query<V: ToString>(mut self, key: &str, value: V) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn build(mut self) -> String {
        if !self.query.is_empty() {
            let query = self
                .query
                .iter()
                .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
                .collect::<Vec<_>>()
                .join("&");
            self.url.set_query(Some(&query));
        }
        self.url.to_string()
    }
}
