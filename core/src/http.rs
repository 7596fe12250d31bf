//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! builds `HttpRequest` values and parses `HttpResponse` values without ever
//! touching the network; the caller (host) executes the actual I/O.
//!
//! Between those two ends sits the request-decoration stage: a
//! `RequestContext` (`url` + `RequestInit`) flows through the configured
//! middleware before it is flattened into an `HttpRequest`. Callers may hand
//! in headers either as a list of pairs or as a map (`HeaderInit`); both are
//! normalized into the canonical `Headers` mapping before any merging.

use std::collections::BTreeMap;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Methods the backend serves without CSRF verification.
    pub fn is_safe(self) -> bool {
        matches!(self, HttpMethod::Get)
    }
}

/// Whether the host should attach cookies to the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Credentials {
    Omit,
    SameOrigin,
    /// Send cookies on cross-origin requests too. The dev frontend and the
    /// backend live on different ports, so this is the client default.
    #[default]
    Include,
}

/// Insertion-ordered header mapping with case-insensitive, unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`. An existing entry with the same name (ignoring
    /// case) keeps its position and spelling; otherwise the entry is appended.
    pub fn set(&mut self, name: &str, value: &str) {
        match self
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some((_, v)) => *v = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.entries
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (k, v) in iter {
            headers.set(k.as_ref(), v.as_ref());
        }
        headers
    }
}

/// Header collection as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderInit {
    /// Ordered `(name, value)` pairs; duplicates collapse onto the first
    /// occurrence with the last value.
    Pairs(Vec<(String, String)>),
    Map(BTreeMap<String, String>),
    /// Already normalized.
    Headers(Headers),
}

impl Default for HeaderInit {
    fn default() -> Self {
        HeaderInit::Pairs(Vec::new())
    }
}

impl From<HeaderInit> for Headers {
    fn from(init: HeaderInit) -> Self {
        match init {
            HeaderInit::Pairs(pairs) => pairs.into_iter().collect(),
            HeaderInit::Map(map) => map.into_iter().collect(),
            HeaderInit::Headers(headers) => headers,
        }
    }
}

/// Everything about a pending request except its URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInit {
    pub method: HttpMethod,
    pub headers: HeaderInit,
    pub body: Option<String>,
    pub credentials: Credentials,
}

impl RequestInit {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            headers: HeaderInit::default(),
            body: None,
            credentials: Credentials::default(),
        }
    }
}

/// A request in flight through the middleware chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub url: String,
    pub init: RequestInit,
}

impl RequestContext {
    pub fn new(url: impl Into<String>, init: RequestInit) -> Self {
        Self {
            url: url.into(),
            init,
        }
    }

    /// Flatten into the plain-data request handed to the host.
    pub fn into_request(self) -> HttpRequest {
        let headers = Headers::from(self.init.headers).into_pairs();
        HttpRequest {
            method: self.init.method,
            path: self.url,
            headers,
            body: self.init.body,
            credentials: self.init.credentials,
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `JobMapClient::build_*` methods. The caller is responsible for
/// executing this request against the network and returning the corresponding
/// `HttpResponse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub credentials: Credentials,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// Constructed by the caller after executing an `HttpRequest`, then passed
/// to `JobMapClient::parse_*` methods for deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
