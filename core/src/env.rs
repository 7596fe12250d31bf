//! Read-only view of the runtime the client is executing in.
//!
//! # Design
//! The network location and the raw cookie string are supplied by whoever
//! embeds the core (a browser shell, a CLI, a test) and passed explicitly into
//! the host resolver and the request decorators. Nothing in the core reads
//! them from globals, so every operation is deterministic given an
//! `Environment`.

use url::Url;

use crate::error::ApiError;

/// Origin used by `Environment::from_env` when `JOBMAP_ORIGIN` is unset. This
/// is the address of the frontend dev server.
pub const DEFAULT_ORIGIN: &str = "http://localhost:5173";

/// The runtime's current network location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Scheme including the trailing colon, e.g. `https:`.
    pub protocol: String,
    pub hostname: String,
    /// Explicit port. `None` when the origin uses the scheme's default port.
    pub port: Option<u16>,
}

impl Location {
    pub fn new(protocol: &str, hostname: &str, port: Option<u16>) -> Self {
        Self {
            protocol: protocol.to_string(),
            hostname: hostname.to_string(),
            port,
        }
    }

    /// Parse an origin such as `https://jobs.example.ch:8443`. Paths, queries
    /// and fragments are ignored; default ports are dropped.
    pub fn parse(origin: &str) -> Result<Self, ApiError> {
        let url = Url::parse(origin).map_err(|e| ApiError::InvalidOrigin {
            origin: origin.to_string(),
            reason: e.to_string(),
        })?;
        let hostname = url.host_str().ok_or_else(|| ApiError::InvalidOrigin {
            origin: origin.to_string(),
            reason: "origin has no host".to_string(),
        })?;
        Ok(Self {
            protocol: format!("{}:", url.scheme()),
            hostname: hostname.to_string(),
            port: url.port(),
        })
    }

    /// Hostname plus `:port` when a port is present.
    pub fn host(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{port}", self.hostname),
            None => self.hostname.clone(),
        }
    }
}

/// Everything the core reads from the outside world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub location: Location,
    /// Raw cookie string, `name=value` pairs separated by `;`.
    pub cookies: String,
}

impl Environment {
    pub fn new(location: Location, cookies: &str) -> Self {
        Self {
            location,
            cookies: cookies.to_string(),
        }
    }

    /// Build an environment from `JOBMAP_ORIGIN` and `JOBMAP_COOKIES`.
    pub fn from_env() -> Result<Self, ApiError> {
        let origin = std::env::var("JOBMAP_ORIGIN").unwrap_or_else(|_| DEFAULT_ORIGIN.to_string());
        let cookies = std::env::var("JOBMAP_COOKIES").unwrap_or_default();
        let location = Location::parse(&origin)?;
        tracing::debug!(origin = %origin, "loaded environment");
        Ok(Self { location, cookies })
    }
}
