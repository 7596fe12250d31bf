//! Client configuration: base path, credential policy and middleware chain.

use std::fmt;

use crate::env::Environment;
use crate::host::resolve_backend_host;
use crate::http::Credentials;
use crate::middleware::{CsrfMiddleware, Middleware};

pub struct Configuration {
    pub base_path: String,
    pub credentials: Credentials,
    pub middleware: Vec<Box<dyn Middleware>>,
}

impl Configuration {
    pub fn new(base_path: &str) -> Self {
        Self {
            base_path: base_path.trim_end_matches('/').to_string(),
            credentials: Credentials::default(),
            middleware: Vec::new(),
        }
    }

    /// The application's default setup: backend host resolved once from
    /// `env`, cookies included, CSRF decorator installed.
    pub fn for_environment(env: &Environment) -> Self {
        let base_path = resolve_backend_host(env, None);
        tracing::info!(base_path = %base_path, "configured backend");
        Self::new(&base_path).with_middleware(CsrfMiddleware)
    }

    pub fn with_middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.middleware.push(Box::new(middleware));
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("base_path", &self.base_path)
            .field("credentials", &self.credentials)
            .field("middleware", &self.middleware.len())
            .finish()
    }
}
