//! Backend host resolution.
//!
//! During local development the frontend dev server and the backend listen
//! on different ports of the same machine, so requests are redirected to
//! `DEV_BACKEND_PORT`. Deployed builds talk to the host they were served from.

use crate::env::{Environment, Location};

/// Port the backend listens on during local development.
pub const DEV_BACKEND_PORT: u16 = 8000;

/// Whether `location` is a local development machine.
pub fn is_localhost(location: &Location) -> bool {
    location.hostname == "localhost" || location.hostname == "127.0.0.1"
}

/// Base URL (`protocol//host[:port]`) all API requests are sent to.
///
/// `protocol` must include the trailing colon (`https:`, `wss:`); when absent
/// the environment's current protocol is used. Never ends with a slash.
pub fn resolve_backend_host(env: &Environment, protocol: Option<&str>) -> String {
    let location = &env.location;
    let host = if is_localhost(location) {
        format!("{}:{DEV_BACKEND_PORT}", location.hostname)
    } else {
        location.host()
    };
    let protocol = protocol.unwrap_or(&location.protocol);
    format!("{protocol}//{host}")
}
