//! Request decorators run before a request is handed to the host.
//!
//! # Design
//! Each decorator takes an owned `RequestContext` and returns a new one; the
//! configured list is applied left to right by `apply`. Decorators never see
//! each other's state and never mutate anything outside the context they
//! were given.

use crate::cookie::get_cookie;
use crate::env::Environment;
use crate::http::{HeaderInit, Headers, RequestContext, RequestInit};

/// Cookie holding the token issued by the backend.
pub const CSRF_COOKIE: &str = "csrftoken";
/// Header the backend reads the token from.
pub const CSRF_HEADER: &str = "X-CSRFToken";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A pre-send hook.
pub trait Middleware: Send + Sync {
    fn pre(&self, env: &Environment, ctx: RequestContext) -> RequestContext;
}

impl<F> Middleware for F
where
    F: Fn(&Environment, RequestContext) -> RequestContext + Send + Sync,
{
    fn pre(&self, env: &Environment, ctx: RequestContext) -> RequestContext {
        self(env, ctx)
    }
}

/// Run `ctx` through every decorator in order.
pub fn apply(
    middleware: &[Box<dyn Middleware>],
    env: &Environment,
    ctx: RequestContext,
) -> RequestContext {
    middleware.iter().fold(ctx, |ctx, m| m.pre(env, ctx))
}

/// Adds the CSRF token from the `csrftoken` cookie and forces a JSON content
/// type. Headers already on the request are kept; only these two are
/// overwritten. A missing cookie yields an empty token.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsrfMiddleware;

impl Middleware for CsrfMiddleware {
    fn pre(&self, env: &Environment, ctx: RequestContext) -> RequestContext {
        let token = get_cookie(&env.cookies, CSRF_COOKIE);
        let RequestContext { url, init } = ctx;

        let mut headers = Headers::from(init.headers);
        headers.set(CSRF_HEADER, token.as_deref().unwrap_or(""));
        headers.set(CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE);

        tracing::debug!(
            method = init.method.as_str(),
            url = %url,
            token_present = token.is_some(),
            headers = headers.len(),
            "decorated request"
        );

        RequestContext {
            url,
            init: RequestInit {
                headers: HeaderInit::Headers(headers),
                ..init
            },
        }
    }
}
