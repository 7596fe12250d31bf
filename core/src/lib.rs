//! Synchronous API client core for the job-map service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). Before a request leaves the
//! core it runs through a chain of request decorators; the default chain adds
//! the CSRF token from the `csrftoken` cookie and a JSON content type.
//!
//! # Design
//! - The runtime's location and cookie string are injected as an
//!   `Environment`, never read from globals.
//! - The backend base URL is resolved once from the `Environment` when a
//!   `Configuration` is created (`host::resolve_backend_host`).
//! - Decorators take and return owned `RequestContext` values and are
//!   composed left to right.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod cookie;
pub mod env;
pub mod error;
pub mod host;
pub mod http;
pub mod middleware;
pub mod types;

pub use client::JobMapClient;
pub use config::Configuration;
pub use cookie::get_cookie;
pub use env::{Environment, Location};
pub use error::ApiError;
pub use host::{is_localhost, resolve_backend_host};
pub use http::{
    Credentials, HeaderInit, Headers, HttpMethod, HttpRequest, HttpResponse, RequestContext, RequestInit,
};
pub use middleware::{apply, CsrfMiddleware, Middleware};
pub use types::{
    DistanceCalculation, Extent, FeatureProperties, IsoPolygon, Isochrone, JobOpening, JobQuery, OsmType,
    PhotonFeature, PlaceQuery, PlaceSearchResult, Point, PointGeometry,
};
