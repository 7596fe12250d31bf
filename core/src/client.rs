//! Stateless HTTP request builder and response parser for the job-map API.
//!
//! # Design
//! `JobMapClient` holds a `Configuration` and the `Environment` it was
//! created for, and carries no mutable state between calls. Each operation is
//! split into a `build_*` method that produces an `HttpRequest` and a
//! `parse_*` method that consumes an `HttpResponse`. Every built request has
//! already passed through the configured middleware chain; the caller only
//! executes the round-trip.

use serde::de::DeserializeOwned;
use url::form_urlencoded;

use crate::config::Configuration;
use crate::env::Environment;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestContext, RequestInit};
use crate::middleware::apply;
use crate::types::{DistanceCalculation, Isochrone, JobOpening, JobQuery, PlaceQuery, PlaceSearchResult};

/// Synchronous, stateless client for the job-map API.
#[derive(Debug)]
pub struct JobMapClient {
    config: Configuration,
    env: Environment,
}

impl JobMapClient {
    pub fn new(config: Configuration, env: Environment) -> Self {
        Self { config, env }
    }

    /// Client with the application's default configuration for `env`.
    pub fn for_environment(env: Environment) -> Self {
        Self::new(Configuration::for_environment(&env), env)
    }

    pub fn base_path(&self) -> &str {
        &self.config.base_path
    }

    pub fn build_list_jobs(&self, query: &JobQuery) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/api/jobs?{}", job_query_string(query)), None)
    }

    pub fn build_generate_isochrone(&self, query: &JobQuery) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("/api/generate_isochrone?{}", job_query_string(query)),
            None,
        )
    }

    pub fn build_search_places(&self, query: &PlaceQuery) -> HttpRequest {
        let qs = form_urlencoded::Serializer::new(String::new())
            .append_pair("query", &query.query)
            .append_pair("zoom", &query.zoom.to_string())
            .append_pair("lat", &query.lat.to_string())
            .append_pair("lon", &query.lon.to_string())
            .finish();
        self.request(HttpMethod::Get, &format!("/api/search?{qs}"), None)
    }

    pub fn build_calc_distance(&self, input: &DistanceCalculation) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.request(HttpMethod::Post, "/api/jobs/calc_distance", Some(body)))
    }

    pub fn parse_list_jobs(&self, response: HttpResponse) -> Result<Vec<JobOpening>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_generate_isochrone(&self, response: HttpResponse) -> Result<Isochrone, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_search_places(&self, response: HttpResponse) -> Result<Vec<PlaceSearchResult>, ApiError> {
        parse_json(response, 200)
    }

    /// Distance in kilometres.
    pub fn parse_calc_distance(&self, response: HttpResponse) -> Result<f64, ApiError> {
        parse_json(response, 200)
    }

    fn request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        let mut init = RequestInit::new(method);
        init.body = body;
        init.credentials = self.config.credentials;
        let ctx = RequestContext::new(format!("{}{path}", self.config.base_path), init);
        apply(&self.config.middleware, &self.env, ctx).into_request()
    }
}

fn job_query_string(query: &JobQuery) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("travel_time_minutes", &query.travel_time_minutes.to_string())
        .append_pair("lat", &query.lat.to_string())
        .append_pair("lon", &query.lon.to_string())
        .append_pair("profile", &query.profile)
        .finish()
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    match response.status {
        404 => Err(ApiError::NotFound),
        403 => Err(ApiError::Forbidden(response.body.clone())),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
