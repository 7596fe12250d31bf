//! Domain DTOs for the job-map API and the Photon geocoder.
//!
//! # Design
//! These types mirror the backend's JSON schema but are defined
//! independently of the mock server; integration tests catch any drift.
//! Coordinates travel as `[longitude, latitude]` arrays, the GeoJSON order.

use serde::{Deserialize, Serialize};

/// Bounding box of a geocoder feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Extent {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl From<[f64; 4]> for Extent {
    fn from([west, south, east, north]: [f64; 4]) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }
}

impl From<Extent> for [f64; 4] {
    fn from(e: Extent) -> Self {
        [e.west, e.south, e.east, e.north]
    }
}

/// OpenStreetMap element kind: node, way or relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OsmType {
    N,
    W,
    R,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub housenumber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countrycode: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<Extent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub osm_type: Option<OsmType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osm_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osm_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osm_value: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryKind {
    #[default]
    Point,
}

/// Point geometry; every feature has one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    #[serde(rename = "type", default)]
    pub kind: GeometryKind,
    /// `[longitude, latitude]`.
    pub coordinates: [f64; 2],
}

impl PointGeometry {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            kind: GeometryKind::Point,
            coordinates: [lon, lat],
        }
    }

    pub fn lon(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn lat(&self) -> f64 {
        self.coordinates[1]
    }
}

/// A single feature from a Photon geocoder response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotonFeature {
    #[serde(default)]
    pub properties: FeatureProperties,
    pub geometry: PointGeometry,
}

/// A geocoder feature as returned by `/api/search`, plus a flag telling the
/// UI to show the canton to disambiguate equally named places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSearchResult {
    #[serde(flatten)]
    pub feature: PhotonFeature,
    pub show_canton: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOpening {
    pub id: i64,
    pub title: String,
    pub company_name: String,
    /// `[longitude, latitude]` of the workplace, when geocoded.
    #[serde(default)]
    pub location: Option<[f64; 2]>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsoPolygon {
    pub rings: Vec<Vec<[f64; 2]>>,
}

/// Area reachable within a travel-time budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Isochrone {
    pub polygons: Vec<IsoPolygon>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

/// Request payload for `/api/jobs/calc_distance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceCalculation {
    pub job_id: i64,
    /// Departure point.
    pub abfahrtsort: Point,
    pub profile: String,
}

/// Parameters shared by `/api/jobs` and `/api/generate_isochrone`.
#[derive(Debug, Clone, PartialEq)]
pub struct JobQuery {
    pub travel_time_minutes: u32,
    pub lat: f64,
    pub lon: f64,
    /// Routing profile, e.g. `car`, `bike`, `foot`.
    pub profile: String,
}

/// Parameters for `/api/search`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceQuery {
    pub query: String,
    pub zoom: u8,
    pub lat: f64,
    pub lon: f64,
}
