use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, Method, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub const CSRF_COOKIE: &str = "csrftoken";
pub const CSRF_HEADER: &str = "x-csrftoken";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JobOpening {
    pub id: i64,
    pub title: String,
    pub company_name: String,
    pub location: Option<[f64; 2]>,
    pub description: String,
    pub address: Option<String>,
    pub city: Option<String>,
}

/// A known place the geocoder can return.
#[derive(Clone, Debug)]
pub struct Place {
    pub name: String,
    pub state: String,
    pub countrycode: String,
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlaceProperties {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub state: String,
    pub countrycode: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlaceSearchResult {
    pub properties: PlaceProperties,
    pub geometry: Geometry,
    pub show_canton: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IsoPolygon {
    pub rings: Vec<Vec<[f64; 2]>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IsochroneOut {
    pub polygons: Vec<IsoPolygon>,
}

#[derive(Deserialize)]
pub struct JobParams {
    pub travel_time_minutes: u32,
    pub lat: f64,
    pub lon: f64,
    pub profile: String,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub zoom: u8,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Deserialize)]
pub struct DistanceCalculation {
    pub job_id: i64,
    pub abfahrtsort: Point,
    pub profile: String,
}

#[derive(Debug, Default)]
pub struct Backend {
    pub jobs: Vec<JobOpening>,
    pub places: Vec<Place>,
}

pub type Db = Arc<Backend>;

/// Router over the built-in sample data.
pub fn app() -> Router {
    app_with(sample_backend())
}

pub fn app_with(backend: Backend) -> Router {
    let api = Router::new()
        .route("/jobs", get(list_jobs))
        .route("/jobs/calc_distance", post(calc_distance))
        .route("/generate_isochrone", get(generate_isochrone))
        .route("/search", get(search))
        .layer(middleware::from_fn(require_csrf));
    Router::new().nest("/api", api).with_state(Arc::new(backend))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub fn sample_backend() -> Backend {
    let job = |id: i64, title: &str, company: &str, lon: f64, lat: f64, city: &str| JobOpening {
        id,
        title: title.to_string(),
        company_name: company.to_string(),
        location: Some([lon, lat]),
        description: format!("{title} bei {company}"),
        address: None,
        city: Some(city.to_string()),
    };
    let place = |name: &str, state: &str, lon: f64, lat: f64| Place {
        name: name.to_string(),
        state: state.to_string(),
        countrycode: "CH".to_string(),
        lon,
        lat,
    };
    Backend {
        jobs: vec![
            job(1, "Softwareentwickler", "Bernmobil", 7.4474, 46.9480, "Bern"),
            job(2, "Pflegefachperson", "Inselspital", 7.4246, 46.9470, "Bern"),
            job(3, "Schreiner", "Holzbau Thun", 7.6280, 46.7580, "Thun"),
            job(4, "Data Engineer", "Zürich Versicherung", 8.5417, 47.3769, "Zürich"),
        ],
        places: vec![
            place("Bern", "Bern", 7.4474, 46.9480),
            place("Thun", "Bern", 7.6280, 46.7580),
            place("Zürich", "Zürich", 8.5417, 47.3769),
            place("Buchs", "Aargau", 8.0820, 47.3930),
            place("Buchs", "St. Gallen", 9.4710, 47.1650),
        ],
    }
}

/// Unsafe methods must carry an `X-CSRFToken` header equal to the
/// `csrftoken` cookie.
async fn require_csrf(request: Request<axum::body::Body>, next: Next) -> Response {
    if request.method() == Method::GET {
        return next.run(request).await;
    }
    let headers = request.headers();
    let cookie = cookie_value(headers, CSRF_COOKIE);
    let header = headers
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    match (cookie, header) {
        (Some(cookie), Some(header)) if !cookie.is_empty() && cookie == header => next.run(request).await,
        _ => {
            tracing::warn!(path = %request.uri().path(), "CSRF verification failed");
            (StatusCode::FORBIDDEN, "CSRF verification failed").into_response()
        }
    }
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(axum::http::header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .map(str::trim)
        .find_map(|item| item.strip_prefix(name)?.strip_prefix('=').map(str::to_string))
}

async fn list_jobs(State(db): State<Db>, Query(params): Query<JobParams>) -> Json<Vec<JobOpening>> {
    let radius = reach_km(params.travel_time_minutes, &params.profile);
    let jobs: Vec<JobOpening> = db
        .jobs
        .iter()
        .filter(|job| {
            job.location
                .is_some_and(|[lon, lat]| haversine_km(params.lat, params.lon, lat, lon) <= radius)
        })
        .cloned()
        .collect();
    tracing::info!(radius_km = radius, found = jobs.len(), "listed jobs");
    Json(jobs)
}

async fn generate_isochrone(Query(params): Query<JobParams>) -> Json<IsochroneOut> {
    let radius = reach_km(params.travel_time_minutes, &params.profile);
    // Octagon around the start point; 1° latitude ≈ 111 km.
    let dlat = radius / 111.0;
    let dlon = dlat / params.lat.to_radians().cos().max(0.01);
    let mut ring: Vec<[f64; 2]> = (0..8)
        .map(|i| {
            let a = f64::from(i) * std::f64::consts::FRAC_PI_4;
            [params.lon + dlon * a.cos(), params.lat + dlat * a.sin()]
        })
        .collect();
    ring.push(ring[0]);
    Json(IsochroneOut {
        polygons: vec![IsoPolygon { rings: vec![ring] }],
    })
}

async fn search(State(db): State<Db>, Query(params): Query<SearchParams>) -> Json<Vec<PlaceSearchResult>> {
    let needle = params.query.to_lowercase();
    let mut hits: Vec<&Place> = db
        .places
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect();
    hits.sort_by(|a, b| {
        haversine_km(params.lat, params.lon, a.lat, a.lon)
            .total_cmp(&haversine_km(params.lat, params.lon, b.lat, b.lon))
    });
    hits.truncate(5);
    tracing::debug!(query = %params.query, zoom = params.zoom, hits = hits.len(), "searched places");

    let results = hits
        .iter()
        .map(|p| PlaceSearchResult {
            properties: PlaceProperties {
                name: p.name.clone(),
                kind: "city".to_string(),
                state: p.state.clone(),
                countrycode: p.countrycode.clone(),
            },
            geometry: Geometry {
                kind: "Point".to_string(),
                coordinates: [p.lon, p.lat],
            },
            show_canton: hits.iter().filter(|o| o.name == p.name).count() > 1,
        })
        .collect();
    Json(results)
}

async fn calc_distance(
    State(db): State<Db>,
    Json(input): Json<DistanceCalculation>,
) -> Result<Json<f64>, StatusCode> {
    let job = db
        .jobs
        .iter()
        .find(|j| j.id == input.job_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let [lon, lat] = job.location.ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
    let km = haversine_km(input.abfahrtsort.lat, input.abfahrtsort.lon, lat, lon);
    tracing::info!(job_id = input.job_id, profile = %input.profile, km, "calculated distance");
    Ok(Json((km * 10.0).round() / 10.0))
}

/// Distance reachable in `minutes` with a rough average speed per profile.
fn reach_km(minutes: u32, profile: &str) -> f64 {
    let kmh = match profile {
        "foot" => 5.0,
        "bike" => 15.0,
        _ => 50.0,
    };
    f64::from(minutes) * kmh / 60.0
}

fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;
    let (dlat, dlon) = ((lat2 - lat1).to_radians(), (lon2 - lon1).to_radians());
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}
