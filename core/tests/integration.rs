//! End-to-end test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every client
//! operation over real HTTP using ureq. The host side mirrors what a browser
//! does: it executes the decorated request as-is and attaches the cookie
//! string when the request's credential policy allows it.

use jobmap_core::{
    ApiError, Configuration, Credentials, CsrfMiddleware, DistanceCalculation, Environment, HttpMethod,
    HttpRequest, HttpResponse, JobMapClient, JobQuery, Location, PlaceQuery, Point,
};

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, req: &HttpRequest, env: &Environment) -> ureq::RequestBuilder<B> {
    for (name, value) in &req.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if req.credentials != Credentials::Omit && !env.cookies.is_empty() {
        builder = builder.header("Cookie", env.cookies.as_str());
    }
    builder
}

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: HttpRequest, env: &Environment) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match req.method {
        HttpMethod::Get => with_headers(agent.get(&req.path), &req, env).call(),
        HttpMethod::Delete => with_headers(agent.delete(&req.path), &req, env).call(),
        HttpMethod::Post => {
            let body = req.body.clone().unwrap_or_default();
            with_headers(agent.post(&req.path), &req, env).send(body.as_bytes())
        }
        HttpMethod::Put => {
            let body = req.body.clone().unwrap_or_default();
            with_headers(agent.put(&req.path), &req, env).send(body.as_bytes())
        }
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });
    addr
}

fn client_for(addr: std::net::SocketAddr, cookies: &str) -> (JobMapClient, Environment) {
    let env = Environment::new(Location::new("http:", "127.0.0.1", Some(5173)), cookies);
    let config = Configuration::new(&format!("http://{addr}")).with_middleware(CsrfMiddleware);
    (JobMapClient::new(config, env.clone()), env)
}

#[test]
fn job_search_session() {
    let addr = start_server();
    let (client, env) = client_for(addr, "sessionid=s1; csrftoken=tok-42");

    // Step 1: find the starting place.
    let req = client.build_search_places(&PlaceQuery {
        query: "Bern".to_string(),
        zoom: 10,
        lat: 46.9,
        lon: 7.4,
    });
    let places = client.parse_search_places(execute(req, &env)).unwrap();
    assert_eq!(places.len(), 1);
    let start = places[0].feature.geometry;
    assert!(!places[0].show_canton);

    let query = JobQuery {
        travel_time_minutes: 40,
        lat: start.lat(),
        lon: start.lon(),
        profile: "car".to_string(),
    };

    // Step 2: reachable area.
    let req = client.build_generate_isochrone(&query);
    let iso = client.parse_generate_isochrone(execute(req, &env)).unwrap();
    assert_eq!(iso.polygons.len(), 1);

    // Step 3: jobs inside it.
    let req = client.build_list_jobs(&query);
    let jobs = client.parse_list_jobs(execute(req, &env)).unwrap();
    assert_eq!(jobs.len(), 3);
    assert!(jobs.iter().all(|j| j.company_name != "Zürich Versicherung"));

    // Step 4: distance to a job, a POST guarded by the CSRF token.
    let input = DistanceCalculation {
        job_id: 3,
        abfahrtsort: Point {
            lat: start.lat(),
            lon: start.lon(),
        },
        profile: "car".to_string(),
    };
    let req = client.build_calc_distance(&input).unwrap();
    let km = client.parse_calc_distance(execute(req, &env)).unwrap();
    assert!((km - 25.2).abs() < 0.2, "got {km}");

    // Step 5: unknown job.
    let input = DistanceCalculation { job_id: 999, ..input };
    let req = client.build_calc_distance(&input).unwrap();
    let err = client.parse_calc_distance(execute(req, &env)).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
}

#[test]
fn post_without_csrf_cookie_is_forbidden() {
    let addr = start_server();
    let (client, env) = client_for(addr, "sessionid=s1");

    let input = DistanceCalculation {
        job_id: 1,
        abfahrtsort: Point { lat: 46.9, lon: 7.4 },
        profile: "foot".to_string(),
    };
    let req = client.build_calc_distance(&input).unwrap();
    assert_eq!(req.header("X-CSRFToken"), Some(""));
    let err = client.parse_calc_distance(execute(req, &env)).unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));
}

#[test]
fn get_without_csrf_cookie_still_works() {
    let addr = start_server();
    let (client, env) = client_for(addr, "");

    let req = client.build_list_jobs(&JobQuery {
        travel_time_minutes: 10,
        lat: 46.948,
        lon: 7.4474,
        profile: "foot".to_string(),
    });
    let jobs = client.parse_list_jobs(execute(req, &env)).unwrap();
    assert_eq!(jobs.len(), 1);
}
