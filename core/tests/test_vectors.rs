//! Verify host resolution, cookie lookup and request decoration against JSON
//! test vectors stored in `test-vectors/`.

use std::collections::BTreeMap;

use jobmap_core::{
    get_cookie, resolve_backend_host, CsrfMiddleware, Environment, HeaderInit, Headers, HttpMethod, Location,
    Middleware, RequestContext, RequestInit,
};

fn string_pairs(value: &serde_json::Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

fn header_init(value: &serde_json::Value) -> HeaderInit {
    if let Some(pairs) = value.get("pairs") {
        return HeaderInit::Pairs(string_pairs(pairs));
    }
    let map: BTreeMap<String, String> = serde_json::from_value(value["map"].clone()).unwrap();
    HeaderInit::Map(map)
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

#[test]
fn host_test_vectors() {
    let raw = include_str!("../../test-vectors/host.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let location = Location::new(
            case["protocol"].as_str().unwrap(),
            case["hostname"].as_str().unwrap(),
            case["port"].as_u64().map(|p| p as u16),
        );
        let env = Environment::new(location, "");
        let resolved = resolve_backend_host(&env, case["override"].as_str());
        assert_eq!(resolved, case["expected"].as_str().unwrap(), "{name}");
        assert!(!resolved.ends_with('/'), "{name}: trailing slash");
    }
}

// ---------------------------------------------------------------------------
// Cookie
// ---------------------------------------------------------------------------

#[test]
fn cookie_test_vectors() {
    let raw = include_str!("../../test-vectors/cookie.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let found = get_cookie(case["raw"].as_str().unwrap(), case["cookie"].as_str().unwrap());
        assert_eq!(found.as_deref(), case["expected"].as_str(), "{name}");
    }
}

// ---------------------------------------------------------------------------
// Decoration
// ---------------------------------------------------------------------------

#[test]
fn decorate_test_vectors() {
    let raw = include_str!("../../test-vectors/decorate.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let env = Environment::new(
            Location::new("http:", "localhost", Some(5173)),
            case["cookies"].as_str().unwrap(),
        );
        let mut init = RequestInit::new(HttpMethod::Post);
        init.headers = header_init(&case["headers"]);
        let ctx = RequestContext::new("http://localhost:8000/api/jobs/calc_distance", init);

        let once = CsrfMiddleware.pre(&env, ctx.clone());
        assert_eq!(once.url, ctx.url, "{name}: url");
        let headers = Headers::from(once.init.headers.clone()).into_pairs();
        assert_eq!(headers, string_pairs(&case["expected_headers"]), "{name}: headers");

        let twice = CsrfMiddleware.pre(&env, once.clone());
        assert_eq!(
            Headers::from(twice.init.headers),
            Headers::from(once.init.headers),
            "{name}: idempotent"
        );
    }
}
