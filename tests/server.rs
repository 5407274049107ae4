//! Router-level tests for the review HTTP API.
//!
//! Each test builds the router over an in-memory store and drives it with
//! `tower::ServiceExt::oneshot`, so no socket is bound.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Local, NaiveDateTime};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

use review_analyzer::models::{Review, SentimentScore, TIMESTAMP_FORMAT};
use review_analyzer::sentiment::{LexiconScorer, SentimentScorer};
use review_analyzer::server::{build_router, AppState};
use review_analyzer::store::ReviewStore;

/// Scores bodies from a fixed table; anything else is neutral.
struct FixedScorer(HashMap<&'static str, f64>);

impl SentimentScorer for FixedScorer {
    fn name(&self) -> &str {
        "fixed"
    }
    fn score(&self, text: &str) -> SentimentScore {
        let compound = self.0.get(text).copied().unwrap_or(0.0);
        SentimentScore {
            neg: 0.0,
            neu: 1.0,
            pos: 0.0,
            compound,
        }
    }
}

fn review(id: &str, body: &str, location: &str, ts: &str) -> Review {
    Review {
        id: id.to_string(),
        body: body.to_string(),
        location: location.to_string(),
        timestamp: NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).unwrap(),
    }
}

fn seed() -> Vec<Review> {
    vec![
        review("r1", "ok", "Denver, Colorado", "2023-01-10 09:00:00"),
        review("r2", "loved it", "Tucson, Arizona", "2023-01-20 18:30:00"),
        review("r3", "awful", "Denver, Colorado", "2023-02-01 00:00:00"),
        review("r4", "fine", "Denver, Colorado", "2023-02-01 12:00:00"),
        review("r5", "ok", "Phoenix, Arizona", "2023-03-05 11:11:11"),
    ]
}

fn fixed_scorer() -> Arc<dyn SentimentScorer> {
    Arc::new(FixedScorer(HashMap::from([
        ("ok", 0.3),
        ("loved it", 0.9),
        ("awful", -0.7),
        ("fine", 0.3),
    ])))
}

fn setup_app(scorer: Arc<dyn SentimentScorer>) -> (Arc<ReviewStore>, Router) {
    let store = Arc::new(ReviewStore::with_reviews(seed()));
    let app = build_router(AppState::new(store.clone(), scorer));
    (store, app)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_form(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Reads the body. Successful responses must declare a `Content-Length`
/// equal to the body's byte length.
async fn read_json(response: axum::response::Response) -> Value {
    let declared = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .map(|v| v.to_str().unwrap().parse::<usize>().unwrap());
    if response.status().is_success() {
        assert!(declared.is_some(), "missing Content-Length");
    }
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    if let Some(len) = declared {
        assert_eq!(len, bytes.len(), "Content-Length mismatch");
    }
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn assert_method_not_allowed(response: axum::response::Response) {
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"Method Not Allowed");
}

fn ids(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|r| r["ReviewId"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// GET
// =============================================================================

#[tokio::test]
async fn test_list_all_ranked_with_stable_ties() {
    let (_store, app) = setup_app(fixed_scorer());
    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert!(response.headers().contains_key(header::CONTENT_LENGTH));

    let body = read_json(response).await;
    // r1, r4, r5 tie at 0.3 and keep store order.
    assert_eq!(ids(&body), vec!["r2", "r1", "r4", "r5", "r3"]);
}

#[tokio::test]
async fn test_list_item_shape() {
    let (_store, app) = setup_app(fixed_scorer());
    let body = read_json(app.oneshot(get("/?location=Tucson,%20Arizona")).await.unwrap()).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);

    let item = &items[0];
    assert_eq!(item["ReviewId"], "r2");
    assert_eq!(item["ReviewBody"], "loved it");
    assert_eq!(item["Location"], "Tucson, Arizona");
    assert_eq!(item["Timestamp"], "2023-01-20 18:30:00");
    for key in ["neg", "neu", "pos", "compound"] {
        assert!(item["sentiment"][key].is_f64(), "missing sentiment.{}", key);
    }
    assert_eq!(item["sentiment"]["compound"], 0.9);
}

#[tokio::test]
async fn test_list_location_filter() {
    let (_store, app) = setup_app(fixed_scorer());
    let body = read_json(
        app.oneshot(get("/?location=Denver%2C+Colorado"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(ids(&body), vec!["r1", "r4", "r3"]);
    for item in body.as_array().unwrap() {
        assert_eq!(item["Location"], "Denver, Colorado");
    }
}

#[tokio::test]
async fn test_list_date_range_end_is_start_of_day() {
    let (_store, app) = setup_app(fixed_scorer());
    let body = read_json(
        app.oneshot(get("/?start_date=2023-01-15&end_date=2023-02-01"))
            .await
            .unwrap(),
    )
    .await;
    // r4 (2023-02-01 12:00:00) is after the end bound's midnight.
    assert_eq!(ids(&body), vec!["r2", "r3"]);
}

#[tokio::test]
async fn test_list_inverted_range_is_empty() {
    let (_store, app) = setup_app(fixed_scorer());
    let response = app
        .oneshot(get("/?start_date=2023-03-01&end_date=2023-01-01"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body, Value::Array(vec![]));
}

#[tokio::test]
async fn test_list_empty_params_are_ignored() {
    let (_store, app) = setup_app(fixed_scorer());
    let body = read_json(
        app.oneshot(get("/?location=&start_date=&end_date="))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_list_malformed_date_is_bad_request() {
    let (store, app) = setup_app(fixed_scorer());
    let response = app.oneshot(get("/?start_date=01-15-2023")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(
        body["error"],
        "Invalid start_date '01-15-2023': expected YYYY-MM-DD."
    );
    assert_eq!(store.len(), 5);
}

#[tokio::test]
async fn test_any_path_serves_reviews() {
    let (_store, app) = setup_app(fixed_scorer());
    for uri in ["/reviews", "/anything", "/a/b/c?location=Tucson%2C+Arizona"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
        let body = read_json(response).await;
        let expected = if uri.contains("Tucson") { 1 } else { 5 };
        assert_eq!(body.as_array().unwrap().len(), expected, "GET {}", uri);
    }
}

#[tokio::test]
async fn test_list_repeated_param_uses_first_value() {
    let (_store, app) = setup_app(fixed_scorer());
    let response = app
        .oneshot(get(
            "/?location=Tucson%2C+Arizona&location=Denver%2C+Colorado",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(ids(&read_json(response).await), vec!["r2"]);
}

#[tokio::test]
async fn test_list_repeated_date_skips_empty_value() {
    let (_store, app) = setup_app(fixed_scorer());
    let body = read_json(
        app.oneshot(get("/?start_date=&start_date=2023-03-01"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(ids(&body), vec!["r5"]);
}

// =============================================================================
// POST
// =============================================================================

#[tokio::test]
async fn test_create_then_read_round_trip() {
    let (store, app) = setup_app(Arc::new(LexiconScorer::new()));
    let before = Local::now().naive_local();

    let response = app
        .clone()
        .oneshot(post_form(
            "Location=Denver%2C+Colorado&ReviewBody=Great+food%21",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json(response).await;

    let id = created["ReviewId"].as_str().unwrap().to_string();
    assert!(uuid::Uuid::parse_str(&id).is_ok());
    assert_eq!(created["ReviewBody"], "Great food!");
    assert_eq!(created["Location"], "Denver, Colorado");
    assert!(created.get("sentiment").is_none());

    let ts = NaiveDateTime::parse_from_str(created["Timestamp"].as_str().unwrap(), TIMESTAMP_FORMAT)
        .unwrap();
    assert!((ts - before).num_seconds().abs() <= 5);
    assert_eq!(store.len(), 6);

    let body = read_json(
        app.oneshot(get("/?location=Denver%2C+Colorado"))
            .await
            .unwrap(),
    )
    .await;
    let found = body
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["ReviewId"] == id.as_str())
        .expect("created review should be listed");
    assert!(found["sentiment"]["compound"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_create_missing_location_is_invalid_location() {
    let (store, app) = setup_app(fixed_scorer());
    let response = app.oneshot(post_form("ReviewBody=Great+food%21")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body, serde_json::json!({ "error": "Invalid location." }));
    assert_eq!(store.len(), 5);
}

#[tokio::test]
async fn test_create_unknown_location_is_invalid_location() {
    let (store, app) = setup_app(fixed_scorer());
    let response = app
        .oneshot(post_form(
            "Location=Nowhere%2C+Nowhere&ReviewBody=Great+food%21",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["error"], "Invalid location.");
    assert_eq!(store.len(), 5);
}

#[tokio::test]
async fn test_create_empty_body_is_missing_field() {
    let (store, app) = setup_app(fixed_scorer());
    let response = app
        .oneshot(post_form("Location=Denver%2C+Colorado&ReviewBody="))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await["error"],
        "Location and ReviewBody are required."
    );
    assert_eq!(store.len(), 5);
}

#[tokio::test]
async fn test_create_repeated_field_uses_first_value() {
    let (store, app) = setup_app(fixed_scorer());
    let response = app
        .oneshot(post_form(
            "Location=Denver%2C+Colorado&Location=Nowhere&ReviewBody=Hi&ReviewBody=Again",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json(response).await;
    assert_eq!(created["Location"], "Denver, Colorado");
    assert_eq!(created["ReviewBody"], "Hi");
    assert_eq!(store.len(), 6);
}

#[tokio::test]
async fn test_create_on_other_path() {
    let (store, app) = setup_app(fixed_scorer());
    let request = Request::builder()
        .method("POST")
        .uri("/submit")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("Location=Phoenix%2C+Arizona&ReviewBody=Nice"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(read_json(response).await["Location"], "Phoenix, Arizona");
    assert_eq!(store.len(), 6);
}

#[tokio::test]
async fn test_create_without_form_content_type_is_treated_as_empty() {
    let (_store, app) = setup_app(fixed_scorer());
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["error"], "Invalid location.");
}

// =============================================================================
// Other methods and health
// =============================================================================

#[tokio::test]
async fn test_delete_is_method_not_allowed() {
    let (store, app) = setup_app(fixed_scorer());
    let response = app.oneshot(request("DELETE", "/")).await.unwrap();
    assert_method_not_allowed(response).await;
    assert_eq!(store.len(), 5);
}

#[tokio::test]
async fn test_head_is_method_not_allowed() {
    let (_store, app) = setup_app(fixed_scorer());
    for uri in ["/", "/reviews"] {
        let response = app.clone().oneshot(request("HEAD", uri)).await.unwrap();
        assert_method_not_allowed(response).await;
    }
}

#[tokio::test]
async fn test_options_is_method_not_allowed() {
    let (_store, app) = setup_app(fixed_scorer());
    let response = app.clone().oneshot(request("OPTIONS", "/")).await.unwrap();
    assert_method_not_allowed(response).await;

    // A CORS preflight gets the same answer.
    let preflight = Request::builder()
        .method("OPTIONS")
        .uri("/")
        .header(header::ORIGIN, "http://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(preflight).await.unwrap();
    assert!(!response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert_method_not_allowed(response).await;
}

#[tokio::test]
async fn test_put_on_other_path_is_method_not_allowed() {
    let (store, app) = setup_app(fixed_scorer());
    let response = app.oneshot(request("PUT", "/reviews/r1")).await.unwrap();
    assert_method_not_allowed(response).await;
    assert_eq!(store.len(), 5);
}

#[tokio::test]
async fn test_health() {
    let (_store, app) = setup_app(fixed_scorer());
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}
