//! Contract tests for the certification helper client against an
//! in-process mock of the helper's endpoints.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::json;

use runcert_client::api::{CertHelperApi, ClientError, IntegrityRequest, RegistryLookup};
use runcert_client::live::{LiveIntegrity, LiveRunList};
use runcert_core::run::{RecoType, RunSnapshot};
use runcert_core::validation::report::Severity;

/// Serve the router on an ephemeral port and return its base URL.
async fn spawn_helper(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Test server error");
    });

    format!("http://{addr}")
}

fn api(base_url: &str) -> CertHelperApi {
    CertHelperApi::with_client(reqwest::Client::new(), base_url.to_string())
}

// ---------------------------------------------------------------------------
// Test: dropdown fragments are fetched with the right query parameter
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_subcategories_parses_the_option_fragment() {
    let router = Router::new().route(
        "/ajax/load-subcategories/",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            if params.get("categoryid").map(String::as_str) != Some("4") {
                return Err(StatusCode::BAD_REQUEST);
            }
            Ok(Html(
                "<option value=\"\">---------</option><option value=\"7\">Tracker</option>",
            ))
        }),
    );
    let base = spawn_helper(router).await;

    let options = api(&base).load_subcategories(4).await.unwrap();
    assert_eq!(options.len(), 2);
    assert!(options[0].is_placeholder());
    assert_eq!(options[1].value, "7");
    assert_eq!(options[1].label, "Tracker");
}

#[tokio::test]
async fn load_subsubcategories_uses_the_subcategory_parameter() {
    let router = Router::new().route(
        "/ajax/load-subsubcategories/",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            if params.get("subcategoryid").map(String::as_str) != Some("7") {
                return Err(StatusCode::BAD_REQUEST);
            }
            Ok(Html("<option value=\"9\">Noise</option>"))
        }),
    );
    let base = spawn_helper(router).await;

    let options = api(&base).load_subsubcategories(7).await.unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].label, "Noise");
}

#[tokio::test]
async fn malformed_fragment_is_an_error() {
    let router = Router::new().route(
        "/ajax/load-subcategories/",
        get(|| async { Html("<option value=\"4\">Tracker") }),
    );
    let base = spawn_helper(router).await;

    let err = api(&base).load_subcategories(4).await.unwrap_err();
    assert_matches!(err, ClientError::Reply(_));
}

// ---------------------------------------------------------------------------
// Test: integrity check posts the form fields and parses the reply map
// ---------------------------------------------------------------------------

#[tokio::test]
async fn integrity_check_round_trips_the_form() {
    let router = Router::new().route(
        "/ajax/check_integrity_of_run/",
        post(|Form(fields): Form<HashMap<String, String>>| async move {
            if fields.get("run_number").map(String::as_str) != Some("321123")
                || fields.get("type").map(String::as_str) != Some("")
                || fields.get("pixel_lowstat").map(String::as_str) != Some("false")
            {
                return Err(StatusCode::BAD_REQUEST);
            }
            Ok(Json(json!({"pixel": "Bad", "int_luminosity": 5})))
        }),
    );
    let base = spawn_helper(router).await;

    let request = IntegrityRequest::from(&RunSnapshot {
        run_number: Some(321123),
        ..RunSnapshot::default()
    });
    let reply = api(&base).check_run_integrity(&request).await.unwrap();

    assert_eq!(reply.len(), 2);
    assert_eq!(reply.get("pixel"), Some(&json!("Bad")));
    assert_eq!(reply.get("int_luminosity"), Some(&json!(5)));
}

// ---------------------------------------------------------------------------
// Test: run list classification accepts both bucket vocabularies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn classify_run_list_deserializes_buckets() {
    let router = Router::new().route(
        "/ajax/validate-cc-list/",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            if params.get("text").map(String::as_str) != Some("300001 300010") {
                return Err(StatusCode::BAD_REQUEST);
            }
            Ok(Json(json!({
                "good": [300001, "abde"],
                "conflicting": [300010]
            })))
        }),
    );
    let base = spawn_helper(router).await;

    let buckets = api(&base).classify_run_list("300001 300010").await.unwrap();
    assert_eq!(buckets.good.len(), 2);
    assert_eq!(buckets.different_flags.len(), 1);
    assert!(buckets.missing.is_empty());
}

// ---------------------------------------------------------------------------
// Test: non-2xx statuses surface as API errors with status and body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn server_errors_carry_status_and_body() {
    let router = Router::new().route(
        "/ajax/validate-cc-list/",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "helper exploded") }),
    );
    let base = spawn_helper(router).await;

    let err = api(&base).classify_run_list("300001").await.unwrap_err();
    assert_matches!(err, ClientError::Api { status: 500, ref body } if body == "helper exploded");
}

// ---------------------------------------------------------------------------
// Test: Run Registry lookups parse records and the degraded literal
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_registry_parses_records() {
    let router = Router::new().route(
        "/runregistry/{run_number}",
        get(|Path(run_number): Path<u32>| async move {
            Json(json!([{
                "run_number": run_number,
                "run_class": "Collisions18",
                "dataset": "/Express/Collisions2018/DQM",
                "state": "SIGNOFF",
                "shifter": "A. Shifter",
                "pixel": "GOOD",
                "pixel_lowstat": false,
                "sistrip": "GOOD",
                "sistrip_lowstat": false,
                "tracking": "GOOD",
                "tracking_lowstat": false
            }]))
        }),
    );
    let base = spawn_helper(router).await;

    let lookup = api(&base).run_registry(321123).await.unwrap();
    assert_matches!(lookup, RegistryLookup::Runs(ref runs) if runs.len() == 1);
}

#[tokio::test]
async fn degraded_registry_is_not_an_error() {
    let router = Router::new().route(
        "/runregistry/{run_number}",
        get(|| async { "Run Registry is unavailable." }),
    );
    let base = spawn_helper(router).await;

    let lookup = api(&base).run_registry(321123).await.unwrap();
    assert_eq!(lookup, RegistryLookup::Unavailable);
}

// ---------------------------------------------------------------------------
// Test: superseded classification replies are dropped
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stale_classification_reply_is_discarded() {
    let router = Router::new().route(
        "/ajax/validate-cc-list/",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            if params.get("text").map(String::as_str) == Some("old") {
                tokio::time::sleep(Duration::from_millis(400)).await;
            }
            Json(json!({"good": [300001]}))
        }),
    );
    let base = spawn_helper(router).await;

    let list = Arc::new(LiveRunList::new(api(&base)));

    let stale = {
        let list = Arc::clone(&list);
        tokio::spawn(async move { list.classify("old").await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;

    let fresh = list.classify("new").await.unwrap();
    assert!(fresh.is_some());

    let stale = stale.await.unwrap().unwrap();
    assert!(stale.is_none());
}

// ---------------------------------------------------------------------------
// Test: the latest integrity reply yields counterpart warnings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn integrity_reply_becomes_counterpart_warnings() {
    let router = Router::new().route(
        "/ajax/check_integrity_of_run/",
        post(|| async { Json(json!({"pixel": "Bad"})) }),
    );
    let base = spawn_helper(router).await;

    let checker = LiveIntegrity::new(api(&base));
    let request = IntegrityRequest::from(&RunSnapshot::default());
    let notes = checker
        .check(&request, RecoType::Prompt)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].field, "pixel");
    assert_eq!(notes[0].severity, Severity::Warning);
    assert_eq!(notes[0].message, "Express was certified as: Bad ");
}
