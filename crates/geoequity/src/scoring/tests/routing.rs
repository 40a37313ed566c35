use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use super::common::*;
use crate::scoring::router::{v1_handler, ScoreQuery};
use crate::scoring::{PublishedLaborData, StaticContextResolver};

#[tokio::test]
async fn v1_route_scores_with_the_default_location() {
    let response = router()
        .oneshot(get("/api/v1/ejv-v1/supermarket_101"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["store_id"], json!("supermarket_101"));
    assert_eq!(payload["location"], json!("10001"));
    assert_eq!(payload["context"]["median_income"], json!(106_509));
    let score = payload["ejv_score"].as_f64().expect("numeric score");
    assert!((0.0..=100.0).contains(&score));
}

#[tokio::test]
async fn v2_route_reports_nine_dimensions_and_modifiers() {
    let response = router()
        .oneshot(get("/api/v1/ejv-v2/grocery_5?zip=10001&purchase=250"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["purchase_amount"], json!(250.0));
    let dimensions = payload["adjusted_dimensions"]
        .as_object()
        .expect("dimension map");
    assert_eq!(dimensions.len(), 9);
    for code in ["AES", "ART", "HWI", "PSR", "CAI", "JCE", "FSI", "CED", "ESD"] {
        assert!(dimensions.contains_key(code), "missing {code}");
    }
    assert_eq!(payload["need_modifiers"]["AES"], json!(0.89));
}

#[tokio::test]
async fn combined_route_returns_both_generations() {
    let response = router()
        .oneshot(get("/api/v1/ejv/cafe_2?category=restaurant"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["v1"]["payroll"]["category"], json!("restaurant"));
    assert_eq!(payload["v2"]["purchase_amount"], json!(100.0));
}

#[tokio::test]
async fn tract_locations_are_accepted() {
    let response = router()
        .oneshot(get("/api/v1/ejv-v1/fuel_3?zip=36-061-010100"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["location"], json!("36-061-010100"));
    assert_eq!(payload["context"]["unemployment_rate"], json!(5.0));
}

#[tokio::test]
async fn malformed_locations_are_rejected() {
    let response = router()
        .oneshot(get("/api/v1/ejv-v1/fuel_3?zip=not-a-zip"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("not-a-zip"));
}

#[tokio::test]
async fn negative_purchases_are_rejected() {
    let response = router()
        .oneshot(get("/api/v1/ejv-v2/grocery_5?purchase=-10"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn blank_identifiers_are_rejected() {
    let engine = Arc::new(engine());
    let response = v1_handler::<StaticContextResolver, PublishedLaborData>(
        State(engine),
        Path("   ".to_string()),
        Query(ScoreQuery::default()),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn v4_2_route_amplifies_with_participation() {
    let payload = json!({
        "zip": "10001",
        "purchase": 100,
        "participation": {
            "mentoring": { "hours": 2, "verified": true, "duration_months": 12 },
            "juggling": { "hours": 40 }
        }
    });
    let response = router()
        .oneshot(post_json("/api/v1/ejv-v4.2/supermarket_101", &payload))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["participation_amplification_factor"], json!(1.019));
    let breakdown = body["participation_breakdown"]
        .as_array()
        .expect("breakdown list");
    assert_eq!(breakdown.len(), 1);
    assert_eq!(breakdown[0]["activity"], json!("mentoring"));
    let amplified = body["ejv_v4_2"].as_f64().expect("amplified impact");
    let base = body["base_v2_impact"].as_f64().expect("base impact");
    assert!(amplified >= base);
}

#[tokio::test]
async fn v4_2_route_without_participation_matches_v2() {
    let response = router()
        .oneshot(post_json("/api/v1/ejv-v4.2/grocery_5", &json!({})))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["participation_amplification_factor"], json!(1.0));
    assert_eq!(body["ejv_v4_2"], body["base_v2_impact"]);
    assert_eq!(body["amplification_value"], json!(0.0));
}

#[tokio::test]
async fn aggregate_route_rolls_up_stores() {
    let payload = json!({ "stores": ["supermarket_101", "pharmacy_22"], "zip": "10001" });
    let response = router()
        .oneshot(post_json("/api/v1/ejv/aggregate", &payload))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["count"], json!(2));
    assert!(body["total_retained"].as_f64().unwrap_or_default() > 0.0);
}

#[tokio::test]
async fn aggregate_route_accepts_an_empty_portfolio() {
    let response = router()
        .oneshot(post_json("/api/v1/ejv/aggregate", &json!({ "stores": [] })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["count"], json!(0));
    assert_eq!(body["average_score"], json!(0.0));
}

#[tokio::test]
async fn legacy_route_selects_the_scorecard() {
    let response = router()
        .oneshot(get("/api/v1/ejv-legacy/supermarket_101?scorecard=hiring_equity"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["scorecard"], json!("hiring_equity"));
    assert!(body.get("local_hiring_score").is_some());

    let rejected = router()
        .oneshot(get("/api/v1/ejv-legacy/supermarket_101?scorecard=v9"))
        .await
        .expect("route executes");
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn participation_catalogue_lists_every_pathway() {
    let response = router()
        .oneshot(get("/api/v1/participation/types"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let entries = body.as_array().expect("catalogue list");
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0]["key"], json!("mentoring"));
    assert_eq!(entries[0]["weight"], json!(0.08));
}

#[tokio::test]
async fn area_comparison_defaults_to_the_standard_areas() {
    let response = router()
        .oneshot(get("/api/v1/area-comparison"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["category"], json!("supermarket"));
    let areas = body["areas"].as_array().expect("area list");
    assert_eq!(areas.len(), 5);
    assert_eq!(areas[0]["store_id"], json!("supermarket_10001"));
    assert_eq!(body["summary"]["count"], json!(5));
    let rate = body["summary"]["retention_rate"].as_f64().expect("numeric rate");
    assert!(rate > 0.0 && rate < 100.0);
}

#[tokio::test]
async fn area_comparison_accepts_listed_locations() {
    let response = router()
        .oneshot(get("/api/v1/area-comparison?category=pharmacy&zips=10001,%2036-061-010100"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let areas = body["areas"].as_array().expect("area list");
    assert_eq!(areas.len(), 2);
    assert_eq!(areas[1]["location"], json!("36-061-010100"));
    assert_eq!(areas[1]["payroll"]["category"], json!("pharmacy"));

    let rejected = router()
        .oneshot(get("/api/v1/area-comparison?zips=10001,uptown"))
        .await
        .expect("route executes");
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
}
