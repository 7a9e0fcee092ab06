//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::util::ServiceExt;

use tariff_bill::api::{AppState, router};
use tariff_bill::config::TariffSchedule;

fn make_app() -> axum::Router {
    router(Arc::new(AppState {
        schedule: TariffSchedule::proposal_2025(),
    }))
}

fn post_calculate(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/calculate")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn calculates_every_group_over_http() {
    let bodies = [
        r#"{"group":"household_two","a1_kwh":600,"a2_kwh":400}"#,
        r#"{"group":"household_one","total_kwh":1200}"#,
        r#"{"group":"group_1","high_kwh":500,"low_kwh":250}"#,
        r#"{"group":"group_2","high_kwh":500,"low_kwh":250}"#,
        r#"{"group":"group_3","high_kwh":400,"low_kwh":300,"demand_kw":50,"reactive_kvarh":100}"#,
        r#"{"group":"group_4","total_kwh":1000}"#,
        r#"{"group":"group_7","total_kwh":1000}"#,
        r#"{"group":"group_8","total_kwh":1000}"#,
    ];
    for body in bodies {
        let resp = make_app().oneshot(post_calculate(body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "body: {body}");
        let json = body_json(resp).await;
        assert!(json["final_bill"].as_f64().unwrap_or(-1.0) > 0.0);
        assert!(json.get("net_amount").is_some());
        assert!(json.get("tax").is_some());
    }
}

#[tokio::test]
async fn invoice_fields_match_engine_invariants() {
    let resp = make_app()
        .oneshot(post_calculate(
            r#"{"group":"group_3","high_kwh":400,"low_kwh":300,"demand_kw":50,"reactive_kvarh":100}"#,
        ))
        .await
        .unwrap();
    let json = body_json(resp).await;

    let net = json["net_amount"].as_f64().unwrap_or(0.0);
    let tax = json["tax"].as_f64().unwrap_or(0.0);
    let final_bill = json["final_bill"].as_f64().unwrap_or(0.0);
    assert!((tax - net * 0.08).abs() < 0.011);
    assert!((final_bill - (net + tax)).abs() < 0.011);

    // demand_charge 5.00 per kW, reactive 1.10 hundredths per kVArh
    assert_eq!(json["demand_cost"], 250.0);
    assert!((json["reactive_cost"].as_f64().unwrap_or(0.0) - 1.10).abs() < 0.011);
}

#[tokio::test]
async fn legacy_body_is_normalized() {
    let resp = make_app()
        .oneshot(post_calculate(
            r#"{"consumption_high_rate":600,"consumption_low_rate":400}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["group"], "household_two");
    let b1 = json["blocks"]["a1_block1_kwh"].as_f64().unwrap_or(0.0)
        + json["blocks"]["a2_block1_kwh"].as_f64().unwrap_or(0.0);
    assert!((b1 - 800.0).abs() < 0.011);
}

#[tokio::test]
async fn untagged_empty_body_defaults_to_zero_household_two() {
    let resp = make_app().oneshot(post_calculate("{}")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["group"], "household_two");
    assert_eq!(json["energy_cost"], 0.0);
}

#[tokio::test]
async fn bad_group_tag_is_an_error_not_a_default() {
    let resp = make_app()
        .oneshot(post_calculate(r#"{"group":"group_99","total_kwh":10}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn malformed_json_returns_400() {
    let resp = make_app().oneshot(post_calculate("{{{")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_post_method_is_rejected() {
    for method in ["GET", "PUT", "DELETE"] {
        let req = Request::builder()
            .method(method)
            .uri("/calculate")
            .body(Body::empty())
            .unwrap();
        let resp = make_app().oneshot(req).await.unwrap();
        assert_eq!(
            resp.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "method: {method}"
        );
    }
}

#[tokio::test]
async fn preflight_is_no_content() {
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/calculate")
        .body(Body::empty())
        .unwrap();
    let resp = make_app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn tariffs_endpoint_serves_the_schedule() {
    let req = Request::builder()
        .uri("/tariffs")
        .body(Body::empty())
        .unwrap();
    let resp = make_app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    for group in [
        "group_1", "group_2", "group_3", "group_4", "group_5", "group_6", "group_7", "group_8",
    ] {
        assert!(json.get(group).is_some(), "missing {group}");
    }
    // groups without demand/reactive tariffs omit the keys entirely
    assert!(json["group_1"].get("demand_charge").is_none());
}
