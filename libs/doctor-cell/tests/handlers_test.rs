// libs/doctor-cell/tests/handlers_test.rs

use std::sync::Arc;

use assert_matches::assert_matches;
use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{Request, StatusCode},
    Json,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use doctor_cell::handlers::{match_doctors, rank_doctors, DoctorHandlers};
use doctor_cell::models::*;
use doctor_cell::router::doctor_routes;
use shared_config::AppConfig;
use shared_models::error::AppError;

fn create_test_config() -> Arc<AppConfig> {
    Arc::new(AppConfig::default())
}

fn doctor_json(first_name: &str, rating: f64, years: u32, specialization: &str, fee: f64) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "first_name": first_name,
        "last_name": "Test",
        "specializations": [specialization],
        "rating": rating,
        "experience_years": years,
        "consultation_fee": fee,
        "weekly_availability": [{
            "day_of_week": 1,
            "start_time": "09:00:00",
            "end_time": "17:00:00",
            "slot_duration_minutes": 30
        }]
    })
}

async fn post_json(path: &str, body: Value) -> (StatusCode, Value) {
    let app = doctor_routes(create_test_config());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_rank_returns_top_doctors_in_order() {
    let (status, body) = post_json(
        "/rank",
        json!({
            "doctors": [
                doctor_json("Low", 3.1, 30, "cardiology", 50.0),
                doctor_json("Best", 4.9, 3, "cardiology", 80.0),
                doctor_json("Senior", 4.5, 25, "neurology", 60.0),
                doctor_json("Junior", 4.5, 2, "neurology", 40.0)
            ],
            "limit": 3
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    let names: Vec<&str> = body["doctors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["first_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Best", "Senior", "Junior"]);
}

#[tokio::test]
async fn test_rank_by_specialization_applies_min_rating() {
    let (status, body) = post_json(
        "/rank",
        json!({
            "doctors": [
                doctor_json("A", 4.2, 5, "oncology", 50.0),
                doctor_json("B", 3.5, 5, "oncology", 50.0),
                doctor_json("C", 4.8, 5, "psychiatry", 50.0)
            ],
            "specialization": "Oncology",
            "min_rating": 4.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["doctors"][0]["first_name"], "A");
}

#[tokio::test]
async fn test_rank_rejects_out_of_range_min_rating() {
    let (status, body) = post_json(
        "/rank",
        json!({ "doctors": [], "min_rating": 9.0 }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("min_rating"));
}

#[tokio::test]
async fn test_match_returns_at_most_five_sorted() {
    let doctors: Vec<Value> = (0..7)
        .map(|i| doctor_json(&format!("D{}", i), 2.0 + i as f64 * 0.4, i, "cardiology", 50.0))
        .collect();

    let (status, body) = post_json(
        "/match",
        json!({
            "request": {
                "specialization": "cardiology",
                "preferred_time": "2026-10-19T10:00:00Z",
                "urgency": "high",
                "max_fee": 100.0,
                "symptoms": "chest tightness"
            },
            "doctors": doctors
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let matches = body["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 5);
    let scores: Vec<f64> = matches
        .iter()
        .map(|m| m["match_score"].as_f64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(scores.iter().all(|s| (0.0..=100.0).contains(s)));
    assert_eq!(matches[0]["doctor"]["first_name"], "D6");
}

#[tokio::test]
async fn test_match_with_zero_fee_cap_does_not_fail() {
    let (status, body) = post_json(
        "/match",
        json!({
            "request": {
                "specialization": "neurology",
                "preferred_time": "2026-10-19T10:00:00Z",
                "max_fee": 0.0
            },
            "doctors": [doctor_json("Zero", 4.0, 10, "neurology", 30.0)]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matches"][0]["breakdown"]["fee"].as_f64().unwrap(), 0.0);
}

#[test]
fn test_match_handler_rejects_blank_specialization() {
    let handlers = Arc::new(DoctorHandlers::new(&AppConfig::default()));
    let payload = MatchDoctorsRequest {
        request: serde_json::from_value(json!({
            "specialization": "  ",
            "preferred_time": "2026-10-19T10:00:00Z"
        }))
        .unwrap(),
        doctors: vec![],
    };

    let result = tokio_test::block_on(match_doctors(State(handlers), Json(payload)));
    assert_matches!(result, Err(AppError::ValidationError(_)));
}

#[test]
fn test_rank_handler_with_empty_input() {
    let payload = RankDoctorsRequest {
        doctors: vec![],
        specialization: None,
        min_rating: None,
        limit: Some(5),
    };

    let result = tokio_test::block_on(rank_doctors(Json(payload)));
    assert_matches!(result, Ok(Json(RankDoctorsResponse { total: 0, .. })));
}
