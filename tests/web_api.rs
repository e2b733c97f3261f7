use std::sync::Arc;

use axum::{
    body::to_bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use impactsim::{
    config::EngineConfig,
    web::{impact, router, status},
    Engine, ImpactRequest,
};
use serde_json::Value;

fn engine() -> Arc<Engine> {
    let mut config = EngineConfig::default();
    config.rng.seed = Some(5);
    Arc::new(Engine::new(config).unwrap())
}

fn request(json: &str) -> ImpactRequest {
    serde_json::from_str(json).unwrap()
}

#[tokio::test]
async fn impact_returns_full_result() {
    let req = request(r#"{"lat": 40.7, "lon": -74.0, "size": 60, "speed": 18, "angle": 45}"#);
    let Json(result) = impact(State(engine()), Json(req)).await.unwrap();
    assert!(result.crater.is_some());
    assert_eq!(result.seed, 5);
    assert_eq!(
        result.population.as_ref().unwrap().nearest_location,
        "Manhattan"
    );
}

#[tokio::test]
async fn bad_material_is_a_422_naming_it() {
    let req = request(
        r#"{"lat": 0, "lon": 0, "size": 60, "speed": 18, "angle": 45, "material": "wood"}"#,
    );
    let err = impact(State(engine()), Json(req)).await.unwrap_err();
    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("wood"));
}

#[tokio::test]
async fn out_of_range_angle_is_rejected() {
    let req = request(r#"{"lat": 0, "lon": 0, "size": 60, "speed": 18, "angle": 120}"#);
    let err = impact(State(engine()), Json(req)).await.unwrap_err();
    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn status_endpoint_lists_impact() {
    let Json(body) = status().await;
    assert!(body.endpoints.contains(&"/impact"));
    let _ = router(engine());
}
