//! Router tests against an in-process predictor

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::config::Config;
use crate::create_router;
use crate::logic::types::{ModelMetadata, PredictionResult};
use crate::logic::whatif::SessionStore;
use crate::predictor::mock::ScriptedPredictor;
use crate::predictor::PredictorError;
use crate::AppState;

const PASS: PredictionResult = PredictionResult { prediction: 1, probability: 0.734 };
const FAIL: PredictionResult = PredictionResult { prediction: 0, probability: 0.66 };

fn model() -> ModelMetadata {
    ModelMetadata {
        algorithm: "Random Forest".to_string(),
        feature_importance: [("absences", 0.2), ("failures", -0.9), ("G2", 0.5)].into_iter().collect(),
    }
}

fn app(predictor: Arc<ScriptedPredictor>) -> Router {
    app_with_store(predictor, SessionStore::new())
}

fn app_with_store(predictor: Arc<ScriptedPredictor>, sessions: SessionStore) -> Router {
    create_router(AppState {
        config: Config::default(),
        predictor,
        sessions,
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, HeaderMap, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, value)
}

fn student() -> Value {
    json!({
        "school": "GP",
        "sex": "F",
        "age": 17,
        "failures": 0,
        "absences": 4,
        "studytime": 3,
        "goout": 2,
        "health": 4,
        "schoolsup": "no",
        "G1": 14,
        "G2": 15
    })
}

/// Opens a session through the prediction route
async fn open_session(app: &Router, predictor: &ScriptedPredictor) -> String {
    predictor.push(Ok(PASS));
    let (status, _, body) = send(
        app,
        Method::POST,
        "/api/v1/predictions",
        Some(json!({"model_id": "RF_1", "input_data": student()})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let app = app(Arc::new(ScriptedPredictor::default()));
    let (status, _, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["active_sessions"], 0);
}

#[tokio::test]
async fn test_rank_supplied_importance() {
    let app = app(Arc::new(ScriptedPredictor::default()));
    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/v1/drivers/rank",
        Some(json!({"feature_importance": {"absences": 0.2, "failures": -0.9, "G2": 0.5}, "limit": 2})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["drivers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["failures", "G2"]);
    assert_eq!(body["drivers"][0]["signed_weight"], -0.9);
    assert_eq!(body["has_importance"], true);
}

#[tokio::test]
async fn test_rank_rejects_zero_limit() {
    let app = app(Arc::new(ScriptedPredictor::default()));
    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/v1/drivers/rank",
        Some(json!({"feature_importance": {"a": 1.0}, "limit": 0})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_model_drivers() {
    let app = app(Arc::new(ScriptedPredictor::new(model())));
    let (status, _, body) = send(&app, Method::GET, "/api/v1/models/RF_1/drivers", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["algorithm"], "Random Forest");
    assert_eq!(body["drivers"][0]["name"], "failures");
    assert_eq!(body["drivers"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_unknown_model_is_not_found() {
    let app = app(Arc::new(ScriptedPredictor::default()));
    let (status, _, body) = send(&app, Method::GET, "/api/v1/models/nope/drivers", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Model not found: nope");
}

#[tokio::test]
async fn test_recommendations() {
    let app = app(Arc::new(ScriptedPredictor::default()));
    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/v1/recommendations",
        Some(json!({"input": {"failures": 2, "absences": 15, "studytime": 3}})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["recommendations"],
        json!([
            "High number of past failures detected. Consider remedial classes.",
            "Attendance is low. Regular attendance is strongly correlated with success."
        ])
    );
}

#[tokio::test]
async fn test_prediction_opens_session() {
    let predictor = Arc::new(ScriptedPredictor::new(model()));
    let app = app(predictor.clone());
    predictor.push(Ok(PASS));

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/v1/predictions",
        Some(json!({"model_id": "RF_1", "input_data": student()})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["verdict"], "LIKELY TO PASS");
    assert_eq!(body["confidence_percent"], "73.4");
    assert_eq!(body["drivers"][0]["name"], "failures");
    assert_eq!(
        body["recommendations"],
        json!(["Keep up the good work! Maintain your current study habits."])
    );

    let calls = predictor.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].persist);

    let id = body["session_id"].as_str().unwrap();
    let (status, _, session) = send(&app, Method::GET, &format!("/api/v1/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["algorithm"], "Random Forest");
    assert_eq!(session["stale"], false);
}

#[tokio::test]
async fn test_prediction_requires_model_id() {
    let predictor = Arc::new(ScriptedPredictor::new(model()));
    let app = app(predictor.clone());

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/api/v1/predictions",
        Some(json!({"model_id": "", "input_data": student()})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(predictor.calls().is_empty());
}

#[tokio::test]
async fn test_prediction_rejects_empty_input() {
    let predictor = Arc::new(ScriptedPredictor::new(model()));
    let app = app(predictor.clone());

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/v1/predictions",
        Some(json!({"model_id": "RF_1", "input_data": {}})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Model ID and input data required");
    assert!(predictor.calls().is_empty());
}

#[tokio::test]
async fn test_slider_edit_reaches_classifier_as_number() {
    let predictor = Arc::new(ScriptedPredictor::new(model()));
    let app = app(predictor.clone());
    let id = open_session(&app, &predictor).await;

    let (status, _, session) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/sessions/{}/fields/G1", id),
        Some(json!({"value": "12"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["working_input"]["G1"], json!(12.0));

    predictor.push(Ok(PASS));
    send(&app, Method::POST, &format!("/api/v1/sessions/{}/recalculate", id), None).await;
    let sent = serde_json::to_value(&predictor.calls().last().unwrap().input).unwrap();
    assert!(sent["G1"].is_number());
}

#[tokio::test]
async fn test_idle_session_expires() {
    let predictor = Arc::new(ScriptedPredictor::new(model()));
    let app = app_with_store(predictor.clone(), SessionStore::with_ttl(chrono::Duration::milliseconds(5)));
    let id = open_session(&app, &predictor).await;

    tokio::time::sleep(std::time::Duration::from_millis(30)).await;

    let (status, _, _) = send(&app, Method::GET, &format!("/api/v1/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = send(&app, Method::GET, &format!("/api/v1/sessions/{}/report", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_what_if_round_trip() {
    let predictor = Arc::new(ScriptedPredictor::new(model()));
    let app = app(predictor.clone());
    let id = open_session(&app, &predictor).await;
    let base = format!("/api/v1/sessions/{}", id);

    // edit
    let (status, _, session) = send(
        &app,
        Method::PUT,
        &format!("{}/fields/absences", base),
        Some(json!({"value": 30})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["working_input"]["absences"], 30.0);
    assert_eq!(session["stale"], true);

    // out of range
    let (status, _, _) = send(
        &app,
        Method::PUT,
        &format!("{}/fields/health", base),
        Some(json!({"value": 9})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // recalculate, never persisted
    predictor.push(Ok(FAIL));
    let (status, _, body) = send(&app, Method::POST, &format!("{}/recalculate", base), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"]["status"], "applied");
    assert_eq!(body["session"]["current_prediction"]["prediction"], 0);
    assert!(!predictor.calls().last().unwrap().persist);

    // reset
    let (status, _, session) = send(&app, Method::POST, &format!("{}/reset", base), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["working_input"]["absences"], 4.0);
    assert_eq!(session["current_prediction"]["prediction"], 1);

    // close
    let (status, _, _) = send(&app, Method::DELETE, &base, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _, _) = send(&app, Method::GET, &base, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_failed_recalculation_is_bad_gateway() {
    let predictor = Arc::new(ScriptedPredictor::new(model()));
    let app = app(predictor.clone());
    let id = open_session(&app, &predictor).await;
    let base = format!("/api/v1/sessions/{}", id);

    predictor.push(Err(PredictorError::Network("connection refused".to_string())));
    let (status, _, body) = send(&app, Method::POST, &format!("{}/recalculate", base), None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["status"], 502);

    let (_, _, session) = send(&app, Method::GET, &base, None).await;
    assert_eq!(session["current_prediction"]["prediction"], 1);
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let app = app(Arc::new(ScriptedPredictor::new(model())));
    let uri = format!("/api/v1/sessions/{}/recalculate", uuid::Uuid::new_v4());

    let (status, _, _) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_report() {
    let predictor = Arc::new(ScriptedPredictor::new(model()));
    let app = app(predictor.clone());
    let id = open_session(&app, &predictor).await;

    let (status, headers, doc) = send(&app, Method::GET, &format!("/api/v1/sessions/{}/report", id), None).await;

    assert_eq!(status, StatusCode::OK);
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=\"Student_Report_"));
    assert!(disposition.ends_with(".pdf\""));

    assert_eq!(doc["page_count"], 1);
    let kinds: Vec<&str> = doc["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["kind"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec!["header", "student_profile", "prediction_result", "key_factors", "recommendations", "footer"]
    );
}

#[tokio::test]
async fn test_feedback_flips_label_when_incorrect() {
    let predictor = Arc::new(ScriptedPredictor::default());
    let app = app(predictor.clone());

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/v1/feedback",
        Some(json!({
            "timestamp": "2024-05-17T09:30:00",
            "model_id": "RF_1",
            "prediction": 1,
            "verdict": "incorrect"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["feedback"]["actual_result"], 0);

    let sent = predictor.feedback();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].actual_result, 0);
    assert_eq!(sent[0].timestamp, "2024-05-17T09:30:00");
}
