use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use ghoomo_api::{app_state, build_router};
use ghoomo_llm::{GenerateError, TextGenerator};
use ghoomo_observability::AppMetrics;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Generator whose calls all fail, as if the model were unreachable.
struct DownGenerator;

#[async_trait]
impl TextGenerator for DownGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        Err(GenerateError::NotConfigured)
    }
}

/// Replays a scripted list of replies in order; `None` fails that call.
struct ScriptedGenerator {
    replies: Mutex<Vec<Option<String>>>,
}

impl ScriptedGenerator {
    fn new(replies: Vec<Option<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().rev().collect()),
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        match self.replies.lock().unwrap().pop() {
            Some(Some(reply)) => Ok(reply),
            _ => Err(GenerateError::NotConfigured),
        }
    }
}

fn app_with(generator: Arc<dyn TextGenerator>) -> axum::Router {
    build_router(app_state(generator, AppMetrics::shared()))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_service_identity() {
    let app = app_with(Arc::new(DownGenerator));

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    assert_eq!(parsed["status"], "healthy");
    assert_eq!(parsed["service"], "ghoomo-ai-service");
    assert!(parsed["metrics"]["requests_total"].is_u64());
}

#[tokio::test]
async fn quiz_questions_never_include_weights() {
    let app = app_with(Arc::new(DownGenerator));

    let response = app.oneshot(get("/api/quiz/questions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    assert_eq!(parsed["success"], true);

    let questions = parsed["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 5);
    assert_eq!(questions[0]["id"], "preferred_activities");
    assert!(questions[0]["allowMultiple"].is_boolean());

    let raw = parsed.to_string();
    assert!(!raw.contains("weight"));
}

#[tokio::test]
async fn quiz_analyze_rejects_bodies_without_responses() {
    let app = app_with(Arc::new(DownGenerator));

    let response = app
        .clone()
        .oneshot(post_json("/api/quiz/analyze", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let parsed = body_json(response).await;
    assert_eq!(parsed["success"], false);
    assert!(parsed["error"].is_string());

    let response = app
        .oneshot(post_json("/api/quiz/analyze", json!({ "responses": {} })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn quiz_analyze_rejects_non_json_body() {
    let app = app_with(Arc::new(DownGenerator));

    let request = Request::builder()
        .method("POST")
        .uri("/api/quiz/analyze")
        .header("content-type", "application/json")
        .body(Body::from("not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn quiz_analyze_survives_a_dead_model() {
    let app = app_with(Arc::new(DownGenerator));

    let response = app
        .oneshot(post_json(
            "/api/quiz/analyze",
            json!({ "responses": { "food_preference": ["local_cuisine"] } }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    assert_eq!(parsed["success"], true);

    let analysis = &parsed["analysis"];
    assert_eq!(analysis["primaryPersona"], "Foodie");
    assert_eq!(analysis["budgetSensitivity"], "medium");
    assert_eq!(analysis["travelPace"], "moderate");
    assert_eq!(analysis["interests"].as_array().unwrap().len(), 3);
    assert_eq!(analysis["preferredActivities"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn quiz_analyze_prefers_a_parseable_model_reply() {
    let model_reply = format!(
        "```json\n{}\n```",
        json!({
            "primaryPersona": "Relaxer",
            "secondaryPersona": "Foodie",
            "budgetSensitivity": "high",
            "interests": ["spas"],
            "preferredActivities": ["beach time"],
            "travelPace": "slow"
        })
    );
    let app = app_with(Arc::new(ScriptedGenerator::new(vec![Some(model_reply)])));

    let response = app
        .oneshot(post_json(
            "/api/quiz/analyze",
            json!({ "responses": { "food_preference": ["local_cuisine"] } }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    assert_eq!(parsed["analysis"]["primaryPersona"], "Relaxer");
}

#[tokio::test]
async fn chatbot_rejects_missing_or_empty_query() {
    let app = app_with(Arc::new(DownGenerator));

    let response = app
        .clone()
        .oneshot(post_json("/api/chatbot/ask", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(post_json("/api/chatbot/ask", json!({ "query": "" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let parsed = body_json(response).await;
    assert_eq!(parsed["success"], false);
}

#[tokio::test]
async fn chatbot_degrades_when_the_model_is_down() {
    let app = app_with(Arc::new(DownGenerator));

    let response = app
        .oneshot(post_json(
            "/api/chatbot/ask",
            json!({ "query": "Where should I go in December?" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    assert_eq!(parsed["success"], false);
    assert_eq!(
        parsed["response"],
        "I'm having trouble processing your request right now. Please try again later."
    );
    assert_eq!(
        parsed["suggestions"],
        json!([
            "What are popular destinations in India?",
            "How can I plan a budget trip?",
            "What should I pack for my trip?"
        ])
    );
}

#[tokio::test]
async fn chatbot_keeps_the_answer_when_only_suggestions_fail() {
    let app = app_with(Arc::new(ScriptedGenerator::new(vec![
        Some("Kerala's backwaters are beautiful in December.".to_string()),
        None,
    ])));

    let response = app
        .oneshot(post_json(
            "/api/chatbot/ask",
            json!({
                "query": "Where should I go in December?",
                "context": { "location": "Kochi" }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    assert_eq!(parsed["success"], true);
    assert_eq!(
        parsed["response"],
        "Kerala's backwaters are beautiful in December."
    );
    assert_eq!(
        parsed["suggestions"],
        json!([
            "What are the best times to visit?",
            "How's the local transportation?",
            "Any safety tips I should know?"
        ])
    );
}

#[tokio::test]
async fn chatbot_returns_three_parsed_suggestions_on_the_happy_path() {
    let suggestions = json!(["Best month to go?", "Houseboat or hotel?", "What about mosquitoes?"]);
    let app = app_with(Arc::new(ScriptedGenerator::new(vec![
        Some("Try a houseboat stay in Alleppey.".to_string()),
        Some(suggestions.to_string()),
    ])));

    let response = app
        .oneshot(post_json(
            "/api/chatbot/ask",
            json!({ "query": "Tips for Kerala?" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    assert_eq!(parsed["success"], true);
    assert_eq!(parsed["suggestions"], suggestions);
}
