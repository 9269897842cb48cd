use std::any::Any;
use std::env;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use ghoomo_agents::{ChatbotAgent, QuizAgent};
use ghoomo_core::{ChatContext, QuizCatalog, ScoreError};
use ghoomo_llm::{GeminiClient, TextGenerator};
use ghoomo_observability::{AppMetrics, MetricsSnapshot};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

const SERVICE_NAME: &str = "ghoomo-ai-service";

#[derive(Clone)]
pub struct ApiState {
    pub quiz: QuizAgent,
    pub chatbot: ChatbotAgent,
    pub metrics: Arc<AppMetrics>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    timestamp_utc: String,
    metrics: MetricsSnapshot,
}

/// Builds the production application: Gemini-backed generator configured
/// from the environment. A missing GEMINI_API_KEY still boots the service;
/// every model-backed path then degrades to its fallback.
pub fn build_app() -> Result<Router> {
    let api_key = env::var("GEMINI_API_KEY").ok();
    let model =
        env::var("GEMINI_MODEL").unwrap_or_else(|_| GeminiClient::DEFAULT_MODEL.to_string());

    let client = GeminiClient::new(api_key, model)?;
    if !client.is_configured() {
        tracing::warn!("GEMINI_API_KEY is not set; model calls will fall back");
    }

    let state = app_state(Arc::new(client), AppMetrics::shared());
    Ok(build_router(state))
}

/// Wires the agents around a generator. Split out so tests can inject
/// scripted generators.
pub fn app_state(generator: Arc<dyn TextGenerator>, metrics: Arc<AppMetrics>) -> ApiState {
    let catalog = Arc::new(QuizCatalog::builtin());
    ApiState {
        quiz: QuizAgent::new(catalog, generator.clone(), metrics.clone()),
        chatbot: ChatbotAgent::new(generator, metrics.clone()),
        metrics,
    }
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/quiz/questions", get(quiz_questions))
        .route("/api/quiz/analyze", post(quiz_analyze))
        .route("/api/chatbot/ask", post(chatbot_ask))
        .layer(build_cors_layer())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(64 * 1024))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

async fn quiz_questions(State(state): State<ApiState>) -> impl IntoResponse {
    let questions = state.quiz.catalog().public_view();
    (
        StatusCode::OK,
        Json(json!({ "success": true, "questions": questions })),
    )
}

async fn quiz_analyze(
    State(state): State<ApiState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let Ok(Json(body)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid request data");
    };
    if !body.is_object() {
        return error_response(StatusCode::BAD_REQUEST, "Invalid request data");
    }

    let responses = match body.get("responses") {
        Some(Value::Object(map)) => map,
        Some(_) => return error_response(StatusCode::BAD_REQUEST, "Invalid responses payload"),
        None => return error_response(StatusCode::BAD_REQUEST, "No responses provided"),
    };

    match state.quiz.analyze(responses).await {
        Ok(analysis) => (
            StatusCode::OK,
            Json(json!({ "success": true, "analysis": analysis })),
        )
            .into_response(),
        Err(ScoreError::EmptyResponses) => {
            error_response(StatusCode::BAD_REQUEST, "No responses provided")
        }
    }
}

async fn chatbot_ask(
    State(state): State<ApiState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let Ok(Json(body)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid request data");
    };

    let query = body
        .get("query")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or("");
    if query.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No query provided");
    }

    let context: Option<ChatContext> = body
        .get("context")
        .and_then(|value| serde_json::from_value(value.clone()).ok());

    let reply = state.chatbot.ask(query, context.as_ref()).await;
    (
        StatusCode::OK,
        Json(json!({
            "success": reply.success,
            "response": reply.response,
            "suggestions": reply.suggestions
        })),
    )
        .into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "success": false, "error": message })),
    )
        .into_response()
}

fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred while processing your request"
        })),
    )
        .into_response()
}

fn build_cors_layer() -> CorsLayer {
    let origins = env::var("GHOOMO_ALLOWED_ORIGINS")
        .ok()
        .map(|raw| {
            raw.split(',')
                .filter_map(|origin| HeaderValue::from_str(origin.trim()).ok())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() {
        layer.allow_origin(AllowOrigin::any())
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
