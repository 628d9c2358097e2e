use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info};

use crate::{
    error::RecommendError,
    models::{RecommendRequest, RecommendationOutcome},
    workflow::RecommendationService,
};

const INDEX_HTML: &str = include_str!("../templates/index.html");

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;
type ApiError = (StatusCode, Json<Value>);

fn bad_request_error(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn internal_error(message: &str, details: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": message,
            "details": details
        })),
    )
}

#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<RecommendationService>,
}

pub fn build_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/recommend", post(recommend))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// `POST /recommend`. A missing or malformed body is treated like one without a mood.
async fn recommend(State(state): State<AppState>, body: Bytes) -> ApiResult<Value> {
    let request: RecommendRequest = serde_json::from_slice(&body).unwrap_or_default();

    match state.recommender.recommend(request.mood.as_deref()).await {
        Ok(RecommendationOutcome::Recommendations(recommendations)) => {
            info!("Returning recommendations");
            Ok(Json(json!({ "recommendations": recommendations })))
        }
        Ok(RecommendationOutcome::Unparsed { raw }) => Ok(Json(json!({
            "error": "No movie data returned",
            "raw": raw
        }))),
        Err(RecommendError::MissingMood) => Err(bad_request_error("Mood is required")),
        Err(RecommendError::Generation(e)) => {
            error!("Generation request failed: {}", e);
            Err(internal_error("OpenAI request failed", &e.to_string()))
        }
    }
}
