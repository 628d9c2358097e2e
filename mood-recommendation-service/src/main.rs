use mood_recommendation_service::{AppState, RecommendationService, ServiceConfig, build_router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ServiceConfig::from_env()?;
    let recommender = Arc::new(RecommendationService::from_config(&config)?);

    let app = build_router(AppState { recommender }, &config.static_dir);
    let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    let addr = listener.local_addr()?;

    info!("Mood recommendation service starting on {}", addr);
    info!("Model: {}", config.openai_model);
    info!("Available endpoints:");
    info!("  GET  /           - Landing page");
    info!("  GET  /health     - Health check");
    info!("  POST /recommend  - Movie and song suggestions for a mood");
    info!("    Example: {{\"mood\": \"nostalgic and a little rainy\"}}");

    axum::serve(listener, app).await?;

    Ok(())
}
