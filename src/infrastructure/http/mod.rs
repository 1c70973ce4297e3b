use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;
use crate::{
    controllers::{health, quiz_audio::QuizAudioController},
    infrastructure::auth::{auth_middleware, request_id_middleware},
};

/// Build the application router with all routes and layers
pub fn build_router(
    pool: Arc<DbPool>,
    config: Arc<Config>,
    quiz_audio_controller: Arc<QuizAudioController>,
) -> Router {
    // Quiz audio routes (require authentication)
    let quiz_audio_routes = Router::new()
        .route("/api/quizzes/audio", post(QuizAudioController::generate_audio))
        .with_state(quiz_audio_controller)
        .layer(middleware::from_fn_with_state(config, auth_middleware));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(pool)
        .merge(quiz_audio_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    pool: Arc<DbPool>,
    config: Arc<Config>,
    quiz_audio_controller: Arc<QuizAudioController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let address = format!("{}:{}", config.host, config.port);
    let app = build_router(pool, config, quiz_audio_controller);

    let listener = tokio::net::TcpListener::bind(address).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
