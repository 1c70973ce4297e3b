use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use quiz_audio_service::controllers::quiz_audio::QuizAudioController;
use quiz_audio_service::domain::audio::QuizAudioService;
use quiz_audio_service::infrastructure::config::{Config, LogFormat};
use quiz_audio_service::infrastructure::db::{check_connection, create_pool, run_migrations};
use quiz_audio_service::infrastructure::http::start_http_server;
use quiz_audio_service::infrastructure::repositories::{HttpAudioGenerationGateway, PgAudioStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    init_logging(&config);

    tracing::info!(
        development = config.is_development(),
        "Starting Quiz Audio Service on {}:{}",
        config.host,
        config.port
    );

    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Stores and gateways
    tracing::info!(
        audio_service_url = %config.audio_service_url,
        timeout_secs = config.audio_generation_timeout_secs,
        "Instantiating audio generation gateway..."
    );
    let audio_store = Arc::new(PgAudioStore::new(pool.clone()));
    let gateway = Arc::new(HttpAudioGenerationGateway::new(
        config.audio_service_url.clone(),
        config.audio_generation_timeout(),
    )?);

    // 2. Services
    let quiz_audio_service = Arc::new(QuizAudioService::new(
        audio_store,
        gateway,
        config.audio_generation_timeout(),
    ));

    // 3. Controllers
    let quiz_audio_controller = Arc::new(QuizAudioController::new(quiz_audio_service));

    start_http_server(pool, config, quiz_audio_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quiz_audio_service=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
