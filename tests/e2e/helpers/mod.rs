use anyhow::Result;
use axum::Router;
use once_cell::sync::Lazy;
use quiz_audio_service::infrastructure::config::{Config, Environment, LogFormat};
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::{clients::Cli, Container};
use testcontainers_modules::postgres::Postgres;
use tokio::net::TcpListener;
use uuid::Uuid;

pub mod api_client;
pub mod fixtures;

use api_client::TestClient;
use db_pool::{DatabasePool, PooledDatabase};
use fixtures::TestFixtures;
use media_service::FakeMediaService;

// Docker client for test containers
static DOCKER: Lazy<Cli> = Lazy::new(Cli::default);

// Shared PostgreSQL container for all tests
static SHARED_CONTAINER: Lazy<SharedContainer> = Lazy::new(SharedContainer::new);

static DB_POOL: Lazy<DatabasePool> = Lazy::new(|| DatabasePool::new(SHARED_CONTAINER.port));

/// Deadline applied to media service calls in tests
pub const TEST_GENERATION_TIMEOUT_SECS: u64 = 2;

/// Shared container that lives for the duration of all tests
struct SharedContainer {
    _container: Container<'static, Postgres>,
    port: u16,
}

impl SharedContainer {
    fn new() -> Self {
        let container = DOCKER.run(Postgres::default());
        let port = container.get_host_port_ipv4(5432);

        println!("🐳 Started shared PostgreSQL container on port {}", port);

        Self {
            _container: container,
            port,
        }
    }
}

pub struct TestContext {
    pub client: TestClient,
    pub config: Config,
    pub fixtures: TestFixtures,
    pub media: FakeMediaService,
    pub actor_id: Uuid,
    pub token: String,
    _db: PooledDatabase,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let pooled_db = DB_POOL
                .get_database()
                .await
                .expect("Failed to get database from pool");

            let media = FakeMediaService::start().await;

            let config = Config {
                database_url: pooled_db.database_url.clone(),
                host: "127.0.0.1".to_string(),
                port: 0, // Will be assigned by the OS
                jwt_secret: "test-jwt-secret-key-for-testing-only".to_string(),
                jwt_expiration_hours: 1,
                environment: Environment::Development,
                log_format: LogFormat::Pretty,
                audio_service_url: media.base_url.clone(),
                audio_generation_timeout_secs: TEST_GENERATION_TIMEOUT_SECS,
            };

            let app = create_app(config.clone(), pooled_db.pool.clone())
                .expect("Failed to create app");

            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            // Wait for server to be ready
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

            let actor_id = Uuid::new_v4();
            let token = generate_test_jwt(&actor_id, &config.jwt_secret);

            Self {
                client: TestClient::new(&base_url),
                fixtures: TestFixtures::new(pooled_db.pool.clone()),
                config,
                media,
                actor_id,
                token,
                _db: pooled_db,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Database cleanup happens automatically via Drop on PooledDatabase
        }
    }
}

fn create_app(config: Config, pool: PgPool) -> Result<Router> {
    use quiz_audio_service::{
        controllers::quiz_audio::QuizAudioController,
        domain::audio::QuizAudioService,
        infrastructure::{
            http::build_router,
            repositories::{HttpAudioGenerationGateway, PgAudioStore},
        },
    };

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    let audio_store = Arc::new(PgAudioStore::new(pool.clone()));
    // Generous client timeout so the service deadline is what fires
    let gateway = Arc::new(
        HttpAudioGenerationGateway::new(
            config.audio_service_url.clone(),
            config.audio_generation_timeout() * 5,
        )
        .map_err(anyhow::Error::msg)?,
    );
    let quiz_audio_service = Arc::new(QuizAudioService::new(
        audio_store,
        gateway,
        config.audio_generation_timeout(),
    ));
    let quiz_audio_controller = Arc::new(QuizAudioController::new(quiz_audio_service));

    Ok(build_router(pool, config, quiz_audio_controller))
}

// Helper to generate valid JWT tokens for testing
pub fn generate_test_jwt(user_id: &Uuid, secret: &str) -> String {
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct Claims {
        sub: String,
        email: String,
        exp: i64,
        iat: i64,
    }

    let now = chrono::Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        email: "editor@example.com".to_string(),
        exp: (now + chrono::Duration::hours(1)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
