use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, StorageBackend};
use crate::database::{
    DatabaseError, DatabaseManager, MemoryReportRepository, MemoryUserRepository, PgReportRepository,
    PgUserRepository, ReportRepository, UserRepository,
};
use crate::handlers;
use crate::middleware::{jwt_auth_middleware, validate_user_middleware};
use crate::services::{ReportService, ReportValidatorService, UserService};

/// Shared, read-only request state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub reports: ReportService,
    pub users: UserService,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        report_repository: Arc<dyn ReportRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        let users = UserService::new(user_repository, config.security.clone());
        let reports = ReportService::new(report_repository, ReportValidatorService::default());

        Self {
            config: Arc::new(config),
            reports,
            users,
        }
    }

    /// State backed by process-local storage
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(
            config,
            Arc::new(MemoryReportRepository::new()),
            Arc::new(MemoryUserRepository::new()),
        )
    }

    /// Build state for the configured storage backend, connecting and migrating as needed
    pub async fn from_config(config: AppConfig) -> Result<Self, DatabaseError> {
        match config.database.backend {
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on shutdown");
                Ok(Self::in_memory(config))
            }
            StorageBackend::Postgres => {
                let db = DatabaseManager::connect(&config.database).await?;
                if config.database.run_migrations {
                    db.migrate().await?;
                }
                let pool = db.pool().clone();
                Ok(Self::new(
                    config,
                    Arc::new(PgReportRepository::new(pool.clone())),
                    Arc::new(PgUserRepository::new(pool)),
                ))
            }
        }
    }
}

pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        .route("/", get(root))
        .merge(public_routes())
        .merge(report_routes(state.clone()))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config));
    }

    if config.api.enable_request_logging {
        router = router.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));
    }

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    use handlers::public::{auth, health};

    Router::new()
        .route("/health", get(health::get))
        .route("/auth/signup", post(auth::signup_post))
        .route("/auth/login", post(auth::login_post))
}

fn report_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::reports;

    // Layers run outside-in: token first, then user lookup
    Router::new()
        .route("/reports", post(reports::reports_post))
        .route(
            "/reports/:id",
            get(reports::report_get)
                .post(reports::report_update)
                .delete(reports::report_delete),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), validate_user_middleware))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([axum::http::header::AUTHORIZATION, axum::http::header::CONTENT_TYPE])
}

async fn root() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "name": "Report API (Rust)",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /health (public)",
            "auth": "POST /auth/signup, POST /auth/login (public - token acquisition)",
            "reports": "POST /reports, GET|POST|DELETE /reports/:id (bearer token)",
        }
    }))
}

/// Serve until the process receives ctrl-c
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install ctrl-c handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
