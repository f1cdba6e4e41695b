//! GymTrack Server - Gym Membership Management System
//!
//! A Rust REST API server for gym membership management.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gymtrack_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("gymtrack_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting GymTrack Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, &config.attendance);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Members
        .route("/members", get(api::members::list_members))
        .route("/members", post(api::members::create_member))
        .route("/members/:id", get(api::members::get_member))
        .route("/members/:id", put(api::members::update_member))
        .route("/members/:id", delete(api::members::delete_member))
        .route("/members/:id/payments", get(api::payments::member_payments))
        .route("/members/:id/attendance/today", get(api::attendance::today_status))
        .route(
            "/members/:id/attendance/summaries/daily",
            get(api::attendance::daily_summaries),
        )
        .route(
            "/members/:id/attendance/summaries/monthly",
            get(api::attendance::monthly_summaries),
        )
        .route(
            "/members/:id/attendance/summaries/yearly",
            get(api::attendance::yearly_summaries),
        )
        // Plans
        .route("/plans", get(api::plans::list_plans))
        .route("/plans", post(api::plans::create_plan))
        .route("/plans/:id", get(api::plans::get_plan))
        .route("/plans/:id", put(api::plans::update_plan))
        .route("/plans/:id", delete(api::plans::delete_plan))
        // Trainers
        .route("/trainers", get(api::trainers::list_trainers))
        .route("/trainers", post(api::trainers::create_trainer))
        .route("/trainers/:id", get(api::trainers::get_trainer))
        .route("/trainers/:id", put(api::trainers::update_trainer))
        .route("/trainers/:id", delete(api::trainers::delete_trainer))
        // Payments
        .route("/payments", get(api::payments::list_payments))
        .route("/payments", post(api::payments::record_payment))
        .route("/payments/dues", get(api::payments::outstanding_dues))
        .route("/payments/analytics", get(api::payments::payment_analytics))
        .route("/payments/:id", get(api::payments::get_payment))
        .route("/payments/:id", delete(api::payments::delete_payment))
        // Attendance
        .route("/attendance", get(api::attendance::list_records))
        .route("/attendance", post(api::attendance::record_event))
        .route("/attendance/check-out-all", post(api::attendance::check_out_all))
        .route("/attendance/daily-counts", get(api::attendance::daily_counts))
        .route(
            "/attendance/summaries/pending",
            get(api::attendance::pending_aggregation),
        )
        .route(
            "/attendance/summaries/aggregate",
            post(api::attendance::run_aggregation),
        )
        .route("/attendance/:id", delete(api::attendance::delete_record))
        // Dashboard
        .route("/dashboard", get(api::dashboard::get_summary))
        .route("/dashboard/expiring", get(api::dashboard::expiring_memberships))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
