//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{PgCatalogAdapter, PgScheduleRepository},
    config::Config,
    error::ApiError,
    web::{
        add_enrollment_handler, clear_schedule_handler, create_schedule_handler,
        delete_schedule_handler, get_schedule_handler, list_schedules_handler,
        remove_enrollment_handler, rest::ApiDoc, section_blocks_handler, state::AppState,
    },
};
use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{delete, get, post},
    Router,
};
use schedule_core::service::ScheduleService;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            config.log_level.to_string(),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to Database & Run Migrations ---
    info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let repository = Arc::new(PgScheduleRepository::new(db_pool.clone()));
    info!("Running database migrations...");
    repository.run_migrations().await?;
    info!("Database migrations complete.");

    // --- 3. Wire Up the Schedule Engine ---
    let catalog = Arc::new(PgCatalogAdapter::new(db_pool));
    let schedules = ScheduleService::new(repository, catalog);

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        schedules,
        config: config.clone(),
    });

    let cors_origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|e| ApiError::Internal(format!("Invalid CORS_ORIGIN: {}", e)))?;
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 5. Create the Web Router ---
    let api_router = Router::new()
        .route(
            "/schedules",
            post(create_schedule_handler).get(list_schedules_handler),
        )
        .route(
            "/schedules/{id}",
            get(get_schedule_handler).delete(delete_schedule_handler),
        )
        .route(
            "/schedules/{id}/enrollments",
            post(add_enrollment_handler).delete(clear_schedule_handler),
        )
        .route(
            "/schedules/{id}/enrollments/{enrollment_id}",
            delete(remove_enrollment_handler),
        )
        .route("/sections/{code}/blocks", get(section_blocks_handler))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
