use crate::config::AppConfig;
use crate::doc::ApiDoc;
use log::info;
use sea_orm::DatabaseConnection;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod doc;
mod dtos;
mod error;
mod routes;
mod utils;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::load().expect("incomplete environment configuration");
    info!("Starting in {} mode", config.environment);

    let db = database::db::create_connection(&config.database_url)
        .await
        .expect("Failed to connect to the database");

    let state = AppState { db };

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(routes::router(state))
        .split_for_parts();

    let app = router
        .merge(SwaggerUi::new("/docs").url("/docs/openapi.json", api))
        .layer(CompressionLayer::new());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listener");
    info!("Running axum on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(utils::shutdown::shutdown_signal())
        .await
        .expect("Server error");
}
