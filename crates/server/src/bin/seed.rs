use database::db::create_connection;
use database::services::seed::SeedService;
use log::{error, info};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            error!("DATABASE_URL must be set");
            std::process::exit(1);
        }
    };

    let db = match create_connection(&database_url).await {
        Ok(db) => db,
        Err(err) => {
            error!("Failed to connect to the database: {err}");
            std::process::exit(1);
        }
    };

    match SeedService::seed_demo_data(&db).await {
        Ok(true) => info!("Seeded demo dataset"),
        Ok(false) => info!("Database already contains data, skipping seed"),
        Err(err) => {
            error!("Seeding failed: {err}");
            std::process::exit(1);
        }
    }
}
