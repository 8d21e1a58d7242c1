//! Database seeder for Kassa development and testing.
//!
//! Seeds the built-in standard chart of accounts. Skipped entirely if any
//! account already exists, so it is safe to run repeatedly.
//!
//! Usage: cargo run --bin seeder

use kassa_db::AccountRepository;
use kassa_shared::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load().expect("failed to load configuration");

    tracing::info!("connecting to database");
    let db = kassa_db::connect(&config.database.url)
        .await
        .expect("failed to connect to database");

    let accounts = AccountRepository::new(db);
    match accounts
        .seed_standard_chart()
        .await
        .expect("failed to seed standard chart")
    {
        true => tracing::info!("standard chart seeded"),
        false => tracing::info!("accounts already present, nothing to do"),
    }
}
