use catalog_api::config;
use catalog_api::database::DatabaseManager;
use catalog_api::router;
use catalog_api::services::audit_log::{self, AuditLogger, DEFAULT_QUEUE_CAPACITY};
use catalog_api::services::{Seeder, SeederOptions};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Catalog API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect()
        .await
        .unwrap_or_else(|e| panic!("failed to connect to database: {}", e));

    DatabaseManager::migrate(&pool)
        .await
        .unwrap_or_else(|e| panic!("failed to run migrations: {}", e));

    if config.seeding.seed_on_startup {
        let seeder = Seeder::new(pool.clone(), SeederOptions { quiet: config.seeding.quiet });
        if let Err(e) = seeder.seed_all().await {
            tracing::error!("Seeding failed: {}", e);
        }
    }

    let (audit, audit_rx) = AuditLogger::channel(DEFAULT_QUEUE_CAPACITY);
    let _writer = audit_log::spawn_writer(pool.clone(), audit_rx);

    let app = router::app(pool, audit);

    // Allow tests or deployments to override port via env
    let port = std::env::var("CATALOG_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Catalog API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
