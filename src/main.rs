use chrono::Datelike;
use dotenvy::dotenv;
use std::path::Path;
use stock_ledger::{
    config,
    core::{period::ReportMonth, product, report, settings},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Initialize the database
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to initialize schema: {}", e))?;

    // 4. Ensure the settings singleton exists
    let stored_settings = settings::get_or_create_settings(&db).await?;
    info!("Storage unit price: {}", settings::unit_price(&stored_settings));

    // 5. Seed the catalog from catalog.toml if one is present
    if Path::new("catalog.toml").exists() {
        let catalog = config::catalog::load_default_config()?;
        let created = product::seed_catalog(&db, &catalog).await?;
        info!("Seeded {} catalog products from catalog.toml", created);
    }

    // 6. Derive and log the current month's report
    let today = chrono::Utc::now().date_naive();
    let month = ReportMonth::new(today.year(), today.month())?;
    let state = report::generate_monthly_report(&db, month).await?;
    info!("\n{}", report::format_invoice_summary(&state));

    Ok(())
}
