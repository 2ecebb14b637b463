use menu_seed::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logger
    use env_logger::{Builder, Env};
    use log::LevelFilter;

    Builder::from_env(Env::default().default_filter_or("info")) // Default to Info for everything
        .filter_module("reqwest", LevelFilter::Warn) // Suppress reqwest Debug logs
        .filter_module("hyper", LevelFilter::Warn) // Suppress hyper Debug logs
        .init();

    println!("Menu catalog seeder");

    let config = AppConfig::load()?;
    println!(
        "Configuration loaded: endpoint={} database={}",
        config.endpoint(),
        config.database.database_id
    );

    let report = menu_seed::run_seed(&config).await?;

    println!(
        "Seeded {} categories, {} customizations, {} menu items and {} links",
        report.categories, report.customizations, report.menu_items, report.links
    );

    Ok(())
}
