pub mod config;
pub mod model;
pub mod seed;
pub mod store;

// Export all model types
pub use model::*;

// Export seed pipeline types
pub use seed::*;

// Export store types
pub use store::{AppwriteStore, MemoryStore, Store};

use crate::config::AppConfig;

/// Reset and repopulate the Appwrite database described by `config`
pub async fn run_seed(config: &AppConfig) -> anyhow::Result<SeedReport> {
    let store = AppwriteStore::from_config(config)?;
    let data = load_seed_data(config)?;
    let targets = config.targets();

    let report = SeedPipeline::new(&store, &RemoteUrlAssets, &targets)
        .with_reference_check(config.seed.reference_check)
        .run(&data)
        .await?;

    Ok(report)
}

/// The configured dataset file, or the built-in sample catalog
pub fn load_seed_data(config: &AppConfig) -> anyhow::Result<SeedData> {
    match &config.seed.data_path {
        Some(path) => SeedData::from_path(path),
        None => Ok(SeedData::sample()),
    }
}
