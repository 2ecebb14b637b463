use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::seed::SeedTargets;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub appwrite: AppwriteConfig,
    pub database: DatabaseConfig,
    pub seed: SeedConfig,
}

const DEFAULT_ENDPOINT: &str = "https://cloud.appwrite.io/v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppwriteConfig {
    pub endpoint: String,
    pub project_id: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub database_id: String,
    pub bucket_id: String,
    pub categories_collection_id: String,
    pub customizations_collection_id: String,
    pub menu_collection_id: String,
    pub menu_customizations_collection_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    /// JSON dataset to load instead of the built-in sample catalog
    pub data_path: Option<PathBuf>,
    pub reference_check: ReferenceCheck,
}

/// When unresolved names in the dataset are detected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceCheck {
    /// Validate the whole dataset before touching the store
    #[default]
    Strict,
    /// Send unresolved references as null and let the store reject them
    Deferred,
}

impl Default for AppwriteConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            project_id: None,
            api_key: None,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_id: "68de62fa0027abe3224e".to_string(),
            bucket_id: "68dfdc2d0013ee5eaf98".to_string(),
            categories_collection_id: "categories".to_string(),
            customizations_collection_id: "customizations".to_string(),
            menu_collection_id: "menu".to_string(),
            menu_customizations_collection_id: "menu_customizations".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional config file and environment variables
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(
            config::Environment::with_prefix("SEED")
                .prefix_separator("_")
                .separator("__"),
        )
    }

    fn load_from(environment: config::Environment) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Add default configuration
        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        // Add config file if it exists
        config = config.add_source(config::File::with_name("config").required(false));

        // e.g. SEED_APPWRITE__API_KEY, SEED_SEED__REFERENCE_CHECK
        config = config.add_source(environment);

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }

    /// Get the Appwrite endpoint from config, or from APPWRITE_ENDPOINT when config left the default
    pub fn endpoint(&self) -> String {
        self.endpoint_or(std::env::var("APPWRITE_ENDPOINT").ok())
    }

    fn endpoint_or(&self, plain: Option<String>) -> String {
        if self.appwrite.endpoint != DEFAULT_ENDPOINT {
            return self.appwrite.endpoint.clone();
        }
        plain.unwrap_or_else(|| self.appwrite.endpoint.clone())
    }

    /// Get the project id from config or environment
    pub fn project_id(&self) -> anyhow::Result<String> {
        if let Some(project_id) = &self.appwrite.project_id {
            return Ok(project_id.clone());
        }

        std::env::var("APPWRITE_PROJECT_ID").map_err(|_| {
            anyhow::anyhow!(
                "Appwrite project id not configured (set SEED_APPWRITE__PROJECT_ID or APPWRITE_PROJECT_ID)"
            )
        })
    }

    /// Get the API key from config or environment
    pub fn api_key(&self) -> anyhow::Result<String> {
        if let Some(api_key) = &self.appwrite.api_key {
            return Ok(api_key.clone());
        }

        std::env::var("APPWRITE_API_KEY").map_err(|_| {
            anyhow::anyhow!(
                "Appwrite API key not configured (set SEED_APPWRITE__API_KEY or APPWRITE_API_KEY)"
            )
        })
    }

    /// Collections and bucket the seeding run operates on
    pub fn targets(&self) -> SeedTargets {
        SeedTargets {
            categories: self.database.categories_collection_id.clone(),
            customizations: self.database.customizations_collection_id.clone(),
            menu: self.database.menu_collection_id.clone(),
            menu_customizations: self.database.menu_customizations_collection_id.clone(),
            bucket: self.database.bucket_id.clone(),
        }
    }
}
