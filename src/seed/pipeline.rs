use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::config::ReferenceCheck;
use crate::model::{Category, Customization, Id, MenuCustomizationLink, MenuItem, UNIQUE_ID};
use crate::seed::assets::AssetResolver;
use crate::seed::clear::{clear_bucket, clear_collection};
use crate::seed::data::SeedData;
use crate::seed::error::SeedError;
use crate::seed::identity::IdentityMap;
use crate::store::traits::Store;

/// Collections and bucket a seeding run replaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedTargets {
    pub categories: String,
    pub customizations: String,
    pub menu: String,
    pub menu_customizations: String,
    pub bucket: String,
}

/// Ids of the created menu documents, in dataset order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuIds(Vec<Id>);

impl MenuIds {
    pub fn get(&self, index: usize) -> Option<&Id> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub documents_cleared: usize,
    pub files_cleared: usize,
    pub categories: usize,
    pub customizations: usize,
    pub menu_items: usize,
    pub links: usize,
}

/// The reset-and-repopulate pipeline
///
/// Stages run strictly in order, each consuming the identity maps produced
/// by the stages before it:
///
/// ```text
/// clear ─▶ categories ─▶ customizations ─▶ menu(categories) ─▶ links(menu, customizations)
/// ```
///
/// The first failing remote call aborts the run. Nothing is rolled back, so
/// a failed run can leave the store partially seeded until the next run.
pub struct SeedPipeline<'a, S: Store + ?Sized, A: AssetResolver + ?Sized> {
    store: &'a S,
    assets: &'a A,
    targets: &'a SeedTargets,
    reference_check: ReferenceCheck,
}

impl<'a, S: Store + ?Sized, A: AssetResolver + ?Sized> SeedPipeline<'a, S, A> {
    pub fn new(store: &'a S, assets: &'a A, targets: &'a SeedTargets) -> Self {
        Self {
            store,
            assets,
            targets,
            reference_check: ReferenceCheck::default(),
        }
    }

    pub fn with_reference_check(mut self, reference_check: ReferenceCheck) -> Self {
        self.reference_check = reference_check;
        self
    }

    /// Replace the store's catalog content with `data`
    pub async fn run(&self, data: &SeedData) -> Result<SeedReport, SeedError> {
        log::info!("Starting seeding process...");

        if self.reference_check == ReferenceCheck::Strict {
            let problems = data.validate();
            if !problems.is_empty() {
                return Err(SeedError::InvalidDataset(problems));
            }
        }

        let mut report = SeedReport::default();

        log::info!("Step 1: Clearing old data...");
        let (documents_cleared, files_cleared) =
            self.clear().await.map_err(SeedError::stage("clear"))?;
        report.documents_cleared = documents_cleared;
        report.files_cleared = files_cleared;
        log::info!("Step 1 complete: Old data cleared.");

        log::info!("Step 2: Creating categories...");
        let category_ids = self
            .create_categories(&data.categories)
            .await
            .map_err(SeedError::stage("categories"))?;
        report.categories = data.categories.len();
        log::info!("Step 2 complete: Categories created.");

        log::info!("Step 3: Creating customizations...");
        let customization_ids = self
            .create_customizations(&data.customizations)
            .await
            .map_err(SeedError::stage("customizations"))?;
        report.customizations = data.customizations.len();
        log::info!("Step 3 complete: Customizations created.");

        log::info!("Step 4: Creating menu items...");
        let menu_ids = self
            .create_menu_items(&data.menu, &category_ids)
            .await
            .map_err(SeedError::stage("menu"))?;
        report.menu_items = menu_ids.len();
        log::info!("Step 4 complete: Menu items created.");

        log::info!("Step 5: Linking customizations...");
        report.links = self
            .link_customizations(&data.menu, &menu_ids, &customization_ids)
            .await
            .map_err(SeedError::stage("links"))?;
        log::info!("Step 5 complete: {} links created.", report.links);

        log::info!("Seeding process completed successfully!");
        Ok(report)
    }

    /// Empty the join collection first, then the entity collections, then the bucket
    pub async fn clear(&self) -> Result<(usize, usize)> {
        let mut documents = 0;
        for collection in [
            &self.targets.menu_customizations,
            &self.targets.customizations,
            &self.targets.menu,
            &self.targets.categories,
        ] {
            documents += clear_collection(self.store, collection).await?;
        }
        let files = clear_bucket(self.store, &self.targets.bucket).await?;
        Ok((documents, files))
    }

    pub async fn create_categories(&self, categories: &[Category]) -> Result<IdentityMap<Category>> {
        let mut ids = IdentityMap::new();
        for category in categories {
            log::info!("Creating category: {}", category.name);
            let id = self.create(&self.targets.categories, category).await?;
            ids.record(&category.name, id);
            log::info!("Category created: {}", category.name);
        }
        Ok(ids)
    }

    pub async fn create_customizations(
        &self,
        customizations: &[Customization],
    ) -> Result<IdentityMap<Customization>> {
        let mut ids = IdentityMap::new();
        for customization in customizations {
            log::info!("Creating customization: {}", customization.name);
            let id = self.create(&self.targets.customizations, customization).await?;
            ids.record(&customization.name, id);
            log::info!("Customization created: {}", customization.name);
        }
        Ok(ids)
    }

    pub async fn create_menu_items(
        &self,
        items: &[MenuItem],
        category_ids: &IdentityMap<Category>,
    ) -> Result<MenuIds> {
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            log::info!("Creating menu item: {}", item.name);
            let category = category_ids.resolve(&item.category_name).cloned();
            if category.is_none() {
                log::warn!(
                    "Menu item '{}' references unknown category '{}'",
                    item.name,
                    item.category_name
                );
            }

            let image_url = self
                .assets
                .resolve(&item.image_url)
                .await
                .with_context(|| format!("Failed to resolve image for '{}'", item.name))?;

            let id = self
                .create(&self.targets.menu, &item.to_document(image_url, category))
                .await
                .with_context(|| format!("Failed to create menu item '{}'", item.name))?;
            ids.push(id);
            log::info!("Menu item created: {}", item.name);
        }
        Ok(MenuIds(ids))
    }

    /// Create one join record per (menu item, customization) pair. Returns the number created.
    pub async fn link_customizations(
        &self,
        items: &[MenuItem],
        menu_ids: &MenuIds,
        customization_ids: &IdentityMap<Customization>,
    ) -> Result<usize> {
        let mut created = 0;
        for (index, item) in items.iter().enumerate() {
            let menu = menu_ids
                .get(index)
                .cloned()
                .with_context(|| format!("Menu item '{}' was not created", item.name))?;

            log::info!("Linking customizations for: {}", item.name);
            for name in &item.customizations {
                let customizations = customization_ids.resolve(name).cloned();
                if customizations.is_none() {
                    log::warn!(
                        "Menu item '{}' references unknown customization '{}'",
                        item.name,
                        name
                    );
                }

                let link = MenuCustomizationLink {
                    menu: menu.clone(),
                    customizations,
                };
                self.create(&self.targets.menu_customizations, &link)
                    .await
                    .with_context(|| format!("Failed to link '{}' to '{}'", item.name, name))?;
                created += 1;
                log::info!("   Linked customization: {}", name);
            }
        }
        Ok(created)
    }

    async fn create<T: Serialize>(&self, collection_id: &str, record: &T) -> Result<Id> {
        let Value::Object(fields) = serde_json::to_value(record)? else {
            bail!("Record for '{}' did not serialize to an object", collection_id);
        };

        let document = self
            .store
            .create_document(collection_id, UNIQUE_ID, fields)
            .await?;
        Ok(document.id)
    }
}
