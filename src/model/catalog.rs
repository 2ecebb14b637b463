use crate::model::{Id, Named};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub description: String,
}

impl Category {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl Named for Category {
    const KIND: &'static str = "category";

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomizationType {
    Topping,
    Side,
    Size,
    Crust,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customization {
    pub name: String,
    pub price: f64,
    #[serde(rename = "type")]
    pub kind: CustomizationType,
}

impl Customization {
    pub fn new(name: impl Into<String>, price: f64, kind: CustomizationType) -> Self {
        Self {
            name: name.into(),
            price,
            kind,
        }
    }
}

impl Named for Customization {
    const KIND: &'static str = "customization";

    fn name(&self) -> &str {
        &self.name
    }
}

/// A menu item as it appears in the seed dataset, referencing other records by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price: f64,
    pub rating: f64,
    pub calories: u32,
    pub protein: u32,
    pub category_name: String,
    #[serde(default)]
    pub customizations: Vec<String>,
}

impl Named for MenuItem {
    const KIND: &'static str = "menu item";

    fn name(&self) -> &str {
        &self.name
    }
}

impl MenuItem {
    /// Build the stored form of this item once its references are resolved
    pub fn to_document(&self, image_url: String, category: Option<Id>) -> MenuDocument {
        MenuDocument {
            name: self.name.clone(),
            description: self.description.clone(),
            image_url,
            price: self.price,
            rating: self.rating,
            calories: self.calories,
            protein: self.protein,
            categories: category,
        }
    }
}

/// Fields written to the menu collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuDocument {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price: f64,
    pub rating: f64,
    pub calories: u32,
    pub protein: u32,
    /// Resolved category id; `None` is sent as `null`
    pub categories: Option<Id>,
}

/// Join record between a menu item and one of its customizations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuCustomizationLink {
    pub menu: Id,
    pub customizations: Option<Id>,
}
