use crate::model::{Category, Customization, CustomizationType, MenuItem, Named};
use crate::seed::error::DatasetProblem;
use anyhow::{Context, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Source-of-truth content used to populate the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    pub categories: Vec<Category>,
    pub customizations: Vec<Customization>,
    pub menu: Vec<MenuItem>,
}

/// Helper function to build a menu item from its literal parts
#[allow(clippy::too_many_arguments)]
fn menu_item(
    name: &str,
    description: &str,
    image_url: &str,
    price: f64,
    rating: f64,
    calories: u32,
    protein: u32,
    category_name: &str,
    customizations: &[&str],
) -> MenuItem {
    MenuItem {
        name: name.to_string(),
        description: description.to_string(),
        image_url: image_url.to_string(),
        price,
        rating,
        calories,
        protein,
        category_name: category_name.to_string(),
        customizations: customizations.iter().map(|c| c.to_string()).collect(),
    }
}

impl SeedData {
    /// Load a dataset from a JSON file shaped `{categories, customizations, menu}`
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed data from {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid seed data in {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Failed to parse seed data")
    }

    /// Total number of join records a run creates
    pub fn link_count(&self) -> usize {
        self.menu.iter().map(|item| item.customizations.len()).sum()
    }

    /// Report duplicate names and references to names the dataset does not define
    pub fn validate(&self) -> Vec<DatasetProblem> {
        let mut problems = Vec::new();
        problems.extend(duplicates(&self.categories));
        problems.extend(duplicates(&self.customizations));

        let categories: HashSet<&str> = self.categories.iter().map(Named::name).collect();
        let customizations: HashSet<&str> = self.customizations.iter().map(Named::name).collect();

        for item in &self.menu {
            if !categories.contains(item.category_name.as_str()) {
                problems.push(DatasetProblem::UnknownCategory {
                    item: item.name.clone(),
                    category: item.category_name.clone(),
                });
            }
            for name in &item.customizations {
                if !customizations.contains(name.as_str()) {
                    problems.push(DatasetProblem::UnknownCustomization {
                        item: item.name.clone(),
                        customization: name.clone(),
                    });
                }
            }
        }

        problems
    }

    /// Built-in fast food catalog
    pub fn sample() -> Self {
        use CustomizationType::*;

        let categories = vec![
            Category::new("Burgers", "Juicy grilled burgers"),
            Category::new("Pizzas", "Oven-baked cheesy pizzas"),
            Category::new("Burritos", "Rolled Mexican delights"),
            Category::new("Sandwiches", "Stacked and stuffed sandwiches"),
            Category::new("Wraps", "Rolled up wraps packed with flavor"),
            Category::new("Bowls", "Balanced rice and protein bowls"),
        ];

        let customizations = vec![
            // Toppings
            Customization::new("Extra Cheese", 25.0, Topping),
            Customization::new("Jalapeños", 20.0, Topping),
            Customization::new("Onions", 10.0, Topping),
            Customization::new("Olives", 15.0, Topping),
            Customization::new("Mushrooms", 18.0, Topping),
            Customization::new("Tomatoes", 10.0, Topping),
            Customization::new("Bacon", 30.0, Topping),
            Customization::new("Avocado", 35.0, Topping),
            // Sides
            Customization::new("Coke", 30.0, Side),
            Customization::new("Fries", 35.0, Side),
            Customization::new("Garlic Bread", 40.0, Side),
            Customization::new("Chicken Nuggets", 50.0, Side),
            Customization::new("Iced Tea", 28.0, Side),
            Customization::new("Salad", 33.0, Side),
            Customization::new("Potato Wedges", 38.0, Side),
            Customization::new("Mozzarella Sticks", 45.0, Side),
            Customization::new("Sweet Corn", 25.0, Side),
            Customization::new("Choco Lava Cake", 42.0, Side),
        ];

        let menu = vec![
            menu_item(
                "Classic Cheeseburger",
                "Beef patty, cheese, lettuce, tomato",
                "https://img.example.com/menu/classic-cheeseburger.png",
                25.99,
                4.5,
                550,
                25,
                "Burgers",
                &["Extra Cheese", "Coke", "Fries", "Onions", "Bacon"],
            ),
            menu_item(
                "Pepperoni Pizza",
                "Loaded with cheese and pepperoni slices",
                "https://img.example.com/menu/pepperoni-pizza.png",
                30.99,
                4.7,
                700,
                30,
                "Pizzas",
                &["Extra Cheese", "Jalapeños", "Garlic Bread", "Coke", "Olives"],
            ),
            menu_item(
                "Bean Burrito",
                "Stuffed with beans, rice, salsa",
                "https://img.example.com/menu/bean-burrito.png",
                20.99,
                4.2,
                480,
                18,
                "Burritos",
                &["Jalapeños", "Iced Tea", "Fries", "Salad"],
            ),
            menu_item(
                "BBQ Bacon Burger",
                "Smoky BBQ sauce, crispy bacon, cheddar",
                "https://img.example.com/menu/bbq-bacon-burger.png",
                27.5,
                4.8,
                650,
                29,
                "Burgers",
                &["Onions", "Fries", "Coke", "Bacon", "Avocado"],
            ),
            menu_item(
                "Chicken Caesar Wrap",
                "Grilled chicken, lettuce, Caesar dressing",
                "https://img.example.com/menu/chicken-caesar-wrap.png",
                21.5,
                4.4,
                490,
                27,
                "Wraps",
                &["Extra Cheese", "Coke", "Potato Wedges", "Tomatoes"],
            ),
            menu_item(
                "Grilled Veggie Sandwich",
                "Roasted veggies, pesto, cheese",
                "https://img.example.com/menu/grilled-veggie-sandwich.png",
                19.99,
                4.1,
                420,
                19,
                "Sandwiches",
                &["Mushrooms", "Olives", "Mozzarella Sticks", "Iced Tea"],
            ),
            menu_item(
                "Double Patty Burger",
                "Two juicy beef patties and cheese",
                "https://img.example.com/menu/double-patty-burger.png",
                32.99,
                4.9,
                720,
                35,
                "Burgers",
                &["Extra Cheese", "Onions", "Fries", "Coke", "Chicken Nuggets"],
            ),
            menu_item(
                "Paneer Tikka Wrap",
                "Spicy paneer, mint mayo, veggies",
                "https://img.example.com/menu/paneer-tikka-wrap.png",
                23.99,
                4.6,
                470,
                20,
                "Wraps",
                &["Jalapeños", "Tomatoes", "Salad", "Fries", "Iced Tea"],
            ),
            menu_item(
                "Mexican Burrito Bowl",
                "Rice, beans, corn, guac, salsa",
                "https://img.example.com/menu/mexican-burrito-bowl.png",
                26.49,
                4.7,
                610,
                24,
                "Bowls",
                &["Avocado", "Sweet Corn", "Salad", "Iced Tea"],
            ),
            menu_item(
                "Spicy Chicken Sandwich",
                "Crispy chicken, spicy sauce, pickles",
                "https://img.example.com/menu/spicy-chicken-sandwich.png",
                24.99,
                4.3,
                540,
                26,
                "Sandwiches",
                &["Jalapeños", "Onions", "Fries", "Coke", "Choco Lava Cake"],
            ),
            menu_item(
                "Classic Margherita Pizza",
                "Tomato, mozzarella, fresh basil",
                "https://img.example.com/menu/classic-margherita-pizza.png",
                23.99,
                4.1,
                590,
                21,
                "Pizzas",
                &["Extra Cheese", "Olives", "Coke", "Garlic Bread"],
            ),
            menu_item(
                "Protein Power Bowl",
                "Grilled chicken, quinoa, veggies",
                "https://img.example.com/menu/protein-power-bowl.png",
                29.99,
                4.8,
                580,
                38,
                "Bowls",
                &["Avocado", "Salad", "Sweet Corn", "Iced Tea"],
            ),
        ];

        Self {
            categories,
            customizations,
            menu,
        }
    }
}

fn duplicates<T: Named>(records: &[T]) -> impl Iterator<Item = DatasetProblem> + '_ {
    records
        .iter()
        .map(Named::name)
        .duplicates()
        .map(|name| DatasetProblem::DuplicateName {
            kind: T::KIND,
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_catalog_is_consistent() {
        let data = SeedData::sample();
        assert!(data.validate().is_empty(), "{:?}", data.validate());
        assert_eq!(data.categories.len(), 6);
        assert_eq!(data.link_count(), 54);
    }

    #[test]
    fn validate_reports_every_problem() {
        let mut data = SeedData::sample();
        data.categories.push(Category::new("Burgers", "Again"));
        data.menu[0].category_name = "Desserts".to_string();
        data.menu[1].customizations.push("Pineapple".to_string());

        let problems = data.validate();
        assert_eq!(
            problems,
            vec![
                DatasetProblem::DuplicateName {
                    kind: "category",
                    name: "Burgers".to_string()
                },
                DatasetProblem::UnknownCategory {
                    item: "Classic Cheeseburger".to_string(),
                    category: "Desserts".to_string()
                },
                DatasetProblem::UnknownCustomization {
                    item: "Pepperoni Pizza".to_string(),
                    customization: "Pineapple".to_string()
                },
            ]
        );
    }

    #[test]
    fn parses_dataset_json() {
        let raw = r#"{
            "categories": [{"name": "Pizza", "description": "Oven-baked"}],
            "customizations": [{"name": "Extra Cheese", "price": 1.5, "type": "topping"}],
            "menu": [{
                "name": "Margherita",
                "description": "Tomato and mozzarella",
                "image_url": "https://img.example.com/margherita.png",
                "price": 9.5,
                "rating": 4.6,
                "calories": 800,
                "protein": 30,
                "category_name": "Pizza",
                "customizations": ["Extra Cheese"]
            }]
        }"#;

        let data = SeedData::from_json(raw).unwrap();
        assert_eq!(data.menu[0].customizations, vec!["Extra Cheese"]);
        assert_eq!(data.customizations[0].kind, CustomizationType::Topping);
        assert!(data.validate().is_empty());
    }

    #[test]
    fn missing_file_names_the_path() {
        let error = SeedData::from_path(Path::new("/nonexistent/seed.json")).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/seed.json"));
    }
}
