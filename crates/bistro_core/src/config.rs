//! Kitchen configuration.
//!
//! A kitchen can be described in YAML: the menu, the stations with the
//! dishes they are assigned and their starting stock, the backup supplies,
//! and the orders to queue.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dish::{DietaryRequest, Dish};
use crate::error::{KitchenError, KitchenResult};
use crate::ingredient::Ingredient;
use crate::kitchen::Kitchen;
use crate::station::{KitchenStation, Station};

/// Sample kitchen used by `bistro sample` and the tests.
pub const SAMPLE_KITCHEN_YAML: &str = r#"menu:
  - name: Spaghetti Bolognese
    cuisine: italian
    prep_time_minutes: 20
    price: 12.99
    ingredients:
      - { name: Spaghetti, required_quantity: 1, price: 1.5 }
      - { name: Tomato Sauce, required_quantity: 1, price: 0.75 }
      - { name: Ground Beef, required_quantity: 1, price: 3.0 }
    course:
      kind: main_course
      cooking_method: boiled
      protein_type: Beef
      side_dishes: [Garlic Bread]
  - name: Vegan Salad
    cuisine: american
    prep_time_minutes: 10
    price: 8.99
    ingredients:
      - { name: Lettuce, required_quantity: 1, price: 0.5 }
      - { name: Tomato, required_quantity: 2, price: 0.3 }
    course:
      kind: appetizer
      serving_style: plated
      vegetarian: true
  - name: Seafood Paella
    cuisine: other
    prep_time_minutes: 40
    price: 24.5
    ingredients:
      - { name: Rice, required_quantity: 1, price: 0.8 }
      - { name: Shrimp, required_quantity: 4, price: 1.2 }
    course:
      kind: main_course
      cooking_method: boiled
      protein_type: Seafood
  - name: Grilled Chicken
    cuisine: american
    prep_time_minutes: 15
    price: 10.99
    ingredients:
      - { name: Chicken, required_quantity: 1, price: 2.0 }
      - { name: Spices, required_quantity: 1, price: 0.5 }
  - name: Beef Wellington
    cuisine: french
    prep_time_minutes: 60
    price: 32.0
    ingredients:
      - { name: Beef Tenderloin, required_quantity: 1, price: 12.0 }
stations:
  - name: Grill Station
    dishes: [Grilled Chicken]
    stock:
      - { name: Spices, quantity: 2, price: 0.5 }
  - name: Oven Station
    dishes: [Grilled Chicken]
    stock:
      - { name: Chicken, quantity: 3, price: 2.0 }
      - { name: Spices, quantity: 3, price: 0.5 }
  - name: Pasta Station
    dishes: [Spaghetti Bolognese]
    stock:
      - { name: Ground Beef, quantity: 2, price: 3.0 }
  - name: Salad Station
    dishes: [Vegan Salad]
    stock:
      - { name: Lettuce, quantity: 4, price: 0.5 }
      - { name: Tomato, quantity: 6, price: 0.3 }
  - name: Seafood Station
    dishes: [Seafood Paella]
    stock:
      - { name: Rice, quantity: 2, price: 0.8 }
backup:
  - { name: Spaghetti, quantity: 5, price: 1.5 }
  - { name: Tomato Sauce, quantity: 5, price: 0.75 }
  - { name: Shrimp, quantity: 2, price: 1.2 }
orders:
  - dish: Spaghetti Bolognese
  - dish: Vegan Salad
  - dish: Seafood Paella
  - dish: Grilled Chicken
  - dish: Beef Wellington
"#;

/// A station and its starting state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationConfig {
    pub name: String,
    /// Menu dishes assigned to the station
    #[serde(default)]
    pub dishes: Vec<String>,
    #[serde(default)]
    pub stock: Vec<Ingredient>,
}

/// A queued order for a menu dish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfig {
    pub dish: String,
    /// Dietary accommodations applied before the dish is queued
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary: Option<DietaryRequest>,
    /// Number of independent orders
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

/// Full description of a kitchen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KitchenConfig {
    #[serde(default)]
    pub menu: Vec<Dish>,
    /// Stations in dispatch order
    #[serde(default)]
    pub stations: Vec<StationConfig>,
    #[serde(default)]
    pub backup: Vec<Ingredient>,
    /// Orders in arrival order
    #[serde(default)]
    pub orders: Vec<OrderConfig>,
}

impl KitchenConfig {
    pub fn from_yaml_str(yaml: &str) -> KitchenResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml_string(&self) -> KitchenResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// The sample kitchen.
    pub fn sample() -> KitchenResult<Self> {
        Self::from_yaml_str(SAMPLE_KITCHEN_YAML)
    }

    fn menu_dish(&self, name: &str) -> Option<&Dish> {
        self.menu.iter().find(|dish| dish.name == name)
    }

    /// Check names and references, reporting every problem found.
    pub fn validate(&self) -> KitchenResult<()> {
        let mut problems = Vec::new();

        let mut menu_names = HashSet::new();
        for dish in &self.menu {
            if !menu_names.insert(dish.name.as_str()) {
                problems.push(format!("duplicate menu dish '{}'", dish.name));
            }
        }

        let mut station_names = HashSet::new();
        for station in &self.stations {
            if !station_names.insert(station.name.as_str()) {
                problems.push(format!("duplicate station '{}'", station.name));
            }
            for dish in &station.dishes {
                if !menu_names.contains(dish.as_str()) {
                    problems.push(format!(
                        "station '{}' is assigned unknown dish '{}'",
                        station.name, dish
                    ));
                }
            }
        }

        for order in &self.orders {
            if !menu_names.contains(order.dish.as_str()) {
                problems.push(format!("order for unknown dish '{}'", order.dish));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(KitchenError::Config(problems.join("; ")))
        }
    }

    /// Build the kitchen this configuration describes.
    pub fn build(&self) -> KitchenResult<Kitchen> {
        self.validate()?;

        let mut kitchen = Kitchen::new();
        for station_config in &self.stations {
            let mut station = KitchenStation::new(&station_config.name);
            for dish_name in &station_config.dishes {
                let dish = self
                    .menu_dish(dish_name)
                    .ok_or_else(|| KitchenError::UnknownDish(dish_name.clone()))?;
                station = station.with_dish(dish.clone());
            }
            for record in &station_config.stock {
                station.credit_stock(record.clone())?;
            }
            kitchen.add_station(station.into_handle())?;
        }

        kitchen.backup_mut().set_all(self.backup.clone());

        for order in &self.orders {
            let dish = self
                .menu_dish(&order.dish)
                .ok_or_else(|| KitchenError::UnknownDish(order.dish.clone()))?;
            for _ in 0..order.count {
                kitchen.order(dish.reissue(), order.dietary.as_ref());
            }
        }

        debug!(
            "Built kitchen: {} stations, {} backup records, {} queued dishes",
            kitchen.registry().len(),
            kitchen.backup().len(),
            kitchen.queue().len()
        );
        Ok(kitchen)
    }
}
