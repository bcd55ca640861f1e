//! Kitchen stations.
//!
//! A station is any unit that can prepare some set of assigned dishes out of
//! its own private ingredient stock. The dispatch engine only talks to
//! stations through the [`Station`] trait; [`KitchenStation`] is the stock
//! implementation used by configuration and the CLI.
//!
//! # Station Lifecycle
//!
//! 1. **Creation**: The caller builds a station and wraps it in a [`StationHandle`].
//! 2. **Registration**: A clone of the handle is added to a `StationRegistry`.
//! 3. **Dispatch**: The engine tries stations in registry order.
//! 4. **Removal**: The registry drops its clone; the caller's handle stays valid.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dish::Dish;
use crate::error::{KitchenError, KitchenResult};
use crate::ingredient::{merge_into, quantity_of, Ingredient};

/// Shared, lockable reference to a station.
///
/// The registry holds clones of handles it is given; it never owns the
/// station outright.
pub type StationHandle = Arc<RwLock<dyn Station>>;

/// Contract the dispatch engine expects from a station.
///
/// # Implementing a Station
///
/// - `can_produce` must be a pure query and never touch stock.
/// - `produce` must either consume every required ingredient and return
///   `Ok`, or return an error and leave stock exactly as it was.
#[cfg_attr(test, mockall::automock)]
pub trait Station: Send + Sync {
    /// Unique station name, used as the registry key.
    fn name(&self) -> &str;

    /// Dishes assigned to this station, duplicates included.
    fn dishes(&self) -> Vec<Dish>;

    /// Names of the assigned dishes.
    fn assigned_dish_names(&self) -> Vec<String> {
        self.dishes().into_iter().map(|dish| dish.name).collect()
    }

    /// Whether a dish with this name is assigned here.
    fn has_dish(&self, dish_name: &str) -> bool {
        self.assigned_dish_names().iter().any(|name| name == dish_name)
    }

    /// Whether current stock covers the named dish.
    fn can_produce(&self, dish_name: &str) -> bool;

    /// Prepare the named dish, consuming its ingredients.
    fn produce(&mut self, dish_name: &str) -> KitchenResult<()>;

    /// Snapshot of the current stock.
    fn stock(&self) -> Vec<Ingredient>;

    /// Add `record.quantity` units of `record.name`, creating the record if needed.
    ///
    /// Fails with `StockOverflow` and leaves stock unchanged if the total
    /// would not fit.
    fn credit_stock(&mut self, record: Ingredient) -> KitchenResult<()>;

    /// Make a dish preparable here.
    fn assign(&mut self, dish: Dish);
}

/// A station backed by an in-memory dish list and stock.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KitchenStation {
    name: String,
    dishes: Vec<Dish>,
    stock: Vec<Ingredient>,
}

impl KitchenStation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dishes: Vec::new(),
            stock: Vec::new(),
        }
    }

    pub fn with_dish(mut self, dish: Dish) -> Self {
        self.dishes.push(dish);
        self
    }

    /// Seed stock. A record that would overflow the existing one is skipped.
    pub fn with_stock(mut self, record: Ingredient) -> Self {
        if let Err(err) = merge_into(&mut self.stock, record) {
            warn!("{}: {}", self.name, err);
        }
        self
    }

    /// Wrap the station in a shareable handle.
    pub fn into_handle(self) -> StationHandle {
        Arc::new(RwLock::new(self))
    }

    /// Requirements of the first assigned dish with this name.
    fn recipe(&self, dish_name: &str) -> Option<&[Ingredient]> {
        self.dishes
            .iter()
            .find(|dish| dish.name == dish_name)
            .map(|dish| dish.required_ingredients())
    }

    fn covers(&self, requirements: &[Ingredient]) -> bool {
        requirements
            .iter()
            .all(|req| quantity_of(&self.stock, &req.name) >= req.required_quantity)
    }
}

impl Station for KitchenStation {
    fn name(&self) -> &str {
        &self.name
    }

    fn dishes(&self) -> Vec<Dish> {
        self.dishes.clone()
    }

    fn has_dish(&self, dish_name: &str) -> bool {
        self.dishes.iter().any(|dish| dish.name == dish_name)
    }

    fn can_produce(&self, dish_name: &str) -> bool {
        self.recipe(dish_name)
            .map(|requirements| self.covers(requirements))
            .unwrap_or(false)
    }

    fn produce(&mut self, dish_name: &str) -> KitchenResult<()> {
        let requirements = self
            .recipe(dish_name)
            .ok_or_else(|| KitchenError::DishNotAssigned {
                station: self.name.clone(),
                dish: dish_name.to_string(),
            })?
            .to_vec();

        if !self.covers(&requirements) {
            return Err(KitchenError::InsufficientIngredients {
                station: self.name.clone(),
                dish: dish_name.to_string(),
            });
        }

        for req in &requirements {
            if let Some(record) = self.stock.iter_mut().find(|r| r.name == req.name) {
                record.quantity = record.quantity.saturating_sub(req.required_quantity);
            }
        }

        debug!("{} prepared {}", self.name, dish_name);
        Ok(())
    }

    fn stock(&self) -> Vec<Ingredient> {
        self.stock.clone()
    }

    fn credit_stock(&mut self, record: Ingredient) -> KitchenResult<()> {
        debug!("Crediting {} x{} to {}", record.name, record.quantity, self.name);
        merge_into(&mut self.stock, record)
    }

    fn assign(&mut self, dish: Dish) {
        debug!("Assigning {} to {}", dish.name, self.name);
        self.dishes.push(dish);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grill() -> KitchenStation {
        KitchenStation::new("Grill Station")
            .with_dish(Dish::new(
                "Grilled Chicken",
                vec![
                    Ingredient::requirement("Chicken", 1, 2.0),
                    Ingredient::requirement("Spices", 1, 0.5),
                ],
            ))
            .with_stock(Ingredient::stock("Chicken", 1, 2.0))
            .with_stock(Ingredient::stock("Spices", 3, 0.5))
    }

    #[test]
    fn test_can_produce_and_produce() {
        let mut station = grill();
        assert!(station.can_produce("Grilled Chicken"));

        station.produce("Grilled Chicken").unwrap();

        assert_eq!(quantity_of(&station.stock(), "Chicken"), 0);
        assert_eq!(quantity_of(&station.stock(), "Spices"), 2);
        // exhausted records stay in stock at zero
        assert_eq!(station.stock().len(), 2);
        assert!(!station.can_produce("Grilled Chicken"));
    }

    #[test]
    fn test_produce_failure_leaves_stock_untouched() {
        let mut station = grill();
        station.produce("Grilled Chicken").unwrap();
        let before = station.stock();

        let err = station.produce("Grilled Chicken").unwrap_err();
        assert!(matches!(err, KitchenError::InsufficientIngredients { .. }));
        assert_eq!(station.stock(), before);
    }

    #[test]
    fn test_unassigned_dish() {
        let mut station = grill();
        assert!(!station.has_dish("Pizza"));
        assert!(!station.can_produce("Pizza"));
        assert!(matches!(
            station.produce("Pizza"),
            Err(KitchenError::DishNotAssigned { .. })
        ));
    }

    #[test]
    fn test_can_produce_is_pure() {
        let station = grill();
        let before = station.stock();
        for _ in 0..5 {
            station.can_produce("Grilled Chicken");
            station.can_produce("Pizza");
        }
        assert_eq!(station.stock(), before);
    }

    #[test]
    fn test_assign_allows_duplicates() {
        let mut station = KitchenStation::new("Salad Station");
        let salad = Dish::new("Salad", Vec::new());
        station.assign(salad.clone());
        station.assign(salad);
        assert_eq!(station.assigned_dish_names(), vec!["Salad", "Salad"]);
    }

    #[test]
    fn test_handle_shares_state() {
        let handle = grill().into_handle();
        let other = handle.clone();
        other
            .write()
            .credit_stock(Ingredient::stock("Chicken", 4, 2.0))
            .unwrap();
        assert_eq!(quantity_of(&handle.read().stock(), "Chicken"), 5);
    }

    #[test]
    fn test_credit_stock_overflow_leaves_stock() {
        let mut station =
            KitchenStation::new("Pantry").with_stock(Ingredient::stock("Salt", u32::MAX, 0.1));

        let err = station.credit_stock(Ingredient::stock("Salt", 1, 0.1));
        assert!(matches!(err, Err(KitchenError::StockOverflow { .. })));
        assert_eq!(quantity_of(&station.stock(), "Salt"), u32::MAX);

        // the builder skips a record that would overflow
        let station = station.with_stock(Ingredient::stock("Salt", 2, 0.1));
        assert_eq!(quantity_of(&station.stock(), "Salt"), u32::MAX);
    }
}
