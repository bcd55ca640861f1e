//! Shared backup ingredient pool.
//!
//! The pool is the reserve every station draws from when its own stock runs
//! short. Withdrawals are all-or-nothing and a record that reaches exactly
//! zero is dropped from the pool.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{KitchenError, KitchenResult};
use crate::ingredient::{merge_into, quantity_of, Ingredient};

/// Backup supplies keyed by ingredient name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackupPool {
    ingredients: Vec<Ingredient>,
}

impl BackupPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add supplies, topping up an existing record of the same name.
    pub fn add(&mut self, record: Ingredient) -> KitchenResult<()> {
        debug!("Adding {} x{} to backup", record.name, record.quantity);
        merge_into(&mut self.ingredients, record)
    }

    /// Replace the whole pool.
    pub fn set_all(&mut self, records: Vec<Ingredient>) {
        debug!("Replacing backup pool with {} records", records.len());
        self.ingredients = records;
    }

    /// Take `quantity` units of `name` out of the pool.
    ///
    /// Returns the withdrawn amount as a stock record priced like the backup
    /// record. Nothing changes unless the full amount is available.
    pub fn withdraw(&mut self, name: &str, quantity: u32) -> KitchenResult<Ingredient> {
        if quantity == 0 {
            return Err(KitchenError::InvalidQuantity {
                ingredient: name.to_string(),
                quantity,
            });
        }

        let index = self
            .ingredients
            .iter()
            .position(|record| record.name == name)
            .ok_or_else(|| KitchenError::IngredientNotFound(name.to_string()))?;

        let record = &mut self.ingredients[index];
        if record.quantity < quantity {
            warn!(
                "Backup of {} too low: requested {}, available {}",
                name, quantity, record.quantity
            );
            return Err(KitchenError::InsufficientBackup {
                ingredient: name.to_string(),
                requested: quantity,
                available: record.quantity,
            });
        }

        record.quantity -= quantity;
        let withdrawn = Ingredient::stock(name, quantity, record.price);
        if record.quantity == 0 {
            self.ingredients.remove(index);
        }

        debug!("Withdrew {} x{} from backup", name, quantity);
        Ok(withdrawn)
    }

    /// Empty the pool.
    pub fn clear(&mut self) {
        debug!("Clearing backup pool");
        self.ingredients.clear();
    }

    /// Current contents of the pool.
    pub fn snapshot(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn quantity_of(&self, name: &str) -> u32 {
        quantity_of(&self.ingredients, name)
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}

impl From<Vec<Ingredient>> for BackupPool {
    fn from(ingredients: Vec<Ingredient>) -> Self {
        Self { ingredients }
    }
}
