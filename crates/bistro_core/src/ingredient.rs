//! Ingredient records shared by station stock, backup supplies and dish
//! requirements.
//!
//! The same record shape serves both purposes: in a stock context only
//! `quantity` is meaningful, in a requirement context only
//! `required_quantity` is.

use serde::{Deserialize, Serialize};

use crate::error::{KitchenError, KitchenResult};

/// A named, priced ingredient with on-hand and required quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Quantity on hand
    #[serde(default)]
    pub quantity: u32,
    /// Quantity a dish needs
    #[serde(default)]
    pub required_quantity: u32,
    /// Price per unit
    #[serde(default)]
    pub price: f64,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: u32, required_quantity: u32, price: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            required_quantity,
            price,
        }
    }

    /// A stock record: `quantity` units on hand.
    pub fn stock(name: impl Into<String>, quantity: u32, price: f64) -> Self {
        Self::new(name, quantity, 0, price)
    }

    /// A requirement record: a dish needs `required_quantity` units.
    pub fn requirement(name: impl Into<String>, required_quantity: u32, price: f64) -> Self {
        Self::new(name, 0, required_quantity, price)
    }
}

/// Add `record` to `stock`.
///
/// When a record with the same name exists its quantity is incremented and
/// every other field is left as it was; otherwise `record` is appended.
/// Fails without touching `stock` if the total would not fit in a `u32`.
pub fn merge_into(stock: &mut Vec<Ingredient>, record: Ingredient) -> KitchenResult<()> {
    match stock.iter_mut().find(|existing| existing.name == record.name) {
        Some(existing) => {
            existing.quantity = existing
                .quantity
                .checked_add(record.quantity)
                .ok_or_else(|| KitchenError::StockOverflow {
                    ingredient: record.name.clone(),
                    held: existing.quantity,
                    added: record.quantity,
                })?;
        }
        None => stock.push(record),
    }
    Ok(())
}

/// Check that `quantity` more units of `name` would fit in `records`.
pub fn ensure_room(records: &[Ingredient], name: &str, quantity: u32) -> KitchenResult<()> {
    let held = quantity_of(records, name);
    match held.checked_add(quantity) {
        Some(_) => Ok(()),
        None => Err(KitchenError::StockOverflow {
            ingredient: name.to_string(),
            held,
            added: quantity,
        }),
    }
}

/// On-hand quantity of `name` in `records`, 0 when absent.
pub fn quantity_of(records: &[Ingredient], name: &str) -> u32 {
    records
        .iter()
        .find(|record| record.name == name)
        .map(|record| record.quantity)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_into_increments_existing() {
        let mut stock = vec![Ingredient::stock("Chicken", 2, 2.0)];
        merge_into(&mut stock, Ingredient::stock("Chicken", 3, 9.99)).unwrap();

        assert_eq!(stock.len(), 1);
        assert_eq!(stock[0].quantity, 5);
        // price of the existing record is kept
        assert_eq!(stock[0].price, 2.0);
    }

    #[test]
    fn test_merge_into_appends_new() {
        let mut stock = vec![Ingredient::stock("Chicken", 2, 2.0)];
        merge_into(&mut stock, Ingredient::stock("Spices", 1, 0.5)).unwrap();

        assert_eq!(stock.len(), 2);
        assert_eq!(stock[1].name, "Spices");
    }

    #[test]
    fn test_merge_into_rejects_overflow() {
        let mut stock = vec![Ingredient::stock("Salt", u32::MAX - 3, 0.1)];
        let err = merge_into(&mut stock, Ingredient::stock("Salt", 10, 0.1));

        assert_eq!(
            err,
            Err(KitchenError::StockOverflow {
                ingredient: "Salt".to_string(),
                held: u32::MAX - 3,
                added: 10,
            })
        );
        assert_eq!(stock[0].quantity, u32::MAX - 3);

        merge_into(&mut stock, Ingredient::stock("Salt", 3, 0.1)).unwrap();
        assert_eq!(stock[0].quantity, u32::MAX);
    }

    #[test]
    fn test_ensure_room() {
        let stock = vec![Ingredient::stock("Salt", u32::MAX - 3, 0.1)];
        assert!(ensure_room(&stock, "Salt", 3).is_ok());
        assert!(ensure_room(&stock, "Salt", 4).is_err());
        assert!(ensure_room(&stock, "Pepper", u32::MAX).is_ok());
    }

    #[test]
    fn test_quantity_of() {
        let stock = vec![Ingredient::stock("Pasta", 4, 1.5)];
        assert_eq!(quantity_of(&stock, "Pasta"), 4);
        assert_eq!(quantity_of(&stock, "Rice"), 0);
    }
}
