//! The kitchen: stations, backup supplies and the dish queue in one place.
//!
//! The dispatch pass itself lives in [`crate::dispatch`]; this module holds
//! the operations that touch a single station.

use tracing::{debug, info};

use crate::backup::BackupPool;
use crate::dish::{DietaryRequest, Dish};
use crate::error::{KitchenError, KitchenResult};
use crate::ingredient::{ensure_room, Ingredient};
use crate::queue::DishQueue;
use crate::registry::StationRegistry;
use crate::station::StationHandle;

/// Station registry, backup pool and dish queue of one kitchen.
#[derive(Debug, Default)]
pub struct Kitchen {
    pub(crate) registry: StationRegistry,
    pub(crate) backup: BackupPool,
    pub(crate) queue: DishQueue,
}

impl Kitchen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &StationRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut StationRegistry {
        &mut self.registry
    }

    pub fn backup(&self) -> &BackupPool {
        &self.backup
    }

    pub fn backup_mut(&mut self) -> &mut BackupPool {
        &mut self.backup
    }

    pub fn queue(&self) -> &DishQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut DishQueue {
        &mut self.queue
    }

    /// Register a station at the back of the dispatch order.
    pub fn add_station(&mut self, station: StationHandle) -> KitchenResult<()> {
        self.registry.add(station)
    }

    /// Queue a dish, optionally adjusted for a dietary request first.
    pub fn order(&mut self, dish: Dish, request: Option<&DietaryRequest>) {
        match request {
            Some(request) if !request.is_empty() => self.queue.enqueue_for(dish, request),
            _ => self.queue.enqueue(dish),
        }
    }

    /// Make `dish` preparable at the named station.
    pub fn assign_dish_to_station(&mut self, station_name: &str, dish: Dish) -> KitchenResult<()> {
        let station = self.registry.get_required(station_name)?;
        station.write().assign(dish);
        Ok(())
    }

    /// Credit an ingredient straight to a station's stock.
    pub fn replenish_station(&mut self, station_name: &str, record: Ingredient) -> KitchenResult<()> {
        let station = self.registry.get_required(station_name)?;
        station.write().credit_stock(record)?;
        Ok(())
    }

    /// Move `quantity` units of an ingredient from the backup pool to a station.
    ///
    /// Either the whole amount moves or nothing changes.
    pub fn replenish_station_from_backup(
        &mut self,
        station_name: &str,
        ingredient: &str,
        quantity: u32,
    ) -> KitchenResult<()> {
        if quantity == 0 {
            return Err(KitchenError::InvalidQuantity {
                ingredient: ingredient.to_string(),
                quantity,
            });
        }
        let handle = self.registry.get_required(station_name)?;
        let mut station = handle.write();
        ensure_room(&station.stock(), ingredient, quantity)?;
        let record = self.backup.withdraw(ingredient, quantity)?;
        station.credit_stock(record)?;
        debug!("Moved {} x{} from backup to {}", ingredient, quantity, station_name);
        Ok(())
    }

    /// Whether any registered station could prepare the dish right now.
    pub fn can_complete_order(&self, dish_name: &str) -> bool {
        self.registry
            .iter()
            .any(|station| station.read().can_produce(dish_name))
    }

    /// Prepare a dish at one specific station, without touching the backup pool.
    pub fn prepare_dish_at_station(&mut self, station_name: &str, dish_name: &str) -> KitchenResult<()> {
        let handle = self.registry.get_required(station_name)?;
        let mut station = handle.write();

        if !station.can_produce(dish_name) {
            return Err(if station.has_dish(dish_name) {
                KitchenError::InsufficientIngredients {
                    station: station_name.to_string(),
                    dish: dish_name.to_string(),
                }
            } else {
                KitchenError::DishNotAssigned {
                    station: station_name.to_string(),
                    dish: dish_name.to_string(),
                }
            });
        }

        station.produce(dish_name)?;
        info!("{} prepared {}", station_name, dish_name);
        Ok(())
    }
}
