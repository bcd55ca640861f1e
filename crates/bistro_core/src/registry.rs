//! Ordered station registry.
//!
//! Registry order is the dispatch order: index 0 is tried first for
//! every dish. Lookups are linear scans by name.
//!
//! Registry operations briefly lock each station they inspect, so callers
//! must not hold a write guard on a registered station while calling them.

use tracing::debug;

use crate::error::{KitchenError, KitchenResult};
use crate::ingredient::ensure_room;
use crate::station::StationHandle;

/// An ordered list of uniquely named stations.
#[derive(Default, Clone)]
pub struct StationRegistry {
    stations: Vec<StationHandle>,
}

impl StationRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            stations: Vec::new(),
        }
    }

    /// Append a station at the back of the dispatch order.
    ///
    /// Fails if a station with the same name is already registered.
    pub fn add(&mut self, station: StationHandle) -> KitchenResult<()> {
        let name = station.read().name().to_string();
        if self.index_of(&name).is_some() {
            return Err(KitchenError::DuplicateStation(name));
        }
        debug!("Registering station: {}", name);
        self.stations.push(station);
        Ok(())
    }

    /// Remove the station with this name and hand back the registry's handle.
    ///
    /// The station itself lives on as long as the caller holds a handle.
    pub fn remove(&mut self, name: &str) -> KitchenResult<StationHandle> {
        let index = self
            .index_of(name)
            .ok_or_else(|| KitchenError::StationNotFound(name.to_string()))?;
        debug!("Unregistering station: {}", name);
        Ok(self.stations.remove(index))
    }

    /// Get a station by name.
    pub fn find(&self, name: &str) -> Option<StationHandle> {
        self.stations
            .iter()
            .find(|station| station.read().name() == name)
            .cloned()
    }

    /// Get a station by name, returning an error if not found.
    pub fn get_required(&self, name: &str) -> KitchenResult<StationHandle> {
        self.find(name)
            .ok_or_else(|| KitchenError::StationNotFound(name.to_string()))
    }

    /// Zero-based dispatch position of the named station.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.stations
            .iter()
            .position(|station| station.read().name() == name)
    }

    /// Get the station at a dispatch position.
    pub fn get(&self, index: usize) -> Option<StationHandle> {
        self.stations.get(index).cloned()
    }

    /// Make the named station the first one tried.
    ///
    /// A station already at the front is left where it is.
    pub fn move_to_front(&mut self, name: &str) -> KitchenResult<()> {
        let index = self
            .index_of(name)
            .ok_or_else(|| KitchenError::StationNotFound(name.to_string()))?;
        if index == 0 {
            return Ok(());
        }

        debug!("Moving station {} from position {} to front", name, index);
        let station = self.stations.remove(index);
        self.stations.insert(0, station);
        Ok(())
    }

    /// Fold `source` into `target` and unregister `source`.
    ///
    /// Every dish assigned to `source` is assigned to `target` (duplicates
    /// kept) and every stock record of `source` is credited to `target`.
    /// `target` keeps its position; the caller's handles to `source` stay
    /// valid but it is no longer tried.
    pub fn merge(&mut self, target: &str, source: &str) -> KitchenResult<()> {
        let target_station = self.get_required(target)?;
        let source_station = self.get_required(source)?;
        if target == source {
            return Err(KitchenError::InvalidMerge(target.to_string()));
        }

        let (dishes, stock) = {
            let source = source_station.read();
            (source.dishes(), source.stock())
        };

        {
            let mut target = target_station.write();
            let held = target.stock();
            for record in &stock {
                ensure_room(&held, &record.name, record.quantity)?;
            }
            for dish in dishes {
                target.assign(dish);
            }
            for record in stock {
                target.credit_stock(record)?;
            }
        }

        debug!("Merged station {} into {}", source, target);
        self.remove(source).map(|_| ())
    }

    /// All registered station names in dispatch order.
    pub fn names(&self) -> Vec<String> {
        self.stations
            .iter()
            .map(|station| station.read().name().to_string())
            .collect()
    }

    /// Registered handles in dispatch order.
    pub fn handles(&self) -> &[StationHandle] {
        &self.stations
    }

    pub fn iter(&self) -> impl Iterator<Item = &StationHandle> {
        self.stations.iter()
    }

    /// Get the number of registered stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Clear all registered stations.
    pub fn clear(&mut self) {
        debug!("Clearing station registry");
        self.stations.clear();
    }
}

impl std::fmt::Debug for StationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StationRegistry")
            .field("stations", &self.names())
            .finish()
    }
}
