//! Error types for the kitchen core.

use thiserror::Error;

/// Result type alias for kitchen operations.
pub type KitchenResult<T> = Result<T, KitchenError>;

/// Errors that can occur while managing stations, stock and the dish queue.
///
/// None of these are fatal: every operation that returns one leaves the
/// kitchen in the state it was in before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KitchenError {
    #[error("Station not found: {0}")]
    StationNotFound(String),

    #[error("Station already registered: {0}")]
    DuplicateStation(String),

    #[error("Cannot merge station into itself: {0}")]
    InvalidMerge(String),

    #[error("Ingredient not found: {0}")]
    IngredientNotFound(String),

    #[error("Invalid quantity for {ingredient}: {quantity}")]
    InvalidQuantity { ingredient: String, quantity: u32 },

    #[error("Insufficient backup of {ingredient}: requested {requested}, available {available}")]
    InsufficientBackup {
        ingredient: String,
        requested: u32,
        available: u32,
    },

    #[error("Adding {added} x {ingredient} would overflow stock of {held}")]
    StockOverflow {
        ingredient: String,
        held: u32,
        added: u32,
    },

    #[error("Dish {dish} is not assigned to station {station}")]
    DishNotAssigned { station: String, dish: String },

    #[error("Station {station} lacks ingredients for {dish}")]
    InsufficientIngredients { station: String, dish: String },

    #[error("Dish queue is empty")]
    QueueEmpty,

    #[error("No station could prepare {0}")]
    NoStationAvailable(String),

    #[error("Unknown dish: {0}")]
    UnknownDish(String),

    #[error("Invalid kitchen configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("YAML error: {0}")]
    Yaml(String),
}

impl From<serde_yaml::Error> for KitchenError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}
