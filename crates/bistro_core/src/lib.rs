//! # bistro_core
//!
//! Kitchen dispatch engine for the bistro.
//!
//! Stations prepare assigned dishes out of their own ingredient stock.
//! Orders wait in a single FIFO queue; a dispatch pass walks the stations
//! in registry order for each order and tops a short station up from a
//! shared backup pool before giving up on it.
//!
//! # Architecture
//!
//! - **Registry**: Ordered, uniquely named stations; order is dispatch order
//! - **Backup**: Shared reserve of ingredients with all-or-nothing withdrawal
//! - **Queue**: Pending dishes in arrival order
//! - **Dispatch**: The pass over the queue, recorded as a [`DispatchReport`]
//!
//! # Example
//!
//! ```rust
//! use bistro_core::{Dish, Ingredient, Kitchen, KitchenStation};
//!
//! let chicken = Dish::new("Grilled Chicken", vec![Ingredient::requirement("Chicken", 1, 2.0)]);
//!
//! let mut kitchen = Kitchen::new();
//! kitchen
//!     .add_station(KitchenStation::new("Grill").with_dish(chicken.clone()).into_handle())
//!     .unwrap();
//! kitchen.backup_mut().add(Ingredient::stock("Chicken", 10, 2.0)).unwrap();
//! kitchen.queue_mut().enqueue(chicken);
//!
//! let report = kitchen.process_all();
//! assert!(report.all_prepared());
//! assert_eq!(kitchen.backup().quantity_of("Chicken"), 9);
//! ```

pub mod backup;
pub mod config;
pub mod dish;
pub mod dispatch;
pub mod error;
pub mod ingredient;
pub mod kitchen;
pub mod queue;
pub mod registry;
pub mod station;

// Re-export main types for convenience
pub use backup::BackupPool;
pub use config::{KitchenConfig, OrderConfig, StationConfig, SAMPLE_KITCHEN_YAML};
pub use dish::{
    Appetizer, CookingMethod, Course, CuisineType, Dessert, DietaryAdjust, DietaryRequest, Dish,
    FlavorProfile, MainCourse, ServingStyle,
};
pub use dispatch::{DishOutcome, DispatchReport, TraceEvent};
pub use error::{KitchenError, KitchenResult};
pub use ingredient::Ingredient;
pub use kitchen::Kitchen;
pub use queue::DishQueue;
pub use registry::StationRegistry;
pub use station::{KitchenStation, Station, StationHandle};
