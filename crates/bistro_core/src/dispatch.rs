//! Dispatch engine.
//!
//! [`Kitchen::process_all`] drains the dish queue and, dish by dish in
//! arrival order, walks the stations in registry order. A station that has
//! the dish assigned but lacks stock is topped up from the backup pool and
//! given one more try. Dishes no station could prepare go back on the queue
//! in their original relative order.
//!
//! Every decision is recorded as a [`TraceEvent`]; the rendered trace is the
//! line-oriented progress report consumers of the kitchen read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backup::BackupPool;
use crate::dish::Dish;
use crate::error::{KitchenError, KitchenResult};
use crate::ingredient::{ensure_room, quantity_of};
use crate::kitchen::Kitchen;
use crate::station::{Station, StationHandle};

/// One decision point of a dispatch pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    Preparing { dish: String },
    Attempting { station: String, dish: String },
    NotAvailable { station: String, dish: String },
    Prepared { station: String, dish: String },
    Replenishing { station: String, dish: String },
    Replenished { station: String, dish: String },
    ReplenishFailed { station: String, dish: String, reason: String },
    /// Production failed after a successful replenishment
    PreparationFailed { station: String, dish: String },
    /// The station reported it could prepare the dish, then failed to
    ProductionMismatch { station: String, dish: String, reason: String },
    NotPrepared { dish: String },
    Completed,
}

impl std::fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preparing { dish } => write!(f, "PREPARING DISH: {}", dish),
            Self::Attempting { station, dish } => {
                write!(f, "{} attempting to prepare {}...", station, dish)
            }
            Self::NotAvailable { station, .. } => {
                write!(f, "{}: Dish not available. Moving to next station...", station)
            }
            Self::Prepared { station, dish } => {
                write!(f, "{}: Successfully prepared {}.", station, dish)
            }
            Self::Replenishing { station, .. } => write!(
                f,
                "{}: Insufficient ingredients. Replenishing ingredients...",
                station
            ),
            Self::Replenished { station, .. } => write!(f, "{}: Ingredients replenished.", station),
            Self::ReplenishFailed { station, dish, .. } => write!(
                f,
                "{}: Unable to replenish ingredients. Failed to prepare {}.",
                station, dish
            ),
            Self::PreparationFailed { station, dish } => {
                write!(f, "{}: Unable to prepare {}.", station, dish)
            }
            Self::ProductionMismatch { station, dish, .. } => write!(
                f,
                "{}: Preparation of {} failed despite sufficient ingredients. Moving to next station...",
                station, dish
            ),
            Self::NotPrepared { dish } => write!(f, "{} was not prepared.", dish),
            Self::Completed => write!(f, "All dishes have been processed."),
        }
    }
}

/// What happened to one dish during a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishOutcome {
    pub ticket: Uuid,
    pub dish: String,
    /// Station that prepared the dish, `None` if it went back on the queue
    pub prepared_by: Option<String>,
}

impl DishOutcome {
    pub fn is_prepared(&self) -> bool {
        self.prepared_by.is_some()
    }
}

/// Record of a full dispatch pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchReport {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub events: Vec<TraceEvent>,
    /// One entry per dish, in the order the dishes were processed
    pub outcomes: Vec<DishOutcome>,
}

impl DispatchReport {
    fn begin() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            started_at: now,
            completed_at: now,
            events: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    fn record(&mut self, event: TraceEvent) {
        match &event {
            TraceEvent::ProductionMismatch { reason, .. } => warn!("{} ({})", event, reason),
            TraceEvent::ReplenishFailed { reason, .. } => debug!("{} ({})", event, reason),
            _ => debug!("{}", event),
        }
        self.events.push(event);
    }

    pub fn prepared(&self) -> impl Iterator<Item = &DishOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.is_prepared())
    }

    pub fn unprepared(&self) -> impl Iterator<Item = &DishOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_prepared())
    }

    /// Whether every dish in the pass was prepared.
    pub fn all_prepared(&self) -> bool {
        self.outcomes.iter().all(DishOutcome::is_prepared)
    }

    pub fn outcome_for(&self, ticket: Uuid) -> Option<&DishOutcome> {
        self.outcomes.iter().find(|outcome| outcome.ticket == ticket)
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> KitchenResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| KitchenError::Serialization(e.to_string()))
    }

    /// The progress report, one line per event.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for event in &self.events {
            if matches!(event, TraceEvent::Completed) {
                out.push_str("\n\n");
            }
            out.push_str(&event.to_string());
            out.push('\n');
        }
        out
    }
}

/// Cover every shortfall of `dish` at `station` from the backup pool.
///
/// Requirements are handled in the dish's own order and the first failed
/// withdrawal stops the top-up. Withdrawals made before the failure stay
/// credited to the station.
fn replenish_from_backup(
    backup: &mut BackupPool,
    station: &mut dyn Station,
    dish: &Dish,
) -> KitchenResult<()> {
    for requirement in dish.required_ingredients() {
        let stock = station.stock();
        let on_hand = quantity_of(&stock, &requirement.name);
        let shortfall = requirement.required_quantity.saturating_sub(on_hand);
        if shortfall == 0 {
            continue;
        }
        ensure_room(&stock, &requirement.name, shortfall)?;
        let record = backup.withdraw(&requirement.name, shortfall)?;
        station.credit_stock(record)?;
    }
    Ok(())
}

/// Try to prepare `dish` at one station. Returns whether it was prepared.
fn attempt_at_station(
    backup: &mut BackupPool,
    station: &mut dyn Station,
    dish: &Dish,
    report: &mut DispatchReport,
) -> bool {
    let name = station.name().to_string();
    report.record(TraceEvent::Attempting {
        station: name.clone(),
        dish: dish.name.clone(),
    });

    if !station.has_dish(&dish.name) {
        report.record(TraceEvent::NotAvailable {
            station: name,
            dish: dish.name.clone(),
        });
        return false;
    }

    if station.can_produce(&dish.name) {
        return match station.produce(&dish.name) {
            Ok(()) => {
                report.record(TraceEvent::Prepared {
                    station: name,
                    dish: dish.name.clone(),
                });
                true
            }
            Err(err) => {
                report.record(TraceEvent::ProductionMismatch {
                    station: name,
                    dish: dish.name.clone(),
                    reason: err.to_string(),
                });
                false
            }
        };
    }

    report.record(TraceEvent::Replenishing {
        station: name.clone(),
        dish: dish.name.clone(),
    });

    if let Err(err) = replenish_from_backup(backup, station, dish) {
        report.record(TraceEvent::ReplenishFailed {
            station: name,
            dish: dish.name.clone(),
            reason: err.to_string(),
        });
        return false;
    }

    report.record(TraceEvent::Replenished {
        station: name.clone(),
        dish: dish.name.clone(),
    });

    match station.produce(&dish.name) {
        Ok(()) => {
            report.record(TraceEvent::Prepared {
                station: name,
                dish: dish.name.clone(),
            });
            true
        }
        Err(err) => {
            debug!("{} still cannot prepare {}: {}", name, dish.name, err);
            report.record(TraceEvent::PreparationFailed {
                station: name,
                dish: dish.name.clone(),
            });
            false
        }
    }
}

impl Kitchen {
    /// Run one dispatch pass over every queued dish.
    ///
    /// Stations are tried in the registry order at the time of the call.
    /// When the pass ends the queue holds exactly the dishes no station
    /// could prepare, in their original relative order.
    pub fn process_all(&mut self) -> DispatchReport {
        let mut report = DispatchReport::begin();
        let stations: Vec<StationHandle> = self.registry.handles().to_vec();
        let pending = self.queue.drain_all();
        info!(
            "Dispatching {} dishes across {} stations",
            pending.len(),
            stations.len()
        );

        for dish in pending {
            report.record(TraceEvent::Preparing {
                dish: dish.name.clone(),
            });

            let mut prepared_by = None;
            for handle in &stations {
                let mut station = handle.write();
                if attempt_at_station(&mut self.backup, &mut *station, &dish, &mut report) {
                    prepared_by = Some(station.name().to_string());
                    break;
                }
            }

            let outcome = DishOutcome {
                ticket: dish.ticket,
                dish: dish.name.clone(),
                prepared_by,
            };
            if !outcome.is_prepared() {
                report.record(TraceEvent::NotPrepared {
                    dish: dish.name.clone(),
                });
                self.queue.requeue(dish);
            }
            report.outcomes.push(outcome);
        }

        info!(
            "Dispatch complete: {} prepared, {} back on the queue",
            report.prepared().count(),
            self.queue.len()
        );
        report.record(TraceEvent::Completed);
        report.completed_at = Utc::now();
        report
    }

    /// Prepare the dish at the front of the queue without using the backup pool.
    ///
    /// Returns the name of the station that prepared it. If no station can,
    /// the dish stays at the front of the queue.
    pub fn prepare_next_dish(&mut self) -> KitchenResult<String> {
        let dish_name = self
            .queue
            .front()
            .map(|dish| dish.name.clone())
            .ok_or(KitchenError::QueueEmpty)?;

        for handle in self.registry.iter() {
            let mut station = handle.write();
            if station.can_produce(&dish_name) && station.produce(&dish_name).is_ok() {
                let station_name = station.name().to_string();
                self.queue.dequeue();
                info!("{} prepared {}", station_name, dish_name);
                return Ok(station_name);
            }
        }

        Err(KitchenError::NoStationAvailable(dish_name))
    }
}
