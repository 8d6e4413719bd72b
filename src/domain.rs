//! Domain models for car rental tracking.
//!
//! This module contains the core domain types: cars and their occupancy,
//! customer names, the rental history, and the catalog configuration.

/// Rentable cars and their occupancy state.
pub mod car;
pub use car::{Car, CarId, Status};

mod config;
pub use config::{CatalogEntry, CatalogError, Config, ConfigError, MAX_RENTAL_DAYS};

/// Customer names as recorded against rentals.
pub mod customer;
pub use customer::CustomerName;

/// The append-only rental history.
pub mod history;
pub use history::{EventKind, History, HistoryEntry};
