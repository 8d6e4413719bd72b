//! In-memory car rental tracking
//!
//! A fixed catalog of cars is rented out to customers and returned, with every
//! rental and return recorded in an append-only history log.

pub mod domain;
pub use domain::{CarId, Config, CustomerName, HistoryEntry};

/// The rental service that owns the catalog and the history log.
pub mod service;
pub use service::{
    ConflictError, RentalError, RentalReceipt, RentalService, ReturnReceipt, ValidationError,
};
