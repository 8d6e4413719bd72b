//! The rental service
//!
//! The [`RentalService`] owns the catalog and the history log. It is the only
//! way to change either: every rent and return goes through it, is validated
//! against the occupancy state machine, and is recorded in the log.
//!
//! Operations are all-or-nothing. A rejected call leaves both the cars and the
//! history exactly as they were.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::domain::{
    Car, CarId, Config, CustomerName, History, HistoryEntry, MAX_RENTAL_DAYS, car::StatusLine,
};

/// Malformed or missing input.
///
/// The caller should re-prompt; nothing was changed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The customer name was blank.
    #[error("empty name")]
    EmptyName,
    /// No car was selected, or the id does not match any car in the catalog.
    #[error("no car selected")]
    NoCarSelected,
    /// The day count was not a positive whole number.
    #[error("invalid days")]
    InvalidDays,
}

/// Well-formed input that the occupancy state machine does not allow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConflictError {
    /// The car is already out with another customer.
    #[error("car not available")]
    CarNotAvailable,
    /// The car is not currently rented, so it cannot be returned.
    #[error("not rented")]
    NotRented,
    /// Someone other than the renter tried to return the car.
    #[error("wrong renter")]
    WrongRenter {
        /// The name that was supplied, trimmed but otherwise as entered.
        supplied: String,
        /// The customer who actually holds the car.
        actual: CustomerName,
    },
}

/// Errors that can occur when renting or returning a car.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RentalError {
    /// The input was malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The input conflicts with the car's current state.
    #[error(transparent)]
    Conflict(#[from] ConflictError),
}

/// The outcome of a successful rental.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalReceipt {
    /// The customer, normalized.
    pub customer: CustomerName,
    /// The car's description at the time of rental.
    pub car: String,
    /// Length of the rental.
    pub days: NonZeroU32,
    /// The amount charged.
    pub total: Decimal,
}

/// The outcome of a successful return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnReceipt {
    /// The customer, normalized.
    pub customer: CustomerName,
    /// The car's description as it was while rented.
    pub car: String,
}

/// Tracks which cars are out, with whom, and everything that has happened.
#[derive(Debug, Clone)]
pub struct RentalService {
    /// Cars in catalog order.
    cars: Vec<Car>,
    history: History,
}

impl RentalService {
    /// Creates a service over the given catalog, with every car available and
    /// an empty history.
    ///
    /// # Panics
    ///
    /// Panics if two cars share an id, or if a car's daily rate is too large
    /// to charge for [`MAX_RENTAL_DAYS`] days. Catalogs built through
    /// [`Config`] have already been checked for both.
    #[must_use]
    pub fn new(catalog: impl IntoIterator<Item = Car>) -> Self {
        let cars: Vec<Car> = catalog.into_iter().collect();
        for (i, car) in cars.iter().enumerate() {
            assert!(
                !cars[..i].iter().any(|other| other.id() == car.id()),
                "Duplicate car id: {}",
                car.id()
            );
            assert!(
                car.price_per_day()
                    .checked_mul(Decimal::from(MAX_RENTAL_DAYS))
                    .is_some(),
                "Daily rate of car {} is too large",
                car.id()
            );
        }

        Self {
            cars,
            history: History::default(),
        }
    }

    /// Creates a service over the catalog in the given configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cars().iter().cloned().map(Car::from))
    }

    /// Rents a car to a customer.
    ///
    /// All inputs are raw, as collected from the user. They are checked in
    /// order: the name, then the car selection, then the day count, then the
    /// car's availability.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyName`] if the name is blank
    /// - [`ValidationError::NoCarSelected`] if `car_id` is empty or unknown
    /// - [`ValidationError::InvalidDays`] if `days` is not a positive integer
    /// - [`ConflictError::CarNotAvailable`] if the car is already rented
    #[instrument(level = "debug", skip(self))]
    pub fn rent(
        &mut self,
        customer: &str,
        days: &str,
        car_id: &str,
    ) -> Result<RentalReceipt, RentalError> {
        let customer = CustomerName::parse(customer).map_err(|_| ValidationError::EmptyName)?;
        let index = self.position(car_id)?;
        let days = parse_days(days)?;

        let car = &mut self.cars[index];
        if !car.is_available() {
            debug!(car = %car.id(), "car is already rented");
            return Err(ConflictError::CarNotAvailable.into());
        }

        let total = car.price(days);
        let description = car.describe();
        car.mark_rented(customer.clone());

        self.history.push(HistoryEntry::rental(
            customer.clone(),
            description.clone(),
            days,
            total,
        ));

        info!(car = %car_id.trim(), %customer, days = days.get(), %total, "car rented");

        Ok(RentalReceipt {
            customer,
            car: description,
            days,
            total,
        })
    }

    /// Takes a car back from the customer who rented it.
    ///
    /// The name is compared with the renter case-insensitively.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyName`] if the name is blank
    /// - [`ValidationError::NoCarSelected`] if `car_id` is empty or unknown
    /// - [`ConflictError::NotRented`] if the car is not currently rented
    /// - [`ConflictError::WrongRenter`] if the car is rented to someone else
    #[instrument(level = "debug", skip(self))]
    pub fn return_car(
        &mut self,
        customer: &str,
        car_id: &str,
    ) -> Result<ReturnReceipt, RentalError> {
        let supplied = customer.trim();
        if supplied.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let index = self.position(car_id)?;

        let car = &mut self.cars[index];
        let Some(renter) = car.renter() else {
            debug!(car = %car.id(), "car is not rented");
            return Err(ConflictError::NotRented.into());
        };

        if !renter.matches(supplied) {
            debug!(car = %car.id(), %renter, supplied, "return attempted by someone else");
            return Err(ConflictError::WrongRenter {
                supplied: supplied.to_string(),
                actual: renter.clone(),
            }
            .into());
        }

        let customer = CustomerName::parse(supplied).map_err(|_| ValidationError::EmptyName)?;
        let description = car.describe();
        car.mark_returned();

        self.history
            .push(HistoryEntry::returned(customer.clone(), description.clone()));

        info!(car = %car_id.trim(), %customer, "car returned");

        Ok(ReturnReceipt {
            customer,
            car: description,
        })
    }

    /// Ids of the cars that can be rented, in catalog order.
    pub fn list_available(&self) -> impl Iterator<Item = &CarId> + '_ {
        self.cars
            .iter()
            .filter(|car| car.is_available())
            .map(Car::id)
    }

    /// Ids of the cars that are out, in catalog order.
    pub fn list_rented(&self) -> impl Iterator<Item = &CarId> + '_ {
        self.cars
            .iter()
            .filter(|car| !car.is_available())
            .map(Car::id)
    }

    /// A status line for every car, in catalog order.
    pub fn current_status(&self) -> impl Iterator<Item = StatusLine<'_>> + '_ {
        self.cars.iter().map(Car::display)
    }

    /// Every rental and return so far, oldest first.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// All cars, in catalog order.
    #[must_use]
    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// Looks up a car by id.
    #[must_use]
    pub fn car(&self, id: &str) -> Option<&Car> {
        self.cars.iter().find(|car| car.id() == id)
    }

    fn position(&self, car_id: &str) -> Result<usize, ValidationError> {
        let car_id = car_id.trim();
        self.cars
            .iter()
            .position(|car| car.id() == car_id)
            .ok_or(ValidationError::NoCarSelected)
    }
}

impl Default for RentalService {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Parses a day count: a whole number from 1 to [`MAX_RENTAL_DAYS`], the top
/// of the 32-bit signed range.
fn parse_days(raw: &str) -> Result<NonZeroU32, ValidationError> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .and_then(|days| u32::try_from(days).ok())
        .and_then(NonZeroU32::new)
        .ok_or(ValidationError::InvalidDays)
}
