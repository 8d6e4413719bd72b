use std::{fmt, num::NonZeroU32, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{CatalogEntry, CustomerName};

/// The currency symbol prefixed to every rendered price.
pub const CURRENCY_SYMBOL: &str = "₹";

/// A validated car identifier, such as `C101`.
///
/// Identifiers are non-empty and contain no whitespace, so they can be typed
/// as a single word at the shell.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CarId(NonEmptyString);

impl CarId {
    /// Creates a new `CarId` from a string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCarIdError` if the string is empty or contains
    /// whitespace.
    pub fn new(s: String) -> Result<Self, InvalidCarIdError> {
        if s.chars().any(char::is_whitespace) {
            return Err(InvalidCarIdError(s));
        }
        NonEmptyString::new(s.clone())
            .map(Self)
            .map_err(|_| InvalidCarIdError(s))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for CarId {
    type Error = InvalidCarIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CarId {
    type Error = InvalidCarIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl From<CarId> for String {
    fn from(id: CarId) -> Self {
        id.0.as_str().to_string()
    }
}

impl FromStr for CarId {
    type Err = InvalidCarIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl Deref for CarId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl PartialEq<str> for CarId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for CarId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a car identifier is empty or contains whitespace.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid car id '{0}': must be non-empty and contain no whitespace")]
pub struct InvalidCarIdError(String);

/// Occupancy of a car.
///
/// The renter only exists while the car is rented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The car can be rented.
    Available,
    /// The car is out with a customer.
    Rented {
        /// The customer currently holding the car.
        renter: CustomerName,
    },
}

/// A rentable car.
///
/// Cars are created once from the catalog and only ever change occupancy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    id: CarId,
    brand: String,
    model: String,
    price_per_day: Decimal,
    status: Status,
}

impl Car {
    /// Creates an available car.
    #[must_use]
    pub const fn new(id: CarId, brand: String, model: String, price_per_day: Decimal) -> Self {
        Self {
            id,
            brand,
            model,
            price_per_day,
            status: Status::Available,
        }
    }

    /// The stable identifier of this car.
    #[must_use]
    pub const fn id(&self) -> &CarId {
        &self.id
    }

    /// The manufacturer, e.g. "Tata".
    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// The model name, e.g. "Nexon".
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The flat daily rate.
    #[must_use]
    pub const fn price_per_day(&self) -> Decimal {
        self.price_per_day
    }

    /// The current occupancy.
    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// Returns `true` if the car can be rented.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self.status, Status::Available)
    }

    /// The customer currently holding the car, if it is rented.
    #[must_use]
    pub const fn renter(&self) -> Option<&CustomerName> {
        match &self.status {
            Status::Available => None,
            Status::Rented { renter } => Some(renter),
        }
    }

    /// The cost of renting this car for the given number of days.
    #[must_use]
    pub fn price(&self, days: NonZeroU32) -> Decimal {
        self.price_per_day * Decimal::from(days.get())
    }

    /// Hands the car over to a customer.
    ///
    /// The caller is responsible for checking the car is available.
    pub(crate) fn mark_rented(&mut self, renter: CustomerName) {
        debug_assert!(self.is_available(), "car {} is already rented", self.id);
        self.status = Status::Rented { renter };
    }

    /// Takes the car back, clearing the renter.
    ///
    /// The caller is responsible for checking the car is rented.
    pub(crate) fn mark_returned(&mut self) {
        debug_assert!(!self.is_available(), "car {} is not rented", self.id);
        self.status = Status::Available;
    }

    /// A human-readable description of the car and its rate.
    ///
    /// The price is rendered at the precision it was configured with.
    ///
    /// # Examples
    ///
    /// ```
    /// use car_rental::domain::{Car, CarId};
    /// use rust_decimal::Decimal;
    ///
    /// let id = CarId::new("C101".to_string()).unwrap();
    /// let car = Car::new(
    ///     id,
    ///     "Maruti Suzuki".to_string(),
    ///     "Alto K10".to_string(),
    ///     Decimal::from(2600),
    /// );
    ///
    /// assert_eq!(car.describe(), "C101 - Maruti Suzuki Alto K10 (₹2600/day)");
    /// ```
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "{} - {} {} ({CURRENCY_SYMBOL}{}/day)",
            self.id, self.brand, self.model, self.price_per_day
        )
    }

    /// Returns a displayable status line: the description followed by the
    /// occupancy.
    #[must_use]
    pub const fn display(&self) -> StatusLine<'_> {
        StatusLine { car: self }
    }
}

impl From<CatalogEntry> for Car {
    fn from(entry: CatalogEntry) -> Self {
        Self::new(entry.id, entry.brand, entry.model, entry.price_per_day)
    }
}

/// A car's description together with its occupancy.
///
/// This type is returned by [`Car::display`].
#[derive(Debug, Clone, Copy)]
pub struct StatusLine<'a> {
    car: &'a Car,
}

impl fmt::Display for StatusLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.car.status {
            Status::Available => write!(f, "{} [Available]", self.car.describe()),
            Status::Rented { renter } => {
                write!(f, "{} [Rented by {renter}]", self.car.describe())
            }
        }
    }
}
