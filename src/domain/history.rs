use std::{fmt, num::NonZeroU32};

use rust_decimal::Decimal;

use crate::domain::{car::CURRENCY_SYMBOL, CustomerName};

/// What happened in a history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// A car was rented out.
    Rental {
        /// Length of the rental.
        days: NonZeroU32,
        /// The amount charged, fixed at the time of rental.
        total: Decimal,
    },
    /// A car was brought back.
    Return,
}

/// A single, immutable record of a rental or a return.
///
/// The car is captured as the description it had when the event happened, so
/// later changes to the car never alter past entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    customer: CustomerName,
    car: String,
    kind: EventKind,
}

impl HistoryEntry {
    pub(crate) const fn rental(
        customer: CustomerName,
        car: String,
        days: NonZeroU32,
        total: Decimal,
    ) -> Self {
        Self {
            customer,
            car,
            kind: EventKind::Rental { days, total },
        }
    }

    pub(crate) const fn returned(customer: CustomerName, car: String) -> Self {
        Self {
            customer,
            car,
            kind: EventKind::Return,
        }
    }

    /// The customer involved, as normalized when the event was recorded.
    #[must_use]
    pub const fn customer(&self) -> &CustomerName {
        &self.customer
    }

    /// The car's description at the time of the event.
    #[must_use]
    pub fn car(&self) -> &str {
        &self.car
    }

    /// Whether this was a rental or a return.
    #[must_use]
    pub const fn kind(&self) -> &EventKind {
        &self.kind
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            EventKind::Rental { days, total } => write!(
                f,
                "{} rented {} for {days} {}. Total: {CURRENCY_SYMBOL}{total}",
                self.customer,
                self.car,
                day_label(*days)
            ),
            EventKind::Return => write!(f, "{} returned {}", self.customer, self.car),
        }
    }
}

/// "day" for a single day, "days" otherwise.
#[must_use]
pub const fn day_label(days: NonZeroU32) -> &'static str {
    if days.get() == 1 { "day" } else { "days" }
}

/// The append-only log of rentals and returns, in the order they happened.
#[derive(Debug, Default, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub(crate) fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Iterates over the entries, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    /// The number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
