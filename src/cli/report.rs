//! User-facing messages for rental outcomes and views
//!
//! Every front end renders through these functions so the wording stays the
//! same whichever way the service is driven.

use car_rental::{
    ConflictError, RentalError, RentalReceipt, RentalService, ReturnReceipt, ValidationError,
    domain::{car::CURRENCY_SYMBOL, history::day_label},
};

/// Confirmation shown after a successful rental.
pub fn rented(receipt: &RentalReceipt) -> String {
    format!(
        "{} rented {} for {} {}.\nTotal: {CURRENCY_SYMBOL}{}",
        receipt.customer,
        receipt.car,
        receipt.days,
        day_label(receipt.days),
        receipt.total
    )
}

/// Confirmation shown after a successful return.
pub fn returned(receipt: &ReturnReceipt) -> String {
    format!(
        "Car {} has been returned by {}.",
        receipt.car, receipt.customer
    )
}

/// Explains why a rental was refused.
pub fn rent_refused(error: &RentalError) -> String {
    match error {
        RentalError::Validation(ValidationError::EmptyName) => "Please enter your name.".into(),
        RentalError::Validation(ValidationError::NoCarSelected) => {
            "No car selected to rent.".into()
        }
        RentalError::Validation(ValidationError::InvalidDays) => {
            "Enter a valid number of days.".into()
        }
        RentalError::Conflict(_) => "Car not available.".into(),
    }
}

/// Explains why a return was refused.
pub fn return_refused(error: &RentalError) -> String {
    match error {
        RentalError::Validation(ValidationError::EmptyName) => {
            "Please enter your name to return the car.".into()
        }
        RentalError::Validation(ValidationError::NoCarSelected) => {
            "No car selected to return.".into()
        }
        RentalError::Conflict(ConflictError::WrongRenter { supplied, actual }) => {
            format!("This car was not rented by {supplied}. It was rented by {actual}.")
        }
        RentalError::Validation(ValidationError::InvalidDays)
        | RentalError::Conflict(ConflictError::NotRented | ConflictError::CarNotAvailable) => {
            "Please select a rented car to return.".into()
        }
    }
}

/// The "Current Car Status" pane: one line per car, in catalog order.
pub fn status_view(service: &RentalService) -> String {
    let lines: String = service
        .current_status()
        .map(|line| format!("{line}\n"))
        .collect();
    format!("Current Car Status:\n\n{lines}")
}

/// The "Rental History" pane: one line per event, oldest first.
pub fn history_view(service: &RentalService) -> String {
    let entries: String = service
        .history()
        .iter()
        .map(|entry| format!("{entry}\n"))
        .collect();
    format!("Rental History:\n\n{entries}")
}
