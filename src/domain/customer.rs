use std::fmt;

use non_empty_string::NonEmptyString;

/// A customer name, normalized for display and record keeping.
///
/// Normalization trims surrounding whitespace, uppercases the first character
/// and lowercases everything after it. Words are not split, so `"MARY ANN"`
/// becomes `"Mary ann"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CustomerName(NonEmptyString);

impl CustomerName {
    /// Parses and normalizes raw input.
    ///
    /// # Errors
    ///
    /// Returns `EmptyNameError` if the input is empty after trimming.
    ///
    /// # Examples
    ///
    /// ```
    /// use car_rental::CustomerName;
    ///
    /// assert_eq!(CustomerName::parse(" jOHN ").unwrap().as_str(), "John");
    /// assert_eq!(CustomerName::parse("MARY ANN").unwrap().as_str(), "Mary ann");
    /// assert!(CustomerName::parse("   ").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, EmptyNameError> {
        NonEmptyString::new(capitalize(raw.trim()))
            .map(Self)
            .map_err(|_| EmptyNameError)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Case-insensitive comparison against raw input.
    ///
    /// Surrounding whitespace in `raw` is ignored.
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        self.as_str().to_lowercase() == raw.trim().to_lowercase()
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut capitalized: String = first.to_uppercase().collect();
    capitalized.push_str(&chars.as_str().to_lowercase());
    capitalized
}

impl fmt::Display for CustomerName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a customer name is blank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("customer name must not be empty")]
pub struct EmptyNameError;
