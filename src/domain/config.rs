use std::{collections::BTreeSet, io, path::Path, path::PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::CarId;

/// The longest rental that can be requested, in days.
///
/// Every daily rate must be small enough that this many days can be charged.
pub const MAX_RENTAL_DAYS: i32 = i32::MAX;

/// Configuration for the rental service.
///
/// This holds the seed catalog: the fixed set of cars loaded once at startup.
/// A configuration is always valid; an empty catalog, duplicate ids or
/// non-positive prices are rejected when it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Versions", into = "Versions")]
pub struct Config {
    /// The cars in catalog order.
    ///
    /// Catalog order is the order every listing is presented in.
    cars: Vec<CatalogEntry>,
}

/// One car in the seed catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stable unique identifier, e.g. `C101`.
    pub id: CarId,
    /// The manufacturer.
    pub brand: String,
    /// The model name.
    pub model: String,
    /// The flat daily rate.
    pub price_per_day: Decimal,
}

impl CatalogEntry {
    fn new(id: &str, brand: &str, model: &str, price_per_day: i64) -> Self {
        Self {
            id: CarId::try_from(id).expect("catalog ids are valid"),
            brand: brand.to_string(),
            model: model.to_string(),
            price_per_day: Decimal::from(price_per_day),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cars: vec![
                CatalogEntry::new("C101", "Maruti Suzuki", "Alto K10", 2600),
                CatalogEntry::new("C102", "Tata", "Punch", 2800),
                CatalogEntry::new("C103", "Tata", "Nexon", 3100),
                CatalogEntry::new("C104", "Mahindra", "XUV700", 8000),
                CatalogEntry::new("C105", "Mahindra", "Thar", 5000),
                CatalogEntry::new("C106", "Renault", "Kwid", 2300),
            ],
        }
    }
}

impl Config {
    /// Builds a configuration from a list of catalog entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is empty, contains duplicate ids, or
    /// contains a car whose daily rate is not strictly positive or is too large
    /// to charge for the longest allowed rental.
    pub fn new(cars: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        if cars.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = BTreeSet::new();
        for car in &cars {
            if !seen.insert(&car.id) {
                return Err(CatalogError::DuplicateId(car.id.clone()));
            }
            if car.price_per_day <= Decimal::ZERO {
                return Err(CatalogError::NonPositivePrice {
                    id: car.id.clone(),
                    price: car.price_per_day,
                });
            }
            if car
                .price_per_day
                .checked_mul(Decimal::from(MAX_RENTAL_DAYS))
                .is_none()
            {
                return Err(CatalogError::PriceTooLarge {
                    id: car.id.clone(),
                    price: car.price_per_day,
                });
            }
        }

        Ok(Self { cars })
    }

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, if the TOML content is
    /// invalid, or if the catalog it describes is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The cars in catalog order.
    #[must_use]
    pub fn cars(&self) -> &[CatalogEntry] {
        &self.cars
    }
}

/// Errors that can occur when loading or saving a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// The file could not be written.
    #[error("failed to write config file {}: {source}", path.display())]
    Write {
        /// The file that was being written.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// The file is not a valid configuration document.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Errors in the contents of a catalog.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog lists no cars.
    #[error("the catalog must contain at least one car")]
    Empty,
    /// Two cars share an id.
    #[error("car id {0} appears more than once")]
    DuplicateId(CarId),
    /// A car's daily rate is zero or negative.
    #[error("car {id} has a non-positive daily rate ({price})")]
    NonPositivePrice {
        /// The offending car.
        id: CarId,
        /// The configured rate.
        price: Decimal,
    },
    /// A car's daily rate would overflow when charged for the longest rental.
    #[error("car {id} has a daily rate too large to charge ({price})")]
    PriceTooLarge {
        /// The offending car.
        id: CarId,
        /// The configured rate.
        price: Decimal,
    },
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        /// The seed catalog, one `[[cars]]` table per car.
        cars: Vec<CatalogEntry>,
    },
}

impl TryFrom<Versions> for Config {
    type Error = CatalogError;

    fn try_from(versions: Versions) -> Result<Self, Self::Error> {
        match versions {
            Versions::V1 { cars } => Self::new(cars),
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 { cars: config.cars }
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Write, str::FromStr};

    use super::*;

    const TWO_CARS: &[u8] = b"_version = \"1\"\n\n\
        [[cars]]\nid = \"X1\"\nbrand = \"Tata\"\nmodel = \"Punch\"\nprice_per_day = 2800\n\n\
        [[cars]]\nid = \"X2\"\nbrand = \"Renault\"\nmodel = \"Kwid\"\nprice_per_day = \"2300.50\"\n";

    #[test]
    fn default_catalog_has_six_cars_in_order() {
        let config = Config::default();
        let ids: Vec<_> = config.cars().iter().map(|car| car.id.as_str()).collect();
        assert_eq!(ids, ["C101", "C102", "C103", "C104", "C105", "C106"]);
        assert_eq!(config.cars()[0].price_per_day, Decimal::from(2600));
    }

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TWO_CARS).unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.cars().len(), 2);
        assert_eq!(config.cars()[0].id, "X1");
        assert_eq!(config.cars()[0].brand, "Tata");
        assert_eq!(config.cars()[0].price_per_day, Decimal::from(2800));
        assert_eq!(
            config.cars()[1].price_per_day,
            Decimal::from_str("2300.50").unwrap()
        );
    }

    #[test]
    fn save_then_load_preserves_catalog() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("catalog.toml");

        let config = Config::default();
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(matches!(error, ConfigError::Read { .. }));
        assert!(error.to_string().starts_with("failed to read config file"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ncars = \"three\"\n").unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut cars = Config::default().cars().to_vec();
        cars.push(cars[0].clone());

        assert_eq!(
            Config::new(cars),
            Err(CatalogError::DuplicateId(CarId::try_from("C101").unwrap()))
        );
    }

    #[test]
    fn non_positive_prices_are_rejected() {
        let mut cars = Config::default().cars().to_vec();
        cars[2].price_per_day = Decimal::ZERO;

        assert!(matches!(
            Config::new(cars),
            Err(CatalogError::NonPositivePrice { .. })
        ));
    }

    #[test]
    fn rates_that_overflow_a_long_rental_are_rejected() {
        let mut cars = Config::default().cars().to_vec();
        cars[0].price_per_day = Decimal::MAX;

        assert_eq!(
            Config::new(cars),
            Err(CatalogError::PriceTooLarge {
                id: CarId::try_from("C101").unwrap(),
                price: Decimal::MAX,
            })
        );
    }

    #[test]
    fn huge_rate_in_file_fails_to_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\n[[cars]]\nid = \"X1\"\nbrand = \"Tata\"\nmodel = \"Punch\"\n\
              price_per_day = \"79228162514264337593543950335\"\n",
        )
        .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
        assert!(error.to_string().contains("too large"));
    }

    #[test]
    fn largest_allowed_rate_can_be_charged_for_the_longest_rental() {
        let mut cars = Config::default().cars().to_vec();
        cars[0].price_per_day = Decimal::from(1_000_000_000);

        let config = Config::new(cars).unwrap();
        let car = crate::domain::Car::from(config.cars()[0].clone());
        let longest = std::num::NonZeroU32::new(MAX_RENTAL_DAYS.unsigned_abs()).unwrap();

        assert_eq!(
            car.price(longest),
            Decimal::from(1_000_000_000) * Decimal::from(MAX_RENTAL_DAYS)
        );
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert_eq!(Config::new(Vec::new()), Err(CatalogError::Empty));

        let error = toml::from_str::<Config>("_version = \"1\"\ncars = []\n").unwrap_err();
        assert!(error.to_string().contains("at least one car"));
    }

    #[test]
    fn blank_ids_fail_to_parse() {
        let error = toml::from_str::<Config>(
            "_version = \"1\"\n[[cars]]\nid = \"\"\nbrand = \"Tata\"\nmodel = \"Punch\"\nprice_per_day = 1\n",
        )
        .unwrap_err();
        assert!(error.to_string().contains("Invalid car id"));
    }
}
