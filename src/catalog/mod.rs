pub mod sensor_types;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::debug;
use rand::Rng;
use thiserror::Error;

pub use sensor_types::{SensorType, LOCATIONS, SENSOR_TYPES};

/// Number of sensors in every generated catalog.
pub const SENSOR_COUNT: u32 = 20;

/// Install dates are drawn from this many days before the reference time.
pub const INSTALL_AGE_DAYS: std::ops::RangeInclusive<i64> = 30..=365;

#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    pub id: u32,
    pub name: String,
    pub kind: String,
    pub location: String,
    pub install_date: NaiveDate,
}

impl Sensor {
    /// Resolves the [`SensorType`] this sensor was assigned.
    pub fn sensor_type(&self) -> Result<&'static SensorType, CatalogError> {
        sensor_types::lookup(&self.kind)
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Unknown sensor type: {0}")]
    UnknownSensorType(String),
}

/// Builds the fixed catalog of [`SENSOR_COUNT`] sensors.
///
/// Type, location and install age are drawn uniformly from `rng`; the name is
/// derived from the index only.
pub fn build_catalog<R: Rng>(rng: &mut R, now: NaiveDateTime) -> Vec<Sensor> {
    (1..=SENSOR_COUNT)
        .map(|id| {
            let sensor_type = &SENSOR_TYPES[rng.random_range(0..SENSOR_TYPES.len())];
            let location = LOCATIONS[rng.random_range(0..LOCATIONS.len())];
            let age = rng.random_range(INSTALL_AGE_DAYS);
            let install_date = (now - Duration::days(age)).date();

            let sensor = Sensor {
                id,
                name: format!("Sensor-{}", id),
                kind: sensor_type.kind.to_string(),
                location: location.to_string(),
                install_date,
            };
            debug!(
                "Catalog entry: id={}, kind={}, location={}, install_date={}",
                sensor.id, sensor.kind, sensor.location, sensor.install_date
            );
            sensor
        })
        .collect()
}
