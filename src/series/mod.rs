pub mod diurnal;

use crate::catalog::{CatalogError, Sensor};
use chrono::{Duration, NaiveDateTime, Timelike};
use log::{debug, info};
use rand::Rng;
use rand_distr::{Distribution, Normal, NormalError};
use thiserror::Error;

/// Length of the synthesized history, ending at the reference time.
pub const WINDOW_DAYS: i64 = 30;

/// Readings inside this many days of the reference time are hourly; older
/// readings are thinned to one every three hours.
pub const DENSE_WINDOW_DAYS: i64 = 7;

pub const NOISE_STD_DEV: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub id: u64,
    pub sensor_id: u32,
    pub timestamp: NaiveDateTime,
    pub value: f64,
    pub unit: &'static str,
}

#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Invalid noise model: {0}")]
    NoiseModel(#[from] NormalError),
}

/// Run-wide measurement id sequence, starting at 1.
#[derive(Debug)]
pub struct MeasurementIds {
    next: u64,
}

impl MeasurementIds {
    pub fn new() -> Self {
        MeasurementIds { next: 1 }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}

impl Default for MeasurementIds {
    fn default() -> Self {
        Self::new()
    }
}

/// The half-open interval `[start, end)` a series covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl SeriesWindow {
    pub fn ending_at(now: NaiveDateTime) -> Self {
        SeriesWindow {
            start: now - Duration::days(WINDOW_DAYS),
            end: now,
        }
    }

    /// Next sample time after `cursor`: one hour later, or three while the
    /// remaining window still exceeds [`DENSE_WINDOW_DAYS`].
    pub fn advance(&self, cursor: NaiveDateTime) -> NaiveDateTime {
        let next = cursor + Duration::hours(1);
        if self.end - next > Duration::days(DENSE_WINDOW_DAYS) {
            next + Duration::hours(2)
        } else {
            next
        }
    }

    pub fn timestamps(&self) -> impl Iterator<Item = NaiveDateTime> {
        let window = *self;
        std::iter::successors(Some(window.start), move |&cursor| Some(window.advance(cursor)))
            .take_while(move |&cursor| cursor < window.end)
    }
}

pub struct SeriesSynthesizer {
    window: SeriesWindow,
    noise: Normal<f64>,
}

impl SeriesSynthesizer {
    pub fn new(now: NaiveDateTime) -> Result<Self, SeriesError> {
        Ok(SeriesSynthesizer {
            window: SeriesWindow::ending_at(now),
            noise: Normal::new(0.0, NOISE_STD_DEV)?,
        })
    }

    /// Synthesizes the series of a single sensor, drawing ids from `ids`.
    pub fn synthesize<R: Rng>(
        &self,
        sensor: &Sensor,
        ids: &mut MeasurementIds,
        rng: &mut R,
    ) -> Result<Vec<Measurement>, SeriesError> {
        let sensor_type = sensor.sensor_type()?;

        let measurements: Vec<Measurement> = self
            .window
            .timestamps()
            .map(|timestamp| {
                let base_value = diurnal::base_value(sensor_type, timestamp.hour());
                let noise = self.noise.sample(&mut *rng);
                Measurement {
                    id: ids.next_id(),
                    sensor_id: sensor.id,
                    timestamp,
                    value: diurnal::apply_noise(base_value, noise, sensor_type),
                    unit: sensor_type.unit,
                }
            })
            .collect();

        debug!(
            "Synthesized {} readings for sensor {} ({})",
            measurements.len(),
            sensor.id,
            sensor.kind
        );
        Ok(measurements)
    }

    /// Synthesizes every sensor in catalog order with one shared id sequence.
    pub fn synthesize_all<R: Rng>(
        &self,
        catalog: &[Sensor],
        rng: &mut R,
    ) -> Result<Vec<Measurement>, SeriesError> {
        let mut ids = MeasurementIds::new();
        let mut measurements = Vec::new();
        for sensor in catalog {
            measurements.extend(self.synthesize(sensor, &mut ids, rng)?);
        }

        info!(
            "Synthesized {} measurements between {} and {}",
            ids.issued(),
            self.window.start,
            self.window.end
        );
        Ok(measurements)
    }
}
