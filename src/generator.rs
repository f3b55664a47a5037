use crate::catalog::{build_catalog, Sensor};
use crate::config::GeneratorConfig;
use crate::export::{
    draw_sample, DatasetExporter, ExportError, MEASUREMENTS_FILE, SAMPLE_FILE, SAMPLE_SIZE,
};
use crate::series::{Measurement, SeriesError, SeriesSynthesizer};
use chrono::{Local, NaiveDateTime, SubsecRound};
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_OUTPUT_FOLDER: &str = "datasets";
pub const DEFAULT_SEED: u64 = 42;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Configuration error: {0}")]
    Config(#[from] envconfig::Error),

    #[error("Series error: {0}")]
    Series(#[from] SeriesError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Everything produced by one run, before export.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub sensors: Vec<Sensor>,
    pub measurements: Vec<Measurement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub sensors: usize,
    pub measurements: usize,
    pub sample: usize,
    pub output_folder: PathBuf,
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Generated {} sensors", self.sensors)?;
        writeln!(f, "Generated {} measurements", self.measurements)?;
        writeln!(f, "Generated a sample of {} measurements", self.sample)?;
        write!(f, "Files saved to {} folder", self.output_folder.display())
    }
}

pub struct DatasetGenerator<R> {
    output_folder: PathBuf,
    now: NaiveDateTime,
    rng: R,
}

impl DatasetGenerator<ChaCha8Rng> {
    pub fn from_config(config: GeneratorConfig) -> Self {
        let now = config.now.unwrap_or_else(|| Local::now().naive_local());
        info!(
            "Generating dataset into {} (seed={}, now={})",
            config.output_folder, config.seed, now
        );
        DatasetGenerator::new(
            config.output_folder,
            now,
            ChaCha8Rng::seed_from_u64(config.seed),
        )
    }
}

impl<R: Rng> DatasetGenerator<R> {
    /// `now` is truncated to whole seconds; it fixes both the catalog install
    /// dates and the series window.
    pub fn new(output_folder: impl Into<PathBuf>, now: NaiveDateTime, rng: R) -> Self {
        DatasetGenerator {
            output_folder: output_folder.into(),
            now: now.trunc_subsecs(0),
            rng,
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Builds the catalog and synthesizes every sensor's series in memory.
    pub fn generate(&mut self) -> Result<Dataset, GeneratorError> {
        let sensors = build_catalog(&mut self.rng, self.now);
        info!("Built catalog of {} sensors", sensors.len());

        let synthesizer = SeriesSynthesizer::new(self.now)?;
        let measurements = synthesizer.synthesize_all(&sensors, &mut self.rng)?;

        Ok(Dataset {
            sensors,
            measurements,
        })
    }

    /// Generates the dataset and writes the catalog, full series and sample
    /// tables.
    pub fn run(mut self) -> Result<DatasetSummary, GeneratorError> {
        let dataset = self.generate()?;

        let exporter = DatasetExporter::new(&self.output_folder)?;
        exporter.write_sensors(&dataset.sensors)?;
        exporter.write_measurements(MEASUREMENTS_FILE, &dataset.measurements)?;

        let sample = draw_sample(&dataset.measurements, SAMPLE_SIZE, &mut self.rng);
        exporter.write_measurements(SAMPLE_FILE, sample.iter().copied())?;

        Ok(DatasetSummary {
            sensors: dataset.sensors.len(),
            measurements: dataset.measurements.len(),
            sample: sample.len(),
            output_folder: self.output_folder,
        })
    }
}

/// Generates the dataset into `output_folder` (default `datasets`) using the
/// local wall clock and the default seed.
pub fn generate_iot_dataset(output_folder: Option<&Path>) -> Result<DatasetSummary, GeneratorError> {
    let output_folder = output_folder.unwrap_or_else(|| Path::new(DEFAULT_OUTPUT_FOLDER));
    DatasetGenerator::new(
        output_folder,
        Local::now().naive_local(),
        ChaCha8Rng::seed_from_u64(DEFAULT_SEED),
    )
    .run()
}
