pub mod records;

use crate::catalog::Sensor;
use crate::series::Measurement;
use log::{debug, info};
use rand::seq::index;
use rand::Rng;
use records::{CsvRecord, MeasurementRecord, SensorRecord};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SENSORS_FILE: &str = "01_sensors.csv";
pub const MEASUREMENTS_FILE: &str = "01_measurements.csv";
pub const SAMPLE_FILE: &str = "01_measurements_sample.csv";

/// Upper bound on the number of rows in the sample table.
pub const SAMPLE_SIZE: usize = 5000;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create output folder {path}: {source}")]
    CreateFolder {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("Failed to finalize {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Writes the dataset tables into one output folder.
pub struct DatasetExporter {
    output_folder: PathBuf,
}

impl DatasetExporter {
    /// Creates the output folder if it does not exist yet.
    pub fn new(output_folder: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let output_folder = output_folder.into();
        fs::create_dir_all(&output_folder).map_err(|source| ExportError::CreateFolder {
            path: output_folder.clone(),
            source,
        })?;
        debug!("Output folder ready: {}", output_folder.display());
        Ok(DatasetExporter { output_folder })
    }

    pub fn output_folder(&self) -> &Path {
        &self.output_folder
    }

    pub fn write_sensors(&self, sensors: &[Sensor]) -> Result<PathBuf, ExportError> {
        self.write_table(SENSORS_FILE, sensors.iter().map(SensorRecord::from))
    }

    pub fn write_measurements<'a, I>(
        &self,
        file_name: &str,
        measurements: I,
    ) -> Result<PathBuf, ExportError>
    where
        I: IntoIterator<Item = &'a Measurement>,
    {
        self.write_table(
            file_name,
            measurements.into_iter().map(MeasurementRecord::from),
        )
    }

    /// Writes the table to a sibling `.partial` file and renames it into
    /// place, so `file_name` is either complete or untouched.
    fn write_table<T, I>(&self, file_name: &str, records: I) -> Result<PathBuf, ExportError>
    where
        T: CsvRecord,
        I: IntoIterator<Item = T>,
    {
        let path = self.output_folder.join(file_name);
        let partial = self.output_folder.join(format!("{}.partial", file_name));

        let result = write_csv(&partial, records);
        let rows = match result {
            Ok(rows) => rows,
            Err(source) => {
                let _ = fs::remove_file(&partial);
                return Err(ExportError::Csv { path, source });
            }
        };

        fs::rename(&partial, &path).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        info!("Wrote {} rows to {}", rows, path.display());
        Ok(path)
    }
}

fn write_csv<T, I>(path: &Path, records: I) -> Result<usize, csv::Error>
where
    T: CsvRecord,
    I: IntoIterator<Item = T>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(T::HEADER)?;

    let mut rows = 0;
    for record in records {
        writer.serialize(record)?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}

/// Draws up to `size` distinct items uniformly without replacement, in draw
/// order.
pub fn draw_sample<'a, T, R: Rng>(items: &'a [T], size: usize, rng: &mut R) -> Vec<&'a T> {
    let amount = size.min(items.len());
    index::sample(rng, items.len(), amount)
        .into_iter()
        .map(|i| &items[i])
        .collect()
}
