pub mod catalog;
pub mod config;
pub mod export;
pub mod generator;
pub mod series;

#[cfg(test)]
mod tests;

pub use generator::{generate_iot_dataset, DatasetGenerator, DatasetSummary, GeneratorError};
