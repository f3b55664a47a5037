use log::error;
use std::process;

use iot_dataset_generator::{config::GeneratorConfig, DatasetGenerator, GeneratorError};

fn run() -> Result<(), GeneratorError> {
    let config = GeneratorConfig::new().map_err(|e| {
        error!("Failed to initialize config: {}", e);
        e
    })?;

    let summary = DatasetGenerator::from_config(config).run()?;
    println!("{}", summary);
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        error!("Dataset generation failed: {}", e);
        process::exit(1);
    }
}
