use chrono::NaiveDateTime;
use envconfig::Envconfig;
use log::debug;

#[derive(Envconfig, Clone, Debug)]
pub struct GeneratorConfig {
    #[envconfig(from = "DATASET_OUTPUT_FOLDER", default = "datasets")]
    pub output_folder: String,

    #[envconfig(from = "DATASET_SEED", default = "42")]
    pub seed: u64,

    /// Fixed reference time, e.g. `2024-01-31T00:00:00`. Falls back to the
    /// local wall clock when unset.
    #[envconfig(from = "DATASET_NOW")]
    pub now: Option<NaiveDateTime>,
}

impl GeneratorConfig {
    pub fn new() -> Result<Self, envconfig::Error> {
        let config = Self::init_from_env()?;
        debug!(
            "GeneratorConfig loaded: output_folder={}, seed={}, now={:?}",
            config.output_folder, config.seed, config.now
        );
        Ok(config)
    }
}
