use energycore::prelude::ClientConfig;
use log::warn;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_ENV: &str = "PREDICTOR_CONFIG";

/// Same YAML layout the command-line driver reads.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct VisualizerConfig {
    #[serde(flatten)]
    pub client: ClientConfig,
    pub export_dir: PathBuf,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl VisualizerConfig {
    /// Loads the file named by `PREDICTOR_CONFIG`, falling back to defaults.
    pub fn from_env() -> Self {
        let Ok(path) = env::var(CONFIG_ENV) else {
            return Self::default();
        };

        match Self::load(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!("ignoring {CONFIG_ENV}={path}: {err}");
                Self::default()
            }
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|e| e.to_string())?;
        let config: Self = serde_yaml::from_str(&contents).map_err(|e| e.to_string())?;
        config.client.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}
