use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{Error, Result};

fn default_log_level() -> String {
    "info".to_string()
}

/// Run settings, usually read from a JSON file and patched from the command line.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct UserConfig {
    /// Overpass-style JSON document with an `elements` array.
    pub input_path: PathBuf,
    pub linear_output_path: PathBuf,
    pub areal_output_path: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Rewrite outputs that already exist instead of keeping them.
    #[serde(default)]
    pub overwrite: bool,
}

impl UserConfig {
    pub fn new(input_path: PathBuf, linear_output_path: PathBuf, areal_output_path: PathBuf) -> Self {
        UserConfig {
            input_path,
            linear_output_path,
            areal_output_path,
            log_level: default_log_level(),
            overwrite: false,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|err| {
            Error::Config(format!("could not open {}: {err}", path.display()))
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|err| {
            Error::Config(format!("could not parse {}: {err}", path.display()))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.linear_output_path == self.areal_output_path {
            return Err(Error::Config(
                "linear and areal outputs must be different files".to_string(),
            ));
        }
        Ok(())
    }
}
