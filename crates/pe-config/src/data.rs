//! Dataset location.

use std::path::{Path, PathBuf};

use figment::value::magic::RelativePathBuf;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DataConfig {
    /// CSV dataset to review. A relative path set in a TOML file resolves
    /// against that file's directory; one set from the environment resolves
    /// against the working directory.
    #[serde(default)]
    pub csv_file: Option<RelativePathBuf>,
}

impl DataConfig {
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.csv_file.is_some()
    }

    /// The dataset path, with `override_path` (from the command line) winning
    /// over configuration.
    ///
    /// # Errors
    ///
    /// `NotConfigured` when neither source names a file, `InvalidValue` when
    /// the named path is not an existing file.
    pub fn dataset_path(&self, override_path: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let path = match (override_path, &self.csv_file) {
            (Some(path), _) => path.to_path_buf(),
            (None, Some(configured)) => configured.relative(),
            (None, None) => {
                return Err(ConfigError::NotConfigured {
                    field: "data.csv_file".to_string(),
                });
            }
        };

        if !path.is_file() {
            return Err(ConfigError::InvalidValue {
                field: "data.csv_file".to_string(),
                reason: format!("{} is not a file", path.display()),
            });
        }
        Ok(path)
    }
}
