use std::path::PathBuf;

use anyhow::Context;
use pe_config::PeConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration, reading `.env` from the working directory first.
///
/// # Errors
///
/// Fails when a config file or environment value cannot be parsed.
pub fn load_config() -> anyhow::Result<PeConfig> {
    PeConfig::load_with_dotenv().context("failed to load pereview configuration")
}

/// The dataset to work on: `--csv` if given, else `data.csv_file`.
///
/// # Errors
///
/// Fails when no dataset is configured or the path is not a file.
pub fn resolve_dataset_path(flags: &GlobalFlags, config: &PeConfig) -> anyhow::Result<PathBuf> {
    config
        .data
        .dataset_path(flags.csv.as_deref())
        .context("cannot locate the review dataset")
}
