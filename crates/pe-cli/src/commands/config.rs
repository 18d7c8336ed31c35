use std::path::PathBuf;

use pe_config::{DisplayConfig, PROJECT_CONFIG_FILE, PeConfig, ReviewSettings};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ConfigResponse<'a> {
    csv_file: Option<PathBuf>,
    csv_override: Option<&'a PathBuf>,
    user_config: Option<PathBuf>,
    user_config_found: bool,
    project_config: &'static str,
    project_config_found: bool,
    display: &'a DisplayConfig,
    review: &'a ReviewSettings,
}

/// Handle `pereview config`: print the merged configuration and where it came from.
pub fn handle(config: &PeConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let user_config = PeConfig::global_config_path();
    let response = ConfigResponse {
        csv_file: config.data.csv_file.as_ref().map(|path| path.relative()),
        csv_override: flags.csv.as_ref(),
        user_config_found: user_config.as_deref().is_some_and(std::path::Path::is_file),
        user_config,
        project_config: PROJECT_CONFIG_FILE,
        project_config_found: std::path::Path::new(PROJECT_CONFIG_FILE).is_file(),
        display: &config.display,
        review: &config.review,
    };
    output(&response, flags.format)
}
