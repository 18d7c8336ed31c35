use std::path::PathBuf;

use anyhow::Context;
use pe_config::PeConfig;
use pe_session::ReviewSession;
use pe_store::CsvStore;

use crate::progress::Progress;
use crate::ui;
use crate::view::CardStyle;

/// Resources shared by every dataset command, initialized once at startup.
pub struct AppContext {
    pub config: PeConfig,
    pub session: ReviewSession,
    pub dataset_path: PathBuf,
    pub style: CardStyle,
}

impl AppContext {
    /// Load the dataset and open a review session on it.
    ///
    /// # Errors
    ///
    /// Fails when the dataset cannot be loaded or the highlight keywords are invalid.
    pub fn init(dataset_path: PathBuf, config: PeConfig) -> anyhow::Result<Self> {
        let style = CardStyle::from_config(&config.display, ui::prefs().color)
            .context("invalid display.keywords")?;

        let spinner = Progress::spinner(&format!("Loading {}", dataset_path.display()));
        let session = match ReviewSession::open(CsvStore::new(&dataset_path)) {
            Ok(session) => {
                spinner.finish_clear();
                session
            }
            Err(error) => {
                spinner.finish_err("failed to load dataset");
                return Err(error).context("failed to open review session");
            }
        };

        Ok(Self {
            config,
            session,
            dataset_path,
            style,
        })
    }
}
