//! Review workflow settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const fn default_auto_advance() -> bool {
    true
}

const fn default_lock_timeout_secs() -> u64 {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReviewSettings {
    /// Move to the next unreviewed report after a successful save.
    #[serde(default = "default_auto_advance")]
    pub auto_advance: bool,

    /// How long a write waits for another reviewer's lock on the dataset.
    #[serde(default = "default_lock_timeout_secs")]
    pub lock_timeout_secs: u64,
}

impl ReviewSettings {
    #[must_use]
    pub const fn lock_timeout(&self) -> Duration {
        Duration::from_secs(self.lock_timeout_secs)
    }
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            auto_advance: default_auto_advance(),
            lock_timeout_secs: default_lock_timeout_secs(),
        }
    }
}
