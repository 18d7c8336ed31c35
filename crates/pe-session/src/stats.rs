//! Review progress, derived fresh from the records on every call.

use std::fmt;

use pe_core::Record;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReviewStats {
    pub reviewed: usize,
    pub total: usize,
    pub remaining: usize,
    /// `reviewed / total * 100`, or 0 for an empty dataset.
    pub percent_complete: f64,
}

impl ReviewStats {
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

impl fmt::Display for ReviewStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reviewed: {}/{} ({:.1}%) \u{2022} Remaining: {}",
            self.reviewed, self.total, self.percent_complete, self.remaining
        )
    }
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn stats(records: &[Record]) -> ReviewStats {
    let total = records.len();
    let reviewed = records.iter().filter(|record| record.is_reviewed()).count();
    let percent_complete = if total == 0 {
        0.0
    } else {
        reviewed as f64 / total as f64 * 100.0
    };

    ReviewStats {
        reviewed,
        total,
        remaining: total - reviewed,
        percent_complete,
    }
}
