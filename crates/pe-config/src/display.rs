//! How report text is presented.

use serde::{Deserialize, Serialize};

/// Terms highlighted in report text when no list is configured.
pub const DEFAULT_KEYWORDS: [&str; 8] = [
    "pulmonary embolism",
    "pulmonary emboli",
    "embolism",
    "emboli",
    "embolus",
    "thrombus",
    "thrombi",
    r"\bPE\b",
];

const fn enabled() -> bool {
    true
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(ToString::to_string).collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Break report text into paragraphs at upper-case section headers.
    #[serde(default = "enabled")]
    pub reflow: bool,

    /// Highlight `keywords` in report text.
    #[serde(default = "enabled")]
    pub highlight: bool,

    /// Case-insensitive terms to highlight, matched anywhere in a word. A
    /// leading or trailing `\b` pins that end to a word boundary.
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            reflow: enabled(),
            highlight: enabled(),
            keywords: default_keywords(),
        }
    }
}
