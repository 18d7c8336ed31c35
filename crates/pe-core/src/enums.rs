//! Review vocabularies and the three-state PE status.
//!
//! Every vocabulary enum exposes `as_str()` (the exact spelling stored in the
//! dataset), an `ALL` slice for prompts and error messages, and a
//! case-insensitive `FromStr`. Cell parsing treats blank and `NaN` cells as
//! "no value" so datasets touched by spreadsheet tools load cleanly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::FieldParseError;

/// Whether a raw cell carries no value.
#[must_use]
pub fn is_blank(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan")
}

fn lookup<T: Copy>(
    field: &'static str,
    value: &str,
    all: &[T],
    as_str: fn(T) -> &'static str,
) -> Result<T, FieldParseError> {
    let wanted = value.trim();
    all.iter()
        .copied()
        .find(|candidate| as_str(*candidate).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| {
            let expected = all.iter().map(|v| as_str(*v)).collect::<Vec<_>>();
            FieldParseError::new(field, value, &expected)
        })
}

// ---------------------------------------------------------------------------
// PeFinding / PeStatus
// ---------------------------------------------------------------------------

/// A binary PE label, as produced by the reviewer or a reference model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeFinding {
    Absent,
    Present,
}

impl PeFinding {
    pub const ALL: [Self; 2] = [Self::Absent, Self::Present];

    /// Return the `0`/`1` spelling used in the dataset.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Absent => "0",
            Self::Present => "1",
        }
    }

    /// Parse a binary cell leniently.
    ///
    /// Accepts `0`, `1`, `0.0` and `1.0`. Anything else (blank, `NaN`, `2`,
    /// free text) is not a binary label and yields `None`.
    #[must_use]
    pub fn from_binary_cell(cell: &str) -> Option<Self> {
        match cell.trim() {
            "0" | "0.0" => Some(Self::Absent),
            "1" | "1.0" => Some(Self::Present),
            _ => None,
        }
    }
}

impl fmt::Display for PeFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeFinding {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_binary_cell(s).ok_or_else(|| FieldParseError::new("PE Present", s, &["0", "1"]))
    }
}

/// The reviewer's decision on a record.
///
/// ```text
/// unreviewed → reviewed(absent | present)
/// reviewed(x) → reviewed(y)     (re-review)
/// ```
///
/// There is no transition back to `Unreviewed`: a record only becomes
/// reviewed through a successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "finding")]
pub enum PeStatus {
    #[default]
    Unreviewed,
    Reviewed(PeFinding),
}

impl PeStatus {
    #[must_use]
    pub const fn is_reviewed(self) -> bool {
        matches!(self, Self::Reviewed(_))
    }

    #[must_use]
    pub const fn finding(self) -> Option<PeFinding> {
        match self {
            Self::Unreviewed => None,
            Self::Reviewed(finding) => Some(finding),
        }
    }

    /// The cell written back to the dataset: blank, `0` or `1`.
    #[must_use]
    pub const fn as_cell(self) -> &'static str {
        match self {
            Self::Unreviewed => "",
            Self::Reviewed(finding) => finding.as_str(),
        }
    }

    /// Parse a `Manual_PE_Present` cell.
    ///
    /// Blank cells are `Unreviewed`; `0`, `1`, `0.0`, `1.0` are reviewed.
    pub fn from_cell(cell: &str) -> Result<Self, FieldParseError> {
        if is_blank(cell) {
            return Ok(Self::Unreviewed);
        }
        cell.parse::<PeFinding>().map(Self::Reviewed)
    }
}

// ---------------------------------------------------------------------------
// Confidence
// ---------------------------------------------------------------------------

/// Reviewer confidence in a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Confidence {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("Confidence", s, &Self::ALL, Self::as_str)
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Most proximal extent of the embolus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Central,
    Segmental,
    Subsegmental,
    Multiple,
    Unknown,
}

impl Location {
    pub const ALL: [Self; 5] = [
        Self::Central,
        Self::Segmental,
        Self::Subsegmental,
        Self::Multiple,
        Self::Unknown,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Central => "Central",
            Self::Segmental => "Segmental",
            Self::Subsegmental => "Subsegmental",
            Self::Multiple => "Multiple",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("PE Location", s, &Self::ALL, Self::as_str)
    }
}

// ---------------------------------------------------------------------------
// Acuity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Acuity {
    Acute,
    Chronic,
    #[serde(rename = "Acute-on-chronic")]
    AcuteOnChronic,
    Unknown,
}

impl Acuity {
    pub const ALL: [Self; 4] = [
        Self::Acute,
        Self::Chronic,
        Self::AcuteOnChronic,
        Self::Unknown,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Acute => "Acute",
            Self::Chronic => "Chronic",
            Self::AcuteOnChronic => "Acute-on-chronic",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Acuity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Acuity {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("PE Acuity", s, &Self::ALL, Self::as_str)
    }
}

// ---------------------------------------------------------------------------
// Laterality
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Laterality {
    Right,
    Left,
    Bilateral,
    Unknown,
}

impl Laterality {
    pub const ALL: [Self; 4] = [Self::Right, Self::Left, Self::Bilateral, Self::Unknown];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Right => "Right",
            Self::Left => "Left",
            Self::Bilateral => "Bilateral",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Laterality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Laterality {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("PE Laterality", s, &Self::ALL, Self::as_str)
    }
}

// ---------------------------------------------------------------------------
// ClotBurden
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClotBurden {
    High,
    Low,
    Unknown,
}

impl ClotBurden {
    pub const ALL: [Self; 3] = [Self::High, Self::Low, Self::Unknown];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Low => "Low",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ClotBurden {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClotBurden {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("PE Clot Burden", s, &Self::ALL, Self::as_str)
    }
}

/// Parse an optional vocabulary cell: blank cells are `None`.
pub fn parse_optional<T: FromStr<Err = FieldParseError>>(
    cell: &str,
) -> Result<Option<T>, FieldParseError> {
    if is_blank(cell) {
        Ok(None)
    } else {
        cell.parse().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("", PeStatus::Unreviewed)]
    #[case("   ", PeStatus::Unreviewed)]
    #[case("NaN", PeStatus::Unreviewed)]
    #[case("0", PeStatus::Reviewed(PeFinding::Absent))]
    #[case("0.0", PeStatus::Reviewed(PeFinding::Absent))]
    #[case("1", PeStatus::Reviewed(PeFinding::Present))]
    #[case(" 1.0 ", PeStatus::Reviewed(PeFinding::Present))]
    fn pe_status_parses_cells(#[case] cell: &str, #[case] expected: PeStatus) {
        assert_eq!(PeStatus::from_cell(cell).unwrap(), expected);
    }

    #[test]
    fn pe_status_rejects_non_binary_cells() {
        let err = PeStatus::from_cell("yes").unwrap_err();
        assert_eq!(err.field, "PE Present");
        assert_eq!(err.value, "yes");
    }

    #[test]
    fn pe_status_writes_canonical_cells() {
        assert_eq!(PeStatus::Unreviewed.as_cell(), "");
        assert_eq!(PeStatus::Reviewed(PeFinding::Absent).as_cell(), "0");
        assert_eq!(PeStatus::Reviewed(PeFinding::Present).as_cell(), "1");
    }

    #[rstest]
    #[case("2")]
    #[case("")]
    #[case("nan")]
    #[case("positive")]
    fn reference_labels_outside_binary_are_none(#[case] cell: &str) {
        assert_eq!(PeFinding::from_binary_cell(cell), None);
    }

    #[test]
    fn vocabularies_parse_case_insensitively() {
        assert_eq!("central".parse::<Location>().unwrap(), Location::Central);
        assert_eq!(
            "acute-on-chronic".parse::<Acuity>().unwrap(),
            Acuity::AcuteOnChronic
        );
        assert_eq!("BILATERAL".parse::<Laterality>().unwrap(), Laterality::Bilateral);
        assert_eq!("High".parse::<Confidence>().unwrap(), Confidence::High);
        assert_eq!("low".parse::<ClotBurden>().unwrap(), ClotBurden::Low);
    }

    #[test]
    fn unknown_vocabulary_value_lists_expected_values() {
        let err = "lobar".parse::<Location>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid PE Location value 'lobar' (expected one of: Central, Segmental, Subsegmental, Multiple, Unknown)"
        );
    }

    #[test]
    fn optional_cells_treat_blank_as_none() {
        assert_eq!(parse_optional::<Laterality>("").unwrap(), None);
        assert_eq!(parse_optional::<Laterality>("Left").unwrap(), Some(Laterality::Left));
        assert!(parse_optional::<Laterality>("Up").is_err());
    }

    #[test]
    fn as_str_round_trips_every_variant() {
        for value in Location::ALL {
            assert_eq!(value.as_str().parse::<Location>().unwrap(), value);
        }
        for value in Acuity::ALL {
            assert_eq!(value.as_str().parse::<Acuity>().unwrap(), value);
        }
        for value in Laterality::ALL {
            assert_eq!(value.as_str().parse::<Laterality>().unwrap(), value);
        }
        for value in ClotBurden::ALL {
            assert_eq!(value.as_str().parse::<ClotBurden>().unwrap(), value);
        }
        for value in Confidence::ALL {
            assert_eq!(value.as_str().parse::<Confidence>().unwrap(), value);
        }
    }
}
